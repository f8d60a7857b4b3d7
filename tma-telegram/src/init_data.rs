//! Telegram WebApp launch parameters and init data.
//!
//! The host passes `tgWebAppData`, `tgWebAppPlatform`, `tgWebAppVersion` and `tgWebAppThemeParams`
//! in the launch URL fragment; `tgWebAppData` is itself a form-urlencoded string. The `hash`
//! field is kept as received and not verified here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tma_core::ColorScheme;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InitDataError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Invalid user JSON in {field}: {reason}")]
    InvalidUser { field: &'static str, reason: String },

    #[error("Invalid auth_date: {0}")]
    InvalidAuthDate(String),
}

/// User object as serialized by the Telegram client into init data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebAppUser {
    pub id: i64,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub language_code: Option<String>,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub allows_write_to_pm: bool,
    #[serde(default)]
    pub photo_url: Option<String>,
}

/// Parsed `tgWebAppData`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitData {
    pub query_id: Option<String>,
    pub user: Option<WebAppUser>,
    pub receiver: Option<WebAppUser>,
    pub chat_type: Option<String>,
    pub chat_instance: Option<String>,
    pub start_param: Option<String>,
    pub auth_date: DateTime<Utc>,
    pub hash: String,
}

fn parse_user(field: &'static str, raw: &str) -> Result<WebAppUser, InitDataError> {
    serde_json::from_str(raw).map_err(|e| InitDataError::InvalidUser {
        field,
        reason: e.to_string(),
    })
}

impl InitData {
    /// Parses a form-urlencoded init data string. `auth_date` and `hash` are required.
    pub fn parse(raw: &str) -> Result<Self, InitDataError> {
        let raw = raw.strip_prefix('?').unwrap_or(raw);

        let mut query_id = None;
        let mut user = None;
        let mut receiver = None;
        let mut chat_type = None;
        let mut chat_instance = None;
        let mut start_param = None;
        let mut auth_date = None;
        let mut hash = None;

        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            let value = value.into_owned();
            match key.as_ref() {
                "query_id" => query_id = Some(value),
                "user" => user = Some(parse_user("user", &value)?),
                "receiver" => receiver = Some(parse_user("receiver", &value)?),
                "chat_type" => chat_type = Some(value),
                "chat_instance" => chat_instance = Some(value),
                "start_param" => start_param = Some(value),
                "auth_date" => {
                    let secs: i64 = value
                        .parse()
                        .map_err(|_| InitDataError::InvalidAuthDate(value.clone()))?;
                    let date = DateTime::<Utc>::from_timestamp(secs, 0)
                        .ok_or_else(|| InitDataError::InvalidAuthDate(value.clone()))?;
                    auth_date = Some(date);
                }
                "hash" => hash = Some(value),
                _ => {}
            }
        }

        Ok(Self {
            query_id,
            user,
            receiver,
            chat_type,
            chat_instance,
            start_param,
            auth_date: auth_date.ok_or(InitDataError::MissingField("auth_date"))?,
            hash: hash.ok_or(InitDataError::MissingField("hash"))?,
        })
    }
}

/// Launch parameters from the app URL fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchParams {
    pub version: Option<String>,
    pub platform: String,
    pub color_scheme: ColorScheme,
    pub init_data: Option<InitData>,
}

impl Default for LaunchParams {
    fn default() -> Self {
        Self {
            version: None,
            platform: "unknown".to_string(),
            color_scheme: ColorScheme::Light,
            init_data: None,
        }
    }
}

#[derive(Deserialize)]
struct ThemeParams {
    bg_color: Option<String>,
}

/// Dark when the perceived brightness of `#rrggbb` is below the midpoint.
fn scheme_for_bg_color(color: &str) -> Option<ColorScheme> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok().map(f64::from);
    let (r, g, b) = (channel(0)?, channel(2)?, channel(4)?);
    let brightness = (0.299 * r + 0.587 * g + 0.114 * b) / 255.0;
    Some(if brightness < 0.5 {
        ColorScheme::Dark
    } else {
        ColorScheme::Light
    })
}

impl LaunchParams {
    /// Parses the launch fragment (leading `#` optional). Unknown keys are ignored.
    pub fn parse(fragment: &str) -> Result<Self, InitDataError> {
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
        let mut params = LaunchParams::default();

        for (key, value) in url::form_urlencoded::parse(fragment.as_bytes()) {
            match key.as_ref() {
                "tgWebAppData" => params.init_data = Some(InitData::parse(&value)?),
                "tgWebAppPlatform" => params.platform = value.into_owned(),
                "tgWebAppVersion" => params.version = Some(value.into_owned()),
                "tgWebAppThemeParams" => {
                    if let Some(scheme) = serde_json::from_str::<ThemeParams>(&value)
                        .ok()
                        .and_then(|t| t.bg_color)
                        .and_then(|c| scheme_for_bg_color(&c))
                    {
                        params.color_scheme = scheme;
                    }
                }
                _ => {}
            }
        }

        Ok(params)
    }
}
