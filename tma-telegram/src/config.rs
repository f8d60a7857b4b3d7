//! Telegram 侧配置：对外的 web app URL 与启动参数。
//! 从环境变量 WEBAPP_URL（或 NGROK_URL）、TG_LAUNCH_PARAMS、TG_INIT_DATA 加载。

use anyhow::{Context, Result};
use std::env;
use url::Url;

use crate::init_data::{InitData, LaunchParams};

/// Telegram integration config. Everything is optional: without launch params the bridge runs anonymous.
#[derive(Debug, Clone, Default)]
pub struct TelegramConfig {
    /// Public HTTPS URL the bot's web-app buttons open.
    pub webapp_url: Option<Url>,
    pub launch_params: LaunchParams,
}

impl TelegramConfig {
    /// 从环境变量加载。TG_LAUNCH_PARAMS 为启动 fragment；设置 TG_INIT_DATA 时覆盖其中的 init data。
    pub fn from_env() -> Result<Self> {
        let webapp_url = env::var("WEBAPP_URL")
            .or_else(|_| env::var("NGROK_URL"))
            .ok()
            .map(|raw| Url::parse(&raw).with_context(|| format!("WEBAPP_URL is not a URL: {}", raw)))
            .transpose()?;

        let mut launch_params = match env::var("TG_LAUNCH_PARAMS") {
            Ok(raw) => LaunchParams::parse(&raw).context("TG_LAUNCH_PARAMS")?,
            Err(_) => LaunchParams::default(),
        };
        if let Ok(raw) = env::var("TG_INIT_DATA") {
            launch_params.init_data = Some(InitData::parse(&raw).context("TG_INIT_DATA")?);
        }

        Ok(Self {
            webapp_url,
            launch_params,
        })
    }

    /// Replaces init data with `raw` (e.g. a CLI override).
    pub fn with_init_data(mut self, raw: &str) -> Result<Self> {
        self.launch_params.init_data = Some(InitData::parse(raw)?);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in ["WEBAPP_URL", "NGROK_URL", "TG_LAUNCH_PARAMS", "TG_INIT_DATA"] {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = TelegramConfig::from_env().unwrap();
        assert!(config.webapp_url.is_none());
        assert_eq!(config.launch_params, LaunchParams::default());
    }

    #[test]
    #[serial]
    fn test_from_env_reads_legacy_ngrok_url_and_init_data() {
        clear_env();
        env::set_var("NGROK_URL", "https://abc.ngrok.app");
        env::set_var("TG_LAUNCH_PARAMS", "tgWebAppPlatform=tdesktop");
        env::set_var("TG_INIT_DATA", "start_param=9&auth_date=1&hash=h");

        let config = TelegramConfig::from_env().unwrap();
        assert_eq!(config.webapp_url.unwrap().as_str(), "https://abc.ngrok.app/");
        assert_eq!(config.launch_params.platform, "tdesktop");
        assert_eq!(
            config.launch_params.init_data.unwrap().start_param.as_deref(),
            Some("9")
        );
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_bad_url() {
        clear_env();
        env::set_var("WEBAPP_URL", "not a url");
        assert!(TelegramConfig::from_env().is_err());
        clear_env();
    }

    #[test]
    fn test_with_init_data_override() {
        let config = TelegramConfig::default()
            .with_init_data("auth_date=1&hash=h&query_id=q")
            .unwrap();
        assert_eq!(
            config.launch_params.init_data.unwrap().query_id.as_deref(),
            Some("q")
        );
    }
}
