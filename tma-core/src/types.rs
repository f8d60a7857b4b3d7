//! Core types: view inputs, platform user, color scheme.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named string inputs handed to an activated view (forwarded route parameters).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewInputs(BTreeMap<String, String>);

impl ViewInputs {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<BTreeMap<String, String>> for ViewInputs {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ViewInputs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// User identity as reported by the host chat platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformUser {
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub language_code: Option<String>,
    pub is_premium: bool,
    pub photo_url: Option<String>,
}

impl PlatformUser {
    /// First and last name joined by a space; first name only when there is no last name.
    pub fn full_name(&self) -> String {
        match self.last_name.as_deref() {
            Some(last) if !last.is_empty() => format!("{} {}", self.first_name, last),
            _ => self.first_name.clone(),
        }
    }
}

/// Host theme reported by the platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(last_name: Option<&str>) -> PlatformUser {
        PlatformUser {
            id: 42,
            first_name: "Ada".to_string(),
            last_name: last_name.map(str::to_string),
            username: None,
            language_code: None,
            is_premium: false,
            photo_url: None,
        }
    }

    #[test]
    fn test_full_name_with_and_without_last_name() {
        assert_eq!(user(Some("Lovelace")).full_name(), "Ada Lovelace");
        assert_eq!(user(None).full_name(), "Ada");
        assert_eq!(user(Some("")).full_name(), "Ada");
    }

    #[test]
    fn test_view_inputs_collect_and_get() {
        let inputs: ViewInputs = [("user_id", "42")].into_iter().collect();
        assert_eq!(inputs.get("user_id"), Some("42"));
        assert_eq!(inputs.get("other"), None);
        assert_eq!(inputs.len(), 1);
        assert!(ViewInputs::new().is_empty());
    }
}
