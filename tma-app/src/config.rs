//! 应用配置，从环境变量加载（需先调用 `dotenvy::dotenv()`）。
//!
//! BASE_URL（默认 `/`）、MOUNT_SELECTOR（默认 `#app`）、LOG_FILE（默认 `logs/tma.log`）；
//! Telegram 相关配置见 [`TelegramConfig::from_env`]。

use anyhow::Result;
use std::env;
use tma_telegram::TelegramConfig;

use crate::document::element_id;

pub const DEFAULT_BASE_URL: &str = "/";
pub const DEFAULT_MOUNT_SELECTOR: &str = "#app";
pub const DEFAULT_LOG_FILE: &str = "logs/tma.log";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Prefix of every app location, as set by the build/deploy environment.
    pub base_url: String,
    pub mount_selector: String,
    pub log_file: String,
    pub telegram: TelegramConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            mount_selector: DEFAULT_MOUNT_SELECTOR.to_string(),
            log_file: DEFAULT_LOG_FILE.to_string(),
            telegram: TelegramConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads from env. `base_url`, when given, overrides BASE_URL.
    pub fn load(base_url: Option<String>) -> Result<Self> {
        let base_url = base_url
            .or_else(|| env::var("BASE_URL").ok())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mount_selector =
            env::var("MOUNT_SELECTOR").unwrap_or_else(|_| DEFAULT_MOUNT_SELECTOR.to_string());
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
        let telegram = TelegramConfig::from_env()?;

        let config = Self {
            base_url,
            mount_selector,
            log_file,
            telegram,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        element_id(&self.mount_selector)?;
        if self.base_url.contains(['?', '#']) {
            anyhow::bail!("BASE_URL must be a path without query or fragment: {}", self.base_url);
        }
        if self.log_file.trim().is_empty() {
            anyhow::bail!("LOG_FILE must not be empty");
        }
        Ok(())
    }
}
