//! # tma-telegram
//!
//! Telegram platform layer for the mini app: launch parameter parsing, the [`TelegramWebApp`] bridge
//! (implements [`tma_core::PlatformBridge`]), host event sinks, user adapters and the teloxide inline
//! keyboards a bot uses to open the app. No polling, no init-data signature checks.

mod adapters;
mod bridge;
mod config;
mod init_data;
mod keyboard;

pub use adapters::ToPlatformUser;
pub use bridge::{BridgeEvent, EventSink, LogSink, RecordingSink, TelegramWebApp, MAX_DATA_LEN};
pub use config::TelegramConfig;
pub use init_data::{InitData, InitDataError, LaunchParams, WebAppUser};
pub use keyboard::{start_keyboard, InlineKeyboardMarkup, web_app_url, CREATE_PROFILE_TEXT, VIEW_PROFILE_TEXT};
