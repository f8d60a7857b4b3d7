//! Host chat-platform bridge.
//!
//! [`PlatformBridge`] is transport-agnostic; the Telegram WebApp implementation lives in `tma-telegram`.

use crate::error::Result;
use crate::types::{ColorScheme, PlatformUser};

/// Host-platform capabilities exposed to every view.
pub trait PlatformBridge: Send + Sync {
    /// Host client name (e.g. `ios`, `tdesktop`), `unknown` when not reported.
    fn platform(&self) -> String;
    /// The user who opened the app, when the host provides one.
    fn user(&self) -> Option<PlatformUser>;
    /// Launch parameter passed through the app link.
    fn start_param(&self) -> Option<String>;
    fn color_scheme(&self) -> ColorScheme;
    /// Tells the host the app finished loading.
    fn ready(&self) -> Result<()>;
    /// Asks the host to expand the app to full height.
    fn expand(&self) -> Result<()>;
    /// Asks the host to close the app.
    fn close(&self) -> Result<()>;
    /// Sends a payload back to the bot that launched the app.
    fn send_data(&self, data: &str) -> Result<()>;
}
