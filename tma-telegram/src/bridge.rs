//! Telegram WebApp implementation of [`PlatformBridge`].
//!
//! Host calls are posted to an [`EventSink`] as `{"eventType": ..., "eventData": ...}`, the shape the
//! Telegram clients accept through `postEvent`. Production hosts plug in their own sink; [`LogSink`]
//! only logs and [`RecordingSink`] keeps events for inspection.

use parking_lot::Mutex;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tma_core::{ColorScheme, PlatformBridge, PlatformUser, Result, TmaError};
use tracing::{info, instrument};

use crate::adapters::ToPlatformUser;
use crate::init_data::LaunchParams;

/// Maximum `send_data` payload accepted by Telegram clients, in bytes.
pub const MAX_DATA_LEN: usize = 4096;

/// One event posted to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BridgeEvent {
    #[serde(rename = "eventType")]
    pub event_type: String,
    #[serde(rename = "eventData")]
    pub event_data: Value,
}

impl BridgeEvent {
    pub fn new(event_type: &str, event_data: Value) -> Self {
        Self {
            event_type: event_type.to_string(),
            event_data,
        }
    }
}

/// Destination of host events.
pub trait EventSink: Send + Sync {
    fn post(&self, event: &BridgeEvent) -> Result<()>;
}

/// Logs each event at info level.
pub struct LogSink;

impl EventSink for LogSink {
    fn post(&self, event: &BridgeEvent) -> Result<()> {
        let payload = serde_json::to_string(event).map_err(|e| TmaError::Platform(e.to_string()))?;
        info!(event_type = %event.event_type, payload = %payload, "step: host event posted");
        Ok(())
    }
}

/// Keeps every posted event in memory.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<BridgeEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<BridgeEvent> {
        self.events.lock().clone()
    }

    pub fn event_types(&self) -> Vec<String> {
        self.events.lock().iter().map(|e| e.event_type.clone()).collect()
    }
}

impl EventSink for RecordingSink {
    fn post(&self, event: &BridgeEvent) -> Result<()> {
        self.events.lock().push(event.clone());
        Ok(())
    }
}

#[derive(Debug, Default)]
struct BridgeState {
    ready: bool,
    expanded: bool,
    closed: bool,
}

/// Bridge to the Telegram client hosting the mini app.
pub struct TelegramWebApp {
    params: LaunchParams,
    sink: Arc<dyn EventSink>,
    state: Mutex<BridgeState>,
}

impl TelegramWebApp {
    pub fn new(params: LaunchParams, sink: Arc<dyn EventSink>) -> Self {
        Self {
            params,
            sink,
            state: Mutex::new(BridgeState::default()),
        }
    }

    pub fn launch_params(&self) -> &LaunchParams {
        &self.params
    }

    pub fn is_ready(&self) -> bool {
        self.state.lock().ready
    }

    pub fn is_expanded(&self) -> bool {
        self.state.lock().expanded
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    fn post(&self, event_type: &str, event_data: Value) -> Result<()> {
        if self.is_closed() {
            return Err(TmaError::Platform(format!(
                "{} after web app was closed",
                event_type
            )));
        }
        self.sink.post(&BridgeEvent::new(event_type, event_data))
    }
}

impl PlatformBridge for TelegramWebApp {
    fn platform(&self) -> String {
        self.params.platform.clone()
    }

    fn user(&self) -> Option<PlatformUser> {
        self.params
            .init_data
            .as_ref()
            .and_then(|d| d.user.as_ref())
            .map(|u| u.to_platform_user())
    }

    fn start_param(&self) -> Option<String> {
        self.params
            .init_data
            .as_ref()
            .and_then(|d| d.start_param.clone())
    }

    fn color_scheme(&self) -> ColorScheme {
        self.params.color_scheme
    }

    #[instrument(skip(self))]
    fn ready(&self) -> Result<()> {
        self.post("web_app_ready", Value::Null)?;
        self.state.lock().ready = true;
        Ok(())
    }

    #[instrument(skip(self))]
    fn expand(&self) -> Result<()> {
        self.post("web_app_expand", Value::Null)?;
        self.state.lock().expanded = true;
        Ok(())
    }

    #[instrument(skip(self))]
    fn close(&self) -> Result<()> {
        self.post("web_app_close", Value::Null)?;
        self.state.lock().closed = true;
        Ok(())
    }

    /// Sends `data` to the bot; the client closes the app afterwards.
    #[instrument(skip(self, data), fields(len = data.len()))]
    fn send_data(&self, data: &str) -> Result<()> {
        if data.is_empty() || data.len() > MAX_DATA_LEN {
            return Err(TmaError::Platform(format!(
                "send_data payload must be 1..={} bytes, got {}",
                MAX_DATA_LEN,
                data.len()
            )));
        }
        self.post("web_app_data_send", json!({ "data": data }))?;
        self.state.lock().closed = true;
        Ok(())
    }
}
