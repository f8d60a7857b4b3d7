//! # tma-core
//!
//! Core types and traits for the mini app: [`View`], [`PlatformBridge`], [`Store`], view inputs,
//! platform user, error taxonomy and tracing initialization. Used by tma-router, tma-telegram and tma-app.

pub mod error;
pub mod logger;
pub mod platform;
pub mod store;
pub mod types;
pub mod view;

pub use error::{Result, RouteError, TmaError};
pub use logger::{init_console_tracing, init_tracing};
pub use platform::PlatformBridge;
pub use store::Store;
pub use types::{ColorScheme, PlatformUser, ViewInputs};
pub use view::{Rendered, View};
