//! Error types for the mini app core.
//!
//! [`TmaError`] is the top-level error; [`RouteError`] is used for route table and navigation failures.

use thiserror::Error;

/// Top-level error for the mini app (mount, routing, registration, config, platform, views, IO).
#[derive(Error, Debug)]
pub enum TmaError {
    /// The anchor element is absent from the host document. Fatal at startup.
    #[error("Mount target missing: {0}")]
    MountTargetMissing(String),

    #[error("Route error: {0}")]
    Route(#[from] RouteError),

    #[error("Registration error: {0}")]
    Registration(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Platform error: {0}")]
    Platform(String),

    #[error("View error: {0}")]
    View(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors produced by the route table and router.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("No route matches path: {0}")]
    NotFound(String),

    #[error("Duplicate route name: {0}")]
    DuplicateName(String),

    #[error("Invalid route pattern: {0}")]
    InvalidPattern(String),

    #[error("Unknown route name: {0}")]
    UnknownName(String),

    #[error("Missing route parameter: {0}")]
    MissingParam(String),
}

/// Result type for core operations; uses [`TmaError`].
pub type Result<T> = std::result::Result<T, TmaError>;
