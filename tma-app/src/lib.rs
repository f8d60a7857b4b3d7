//! # tma-app
//!
//! The birthday profile mini app: route table, views, bootstrap/mount, and the `tma` CLI that hosts
//! it headlessly. Platform, picker and store capabilities come from the sibling crates.

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod document;
pub mod routes;
pub mod runner;
pub mod views;

pub use bootstrap::{
    Application, Bootstrap, BootstrapState, Capability, CapabilityKind, REGISTRATION_ORDER,
};
pub use cli::{Cli, Commands};
pub use config::AppConfig;
pub use document::{element_id, HostDocument, InMemoryDocument, HOST_ANCHOR_ID};
pub use routes::{route_table, ViewKind, BIRTHDATE_VIEW, PROFILE_VIEW, USER_ID_PARAM};
pub use runner::{
    build_application, launch_keyboard, parse_repl_line, render_location, route_listing, run,
    run_repl, ReplCommand,
};
pub use views::{birthdate_key, BirthdateView, ProfileView, ViewContext, Views};
