//! # tma-router
//!
//! Client-side routing for the mini app. A [`RouteTable`] holds [`RouteDescriptor`]s in declaration
//! order; a [`Router`] resolves locations against it (first match wins), forwards path parameters as
//! view inputs when the descriptor asks for it, and keeps a [`MemoryHistory`] of visited locations.

mod history;
mod pattern;
mod router;
mod table;

pub use history::{normalize_base, MemoryHistory};
pub use pattern::{normalize_path, RouteParams, RoutePattern, Segment};
pub use router::Router;
pub use table::{ResolvedRoute, RouteDescriptor, RouteTable};
