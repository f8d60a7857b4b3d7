//! Router: resolves locations against the route table and tracks the active route.
//!
//! A failed resolution leaves history and the active route untouched.

use tma_core::RouteError;
use tracing::{info, instrument, warn};

use crate::history::MemoryHistory;
use crate::pattern::RouteParams;
use crate::table::{ResolvedRoute, RouteTable};

/// Owns the route table and history; the bootstrap owns the router.
#[derive(Debug, Clone)]
pub struct Router<C> {
    table: RouteTable<C>,
    history: MemoryHistory,
    current: Option<ResolvedRoute<C>>,
}

impl<C: Clone> Router<C> {
    /// Creates a router over `table`; `base` prefixes every location (see [`crate::normalize_base`]).
    pub fn new(table: RouteTable<C>, base: &str) -> Self {
        Self {
            table,
            history: MemoryHistory::new(base),
            current: None,
        }
    }

    pub fn table(&self) -> &RouteTable<C> {
        &self.table
    }

    pub fn base(&self) -> &str {
        self.history.base()
    }

    /// Resolves a host location (base stripped when present) without navigating.
    pub fn resolve(&self, location: &str) -> Result<ResolvedRoute<C>, RouteError> {
        let path = self.history.strip_base(location);
        self.table.resolve(&path)
    }

    /// Navigates to `location`, adding a history entry.
    #[instrument(skip(self))]
    pub fn push(&mut self, location: &str) -> Result<&ResolvedRoute<C>, RouteError> {
        let resolved = self.resolve_logged(location)?;
        self.history.push(&resolved.path);
        Ok(self.activate(resolved))
    }

    /// Navigates to `location`, replacing the current history entry.
    #[instrument(skip(self))]
    pub fn replace(&mut self, location: &str) -> Result<&ResolvedRoute<C>, RouteError> {
        let resolved = self.resolve_logged(location)?;
        self.history.replace(&resolved.path);
        Ok(self.activate(resolved))
    }

    /// Moves through history by `delta` and activates that entry. `Ok(None)` when out of range.
    pub fn go(&mut self, delta: isize) -> Result<Option<&ResolvedRoute<C>>, RouteError> {
        let Some(location) = self.history.go(delta).map(str::to_string) else {
            return Ok(None);
        };
        match self.resolve(&location) {
            Ok(resolved) => Ok(Some(self.activate(resolved))),
            Err(e) => {
                self.history.go(-delta);
                Err(e)
            }
        }
    }

    pub fn back(&mut self) -> Result<Option<&ResolvedRoute<C>>, RouteError> {
        self.go(-1)
    }

    pub fn forward(&mut self) -> Result<Option<&ResolvedRoute<C>>, RouteError> {
        self.go(1)
    }

    /// Active route, `None` before the first successful navigation.
    pub fn current(&self) -> Option<&ResolvedRoute<C>> {
        self.current.as_ref()
    }

    /// Current location including the base, as shown to the host.
    pub fn current_location(&self) -> Option<&str> {
        self.history.location()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Base-prefixed URL of the route called `name`.
    pub fn href(&self, name: &str, params: &RouteParams) -> Result<String, RouteError> {
        let path = self.table.reverse(name, params)?;
        Ok(self.history.create_href(&path))
    }

    fn resolve_logged(&self, location: &str) -> Result<ResolvedRoute<C>, RouteError> {
        self.resolve(location).map_err(|e| {
            warn!(location = %location, error = %e, "step: navigation rejected");
            e
        })
    }

    fn activate(&mut self, resolved: ResolvedRoute<C>) -> &ResolvedRoute<C> {
        info!(
            route = %resolved.name,
            path = %resolved.path,
            inputs = resolved.inputs.len(),
            "step: route activated"
        );
        self.current.insert(resolved)
    }
}
