//! Host document seam: the page the app mounts into and its address bar.

use parking_lot::RwLock;
use std::collections::BTreeMap;
use tma_core::{Result, TmaError};

/// Id of the anchor element the host page ships with.
pub const HOST_ANCHOR_ID: &str = "app";

/// Returns the element id of an `#id` selector; other selector kinds are a config error.
pub fn element_id(selector: &str) -> Result<&str> {
    match selector.strip_prefix('#') {
        Some(id) if !id.is_empty() && !id.contains(|c: char| c.is_whitespace() || c == '#' || c == '.') => Ok(id),
        _ => Err(TmaError::Config(format!(
            "mount selector must be an id selector like #app, got {:?}",
            selector
        ))),
    }
}

/// Host page operations the application needs.
pub trait HostDocument: Send + Sync {
    /// Location currently shown by the host, base included.
    fn location(&self) -> String;
    fn set_location(&self, location: &str);
    fn has_element(&self, id: &str) -> bool;
    /// Replaces the content of element `id`.
    fn set_content(&self, id: &str, markup: &str) -> Result<()>;
    fn content(&self, id: &str) -> Option<String>;
}

/// Headless host page.
#[derive(Debug, Default)]
pub struct InMemoryDocument {
    location: RwLock<String>,
    elements: RwLock<BTreeMap<String, String>>,
}

impl InMemoryDocument {
    /// Page at `location` with no elements.
    pub fn new(location: &str) -> Self {
        Self {
            location: RwLock::new(location.to_string()),
            elements: RwLock::new(BTreeMap::new()),
        }
    }

    /// Page at `location` with the standard `#app` anchor.
    pub fn with_anchor(location: &str) -> Self {
        Self::new(location).with_element(HOST_ANCHOR_ID)
    }

    pub fn with_element(self, id: &str) -> Self {
        self.elements.write().insert(id.to_string(), String::new());
        self
    }
}

impl HostDocument for InMemoryDocument {
    fn location(&self) -> String {
        self.location.read().clone()
    }

    fn set_location(&self, location: &str) {
        *self.location.write() = location.to_string();
    }

    fn has_element(&self, id: &str) -> bool {
        self.elements.read().contains_key(id)
    }

    fn set_content(&self, id: &str, markup: &str) -> Result<()> {
        match self.elements.write().get_mut(id) {
            Some(content) => {
                *content = markup.to_string();
                Ok(())
            }
            None => Err(TmaError::MountTargetMissing(format!("#{}", id))),
        }
    }

    fn content(&self, id: &str) -> Option<String> {
        self.elements.read().get(id).cloned()
    }
}
