//! View abstraction: a unit of presentation activated by the router.

use crate::error::Result;
use crate::types::ViewInputs;
use serde::Serialize;

/// Output of a view render: the view name and its markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rendered {
    pub view: String,
    pub markup: String,
}

impl Rendered {
    pub fn new(view: impl Into<String>, markup: impl Into<String>) -> Self {
        Self {
            view: view.into(),
            markup: markup.into(),
        }
    }
}

/// A view receives its capabilities at construction; `render` only sees the route inputs.
pub trait View: Send + Sync {
    /// Route name this view is bound to.
    fn name(&self) -> &'static str;
    fn render(&self, inputs: &ViewInputs) -> Result<Rendered>;
}
