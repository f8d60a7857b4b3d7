//! Route descriptors and the ordered, immutable route table.

use std::collections::HashSet;

use tma_core::{RouteError, ViewInputs};
use tracing::debug;

use crate::pattern::{RouteParams, RoutePattern};

/// Declarative binding from a path pattern to a view component.
#[derive(Debug, Clone)]
pub struct RouteDescriptor<C> {
    pub pattern: RoutePattern,
    pub name: String,
    pub component: C,
    /// Forward matched path parameters as the view's inputs.
    pub props_from_params: bool,
}

impl<C> RouteDescriptor<C> {
    /// Creates a descriptor without parameter forwarding. Fails on a malformed pattern.
    pub fn new(path: &str, name: impl Into<String>, component: C) -> Result<Self, RouteError> {
        Ok(Self {
            pattern: RoutePattern::parse(path)?,
            name: name.into(),
            component,
            props_from_params: false,
        })
    }

    /// Enables or disables parameter forwarding.
    pub fn with_props(mut self, props_from_params: bool) -> Self {
        self.props_from_params = props_from_params;
        self
    }
}

/// Result of resolving a path: the bound component and its inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute<C> {
    pub name: String,
    pub component: C,
    /// Path as resolved, relative to the router base.
    pub path: String,
    pub params: RouteParams,
    /// Params when the descriptor forwards them, otherwise empty.
    pub inputs: ViewInputs,
}

/// Ordered route table. Built once; no mutation after construction.
#[derive(Debug, Clone)]
pub struct RouteTable<C> {
    routes: Vec<RouteDescriptor<C>>,
}

impl<C: Clone> RouteTable<C> {
    /// Builds the table. Route names must be unique.
    pub fn new(routes: Vec<RouteDescriptor<C>>) -> Result<Self, RouteError> {
        let mut seen = HashSet::new();
        for route in &routes {
            if !seen.insert(route.name.as_str()) {
                return Err(RouteError::DuplicateName(route.name.clone()));
            }
        }
        Ok(Self { routes })
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteDescriptor<C>> {
        self.routes.iter()
    }

    pub fn get(&self, name: &str) -> Option<&RouteDescriptor<C>> {
        self.routes.iter().find(|r| r.name == name)
    }

    /// Resolves `path` against the routes in declaration order; the first match wins.
    pub fn resolve(&self, path: &str) -> Result<ResolvedRoute<C>, RouteError> {
        for route in &self.routes {
            if let Some(params) = route.pattern.matches(path) {
                debug!(path = %path, route = %route.name, "route matched");
                let inputs = if route.props_from_params {
                    ViewInputs::from(params.clone())
                } else {
                    ViewInputs::new()
                };
                return Ok(ResolvedRoute {
                    name: route.name.clone(),
                    component: route.component.clone(),
                    path: path.to_string(),
                    params,
                    inputs,
                });
            }
        }
        Err(RouteError::NotFound(path.to_string()))
    }

    /// Builds the path of the route called `name` from `params`.
    pub fn reverse(&self, name: &str, params: &RouteParams) -> Result<String, RouteError> {
        self.get(name)
            .ok_or_else(|| RouteError::UnknownName(name.to_string()))?
            .pattern
            .build(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable<&'static str> {
        RouteTable::new(vec![
            RouteDescriptor::new("/", "Home", "home").unwrap(),
            RouteDescriptor::new("/items/:id", "Item", "item").unwrap().with_props(true),
            RouteDescriptor::new("/items/:slug", "ItemBySlug", "slug").unwrap().with_props(true),
        ])
        .unwrap()
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = RouteTable::new(vec![
            RouteDescriptor::new("/", "Home", 1).unwrap(),
            RouteDescriptor::new("/other", "Home", 2).unwrap(),
        ]);
        assert_eq!(result.unwrap_err(), RouteError::DuplicateName("Home".to_string()));
    }

    #[test]
    fn test_first_match_wins_on_overlap() {
        let resolved = table().resolve("/items/7").unwrap();
        assert_eq!(resolved.name, "Item");
        assert_eq!(resolved.component, "item");
        assert_eq!(resolved.inputs.get("id"), Some("7"));
    }

    #[test]
    fn test_without_props_inputs_are_empty() {
        let t = RouteTable::new(vec![RouteDescriptor::new("/u/:id", "U", ()).unwrap()]).unwrap();
        let resolved = t.resolve("/u/1").unwrap();
        assert_eq!(resolved.params.get("id").map(String::as_str), Some("1"));
        assert!(resolved.inputs.is_empty());
    }

    #[test]
    fn test_reverse_unknown_name() {
        assert_eq!(
            table().reverse("Nope", &RouteParams::new()),
            Err(RouteError::UnknownName("Nope".to_string()))
        );
    }
}
