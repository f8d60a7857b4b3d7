//! Path patterns: an exact-path variant and a parameterized-segment variant.
//!
//! Matching drops query and fragment, tolerates one trailing slash, compares static segments
//! ASCII case-insensitively and percent-decodes parameter values.

use std::collections::BTreeMap;
use std::fmt;

use tma_core::RouteError;

/// Path parameters extracted by a match, keyed by parameter name.
pub type RouteParams = BTreeMap<String, String>;

/// One segment of a parameterized pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Static(String),
    Param(String),
}

/// A parsed route path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePattern {
    /// No parameters; matches one path only.
    Exact { source: String, segments: Vec<String> },
    /// At least one `:name` segment.
    Parameterized { source: String, segments: Vec<Segment> },
}

/// Strips query and fragment, ensures a leading slash and removes one trailing slash (except for `/`).
pub fn normalize_path(path: &str) -> String {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    let mut normalized = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    };
    if normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }
    normalized
}

fn split_segments(normalized: &str) -> Vec<&str> {
    if normalized == "/" {
        Vec::new()
    } else {
        normalized[1..].split('/').collect()
    }
}

fn is_valid_param_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl RoutePattern {
    /// Parses a pattern such as `/` or `/profile/:user_id`.
    pub fn parse(pattern: &str) -> Result<Self, RouteError> {
        let invalid = |reason: &str| RouteError::InvalidPattern(format!("{}: {}", pattern, reason));

        if !pattern.starts_with('/') {
            return Err(invalid("must start with '/'"));
        }
        if pattern.contains(['?', '#']) {
            return Err(invalid("query and fragment are not allowed"));
        }

        let source = normalize_path(pattern);
        let mut segments = Vec::new();
        let mut has_param = false;
        for raw in split_segments(&source) {
            if raw.is_empty() {
                return Err(invalid("empty segment"));
            }
            match raw.strip_prefix(':') {
                Some(name) => {
                    if !is_valid_param_name(name) {
                        return Err(invalid("parameter names use [A-Za-z0-9_]"));
                    }
                    if segments
                        .iter()
                        .any(|s| matches!(s, Segment::Param(existing) if existing == name))
                    {
                        return Err(invalid("duplicate parameter name"));
                    }
                    has_param = true;
                    segments.push(Segment::Param(name.to_string()));
                }
                None => segments.push(Segment::Static(raw.to_string())),
            }
        }

        if has_param {
            Ok(RoutePattern::Parameterized { source, segments })
        } else {
            let segments = segments
                .into_iter()
                .filter_map(|s| match s {
                    Segment::Static(s) => Some(s),
                    Segment::Param(_) => None,
                })
                .collect();
            Ok(RoutePattern::Exact { source, segments })
        }
    }

    /// Normalized pattern text.
    pub fn source(&self) -> &str {
        match self {
            RoutePattern::Exact { source, .. } | RoutePattern::Parameterized { source, .. } => source,
        }
    }

    /// Parameter names in declaration order; empty for [`RoutePattern::Exact`].
    pub fn param_names(&self) -> Vec<&str> {
        match self {
            RoutePattern::Exact { .. } => Vec::new(),
            RoutePattern::Parameterized { segments, .. } => segments
                .iter()
                .filter_map(|s| match s {
                    Segment::Param(name) => Some(name.as_str()),
                    Segment::Static(_) => None,
                })
                .collect(),
        }
    }

    /// Returns the extracted parameters when `path` structurally matches, `None` otherwise.
    pub fn matches(&self, path: &str) -> Option<RouteParams> {
        let normalized = normalize_path(path);
        let candidate = split_segments(&normalized);

        match self {
            RoutePattern::Exact { segments, .. } => {
                let equal = segments.len() == candidate.len()
                    && segments
                        .iter()
                        .zip(&candidate)
                        .all(|(expected, actual)| expected.eq_ignore_ascii_case(actual));
                equal.then(RouteParams::new)
            }
            RoutePattern::Parameterized { segments, .. } => {
                if segments.len() != candidate.len() {
                    return None;
                }
                let mut params = RouteParams::new();
                for (segment, actual) in segments.iter().zip(&candidate) {
                    match segment {
                        Segment::Static(expected) => {
                            if !expected.eq_ignore_ascii_case(actual) {
                                return None;
                            }
                        }
                        Segment::Param(name) => {
                            if actual.is_empty() {
                                return None;
                            }
                            let value = urlencoding::decode(actual)
                                .map(|v| v.into_owned())
                                .unwrap_or_else(|_| actual.to_string());
                            params.insert(name.clone(), value);
                        }
                    }
                }
                Some(params)
            }
        }
    }

    /// Builds a concrete path from `params`. Values are percent-encoded.
    pub fn build(&self, params: &RouteParams) -> Result<String, RouteError> {
        match self {
            RoutePattern::Exact { source, .. } => Ok(source.clone()),
            RoutePattern::Parameterized { segments, .. } => {
                let mut path = String::new();
                for segment in segments {
                    path.push('/');
                    match segment {
                        Segment::Static(s) => path.push_str(s),
                        Segment::Param(name) => {
                            let value = params
                                .get(name)
                                .filter(|v| !v.is_empty())
                                .ok_or_else(|| RouteError::MissingParam(name.clone()))?;
                            path.push_str(&urlencoding::encode(value));
                        }
                    }
                }
                Ok(path)
            }
        }
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.source())
    }
}
