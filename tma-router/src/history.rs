//! In-memory navigation history: the current-location indicator seen by the host.
//!
//! Entries are stored with the base prefix applied, the way the browser address bar shows them.

/// Gives `base` a leading slash and strips trailing slashes; `/` and empty become `""`.
pub fn normalize_base(base: &str) -> String {
    let trimmed = base.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// Linear history stack with a cursor, like the browser's session history.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    base: String,
    entries: Vec<String>,
    position: usize,
}

impl MemoryHistory {
    /// Creates a history whose entries are prefixed by `base`. Starts with no entries.
    pub fn new(base: &str) -> Self {
        Self {
            base: normalize_base(base),
            entries: Vec::new(),
            position: 0,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// `base` + `path`.
    pub fn create_href(&self, path: &str) -> String {
        if self.base.is_empty() {
            path.to_string()
        } else if path == "/" {
            format!("{}/", self.base)
        } else {
            format!("{}{}", self.base, path)
        }
    }

    /// Strips the base from a host location when the location starts with it.
    pub fn strip_base(&self, location: &str) -> String {
        if self.base.is_empty() {
            return location.to_string();
        }
        match location.strip_prefix(self.base.as_str()) {
            Some(rest) if rest.is_empty() => "/".to_string(),
            Some(rest) if rest.starts_with(['/', '?', '#']) => rest.to_string(),
            _ => location.to_string(),
        }
    }

    /// Adds `path` after the cursor, discarding forward entries.
    pub fn push(&mut self, path: &str) {
        let href = self.create_href(path);
        if !self.entries.is_empty() {
            self.entries.truncate(self.position + 1);
        }
        self.entries.push(href);
        self.position = self.entries.len() - 1;
    }

    /// Replaces the entry under the cursor (pushes when empty).
    pub fn replace(&mut self, path: &str) {
        let href = self.create_href(path);
        match self.entries.get_mut(self.position) {
            Some(entry) => *entry = href,
            None => {
                self.entries.push(href);
                self.position = self.entries.len() - 1;
            }
        }
    }

    /// Moves the cursor by `delta`; returns the new location (with base) or `None` when out of range.
    pub fn go(&mut self, delta: isize) -> Option<&str> {
        let target = self.position as isize + delta;
        if target < 0 || target as usize >= self.entries.len() {
            return None;
        }
        self.position = target as usize;
        self.entries.get(self.position).map(String::as_str)
    }

    /// Current location with base, `None` before the first navigation.
    pub fn location(&self) -> Option<&str> {
        self.entries.get(self.position).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base("/"), "");
        assert_eq!(normalize_base(""), "");
        assert_eq!(normalize_base("app/"), "/app");
        assert_eq!(normalize_base("/tma//"), "/tma");
    }

    #[test]
    fn test_href_and_strip_base() {
        let h = MemoryHistory::new("/tma/");
        assert_eq!(h.create_href("/"), "/tma/");
        assert_eq!(h.create_href("/profile/1"), "/tma/profile/1");
        assert_eq!(h.strip_base("/tma/profile/1"), "/profile/1");
        assert_eq!(h.strip_base("/tma"), "/");
        assert_eq!(h.strip_base("/tmaxyz"), "/tmaxyz");
        assert_eq!(h.strip_base("/other"), "/other");
    }

    #[test]
    fn test_push_truncates_forward_entries() {
        let mut h = MemoryHistory::new("/");
        h.push("/a");
        h.push("/b");
        h.push("/c");
        assert_eq!(h.go(-2), Some("/a"));
        h.push("/d");
        assert_eq!(h.len(), 2);
        assert_eq!(h.location(), Some("/d"));
        assert_eq!(h.go(1), None);
        assert_eq!(h.location(), Some("/d"));
    }

    #[test]
    fn test_replace_on_empty_history_pushes() {
        let mut h = MemoryHistory::new("");
        assert!(h.location().is_none());
        h.replace("/");
        h.replace("/x");
        assert_eq!(h.len(), 1);
        assert_eq!(h.location(), Some("/x"));
    }
}
