//! Route paths and the `/space/<id>` pattern

use serde::{Deserialize, Serialize};
use std::fmt;

use super::SpaceId;

/// Literal first segment of a space route
pub const SPACE_SEGMENT: &str = "space";

/// Logical application location: `pathname + search`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoutePath(String);

impl RoutePath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Path portion without the query string
    pub fn pathname(&self) -> &str {
        match self.0.find('?') {
            Some(idx) => &self.0[..idx],
            None => &self.0,
        }
    }

    /// Query string including the leading `?`, or empty
    pub fn search(&self) -> &str {
        match self.0.find('?') {
            Some(idx) => &self.0[idx..],
            None => "",
        }
    }

    pub fn segments(&self) -> PathSegments {
        PathSegments::parse(self.pathname())
    }

    /// Replace the first occurrence of a deployment prefix with `/`.
    ///
    /// Paths that don't contain the prefix come back unchanged.
    pub fn strip_prefix(&self, prefix: &str) -> RoutePath {
        if prefix.is_empty() {
            return self.clone();
        }
        RoutePath(self.0.replacen(prefix, "/", 1))
    }
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoutePath {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RoutePath {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Non-empty components of a pathname, in order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathSegments(Vec<String>);

impl PathSegments {
    pub fn parse(pathname: &str) -> Self {
        Self(
            pathname
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.0.get(idx).map(String::as_str)
    }

    /// Identifier named by a `/space/<id>` path, if any.
    ///
    /// Trailing segments after the identifier are ignored.
    pub fn space_candidate(&self) -> Option<SpaceId> {
        match (self.get(0), self.get(1)) {
            (Some(SPACE_SEGMENT), Some(id)) => Some(SpaceId::new(id)),
            _ => None,
        }
    }
}
