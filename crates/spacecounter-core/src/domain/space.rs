//! Space entity - a server-side sync namespace shared by every client on the same path

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a space, allocated by the server.
///
/// The client never inspects the token; it only carries it in paths,
/// request bodies and sync endpoint URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpaceId(String);

impl SpaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Route that points at this space (`/space/<id>`)
    pub fn route(&self) -> String {
        format!("/space/{}", self.0)
    }
}

impl fmt::Display for SpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SpaceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SpaceId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// How a space was obtained for the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpaceOrigin {
    /// The path referenced a space the server still knows about
    Resumed,
    /// The server allocated a fresh space and the route was redirected to it
    Created,
}

impl SpaceOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Resumed => "resumed",
            Self::Created => "created",
        }
    }
}

/// Result of resolving the session's space.
///
/// Immutable once produced; the sync client for the session is bound to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Space {
    /// Server-allocated identifier
    pub id: SpaceId,

    /// Whether the space was resumed or created
    pub origin: SpaceOrigin,

    /// When the space was resolved
    pub resolved_at: DateTime<Utc>,
}

impl Space {
    pub fn resumed(id: SpaceId) -> Self {
        Self {
            id,
            origin: SpaceOrigin::Resumed,
            resolved_at: Utc::now(),
        }
    }

    pub fn created(id: SpaceId) -> Self {
        Self {
            id,
            origin: SpaceOrigin::Created,
            resolved_at: Utc::now(),
        }
    }

    pub fn was_created(&self) -> bool {
        self.origin == SpaceOrigin::Created
    }
}
