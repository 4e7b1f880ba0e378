//! Domain Events - everything observable that happens during a session
//!
//! Events are emitted by the resolver, the route bridge, the counter state and
//! the poke listener. Consumers (the CLI log view, tests) pick the ones they
//! care about.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{SpaceId, SpaceOrigin};

/// Unified event type flowing through the event bus
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// The session's space has been resolved
    SpaceResolved {
        space_id: SpaceId,
        origin: SpaceOrigin,
        resolved_at: DateTime<Utc>,
    },

    /// The application route changed (already normalized)
    RouteChanged { route: String },

    /// A named mutator ran against the local store
    MutationApplied {
        name: String,
        result: serde_json::Value,
    },

    /// The server signalled that new data may be available
    PokeReceived { space_id: SpaceId },
}

impl DomainEvent {
    /// Stable snake_case name, used in logs
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::SpaceResolved { .. } => "space_resolved",
            Self::RouteChanged { .. } => "route_changed",
            Self::MutationApplied { .. } => "mutation_applied",
            Self::PokeReceived { .. } => "poke_received",
        }
    }

    /// Space this event refers to, if any
    pub fn space_id(&self) -> Option<&SpaceId> {
        match self {
            Self::SpaceResolved { space_id, .. } | Self::PokeReceived { space_id } => {
                Some(space_id)
            }
            Self::RouteChanged { .. } | Self::MutationApplied { .. } => None,
        }
    }
}
