//! Space Resolution Service
//!
//! Decides which space a session uses based on the current path: resume the
//! space named by `/space/<id>` if the server still knows it, otherwise create
//! a new one and redirect the route to it.

use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::{DomainEvent, RoutePath, Space, SpaceId};
use crate::event_bus::EventSender;
use crate::repository::SpaceRepository;

pub struct SpaceResolverService {
    space_repo: Arc<dyn SpaceRepository>,
    event_sender: Option<EventSender>,
}

impl SpaceResolverService {
    pub fn new(space_repo: Arc<dyn SpaceRepository>) -> Self {
        Self {
            space_repo,
            event_sender: None,
        }
    }

    pub fn with_events(mut self, sender: EventSender) -> Self {
        self.event_sender = Some(sender);
        self
    }

    /// Resolve the session's space from `current_path`.
    ///
    /// Exactly one of resume/create happens. `on_route_change` is called once
    /// with `/space/<new id>` iff a space was created. A candidate the server
    /// doesn't recognize is dropped the same way as a missing one.
    /// Repository errors propagate unchanged; nothing is retried.
    pub async fn resolve<F>(&self, current_path: &RoutePath, on_route_change: F) -> Result<Space>
    where
        F: FnOnce(&str),
    {
        let resumed = match current_path.segments().space_candidate() {
            Some(candidate) => {
                if self.space_repo.exists(&candidate).await? {
                    Some(candidate)
                } else {
                    debug!(space_id = %candidate, "[SpaceResolver] Space not found on server, creating a new one");
                    None
                }
            }
            None => None,
        };

        let space = match resumed {
            Some(id) => {
                info!(space_id = %id, "[SpaceResolver] Resuming existing space");
                Space::resumed(id)
            }
            None => {
                let space = self.create(on_route_change).await?;
                info!(space_id = %space.id, "[SpaceResolver] Created new space");
                space
            }
        };

        if let Some(sender) = &self.event_sender {
            sender.emit(DomainEvent::SpaceResolved {
                space_id: space.id.clone(),
                origin: space.origin,
                resolved_at: space.resolved_at,
            });
        }

        Ok(space)
    }

    async fn create<F>(&self, on_route_change: F) -> Result<Space>
    where
        F: FnOnce(&str),
    {
        let id: SpaceId = self.space_repo.create().await?;
        on_route_change(&id.route());
        Ok(Space::created(id))
    }
}
