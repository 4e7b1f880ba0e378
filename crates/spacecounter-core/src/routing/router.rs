//! In-memory router: the path-change source
//!
//! Holds the current location (`pathname + search`) and notifies listeners,
//! synchronously and in order, whenever the route is set.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

use crate::domain::RoutePath;

/// Callback invoked with the new raw location
pub type RouteListener = Arc<dyn Fn(&RoutePath) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub struct Router {
    location: RwLock<RoutePath>,
    listeners: RwLock<Vec<(ListenerId, RouteListener)>>,
    next_listener: AtomicU64,
}

impl Router {
    pub fn new(initial: impl Into<RoutePath>) -> Self {
        Self {
            location: RwLock::new(initial.into()),
            listeners: RwLock::new(Vec::new()),
            next_listener: AtomicU64::new(1),
        }
    }

    /// Current location, `pathname + search`
    pub fn location(&self) -> RoutePath {
        self.location.read().clone()
    }

    /// Current pathname (no query string)
    pub fn pathname(&self) -> String {
        self.location.read().pathname().to_string()
    }

    /// Navigate to `path` and notify every listener.
    ///
    /// Listeners run after the location is updated, outside the lock, so they
    /// may read the router or navigate again.
    pub fn set_route(&self, path: impl Into<RoutePath>) {
        let path = path.into();
        debug!(route = %path, "[Router] Navigating");
        *self.location.write() = path.clone();

        let listeners: Vec<RouteListener> = self
            .listeners
            .read()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&path);
        }
    }

    /// Register a listener; it is not called for the current location
    pub fn on_route<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&RoutePath) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_listener.fetch_add(1, Ordering::SeqCst));
        self.listeners.write().push((id, Arc::new(listener)));
        id
    }

    pub fn off(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new("/")
    }
}
