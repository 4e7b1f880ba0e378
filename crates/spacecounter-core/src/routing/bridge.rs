//! Route Signal Bridge
//!
//! Republishes router locations as the application route, with the deployment
//! prefix (e.g. the sub-path a static host serves from) replaced by `/`.
//! A bridge only exists once attached, so holding one means the route signal
//! is tracking the router; there is no separate "uninitialized" state to check.

use tracing::trace;

use crate::domain::{DomainEvent, RoutePath};
use crate::event_bus::EventSender;
use crate::signal::{ReadSignal, Signal};

use super::{ListenerId, Router};

/// Strip the first occurrence of `prefix` from `path`.
///
/// Best effort: paths without the prefix are returned unchanged.
pub fn normalize_route(path: &RoutePath, prefix: &str) -> String {
    path.strip_prefix(prefix).into_string()
}

pub struct RouteBridge {
    route: Signal<String>,
    listener: ListenerId,
}

impl RouteBridge {
    /// Start tracking `router`.
    ///
    /// The signal is seeded with the router's current location as-is; every
    /// later navigation is normalized and written in arrival order.
    pub fn attach(router: &Router, prefix: impl Into<String>, events: Option<EventSender>) -> Self {
        let prefix = prefix.into();
        let route = Signal::new(router.location().into_string());

        let writer = route.clone();
        let listener = router.on_route(move |path| {
            let normalized = normalize_route(path, &prefix);
            trace!(raw = %path, route = %normalized, "[RouteBridge] Route changed");
            writer.set(normalized.clone());
            if let Some(events) = &events {
                events.emit(DomainEvent::RouteChanged { route: normalized });
            }
        });

        Self { route, listener }
    }

    pub fn route(&self) -> ReadSignal<String> {
        self.route.reader()
    }

    pub fn current(&self) -> String {
        self.route.get()
    }

    /// Stop tracking; the signal keeps its last value
    pub fn detach(self, router: &Router) -> ReadSignal<String> {
        router.off(self.listener);
        self.route.reader()
    }
}
