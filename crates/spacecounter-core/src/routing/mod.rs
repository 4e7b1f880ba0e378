//! Client-side routing

mod bridge;
mod router;

pub use bridge::{normalize_route, RouteBridge};
pub use router::{ListenerId, RouteListener, Router};
