//! Domain entities for Spacecounter

mod event;
mod route;
mod space;

pub use event::DomainEvent;
pub use route::{PathSegments, RoutePath, SPACE_SEGMENT};
pub use space::{Space, SpaceId, SpaceOrigin};
