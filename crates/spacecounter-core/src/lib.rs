//! # Spacecounter Core Library
//!
//! Domain logic for the space counter client.
//!
//! ## Modules
//!
//! - `domain` - Spaces, routes and domain events
//! - `config` - Server configuration and endpoint templating
//! - `repository` - Space server access traits
//! - `service` - Space resolution
//! - `routing` - In-memory router and the route signal bridge
//! - `signal` - Observable single-writer state
//! - `sync` - Sync collaborator contract and an in-memory implementation
//! - `mutators` - Counter mutators
//! - `event_bus` - Domain event distribution

pub mod config;
pub mod domain;
pub mod event_bus;
pub mod mutators;
pub mod repository;
pub mod routing;
pub mod service;
pub mod signal;
pub mod sync;

pub use config::SyncConfig;
pub use domain::*;
pub use repository::*;
pub use service::*;

pub use event_bus::{create_shared_event_bus, EventBus, EventReceiver, EventSender, SharedEventBus};
pub use routing::{RouteBridge, Router};
pub use signal::{ReadSignal, Signal};
