//! # Spacecounter Client
//!
//! Network side of the space counter:
//!
//! - `http` - space server endpoints, the poke event stream
//! - `state` - ordered startup producing the counter's observable state

pub mod http;
pub mod state;

pub use http::{HttpSpaceClient, PokeHandle, PokeListener, SpaceApiError};
pub use state::{CounterDependencies, CounterState};
