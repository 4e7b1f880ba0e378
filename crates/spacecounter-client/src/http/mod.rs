//! HTTP access to the space server

mod poke;
mod space_api;
mod sse;

pub use poke::{PokeHandle, PokeListener, POKE_MESSAGE};
pub use space_api::{HttpSpaceClient, SpaceApiError, CREATE_SPACE, SPACE_EXISTS};
pub use sse::{SseDecoder, SseEvent, DEFAULT_EVENT_TYPE};
