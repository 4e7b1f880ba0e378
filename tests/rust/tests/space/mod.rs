//! Space integration tests
//!
//! HTTP space client against a fake server, and space resolution end to end.

mod space_api;
mod space_resolver;
