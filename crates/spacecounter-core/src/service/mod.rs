//! Domain services

mod space_resolver;

pub use space_resolver::SpaceResolverService;
