//! Repository traits for data access
//!
//! The space server is reached through these traits so that resolution logic
//! does not depend on HTTP (the client crate provides the HTTP implementation,
//! tests provide in-memory ones).

use async_trait::async_trait;

use crate::domain::SpaceId;

/// Result type for repository operations
pub type RepoResult<T> = anyhow::Result<T>;

/// Space repository trait
#[async_trait]
pub trait SpaceRepository: Send + Sync {
    /// Whether the server still knows this space
    async fn exists(&self, id: &SpaceId) -> RepoResult<bool>;

    /// Allocate a fresh space on the server
    async fn create(&self) -> RepoResult<SpaceId>;
}
