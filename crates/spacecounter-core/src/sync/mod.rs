//! Sync collaborator contract
//!
//! The optimistic sync engine (push/pull, rebase, conflict resolution) is an
//! external library. This module describes the surface the counter consumes:
//! construction options, named mutators over a transactional key/value handle,
//! query subscriptions and `pull()`.

mod memory;

pub use memory::{MemorySyncClient, MemorySyncFactory};

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Read access inside a transaction
pub trait ReadTransaction {
    fn get(&self, key: &str) -> Option<Value>;
}

/// Read/write access inside a mutator transaction
pub trait WriteTransaction: ReadTransaction {
    fn put(&mut self, key: &str, value: Value);
}

/// A named mutator: runs optimistically on the client, later replayed by the server
pub type MutatorFn = Arc<dyn Fn(&mut dyn WriteTransaction, Value) -> Result<Value> + Send + Sync>;

/// Query evaluated against the store whenever it may have changed
pub type QueryFn = Arc<dyn Fn(&dyn ReadTransaction) -> Value + Send + Sync>;

/// Callback receiving fresh query results
pub type DataFn = Arc<dyn Fn(Value) + Send + Sync>;

/// Mutators keyed by name, handed to the sync client at construction
#[derive(Clone, Default)]
pub struct MutatorRegistry {
    mutators: HashMap<String, MutatorFn>,
}

impl MutatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(mut self, name: impl Into<String>, mutator: F) -> Self
    where
        F: Fn(&mut dyn WriteTransaction, Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.mutators.insert(name.into(), Arc::new(mutator));
        self
    }

    pub fn get(&self, name: &str) -> Option<&MutatorFn> {
        self.mutators.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.mutators.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.mutators.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for MutatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutatorRegistry")
            .field("mutators", &self.names())
            .finish()
    }
}

/// Handle returned by [`SyncClient::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Construction options for a sync client
#[derive(Debug, Clone)]
pub struct SyncClientOptions {
    pub name: String,
    pub license_key: String,
    pub push_url: String,
    pub pull_url: String,
    pub mutators: MutatorRegistry,
}

/// The sync client surface used by the counter
#[async_trait]
pub trait SyncClient: Send + Sync {
    /// Identifier of this client instance
    fn client_id(&self) -> &str;

    /// Name the client was constructed with
    fn name(&self) -> &str;

    /// Subscribe to a query; `on_data` fires with the initial result and
    /// again whenever the result changes.
    fn subscribe(&self, query: QueryFn, on_data: DataFn) -> SubscriptionId;

    fn unsubscribe(&self, id: SubscriptionId) -> bool;

    /// Run the named mutator with `args`, returning its result
    async fn mutate(&self, name: &str, args: Value) -> Result<Value>;

    /// Fetch new server state
    async fn pull(&self) -> Result<()>;
}

/// Builds sync clients once the space (and so the endpoints) are known
pub trait SyncClientFactory: Send + Sync {
    fn connect(&self, options: SyncClientOptions) -> Result<Arc<dyn SyncClient>>;
}
