//! In-process sync client
//!
//! Runs mutators against a local key/value map and re-evaluates subscriptions
//! after every write. It performs no network sync; `pull()` applies whatever
//! remote state was staged with [`MemorySyncClient::stage_remote`].

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};
use uuid::Uuid;

use super::{
    DataFn, MutatorRegistry, QueryFn, ReadTransaction, SubscriptionId, SyncClient,
    SyncClientFactory, SyncClientOptions, WriteTransaction,
};

struct Subscription {
    id: SubscriptionId,
    query: QueryFn,
    on_data: DataFn,
    last: Value,
}

/// Snapshot view used for query evaluation
struct StoreView<'a> {
    data: &'a HashMap<String, Value>,
}

impl ReadTransaction for StoreView<'_> {
    fn get(&self, key: &str) -> Option<Value> {
        self.data.get(key).cloned()
    }
}

/// Mutator transaction: reads fall through to the store, writes are buffered
/// and only committed if the mutator succeeds.
struct StagedTransaction<'a> {
    base: &'a HashMap<String, Value>,
    writes: HashMap<String, Value>,
}

impl ReadTransaction for StagedTransaction<'_> {
    fn get(&self, key: &str) -> Option<Value> {
        self.writes
            .get(key)
            .or_else(|| self.base.get(key))
            .cloned()
    }
}

impl WriteTransaction for StagedTransaction<'_> {
    fn put(&mut self, key: &str, value: Value) {
        self.writes.insert(key.to_string(), value);
    }
}

pub struct MemorySyncClient {
    client_id: String,
    options: SyncClientOptions,
    store: Mutex<HashMap<String, Value>>,
    remote: Mutex<HashMap<String, Value>>,
    subscriptions: Mutex<Vec<Subscription>>,
    next_subscription: AtomicU64,
    pulls: AtomicU64,
}

impl MemorySyncClient {
    pub fn new(options: SyncClientOptions) -> Self {
        let client_id = Uuid::new_v4().to_string();
        debug!(
            client_id = %client_id,
            name = %options.name,
            push_url = %options.push_url,
            pull_url = %options.pull_url,
            mutators = ?options.mutators.names(),
            "[MemorySync] Created client"
        );
        Self {
            client_id,
            options,
            store: Mutex::new(HashMap::new()),
            remote: Mutex::new(HashMap::new()),
            subscriptions: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(1),
            pulls: AtomicU64::new(0),
        }
    }

    pub fn options(&self) -> &SyncClientOptions {
        &self.options
    }

    /// Current value of a key in the local store
    pub fn value(&self, key: &str) -> Option<Value> {
        self.store.lock().get(key).cloned()
    }

    /// Stage server-side state to be applied by the next `pull()`
    pub fn stage_remote(&self, key: impl Into<String>, value: Value) {
        self.remote.lock().insert(key.into(), value);
    }

    /// Number of completed pulls
    pub fn pull_count(&self) -> u64 {
        self.pulls.load(Ordering::SeqCst)
    }

    /// Re-run every query and collect the callbacks whose result changed
    fn refresh_subscriptions(&self) {
        let pending: Vec<(DataFn, Value)> = {
            let mut subscriptions = self.subscriptions.lock();
            let store = self.store.lock();
            let view = StoreView { data: &store };
            subscriptions
                .iter_mut()
                .filter_map(|sub| {
                    let result = (sub.query)(&view);
                    if result == sub.last {
                        return None;
                    }
                    sub.last = result.clone();
                    Some((Arc::clone(&sub.on_data), result))
                })
                .collect()
        };

        for (on_data, value) in pending {
            on_data(value);
        }
    }
}

#[async_trait]
impl SyncClient for MemorySyncClient {
    fn client_id(&self) -> &str {
        &self.client_id
    }

    fn name(&self) -> &str {
        &self.options.name
    }

    fn subscribe(&self, query: QueryFn, on_data: DataFn) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::SeqCst));
        let initial = {
            let store = self.store.lock();
            query(&StoreView { data: &store })
        };

        self.subscriptions.lock().push(Subscription {
            id,
            query,
            on_data: Arc::clone(&on_data),
            last: initial.clone(),
        });

        on_data(initial);
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscriptions = self.subscriptions.lock();
        let before = subscriptions.len();
        subscriptions.retain(|sub| sub.id != id);
        subscriptions.len() != before
    }

    async fn mutate(&self, name: &str, args: Value) -> Result<Value> {
        let mutator = self
            .options
            .mutators
            .get(name)
            .cloned()
            .ok_or_else(|| anyhow!("Unknown mutator: {}", name))?;

        let result = {
            let mut store = self.store.lock();
            let mut tx = StagedTransaction {
                base: &store,
                writes: HashMap::new(),
            };
            let result = mutator(&mut tx, args)?;
            let writes = tx.writes;
            store.extend(writes);
            result
        };

        trace!(mutator = name, result = %result, "[MemorySync] Mutation applied");
        self.refresh_subscriptions();
        Ok(result)
    }

    async fn pull(&self) -> Result<()> {
        let patch: HashMap<String, Value> = std::mem::take(&mut *self.remote.lock());
        let patched = patch.len();
        self.store.lock().extend(patch);
        self.pulls.fetch_add(1, Ordering::SeqCst);

        debug!(
            client_id = %self.client_id,
            patched_keys = patched,
            "[MemorySync] Pull complete"
        );
        self.refresh_subscriptions();
        Ok(())
    }
}

/// Factory producing [`MemorySyncClient`]s, remembering the last one built
#[derive(Default)]
pub struct MemorySyncFactory {
    last: Mutex<Option<Arc<MemorySyncClient>>>,
}

impl MemorySyncFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_client(&self) -> Option<Arc<MemorySyncClient>> {
        self.last.lock().clone()
    }
}

impl SyncClientFactory for MemorySyncFactory {
    fn connect(&self, options: SyncClientOptions) -> Result<Arc<dyn SyncClient>> {
        let client = Arc::new(MemorySyncClient::new(options));
        *self.last.lock() = Some(Arc::clone(&client));
        Ok(client)
    }
}
