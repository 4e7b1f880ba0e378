//! Counter state - everything the view needs, built in one ordered startup
//!
//! 1. resolve the space from the router's location (may redirect the route)
//! 2. construct the sync client for that space with the counter mutators
//! 3. publish `name` / `count` signals, keeping `count` fed by a subscription
//! 4. start the poke listener
//! 5. attach the route bridge
//!
//! Any failure aborts initialization; nothing is retried.

use anyhow::{anyhow, Context as _, Result};
use serde_json::{json, Value};
use spacecounter_core::mutators::{counter_mutators, read_count, DECREMENT, INCREMENT};
use spacecounter_core::sync::{
    ReadTransaction, SubscriptionId, SyncClient, SyncClientFactory, SyncClientOptions,
};
use spacecounter_core::{
    DomainEvent, EventSender, ReadSignal, RouteBridge, RoutePath, Router, Signal, Space,
    SpaceRepository, SpaceResolverService, SyncConfig,
};
use std::sync::Arc;
use tracing::info;

use crate::http::{HttpSpaceClient, PokeHandle, PokeListener};

/// Collaborators the counter state is built from
pub struct CounterDependencies {
    pub space_repo: Arc<dyn SpaceRepository>,
    pub sync_factory: Arc<dyn SyncClientFactory>,
    pub event_sender: EventSender,
}

impl CounterDependencies {
    /// Dependencies talking to the configured space server over HTTP
    pub fn http(
        config: &SyncConfig,
        sync_factory: Arc<dyn SyncClientFactory>,
        event_sender: EventSender,
    ) -> Result<Self> {
        let space_repo = HttpSpaceClient::new(config.clone())?;
        Ok(Self {
            space_repo: Arc::new(space_repo),
            sync_factory,
            event_sender,
        })
    }
}

pub struct CounterState {
    name: Signal<String>,
    count: Signal<i64>,
    route: RouteBridge,
    space: Space,
    sync: Arc<dyn SyncClient>,
    subscription: SubscriptionId,
    router: Arc<Router>,
    event_sender: EventSender,
    _poke: PokeHandle,
}

impl CounterState {
    pub async fn initialize(
        config: &SyncConfig,
        router: Arc<Router>,
        deps: CounterDependencies,
    ) -> Result<Self> {
        info!(server = %config.server_url, location = %router.location(), "[Counter] Initializing");

        let resolver = SpaceResolverService::new(deps.space_repo)
            .with_events(deps.event_sender.clone());
        let location: RoutePath = router.location();
        let space = resolver
            .resolve(&location, |path| router.set_route(path))
            .await
            .context("Failed to resolve space")?;
        info!(space_id = %space.id, origin = space.origin.as_str(), "[Counter] Space ready");

        let sync = deps
            .sync_factory
            .connect(SyncClientOptions {
                name: config.client_name.clone(),
                license_key: config.license_key.clone(),
                push_url: config.push_url(&space.id),
                pull_url: config.pull_url(&space.id),
                mutators: counter_mutators(),
            })
            .context("Failed to construct sync client")?;

        let name = Signal::new(config.client_name.clone());
        let count = Signal::new(0i64);

        let writer = count.clone();
        let subscription = sync.subscribe(
            Arc::new(|tx: &dyn ReadTransaction| Value::from(read_count(tx))),
            Arc::new(move |data: Value| {
                writer.set_if_changed(data.as_i64().unwrap_or(0));
            }),
        );

        let poke = PokeListener::new(config, space.id.clone(), Arc::clone(&sync))?
            .with_events(deps.event_sender.clone())
            .spawn();

        let route = RouteBridge::attach(
            &router,
            config.path_prefix.clone(),
            Some(deps.event_sender.clone()),
        );

        Ok(Self {
            name,
            count,
            route,
            space,
            sync,
            subscription,
            router,
            event_sender: deps.event_sender,
            _poke: poke,
        })
    }

    pub fn name(&self) -> ReadSignal<String> {
        self.name.reader()
    }

    pub fn count(&self) -> ReadSignal<i64> {
        self.count.reader()
    }

    pub fn route(&self) -> ReadSignal<String> {
        self.route.route()
    }

    pub fn space(&self) -> &Space {
        &self.space
    }

    pub fn sync(&self) -> &Arc<dyn SyncClient> {
        &self.sync
    }

    /// Navigate; the route signal follows through the bridge
    pub fn set_route(&self, path: &str) {
        self.router.set_route(path);
    }

    pub async fn increase(&self) -> Result<i64> {
        info!("[Counter] Increase");
        self.apply(INCREMENT).await
    }

    pub async fn decrease(&self) -> Result<i64> {
        info!("[Counter] Decrease");
        self.apply(DECREMENT).await
    }

    async fn apply(&self, mutator: &str) -> Result<i64> {
        let result = self.sync.mutate(mutator, json!(1)).await?;
        self.event_sender.emit(DomainEvent::MutationApplied {
            name: mutator.to_string(),
            result: result.clone(),
        });
        result
            .as_i64()
            .ok_or_else(|| anyhow!("{} returned a non-integer: {}", mutator, result))
    }
}

impl Drop for CounterState {
    fn drop(&mut self) {
        self.sync.unsubscribe(self.subscription);
    }
}
