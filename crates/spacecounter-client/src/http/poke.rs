//! Poke listener - server-sent events that trigger a pull
//!
//! The server keeps an event stream open per space and sends a `poke` message
//! whenever another client pushed. Each poke makes the sync client pull. The
//! stream is reopened after it ends or fails, like a browser event source.

use anyhow::{Context as _, Result};
use futures::StreamExt;
use reqwest::header::{ACCEPT, CACHE_CONTROL};
use spacecounter_core::sync::SyncClient;
use spacecounter_core::{DomainEvent, EventSender, SpaceId, SyncConfig};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::sse::{SseDecoder, SseEvent};

/// Message payload that triggers a pull
pub const POKE_MESSAGE: &str = "poke";

const LAST_EVENT_ID: &str = "Last-Event-ID";

pub struct PokeListener {
    client: reqwest::Client,
    url: String,
    space_id: SpaceId,
    sync: Arc<dyn SyncClient>,
    retry: Duration,
    last_event_id: Option<String>,
    event_sender: Option<EventSender>,
}

impl PokeListener {
    pub fn new(config: &SyncConfig, space_id: SpaceId, sync: Arc<dyn SyncClient>) -> Result<Self> {
        // No overall timeout: the stream stays open indefinitely.
        let client = reqwest::Client::builder()
            .connect_timeout(config.request_timeout)
            .build()
            .context("Failed to build poke HTTP client")?;

        Ok(Self {
            client,
            url: config.poke_url(&space_id),
            space_id,
            sync,
            retry: config.poke_retry,
            last_event_id: None,
            event_sender: None,
        })
    }

    pub fn with_events(mut self, sender: EventSender) -> Self {
        self.event_sender = Some(sender);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Run the listener on the current tokio runtime
    pub fn spawn(self) -> PokeHandle {
        info!(space_id = %self.space_id, url = %self.url, "[Poke] Listening for pokes");
        PokeHandle {
            task: tokio::spawn(self.run()),
        }
    }

    async fn run(mut self) {
        loop {
            match self.stream_once().await {
                Ok(()) => debug!(space_id = %self.space_id, "[Poke] Stream ended"),
                Err(e) => warn!(space_id = %self.space_id, error = %e, "[Poke] Stream failed"),
            }
            debug!(retry_ms = self.retry.as_millis() as u64, "[Poke] Reconnecting");
            tokio::time::sleep(self.retry).await;
        }
    }

    async fn stream_once(&mut self) -> Result<()> {
        let mut request = self
            .client
            .get(&self.url)
            .header(ACCEPT, "text/event-stream")
            .header(CACHE_CONTROL, "no-cache");
        if let Some(id) = &self.last_event_id {
            request = request.header(LAST_EVENT_ID, id.as_str());
        }

        let response = request
            .send()
            .await
            .context("Failed to open poke stream")?
            .error_for_status()
            .context("Poke stream rejected")?;

        let mut decoder = SseDecoder::new();
        let mut body = response.bytes_stream();
        while let Some(chunk) = body.next().await {
            let chunk = chunk.context("Poke stream interrupted")?;
            for event in decoder.feed(&chunk) {
                self.handle(event).await;
            }
            if let Some(retry) = decoder.retry() {
                self.retry = retry;
            }
            if let Some(id) = decoder.last_event_id() {
                self.last_event_id = Some(id.to_string());
            }
        }
        Ok(())
    }

    async fn handle(&self, event: SseEvent) {
        if !event.is_message() || event.data != POKE_MESSAGE {
            debug!(event = %event.event, "[Poke] Ignoring event");
            return;
        }

        debug!(space_id = %self.space_id, "[Poke] Poke received, pulling");
        if let Some(sender) = &self.event_sender {
            sender.emit(DomainEvent::PokeReceived {
                space_id: self.space_id.clone(),
            });
        }
        if let Err(e) = self.sync.pull().await {
            warn!(space_id = %self.space_id, error = %e, "[Poke] Pull failed");
        }
    }
}

/// Owns the listener task; dropping it stops listening
pub struct PokeHandle {
    task: JoinHandle<()>,
}

impl PokeHandle {
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PokeHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
