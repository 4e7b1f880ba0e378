//! spacecounter - shared counter in the terminal
//!
//! Usage: `spacecounter [PATH]` where PATH is the starting route
//! (e.g. `/space/<id>` to join an existing space). Type `+`, `-` or `q`.

mod logging;
mod render;

use anyhow::Result;
use spacecounter_client::{CounterDependencies, CounterState};
use spacecounter_core::sync::MemorySyncFactory;
use spacecounter_core::{create_shared_event_bus, ReadSignal, Router, SyncConfig};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

use render::{counter_view, Command};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let _log_guard = logging::init_tracing();

    let config = SyncConfig::from_env()?;
    let start = std::env::args().nth(1).unwrap_or_else(|| "/".to_string());
    let router = Arc::new(Router::new(start));

    let event_bus = create_shared_event_bus();
    let mut events = event_bus.subscribe();
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            debug!(event_type = event.type_name(), ?event, "[Events]");
        }
    });

    let deps = CounterDependencies::http(
        &config,
        Arc::new(MemorySyncFactory::new()),
        event_bus.sender(),
    )?;
    let state = CounterState::initialize(&config, router, deps).await?;
    info!(
        space_id = %state.space().id,
        client_id = state.sync().client_id(),
        "Counter ready"
    );

    let view = tokio::spawn(render_loop(state.name(), state.count(), state.route()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let result = match Command::parse(&line) {
            Some(Command::Plus) => state.increase().await,
            Some(Command::Minus) => state.decrease().await,
            Some(Command::Quit) => break,
            None => {
                eprintln!("commands: + (plus), - (minus), q (quit)");
                continue;
            }
        };
        if let Err(e) = result {
            warn!(error = %e, "Mutation failed");
        }
    }

    view.abort();
    Ok(())
}

/// Re-render whenever the count or the route changes
async fn render_loop(name: ReadSignal<String>, count: ReadSignal<i64>, route: ReadSignal<String>) {
    let mut count_rx = count.subscribe();
    let mut route_rx = route.subscribe();

    loop {
        println!("\n{}", counter_view(&name.get(), count.get(), &route.get()));
        tokio::select! {
            changed = count_rx.changed() => if changed.is_err() { break },
            changed = route_rx.changed() => if changed.is_err() { break },
        }
    }
}
