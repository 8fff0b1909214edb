//! Command runners. Data payloads go to stdout as JSON, logs go to stderr.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use serde::Serialize;
use serde_json::json;
use tokio::sync::watch;
use tokio::time::{timeout_at, Instant};

use tickerlens_core::movers::{PollingConfig, PollingScheduler};
use tickerlens_core::prices::PriceDetailLoader;
use tickerlens_core::quotes::{DirectSource, MarketDataClient, MoversSource, PriceSource};
use tickerlens_core::search::{Key, SearchConfig, SearchController, SearchPhase, SearchView};
use tickerlens_market_data::PriceQuery;

use crate::cli::Command;
use crate::config::Config;
use crate::main_lib::{build_client, build_provider};

/// Slack on top of debounce and request timeout when waiting for a search.
const SETTLE_MARGIN: Duration = Duration::from_secs(1);

pub async fn run(command: Command, config: &Config) -> anyhow::Result<()> {
    let provider = build_provider(config);
    let client = build_client(config, provider.clone());

    match command {
        Command::Search { query, limit } => search(&client, &query, limit).await,
        Command::TypeAhead {
            text,
            keystroke_ms,
            select,
        } => {
            type_ahead(
                client,
                config,
                &text,
                Duration::from_millis(keystroke_ms),
                select,
            )
            .await
        }
        Command::Movers { ticks, direct } => {
            let source: Arc<dyn MoversSource> = if direct {
                Arc::new(DirectSource::new(provider))
            } else {
                client
            };
            movers(source, config, ticks).await
        }
        Command::Prices {
            symbol,
            days,
            granularity,
            limit,
            direct,
        } => {
            let source: Arc<dyn PriceSource> = if direct {
                Arc::new(DirectSource::new(provider))
            } else {
                client
            };
            let query = PriceQuery::new(days, granularity.into(), limit);
            prices(source, query, &symbol).await
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("failed to encode output")?
    );
    Ok(())
}

async fn search(client: &MarketDataClient, query: &str, limit: usize) -> anyhow::Result<()> {
    let sourced = client.search_sourced(query, limit).await;
    print_json(&json!({
        "query": query,
        "origin": sourced.origin,
        "results": sourced.data,
    }))
}

async fn type_ahead(
    client: Arc<MarketDataClient>,
    config: &Config,
    text: &str,
    keystroke: Duration,
    select: Option<usize>,
) -> anyhow::Result<()> {
    if text.is_empty() {
        anyhow::bail!("TEXT must not be empty");
    }

    let mut controller = SearchController::new(
        client,
        SearchConfig {
            debounce: config.search_debounce,
            ..Default::default()
        },
    );
    let mut updates = controller.subscribe();

    let mut typed = String::new();
    for ch in text.chars() {
        typed.push(ch);
        controller.input(&typed);
        wait_for_view(&mut updates, Instant::now() + keystroke, |_| false).await?;
    }

    let settle_window = config.search_debounce + config.request_timeout + SETTLE_MARGIN;
    let settled = wait_for_view(&mut updates, Instant::now() + settle_window, |view| {
        !view.loading && matches!(view.phase, SearchPhase::Shown | SearchPhase::Hidden)
    })
    .await?;
    if !settled {
        tracing::warn!("Search did not settle within {:?}", settle_window);
    }

    if let Some(index) = select {
        for _ in 0..=index {
            controller.handle_key(Key::ArrowDown);
        }
        match controller.handle_key(Key::Enter) {
            Some(result) => print_json(&json!({ "committed": result }))?,
            None => tracing::warn!("No result at row {} to select", index),
        }
    }

    Ok(())
}

/// Print views as they change until `done` holds or `deadline` passes.
/// Returns whether `done` was reached.
async fn wait_for_view(
    updates: &mut watch::Receiver<SearchView>,
    deadline: Instant,
    done: impl Fn(&SearchView) -> bool,
) -> anyhow::Result<bool> {
    loop {
        if updates.has_changed().unwrap_or(false) {
            let view = updates.borrow_and_update().clone();
            print_json(&view)?;
            if done(&view) {
                return Ok(true);
            }
        }

        match timeout_at(deadline, updates.changed()).await {
            Ok(Ok(())) => continue,
            Ok(Err(_)) | Err(_) => return Ok(false),
        }
    }
}

async fn movers(
    source: Arc<dyn MoversSource>,
    config: &Config,
    ticks: usize,
) -> anyhow::Result<()> {
    let scheduler = PollingScheduler::start(
        source,
        PollingConfig {
            period: config.poll_interval,
        },
    );
    let mut updates = scheduler.subscribe();

    for _ in 0..ticks {
        updates
            .changed()
            .await
            .context("movers feed closed unexpectedly")?;
        let feed = updates.borrow_and_update().clone();
        print_json(&feed)?;
    }

    scheduler.stop();
    Ok(())
}

async fn prices(source: Arc<dyn PriceSource>, query: PriceQuery, symbol: &str) -> anyhow::Result<()> {
    let loader = PriceDetailLoader::with_query(source, query);
    let detail = loader.load(symbol).await?;
    print_json(&detail)
}
