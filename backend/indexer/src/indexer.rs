//! Long-running background task that polls the Soroban RPC and writes
//! decoded CrowdFunding events to the database.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use sqlx::SqlitePool;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::config::Config;
use crate::db;
use crate::errors::Result;
use crate::rpc;

pub struct IndexerState {
    pub pool: SqlitePool,
    pub config: Config,
    pub client: Client,
}

/// Where the next poll starts.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Position {
    ledger: u32,
    cursor: Option<String>,
}

/// Poll until `shutdown` is cancelled.
pub async fn run(state: Arc<IndexerState>, shutdown: CancellationToken) {
    info!("Indexer starting — contract: {}", state.config.contract_id);

    let (last_ledger, cursor) = match db::load_cursor(&state.pool).await {
        Ok(saved) => saved,
        Err(e) => {
            error!("Failed to load indexer cursor, starting fresh: {e}");
            (0, None)
        }
    };
    let mut position = resume_position(last_ledger, cursor, state.config.start_ledger);

    info!("Resuming from ledger {}", position.ledger);

    loop {
        let polled = tokio::select! {
            _ = shutdown.cancelled() => break,
            polled = poll_once(&state, &position) => polled,
        };
        match polled {
            Ok(next) => position = next,
            Err(e) => error!("Indexer poll error: {e}"),
        }

        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = tokio::time::sleep(Duration::from_secs(state.config.poll_interval_secs)) => {}
        }
    }

    info!("Indexer stopped at ledger {}", position.ledger);
}

/// A saved cursor wins over the configured start ledger.
fn resume_position(last_ledger: i64, cursor: Option<String>, start_ledger: u32) -> Position {
    if last_ledger > 0 {
        Position {
            ledger: u32::try_from(last_ledger).unwrap_or(u32::MAX),
            cursor,
        }
    } else {
        Position {
            ledger: start_ledger,
            cursor: None,
        }
    }
}

/// Perform a single poll iteration and return the position for the next one.
async fn poll_once(state: &IndexerState, position: &Position) -> Result<Position> {
    let page = rpc::fetch_events(
        &state.client,
        &state.config.rpc_url,
        &state.config.contract_id,
        position.ledger,
        position.cursor.as_deref(),
        state.config.events_per_page,
    )
    .await?;

    if !page.events.is_empty() {
        let decoded = rpc::decode_events(&page.events, &state.config.contract_id);
        let inserted = db::insert_events(&state.pool, &decoded).await?;
        info!(
            "Polled {} raw events → {} new records stored",
            page.events.len(),
            inserted
        );
    }

    let next = next_position(position, page.cursor, page.latest_ledger);

    // Persist so restarts are deterministic.
    db::save_cursor(&state.pool, next.ledger as i64, next.cursor.as_deref()).await?;

    Ok(next)
}

/// Paging continues from the returned cursor; the start ledger only moves
/// forward, towards the latest ledger the RPC has seen.
fn next_position(
    current: &Position,
    cursor: Option<String>,
    latest_ledger: Option<u64>,
) -> Position {
    let ledger = latest_ledger
        .map(|l| u32::try_from(l).unwrap_or(u32::MAX).max(current.ledger))
        .unwrap_or(current.ledger);
    Position {
        ledger,
        cursor: cursor.or_else(|| current.cursor.clone()),
    }
}
