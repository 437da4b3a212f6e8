//! Soroban RPC client — polls `getEvents` and decodes CrowdFunding events.
//!
//! ## Resilience
//!
//! * Exponential back-off is applied when the RPC returns an error or rate-limit
//!   response, up to [`MAX_BACKOFF_SECS`] seconds.
//! * Transient network errors (connection reset, timeout) are retried silently.
//! * Events recorded inside a failed contract call are dropped during decoding;
//!   the contract only publishes on success, so these never describe a real
//!   state change.
//!
//! ## Wire format
//!
//! Events are requested with `xdrFormat: "json"`, so topics and data arrive
//! as JSON-encoded `ScVal`s in `topicJson` / `valueJson`: single-key objects
//! such as `{"symbol":"funded"}`, `{"i128":"100"}` or
//! `{"map":[{"key":…,"val":…}]}`.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::errors::{IndexerError, Result};
use crate::events::{state_name, ContractEvent, EventKind};

const MAX_BACKOFF_SECS: u64 = 60;
const INITIAL_BACKOFF_SECS: u64 = 2;

// ─────────────────────────────────────────────────────────
// JSON-RPC response shapes
// ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    pub result: Option<EventsResult>,
    pub error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct EventsResult {
    pub events: Vec<RawEvent>,
    pub cursor: Option<String>,
    #[serde(rename = "latestLedger")]
    pub latest_ledger: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawEvent {
    /// Unique event id, `<toid>-<index>`.
    pub id: Option<String>,
    /// Topic list as JSON `ScVal`s.
    #[serde(rename = "topicJson", default)]
    pub topic: Vec<Value>,
    /// Event data as a JSON `ScVal`.
    #[serde(rename = "valueJson", default)]
    pub value: Value,
    #[serde(rename = "contractId")]
    pub contract_id: Option<String>,
    #[serde(rename = "txHash")]
    pub tx_hash: Option<String>,
    pub ledger: Option<u64>,
    #[serde(rename = "ledgerClosedAt")]
    pub ledger_closed_at: Option<String>,
    #[serde(rename = "inSuccessfulContractCall")]
    pub in_successful_contract_call: Option<bool>,
}

/// One page of `getEvents` output.
#[derive(Debug)]
pub struct EventPage {
    pub events: Vec<RawEvent>,
    pub cursor: Option<String>,
    pub latest_ledger: Option<u64>,
}

// ─────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────

/// Fetch a page of events from the RPC.
///
/// * `start_ledger` — the ledger sequence to scan from (inclusive), used
///   only when there is no `cursor`.
/// * `cursor`       — optional opaque pagination cursor from a previous response.
/// * `limit`        — maximum number of events to return.
pub async fn fetch_events(
    client: &Client,
    rpc_url: &str,
    contract_id: &str,
    start_ledger: u32,
    cursor: Option<&str>,
    limit: u32,
) -> Result<EventPage> {
    let mut backoff = INITIAL_BACKOFF_SECS;
    let body = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "getEvents",
        "params": build_params(contract_id, start_ledger, cursor, limit),
    });

    loop {
        let resp = match client.post(rpc_url).json(&body).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!("RPC request failed (will retry in {backoff}s): {e}");
                back_off(&mut backoff).await;
                continue;
            }
        };

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!("Rate-limited by RPC (will retry in {backoff}s)");
            back_off(&mut backoff).await;
            continue;
        }

        let parsed: RpcResponse = resp.json().await?;

        if let Some(err) = parsed.error {
            if is_hard_error(err.code) {
                return Err(IndexerError::Rpc(format!(
                    "hard error {}: {}",
                    err.code, err.message
                )));
            }
            warn!(
                "RPC soft error (will retry in {backoff}s): {} {}",
                err.code, err.message
            );
            back_off(&mut backoff).await;
            continue;
        }

        let result = parsed
            .result
            .ok_or_else(|| IndexerError::Rpc("empty result from getEvents".to_string()))?;

        debug!(
            "Fetched {} events (latest_ledger={:?})",
            result.events.len(),
            result.latest_ledger
        );

        return Ok(EventPage {
            events: result.events,
            cursor: result.cursor,
            latest_ledger: result.latest_ledger,
        });
    }
}

async fn back_off(backoff: &mut u64) {
    tokio::time::sleep(Duration::from_secs(*backoff)).await;
    *backoff = (*backoff * 2).min(MAX_BACKOFF_SECS);
}

/// Invalid request / unknown method: retrying cannot help.
fn is_hard_error(code: i64) -> bool {
    code == -32600 || code == -32601
}

fn build_params(contract_id: &str, start_ledger: u32, cursor: Option<&str>, limit: u32) -> Value {
    let mut params = json!({
        "filters": [
            {
                "type": "contract",
                "contractIds": [contract_id]
            }
        ],
        "pagination": {
            "limit": limit
        },
        "xdrFormat": "json"
    });

    if let Some(cur) = cursor {
        params["pagination"]["cursor"] = json!(cur);
    } else {
        params["startLedger"] = json!(start_ledger);
    }

    params
}

// ─────────────────────────────────────────────────────────
// Event decoding
// ─────────────────────────────────────────────────────────

/// Decode raw RPC events into [`ContractEvent`]s, skipping events from
/// failed contract calls.
pub fn decode_events(raw: &[RawEvent], contract_id: &str) -> Vec<ContractEvent> {
    raw.iter()
        .filter(|e| e.in_successful_contract_call != Some(false))
        .filter_map(|e| decode_single(e, contract_id))
        .collect()
}

fn decode_single(raw: &RawEvent, contract_id: &str) -> Option<ContractEvent> {
    let event_id = raw.id.clone()?;
    let kind = EventKind::from_topic(&scalar_string(raw.topic.first()?)?);

    let timestamp = raw
        .ledger_closed_at
        .as_deref()
        .and_then(parse_iso_to_unix)
        .unwrap_or(0);

    let project_id = raw
        .topic
        .get(1)
        .and_then(scalar_string)
        .or_else(|| extract_field(&raw.value, "project_id"));

    let (actor, amount, state) = match kind {
        EventKind::ProjectFunded => (
            extract_field(&raw.value, "contributor"),
            extract_field(&raw.value, "amount"),
            None,
        ),
        EventKind::ProjectStateChanged => (None, None, extract_state(&raw.value)),
        EventKind::Unknown => (None, None, None),
    };

    Some(ContractEvent {
        event_id,
        event_type: kind.as_str().to_string(),
        project_id,
        actor,
        amount,
        state,
        ledger: raw.ledger.unwrap_or(0) as i64,
        timestamp,
        contract_id: raw
            .contract_id
            .clone()
            .unwrap_or_else(|| contract_id.to_string()),
        tx_hash: raw.tx_hash.clone(),
    })
}

/// Read a scalar out of a JSON `ScVal` such as `{"symbol":"funded"}`,
/// `{"i128":"100"}` or `{"u32":1}`. Bare strings and numbers pass through.
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) if map.len() == 1 => {
            let (tag, inner) = map.iter().next()?;
            match tag.as_str() {
                "symbol" | "string" | "address" | "u32" | "i32" | "u64" | "i64" | "u128"
                | "i128" | "timepoint" | "duration" => scalar_string(inner),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Look up `key` in a `{"map":[{"key":…,"val":…}]}` value (a contract struct).
fn extract_field(value: &Value, key: &str) -> Option<String> {
    value
        .get("map")?
        .as_array()?
        .iter()
        .find(|entry| entry.get("key").and_then(scalar_string).as_deref() == Some(key))
        .and_then(|entry| entry.get("val"))
        .and_then(scalar_string)
}

/// The `state` field is the numeric `ProjectState` code.
fn extract_state(value: &Value) -> Option<String> {
    let code = extract_field(value, "state")?.parse::<u64>().ok()?;
    state_name(code).map(String::from)
}

/// Parse an ISO-8601 timestamp string into a Unix epoch (seconds).
fn parse_iso_to_unix(s: &str) -> Option<i64> {
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.timestamp())
}

// ─────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────
