//! Soroban RPC client — polls `getEvents` and decodes mint engine events.
//!
//! ## Resilience
//!
//! * Exponential back-off is applied when the RPC returns an error or rate-limit
//!   response, up to [`MAX_BACKOFF_SECS`] seconds.
//! * Transient network errors (connection reset, timeout) are retried silently.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::errors::{IndexerError, Result};
use crate::events::{EventKind, MintEvent};

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
#[allow(dead_code)]
pub struct RawEvent {
    /// XDR-encoded topic list
    pub topic: Vec<String>,
    /// XDR-encoded event value / data
    pub value: Value,
    #[serde(rename = "contractId")]
    pub contract_id: Option<String>,
    #[serde(rename = "txHash")]
    pub tx_hash: Option<String>,
    pub id: Option<String>,
    pub ledger: Option<u64>,
    #[serde(rename = "ledgerClosedAt")]
    pub ledger_closed_at: Option<String>,
    #[serde(rename = "inSuccessfulContractCall")]
    pub in_successful_contract_call: Option<bool>,
    #[serde(rename = "pagingToken")]
    pub paging_token: Option<String>,
}

// ─────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────

/// Fetch a page of events from the RPC.
///
/// * `start_ledger` — the ledger sequence to scan from (inclusive).
/// * `cursor`       — optional opaque pagination cursor from a previous response.
/// * `limit`        — maximum number of events to return.
///
/// Returns `(events, next_cursor, latest_ledger)`.
pub async fn fetch_events(
    client: &Client,
    rpc_url: &str,
    contract_id: &str,
    start_ledger: u32,
    cursor: Option<&str>,
    limit: u32,
) -> Result<(Vec<RawEvent>, Option<String>, Option<u64>)> {
    let mut backoff = INITIAL_BACKOFF_SECS;

    loop {
        let params = build_params(contract_id, start_ledger, cursor, limit);

        let response = client
            .post(rpc_url)
            .json(&json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "getEvents",
                "params": params,
            }))
            .send()
            .await;

        match response {
            Err(e) => {
                warn!("RPC request failed (will retry in {backoff}s): {e}");
                tokio::time::sleep(Duration::from_secs(backoff)).await;
                backoff = (backoff * 2).min(MAX_BACKOFF_SECS);
                continue;
            }
            Ok(resp) => {
                let status = resp.status();
                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    warn!("Rate-limited by RPC (will retry in {backoff}s)");
                    tokio::time::sleep(Duration::from_secs(backoff)).await;
                    backoff = (backoff * 2).min(MAX_BACKOFF_SECS);
                    continue;
                }

                let body: RpcResponse = resp.json().await?;

                if let Some(err) = body.error {
                    // Code -32600 / -32601 are hard failures; everything else we retry
                    if err.code == -32600 || err.code == -32601 {
                        return Err(IndexerError::EventParse(format!(
                            "RPC hard error {}: {}",
                            err.code, err.message
                        )));
                    }
                    warn!(
                        "RPC soft error (will retry in {backoff}s): {} {}",
                        err.code, err.message
                    );
                    tokio::time::sleep(Duration::from_secs(backoff)).await;
                    backoff = (backoff * 2).min(MAX_BACKOFF_SECS);
                    continue;
                }

                let result = body.result.ok_or_else(|| {
                    IndexerError::EventParse("Empty result from getEvents".to_string())
                })?;

                debug!(
                    "Fetched {} events (latest_ledger={:?})",
                    result.events.len(),
                    result.latest_ledger
                );

                return Ok((result.events, result.cursor, result.latest_ledger));
            }
        }
    }
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
        }
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

/// Decode a list of raw RPC events into [`MintEvent`] structs.
pub fn decode_events(raw: &[RawEvent], contract_id: &str) -> Vec<MintEvent> {
    raw.iter()
        .filter_map(|e| decode_single(e, contract_id))
        .collect()
}

fn decode_single(raw: &RawEvent, contract_id: &str) -> Option<MintEvent> {
    // Extract leading topic symbol to determine event type.
    let first_topic = raw.topic.first()?;
    let kind = EventKind::from_topic(&extract_symbol(first_topic));

    let ledger = raw.ledger.unwrap_or(0) as i64;
    let timestamp = raw
        .ledger_closed_at
        .as_deref()
        .and_then(parse_iso_to_unix)
        .unwrap_or(0);

    // Registry events are scoped by minter id in the second topic; every
    // other scoped event carries a project id there.
    let scope = raw.topic.get(1).map(|t| extract_scalar_or_raw(t));
    let (project_id, topic_minter_id) = if kind.minter_scoped() {
        (None, scope)
    } else {
        (scope, None)
    };

    let decoded = decode_data(&raw.value, &kind);

    Some(MintEvent {
        event_type: kind.as_str().to_string(),
        project_id,
        minter_id: topic_minter_id.or(decoded.minter_id),
        actor: decoded.actor,
        amount: decoded.amount,
        token_id: decoded.token_id,
        ledger,
        timestamp,
        contract_id: raw
            .contract_id
            .clone()
            .unwrap_or_else(|| contract_id.to_string()),
        tx_hash: raw.tx_hash.clone(),
    })
}

#[derive(Default)]
struct DecodedData {
    minter_id: Option<String>,
    actor: Option<String>,
    amount: Option<String>,
    token_id: Option<String>,
}

/// Pull apart the JSON `value` blob that Soroban returns for event data.
/// The XDR is decoded by the RPC into a `{"type":…, …}` JSON object.
fn decode_data(value: &Value, kind: &EventKind) -> DecodedData {
    match kind {
        EventKind::ProjectCreated => DecodedData {
            actor: extract_field(value, &["artist", "address"]),
            ..Default::default()
        },
        EventKind::TokenMinted => DecodedData {
            minter_id: extract_field(value, &["minter_id"]),
            actor: extract_field(value, &["to"]),
            amount: extract_field(value, &["price_paid"]),
            token_id: extract_field(value, &["token_id"]),
        },
        EventKind::FundsSplit => DecodedData {
            // The artist remainder is the most useful single figure.
            amount: extract_field(value, &["artist_share"]),
            ..Default::default()
        },
        EventKind::AuctionSet => DecodedData {
            minter_id: extract_field(value, &["minter_id"]),
            amount: extract_field(value, &["start_price"]),
            ..Default::default()
        },
        EventKind::ReceiptUpdated => DecodedData {
            actor: extract_field(value, &["purchaser"]),
            amount: extract_field(value, &["net_posted"]),
            ..Default::default()
        },
        EventKind::AuctionFinalized => DecodedData {
            minter_id: extract_field(value, &["minter_id"]),
            amount: extract_field(value, &["clearing_price"]),
            ..Default::default()
        },
        EventKind::RefundClaimed => DecodedData {
            actor: extract_field(value, &["purchaser"]),
            amount: extract_field(value, &["amount"]),
            ..Default::default()
        },
        EventKind::RevenuesWithdrawn => DecodedData {
            minter_id: extract_field(value, &["minter_id"]),
            amount: extract_field(value, &["amount"]),
            ..Default::default()
        },
        // Plain scalar payloads.
        EventKind::ArtistUpdated | EventKind::AdminUpdated => DecodedData {
            actor: scalar_string(value),
            ..Default::default()
        },
        EventKind::MaxInvocationsUpdated => DecodedData {
            amount: scalar_string(value),
            ..Default::default()
        },
        EventKind::MinterAssigned | EventKind::AuctionReset | EventKind::GateSet => DecodedData {
            minter_id: scalar_string(value),
            ..Default::default()
        },
        // Tuple payloads: (minter_id, price) and (minter_id, root).
        EventKind::PriceConfigured => DecodedData {
            minter_id: tuple_element(value, 0),
            amount: tuple_element(value, 1),
            ..Default::default()
        },
        EventKind::RootSet => DecodedData {
            minter_id: tuple_element(value, 0),
            ..Default::default()
        },
        EventKind::PayeeUpdated => DecodedData {
            actor: tuple_element(value, 0),
            ..Default::default()
        },
        // (render_bps, platform_bps) and (render, platform).
        EventKind::ProviderSharesUpdated => DecodedData {
            amount: tuple_element(value, 0),
            ..Default::default()
        },
        EventKind::ProviderAddressesUpdated => DecodedData {
            actor: tuple_element(value, 0),
            ..Default::default()
        },
        EventKind::ProjectActive
        | EventKind::ProjectPaused
        | EventKind::MinterAdded
        | EventKind::MinterApproved
        | EventKind::MinterRevoked
        | EventKind::MinterRemoved
        | EventKind::Unknown => DecodedData::default(),
    }
}

fn extract_field(value: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(v) = value.get(key) {
            let s = match v {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => v.as_str().map(String::from),
            };
            if s.is_some() {
                return s;
            }
        }
    }
    None
}

/// Render a scalar payload (string, number, or `{"value": …}` wrapper).
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(_) => value
            .get("value")
            .and_then(|v| scalar_string(v)),
        _ => None,
    }
}

/// Element `index` of a tuple payload, which the RPC renders as a JSON array.
fn tuple_element(value: &Value, index: usize) -> Option<String> {
    let arr = value
        .as_array()
        .or_else(|| value.get("value").and_then(|v| v.as_array()))?;
    scalar_string(arr.get(index)?)
}

/// Extract a Soroban Symbol from the XDR-decoded topic string.
/// The RPC may return `{"type":"symbol","value":"minted"}` or just the raw string.
fn extract_symbol(raw: &str) -> String {
    if let Ok(v) = serde_json::from_str::<Value>(raw) {
        if let Some(s) = v.get("value").and_then(|x| x.as_str()) {
            return s.to_string();
        }
    }
    // Fallback: treat the raw string as the symbol
    raw.to_string()
}

/// Extract a project or minter id from a topic entry that might be a JSON
/// object or raw number/string.
fn extract_scalar_or_raw(raw: &str) -> String {
    if let Ok(v) = serde_json::from_str::<Value>(raw) {
        if let Some(n) = v.get("value").and_then(|x| x.as_u64()) {
            return n.to_string();
        }
        if let Some(s) = v.get("value").and_then(|x| x.as_str()) {
            return s.to_string();
        }
    }
    raw.to_string()
}

/// Parse an ISO-8601 timestamp string into a Unix epoch (seconds).
fn parse_iso_to_unix(s: &str) -> Option<i64> {
    use chrono::DateTime;
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.timestamp())
}

// ─────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────
