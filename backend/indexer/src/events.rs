//! Event types emitted by the CrowdFunding contract, as seen by the indexer.
//!
//! These mirror `contracts/crowdfunding/src/events.rs`: every contract event
//! carries a short symbol as its first topic and the project id as its second.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::IndexerError;

/// All recognised event kinds from the CrowdFunding contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A contributor funded the project (`funded` topic).
    ProjectFunded,
    /// The author opened or closed the project (`state` topic).
    ProjectStateChanged,
    /// An event from this contract that we don't recognise.
    Unknown,
}

impl EventKind {
    /// Map the leading topic symbol of a contract event to its kind.
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "funded" => Self::ProjectFunded,
            "state" => Self::ProjectStateChanged,
            _ => Self::Unknown,
        }
    }

    /// Identifier stored in the `event_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProjectFunded => "project_funded",
            Self::ProjectStateChanged => "project_state_changed",
            Self::Unknown => "unknown",
        }
    }
}

impl FromStr for EventKind {
    type Err = IndexerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "project_funded" => Ok(Self::ProjectFunded),
            "project_state_changed" => Ok(Self::ProjectStateChanged),
            "unknown" => Ok(Self::Unknown),
            other => Err(IndexerError::UnknownKind(other.to_string())),
        }
    }
}

/// Human-readable name for a contract `ProjectState` code.
pub fn state_name(code: u64) -> Option<&'static str> {
    match code {
        0 => Some("opened"),
        1 => Some("closed"),
        _ => None,
    }
}

/// A decoded contract event, ready to be stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractEvent {
    /// RPC event id; identical contributions in one transaction differ here.
    pub event_id: String,
    pub event_type: String,
    pub project_id: Option<String>,
    /// Contributor address for `project_funded`.
    pub actor: Option<String>,
    /// Contributed amount as a decimal string (i128 does not fit JSON numbers).
    pub amount: Option<String>,
    /// `opened` / `closed` for `project_state_changed`.
    pub state: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// An event row as stored in / read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_id: String,
    pub event_type: String,
    pub project_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub state: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}
