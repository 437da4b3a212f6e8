//! Project view reconstructed from indexed events.
//!
//! The contract's `funds` counter only grows through `funded` events and its
//! state only changes through `state` events, so replaying them in ledger
//! order reproduces the on-chain project without calling the contract.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::warn;

use crate::events::{EventKind, EventRecord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    pub project_id: Option<String>,
    /// Sum of all contributions, as a decimal string.
    pub total_funds: String,
    pub contribution_count: usize,
    pub contributor_count: usize,
    /// `opened` or `closed`.
    pub state: String,
    pub last_ledger: Option<i64>,
}

/// Fold `events` (ordered by ledger ascending) into a [`ProjectSummary`].
pub fn summarize(events: &[EventRecord]) -> ProjectSummary {
    let mut project_id = None;
    let mut total: i128 = 0;
    let mut contribution_count = 0;
    let mut contributors: BTreeSet<&str> = BTreeSet::new();
    let mut state = "opened".to_string();
    let mut last_ledger = None;

    for ev in events {
        let kind = ev.event_type.parse().unwrap_or(EventKind::Unknown);
        match kind {
            EventKind::ProjectFunded => {
                let Some(amount) = ev.amount.as_deref().and_then(|a| a.parse::<i128>().ok())
                else {
                    warn!("Skipping funded event {} with unreadable amount", ev.id);
                    continue;
                };
                total = total.saturating_add(amount);
                contribution_count += 1;
                if let Some(actor) = ev.actor.as_deref() {
                    contributors.insert(actor);
                }
            }
            EventKind::ProjectStateChanged => match ev.state.as_deref() {
                Some(s) => state = s.to_string(),
                None => continue,
            },
            EventKind::Unknown => continue,
        }

        if project_id.is_none() {
            project_id = ev.project_id.clone();
        }
        last_ledger = Some(ev.ledger);
    }

    ProjectSummary {
        project_id,
        total_funds: total.to_string(),
        contribution_count,
        contributor_count: contributors.len(),
        state,
        last_ledger,
    }
}
