//! # Types
//!
//! Data structures shared by the contract entry points, storage and events.
//!
//! ## Config / Progress split
//!
//! The single `Project` is stored as two instance-storage entries:
//!
//! - [`ProjectConfig`] — written once by the constructor; never mutated.
//! - [`ProjectProgress`] — rewritten on every contribution and state change.
//!
//! The public API exposes the reconstructed [`Project`].
//!
//! ## Lifecycle
//!
//! [`ProjectState`] is a two-state switch controlled by the author:
//!
//! ```text
//! Opened ◄──► Closed
//! ```
//!
//! There is no terminal state.

use soroban_sdk::{contracttype, Address, String};

/// Whether the project accepts contributions.
///
/// Encoded on the wire as `0 = Opened`, `1 = Closed`.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ProjectState {
    /// Accepting contributions.
    Opened = 0,
    /// Contributions are rejected until the author reopens the project.
    Closed = 1,
}

impl ProjectState {
    /// Decode a raw state code. Returns `None` for anything outside `{0, 1}`.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::Opened),
            1 => Some(Self::Closed),
            _ => None,
        }
    }

    pub fn code(self) -> u32 {
        self as u32
    }
}

/// Immutable project configuration, written once at construction.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectConfig {
    pub id: String,
    pub name: String,
    pub description: String,
    pub fundraising_goal: i128,
    pub author: Address,
    pub token: Address,
}

/// Mutable project progress, updated by `fund_project` and
/// `change_project_state`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectProgress {
    pub funds: i128,
    pub state: ProjectState,
}

/// Full on-chain representation of the crowdfunding project.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Project {
    /// Opaque identifier chosen at construction.
    pub id: String,
    pub name: String,
    pub description: String,
    /// Advisory target amount. Contributions are not capped by it.
    pub fundraising_goal: i128,
    /// Address that created the project and receives every contribution.
    pub author: Address,
    /// Token contract whose units are contributed.
    pub token: Address,
    /// Total contributed so far. Never decreases.
    pub funds: i128,
    /// Current lifecycle state.
    pub state: ProjectState,
}

impl Project {
    pub(crate) fn from_parts(config: ProjectConfig, progress: ProjectProgress) -> Self {
        Project {
            id: config.id,
            name: config.name,
            description: config.description,
            fundraising_goal: config.fundraising_goal,
            author: config.author,
            token: config.token,
            funds: progress.funds,
            state: progress.state,
        }
    }
}
