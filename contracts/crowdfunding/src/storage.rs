//! # Storage
//!
//! Typed helpers over Soroban instance storage. The contract holds exactly
//! one project for its whole lifetime, so every entry lives in the instance
//! tier and shares the contract's TTL.
//!
//! | Key        | Type              | Description                        |
//! |------------|-------------------|------------------------------------|
//! | `Config`   | `ProjectConfig`   | Immutable project configuration    |
//! | `Progress` | `ProjectProgress` | Funds and lifecycle state          |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.

use soroban_sdk::{contracttype, Env};

use crate::types::{Project, ProjectConfig, ProjectProgress};

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Immutable project configuration.
    Config,
    /// Mutable funds and state.
    Progress,
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Write the configuration and initial progress of a freshly constructed project.
pub fn save_project(env: &Env, config: &ProjectConfig, progress: &ProjectProgress) {
    env.storage().instance().set(&DataKey::Config, config);
    env.storage().instance().set(&DataKey::Progress, progress);
    bump_instance(env);
}

/// Load the full `Project` by combining config and progress.
pub fn load_project(env: &Env) -> Project {
    Project::from_parts(load_config(env), load_progress(env))
}

/// Load only the immutable configuration.
/// Panics if the constructor never ran.
pub fn load_config(env: &Env) -> ProjectConfig {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .expect("project not initialized")
}

/// Load only the mutable progress entry.
pub fn load_progress(env: &Env) -> ProjectProgress {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Progress)
        .expect("project not initialized")
}

/// Overwrite the mutable progress entry.
pub fn save_progress(env: &Env, progress: &ProjectProgress) {
    env.storage().instance().set(&DataKey::Progress, progress);
    bump_instance(env);
}

