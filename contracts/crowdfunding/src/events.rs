//! Contract events.
//!
//! Every event is published only after the corresponding storage write, with
//! a short symbol and the project id as topics:
//!
//! | Event                    | Topics                     |
//! |--------------------------|----------------------------|
//! | [`ProjectFunded`]        | `("funded", project_id)`   |
//! | [`ProjectStateChanged`]  | `("state", project_id)`    |

use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

use crate::types::ProjectState;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectFunded {
    pub project_id: String,
    pub contributor: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectStateChanged {
    pub project_id: String,
    pub state: ProjectState,
}

pub fn emit_project_funded(env: &Env, project_id: String, contributor: Address, amount: i128) {
    let topics = (symbol_short!("funded"), project_id.clone());
    let data = ProjectFunded {
        project_id,
        contributor,
        amount,
    };
    env.events().publish(topics, data);
}

pub fn emit_project_state_changed(env: &Env, project_id: String, state: ProjectState) {
    let topics = (symbol_short!("state"), project_id.clone());
    let data = ProjectStateChanged { project_id, state };
    env.events().publish(topics, data);
}
