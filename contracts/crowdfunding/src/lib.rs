//! # CrowdFunding Contract
//!
//! A single-project crowdfunding ledger. The contract is constructed with one
//! project, accepts token contributions from anyone except the project
//! author, and lets the author open or close the project to contributions.
//!
//! | Phase        | Entry Point(s)                              |
//! |--------------|---------------------------------------------|
//! | Bootstrap    | `__constructor`                             |
//! | Funding      | [`CrowdFunding::fund_project`]              |
//! | Lifecycle    | [`CrowdFunding::change_project_state`]      |
//! | Queries      | [`CrowdFunding::project`]                   |
//!
//! ## Architecture
//!
//! Storage access is delegated to [`storage`] and event publication to
//! [`events`]. Caller identity and contributed amount are explicit
//! parameters; the contributed value moves from contributor to author
//! through the project's token contract inside the same invocation, so a
//! failed transfer aborts the whole call and leaves storage untouched.

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, panic_with_error, token, Address, Env, String,
};

pub mod events;
mod storage;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_events;

use storage::{load_config, load_progress, load_project, save_progress, save_project};
pub use types::{Project, ProjectState};
use types::{ProjectConfig, ProjectProgress};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// The author tried to contribute to their own project.
    AuthorCannotFund = 1,
    /// A non-author tried to change the project state.
    NotAuthor = 2,
    /// The project is closed and not accepting funds.
    ProjectClosed = 3,
    /// The requested state equals the current state.
    StateUnchanged = 4,
    /// Contribution amount was zero or negative.
    InvalidAmount = 5,
    /// The requested state code is not a known `ProjectState`.
    UnknownState = 6,
    /// The fundraising goal was negative.
    InvalidGoal = 7,
    /// Adding the contribution would overflow the funds counter.
    FundsOverflow = 8,
}

/// Coarse classification of [`Error`] for callers that only care about the
/// category of a failure.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Wrong caller for the requested action.
    Unauthorized,
    /// The action is not permitted in the current lifecycle state.
    InvalidState,
    /// A supplied value is out of range.
    InvalidInput,
}

impl Error {
    pub fn kind(self) -> ErrorKind {
        match self {
            Error::AuthorCannotFund | Error::NotAuthor => ErrorKind::Unauthorized,
            Error::ProjectClosed | Error::StateUnchanged => ErrorKind::InvalidState,
            Error::InvalidAmount
            | Error::UnknownState
            | Error::InvalidGoal
            | Error::FundsOverflow => ErrorKind::InvalidInput,
        }
    }
}

#[contract]
pub struct CrowdFunding;

#[contractimpl]
impl CrowdFunding {
    /// Create the project. `author` must sign and becomes the only address
    /// allowed to change the project state.
    ///
    /// `fundraising_goal` is advisory; zero is accepted, negative values are
    /// rejected with `Error::InvalidGoal`.
    pub fn __constructor(
        env: Env,
        author: Address,
        token: Address,
        id: String,
        name: String,
        description: String,
        fundraising_goal: i128,
    ) {
        author.require_auth();

        if fundraising_goal < 0 {
            panic_with_error!(&env, Error::InvalidGoal);
        }

        let config = ProjectConfig {
            id,
            name,
            description,
            fundraising_goal,
            author,
            token,
        };
        let progress = ProjectProgress {
            funds: 0,
            state: ProjectState::Opened,
        };
        save_project(&env, &config, &progress);
    }

    /// Return the current project snapshot.
    pub fn project(env: Env) -> Project {
        load_project(&env)
    }

    /// Contribute `amount` token units to the project.
    ///
    /// Checks, in order: the contributor is not the author, the project is
    /// opened, and `amount` is positive. A failed check returns the matching
    /// [`Error`] and leaves storage untouched. On success the amount is
    /// transferred from `contributor` straight to the author, `funds` grows
    /// by `amount`, and `ProjectFunded` is emitted.
    pub fn fund_project(env: Env, contributor: Address, amount: i128) -> Result<(), Error> {
        contributor.require_auth();

        let config = load_config(&env);
        let mut progress = load_progress(&env);

        if contributor == config.author {
            return Err(Error::AuthorCannotFund);
        }
        if progress.state != ProjectState::Opened {
            return Err(Error::ProjectClosed);
        }
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        let funds = progress
            .funds
            .checked_add(amount)
            .ok_or(Error::FundsOverflow)?;

        // Transfer first: a failing transfer traps before funds are written.
        let token_client = token::Client::new(&env, &config.token);
        token_client.transfer(&contributor, &config.author, &amount);

        progress.funds = funds;
        save_progress(&env, &progress);

        events::emit_project_funded(&env, config.id, contributor, amount);
        Ok(())
    }

    /// Switch the project between `Opened` (`0`) and `Closed` (`1`).
    ///
    /// Checks, in order: `new_state` is a known code, `caller` is the author,
    /// and `new_state` differs from the current state.
    pub fn change_project_state(env: Env, caller: Address, new_state: u32) -> Result<(), Error> {
        let new_state = ProjectState::from_code(new_state).ok_or(Error::UnknownState)?;

        let config = load_config(&env);
        if caller != config.author {
            return Err(Error::NotAuthor);
        }
        caller.require_auth();

        let mut progress = load_progress(&env);
        if progress.state == new_state {
            return Err(Error::StateUnchanged);
        }

        progress.state = new_state;
        save_progress(&env, &progress);

        events::emit_project_state_changed(&env, config.id, new_state);
        Ok(())
    }
}
