#![allow(dead_code)]

extern crate std;

use crate::types::{Project, ProjectState};

/// INV-1: Funds must never be negative.
pub fn assert_funds_non_negative(project: &Project) {
    assert!(
        project.funds >= 0,
        "INV-1 violated: project has negative funds ({})",
        project.funds
    );
}

/// INV-2: Fundraising goal must never be negative.
pub fn assert_goal_non_negative(project: &Project) {
    assert!(
        project.fundraising_goal >= 0,
        "INV-2 violated: project has negative goal ({})",
        project.fundraising_goal
    );
}

/// INV-3: Funds only grow. After an operation the counter is either
/// unchanged or larger.
pub fn assert_funds_monotonic(funds_before: i128, funds_after: i128) {
    assert!(
        funds_after >= funds_before,
        "INV-3 violated: funds decreased from {} to {}",
        funds_before,
        funds_after
    );
}

/// INV-4: A successful contribution of `amount` increases funds by exactly
/// `amount`.
pub fn assert_fund_invariant(funds_before: i128, funds_after: i128, amount: i128) {
    assert_eq!(
        funds_after,
        funds_before + amount,
        "INV-4 violated: fund invariant broken: {} + {} != {}",
        funds_before,
        amount,
        funds_after
    );
}

/// INV-5: The only transitions are Opened -> Closed and Closed -> Opened.
pub fn assert_valid_state_transition(from: &ProjectState, to: &ProjectState) {
    let valid = matches!(
        (from, to),
        (ProjectState::Opened, ProjectState::Closed) | (ProjectState::Closed, ProjectState::Opened)
    );

    assert!(
        valid,
        "INV-5 violated: invalid state transition from {:?} to {:?}",
        from, to
    );
}

/// INV-6: Fields set at construction never change.
pub fn assert_project_immutable_fields(original: &Project, current: &Project) {
    assert_eq!(original.id, current.id, "INV-6 violated: project id changed");
    assert_eq!(
        original.name, current.name,
        "INV-6 violated: project name changed"
    );
    assert_eq!(
        original.description, current.description,
        "INV-6 violated: project description changed"
    );
    assert_eq!(
        original.fundraising_goal, current.fundraising_goal,
        "INV-6 violated: project fundraising_goal changed"
    );
    assert_eq!(
        original.author, current.author,
        "INV-6 violated: project author changed"
    );
    assert_eq!(
        original.token, current.token,
        "INV-6 violated: project token changed"
    );
}

/// Run all stateless project invariants.
pub fn assert_all_project_invariants(project: &Project) {
    assert_funds_non_negative(project);
    assert_goal_non_negative(project);
}
