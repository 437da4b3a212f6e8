extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    token, vec, Address, Env, IntoVal, String, TryIntoVal,
};

use crate::events::{ProjectFunded, ProjectStateChanged};
use crate::{CrowdFunding, CrowdFundingClient, Error, ProjectState};

const OPENED: u32 = 0;
const CLOSED: u32 = 1;

fn setup() -> (
    Env,
    CrowdFundingClient<'static>,
    Address,
    token::Client<'static>,
) {
    let env = Env::default();
    env.mock_all_auths();
    let author = Address::generate(&env);
    let token_admin = Address::generate(&env);
    let token_addr = env.register_stellar_asset_contract_v2(token_admin);
    let token = token::Client::new(&env, &token_addr.address());

    let contract_id = env.register(
        CrowdFunding,
        (
            author.clone(),
            token.address.clone(),
            String::from_str(&env, "1"),
            String::from_str(&env, "Project Name"),
            String::from_str(&env, "Project Description"),
            100i128,
        ),
    );
    let client = CrowdFundingClient::new(&env, &contract_id);
    (env, client, author, token)
}

#[test]
fn test_project_funded_event() {
    let (env, client, _author, token) = setup();
    let contributor = Address::generate(&env);
    let amount = 1i128;
    token::StellarAssetClient::new(&env, &token.address).mint(&contributor, &10);

    client.fund_project(&contributor, &amount);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("funded"), project_id)
    assert_eq!(last_event.0, client.address);
    let project_id = client.project().id;
    let expected_topics = vec![
        &env,
        symbol_short!("funded").into_val(&env),
        project_id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: ProjectFunded = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        ProjectFunded {
            project_id,
            contributor: contributor.clone(),
            amount,
        }
    );
}

#[test]
fn test_project_state_changed_event() {
    let (env, client, author, _token) = setup();

    client.change_project_state(&author, &CLOSED);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("state"), project_id)
    assert_eq!(last_event.0, client.address);
    let project_id = client.project().id;
    let expected_topics = vec![
        &env,
        symbol_short!("state").into_val(&env),
        project_id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: ProjectStateChanged = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        ProjectStateChanged {
            project_id,
            state: ProjectState::Closed,
        }
    );
}

/// End-to-end: a contributor funds an opened project with goal 100.
///
/// Funds become 1, `ProjectFunded(id, 1)` is published, the author gains
/// exactly the contributed amount and the contributor loses it.
#[test]
fn test_contribution_scenario() {
    let (env, client, author, token) = setup();
    let contributor = Address::generate(&env);
    token::StellarAssetClient::new(&env, &token.address).mint(&contributor, &1_000);

    let author_before = token.balance(&author);
    let contributor_before = token.balance(&contributor);

    client.fund_project(&contributor, &1);

    let last_event = env.events().all().last().expect("No events found");
    let event_data: ProjectFunded = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(event_data.project_id, String::from_str(&env, "1"));
    assert_eq!(event_data.amount, 1);

    let project = client.project();
    assert_eq!(project.fundraising_goal, 100);
    assert_eq!(project.funds, 1);
    assert_eq!(token.balance(&author), author_before + 1);
    assert_eq!(token.balance(&contributor), contributor_before - 1);
}

/// End-to-end: the author closes the project, after which no contributor
/// can fund it.
#[test]
fn test_close_scenario() {
    let (env, client, author, token) = setup();

    client.change_project_state(&author, &CLOSED);

    let last_event = env.events().all().last().expect("No events found");
    let event_data: ProjectStateChanged = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(event_data.project_id, String::from_str(&env, "1"));
    assert_eq!(event_data.state, ProjectState::Closed);
    assert_eq!(client.project().state, ProjectState::Closed);

    let sac = token::StellarAssetClient::new(&env, &token.address);
    for _ in 0..3 {
        let contributor = Address::generate(&env);
        sac.mint(&contributor, &50);
        assert_eq!(
            client.try_fund_project(&contributor, &10),
            Err(Ok(Error::ProjectClosed))
        );
        assert_eq!(token.balance(&contributor), 50);
    }
    assert_eq!(client.project().funds, 0);
}

fn contract_event_count(env: &Env, client: &CrowdFundingClient) -> usize {
    env.events()
        .all()
        .iter()
        .filter(|event| event.0 == client.address)
        .count()
}

/// Rejected calls publish nothing.
#[test]
fn test_failed_calls_publish_no_events() {
    let (env, client, author, token) = setup();
    let contributor = Address::generate(&env);
    token::StellarAssetClient::new(&env, &token.address).mint(&contributor, &50);
    assert_eq!(contract_event_count(&env, &client), 0);

    assert_eq!(
        client.try_fund_project(&author, &10),
        Err(Ok(Error::AuthorCannotFund))
    );
    assert_eq!(contract_event_count(&env, &client), 0);

    assert_eq!(
        client.try_fund_project(&contributor, &0),
        Err(Ok(Error::InvalidAmount))
    );
    assert_eq!(contract_event_count(&env, &client), 0);

    assert_eq!(
        client.try_change_project_state(&contributor, &CLOSED),
        Err(Ok(Error::NotAuthor))
    );
    assert_eq!(contract_event_count(&env, &client), 0);

    assert_eq!(
        client.try_change_project_state(&author, &OPENED),
        Err(Ok(Error::StateUnchanged))
    );
    assert_eq!(contract_event_count(&env, &client), 0);

    assert_eq!(
        client.try_change_project_state(&author, &9),
        Err(Ok(Error::UnknownState))
    );
    assert_eq!(contract_event_count(&env, &client), 0);

    assert_eq!(client.project().funds, 0);
    assert_eq!(token.balance(&contributor), 50);
}
