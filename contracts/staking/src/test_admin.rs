extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events as _, Ledger as _},
    token::StellarAssetClient,
    vec, Address, Env, IntoVal, Val,
};

use crate::{events, ContractError, StakingContract, StakingContractClient};

fn setup() -> (Env, StakingContractClient<'static>, Address, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let stake_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract_id = env.register(StakingContract, ());
    let client = StakingContractClient::new(&env, &contract_id);

    let authority = Address::generate(&env);
    client.initialize(
        &authority,
        &stake_token,
        &reward_token,
        &1_000,
        &1_000_000,
        &1_000_000_000_000,
        &86_400,
    );
    StellarAssetClient::new(&env, &reward_token).mint(&contract_id, &1_000_000_000);

    (env, client, authority, stake_token)
}

fn staker(env: &Env, stake_token: &Address, amount: i128) -> Address {
    let user = Address::generate(env);
    StellarAssetClient::new(env, stake_token).mint(&user, &amount);
    user
}

// ── Pause ─────────────────────────────────────────────────────────────────────

#[test]
fn test_pause_blocks_position_operations() {
    let (env, client, authority, stake_token) = setup();
    let user = staker(&env, &stake_token, 4_000_000);
    client.stake(&user, &2_000_000);

    client.pause(&authority);
    assert!(client.get_staking_stats().is_paused);
    env.ledger().set_timestamp(86_400);

    match client.try_stake(&user, &2_000_000) {
        Err(Ok(e)) => assert_eq!(e, ContractError::PoolPaused),
        _ => unreachable!("Expected PoolPaused error"),
    }
    match client.try_unstake(&user, &1) {
        Err(Ok(e)) => assert_eq!(e, ContractError::PoolPaused),
        _ => unreachable!("Expected PoolPaused error"),
    }
    match client.try_claim_rewards(&user) {
        Err(Ok(e)) => assert_eq!(e, ContractError::PoolPaused),
        _ => unreachable!("Expected PoolPaused error"),
    }

    client.unpause(&authority);
    assert!(!client.get_staking_stats().is_paused);
    client.unstake(&user, &2_000_000);
    assert_eq!(client.get_staked(&user), 0);
}

#[test]
fn test_rewards_accrue_while_paused() {
    let (env, client, authority, stake_token) = setup();
    let user = staker(&env, &stake_token, 1_000_000);
    client.stake(&user, &1_000_000);

    client.pause(&authority);
    env.ledger().set_timestamp(10);
    assert_eq!(client.get_pending_rewards(&user), 10);

    client.unpause(&authority);
    assert_eq!(client.claim_rewards(&user), 10);
}

#[test]
fn test_pause_by_non_authority_fails() {
    let (env, client, _authority, _) = setup();
    let intruder = Address::generate(&env);

    match client.try_pause(&intruder) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    assert!(!client.get_staking_stats().is_paused);
}

#[test]
fn test_pause_emits_event() {
    let (env, client, authority, _) = setup();

    env.ledger().set_timestamp(42);
    client.pause(&authority);

    let payload = events::PauseChangedEvent {
        authority,
        paused: true,
        timestamp: 42,
    };
    let expected: soroban_sdk::Vec<(Address, soroban_sdk::Vec<Val>, Val)> = vec![
        &env,
        (
            client.address.clone(),
            (symbol_short!("PAUSED"),).into_val(&env),
            payload.into_val(&env),
        ),
    ];
    assert_eq!(env.events().all().filter_by_contract(&client.address), expected);
}

// ── Parameters ────────────────────────────────────────────────────────────────

#[test]
fn test_update_parameters_partial() {
    let (_env, client, authority, _) = setup();

    client.update_parameters(&authority, &None, &Some(2_000_000), &None, &Some(3_600));

    let stats = client.get_staking_stats();
    assert_eq!(stats.reward_rate, 1_000);
    assert_eq!(stats.min_stake_amount, 2_000_000);
    assert_eq!(stats.max_stake_amount, 1_000_000_000_000);
    assert_eq!(stats.lock_period, 3_600);
}

#[test]
fn test_update_parameters_by_non_authority_fails() {
    let (env, client, _authority, _) = setup();
    let intruder = Address::generate(&env);

    match client.try_update_parameters(&intruder, &Some(0), &None, &None, &None) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    assert_eq!(client.get_staking_stats().reward_rate, 1_000);
}

#[test]
fn test_update_parameters_rejects_invalid_values() {
    let (env, client, authority, stake_token) = setup();

    match client.try_update_parameters(&authority, &Some(-1), &None, &None, &None) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidParameters),
        _ => unreachable!("Expected InvalidParameters error"),
    }
    match client.try_update_parameters(&authority, &None, &Some(2_000_000_000_000), &None, &None)
    {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidParameters),
        _ => unreachable!("Expected InvalidParameters error"),
    }

    let user = staker(&env, &stake_token, 5_000_000);
    client.stake(&user, &5_000_000);
    match client.try_update_parameters(&authority, &None, &None, &Some(4_999_999), &None) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidParameters),
        _ => unreachable!("Expected InvalidParameters error"),
    }
}

#[test]
fn test_lowering_max_is_bounded_by_pool_total() {
    let (env, client, authority, stake_token) = setup();
    let first = staker(&env, &stake_token, 1_500_000);
    let second = staker(&env, &stake_token, 1_500_000);
    client.stake(&first, &1_500_000);
    client.stake(&second, &1_500_000);

    // Both positions fit under 2_000_000, but the pool holds 3_000_000.
    match client.try_update_parameters(&authority, &None, &None, &Some(2_000_000), &None) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidParameters),
        _ => unreachable!("Expected InvalidParameters error"),
    }

    client.update_parameters(&authority, &None, &None, &Some(3_000_000), &None);
    assert_eq!(client.get_staking_stats().max_stake_amount, 3_000_000);
}

#[test]
fn test_shorter_lock_applies_to_existing_positions() {
    let (env, client, authority, stake_token) = setup();
    let user = staker(&env, &stake_token, 1_000_000);
    client.stake(&user, &1_000_000);

    client.update_parameters(&authority, &None, &None, &None, &Some(60));
    env.ledger().set_timestamp(60);

    assert_eq!(client.get_lock_expiry(&user), 60);
    client.unstake(&user, &1_000_000);
}

#[test]
fn test_zero_rate_stops_accrual() {
    let (env, client, authority, stake_token) = setup();
    let user = staker(&env, &stake_token, 1_000_000);
    client.stake(&user, &1_000_000);

    env.ledger().set_timestamp(10);
    client.update_parameters(&authority, &Some(0), &None, &None, &None);
    env.ledger().set_timestamp(10_000);

    assert_eq!(client.get_pending_rewards(&user), 10);
}

// ── Authority transfer ────────────────────────────────────────────────────────

#[test]
fn test_authority_transfer() {
    let (env, client, authority, _) = setup();
    let successor = Address::generate(&env);

    client.propose_authority(&authority, &successor);
    assert_eq!(client.get_pending_authority(), Some(successor.clone()));

    client.accept_authority(&successor);
    assert_eq!(client.get_authority(), successor);
    assert_eq!(client.get_pending_authority(), None);

    match client.try_pause(&authority) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    client.pause(&successor);
}

#[test]
fn test_accept_by_wrong_address_fails() {
    let (env, client, authority, _) = setup();
    let successor = Address::generate(&env);
    let stranger = Address::generate(&env);

    client.propose_authority(&authority, &successor);
    match client.try_accept_authority(&stranger) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    assert_eq!(client.get_authority(), authority);
}

#[test]
fn test_accept_without_proposal_fails() {
    let (env, client, _authority, _) = setup();

    match client.try_accept_authority(&Address::generate(&env)) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NoPendingAuthority),
        _ => unreachable!("Expected NoPendingAuthority error"),
    }
}

#[test]
fn test_cancel_authority_transfer() {
    let (env, client, authority, _) = setup();
    let successor = Address::generate(&env);

    client.propose_authority(&authority, &successor);
    client.cancel_authority_transfer(&authority);
    assert_eq!(client.get_pending_authority(), None);

    match client.try_accept_authority(&successor) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NoPendingAuthority),
        _ => unreachable!("Expected NoPendingAuthority error"),
    }
    match client.try_cancel_authority_transfer(&authority) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NoPendingAuthority),
        _ => unreachable!("Expected NoPendingAuthority error"),
    }
}

#[test]
fn test_propose_by_non_authority_fails() {
    let (env, client, _authority, _) = setup();
    let intruder = Address::generate(&env);

    match client.try_propose_authority(&intruder, &intruder) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}
