#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

use crate::pool::PoolParams;

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the pool is created.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub authority: Address,
    pub stake_token: Address,
    pub reward_token: Address,
    pub params: PoolParams,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub user: Address,
    pub amount: i128,
    pub position_staked: i128,
    pub total_staked: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakedEvent {
    pub user: Address,
    pub amount: i128,
    pub position_staked: i128,
    pub total_staked: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardClaimedEvent {
    pub user: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsFundedEvent {
    pub funder: Address,
    pub amount: i128,
    pub total_funded: i128,
    pub timestamp: u64,
}

/// Fired on both pause and unpause.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseChangedEvent {
    pub authority: Address,
    pub paused: bool,
    pub timestamp: u64,
}

/// Carries the full parameter set after the update.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParamsUpdatedEvent {
    pub authority: Address,
    pub params: PoolParams,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuthorityProposedEvent {
    pub current: Address,
    pub proposed: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuthorityAcceptedEvent {
    pub previous: Address,
    pub current: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuthorityCancelledEvent {
    pub current: Address,
    pub cancelled: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    authority: Address,
    stake_token: Address,
    reward_token: Address,
    params: PoolParams,
    timestamp: u64,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            authority,
            stake_token,
            reward_token,
            params,
            timestamp,
        },
    );
}

pub fn publish_staked(
    env: &Env,
    user: Address,
    amount: i128,
    position_staked: i128,
    total_staked: i128,
    timestamp: u64,
) {
    env.events().publish(
        (symbol_short!("STAKED"), user.clone()),
        StakedEvent {
            user,
            amount,
            position_staked,
            total_staked,
            timestamp,
        },
    );
}

pub fn publish_unstaked(
    env: &Env,
    user: Address,
    amount: i128,
    position_staked: i128,
    total_staked: i128,
    timestamp: u64,
) {
    env.events().publish(
        (symbol_short!("UNSTAKED"), user.clone()),
        UnstakedEvent {
            user,
            amount,
            position_staked,
            total_staked,
            timestamp,
        },
    );
}

pub fn publish_reward_claimed(env: &Env, user: Address, amount: i128, timestamp: u64) {
    env.events().publish(
        (symbol_short!("CLMD"), user.clone()),
        RewardClaimedEvent {
            user,
            amount,
            timestamp,
        },
    );
}

pub fn publish_rewards_funded(
    env: &Env,
    funder: Address,
    amount: i128,
    total_funded: i128,
    timestamp: u64,
) {
    env.events().publish(
        (symbol_short!("FUNDED"), funder.clone()),
        RewardsFundedEvent {
            funder,
            amount,
            total_funded,
            timestamp,
        },
    );
}

pub fn publish_pause_changed(env: &Env, authority: Address, paused: bool, timestamp: u64) {
    let topic = if paused {
        symbol_short!("PAUSED")
    } else {
        symbol_short!("UNPAUSED")
    };
    env.events().publish(
        (topic,),
        PauseChangedEvent {
            authority,
            paused,
            timestamp,
        },
    );
}

pub fn publish_params_updated(env: &Env, authority: Address, params: PoolParams, timestamp: u64) {
    env.events().publish(
        (symbol_short!("PARAMS"),),
        ParamsUpdatedEvent {
            authority,
            params,
            timestamp,
        },
    );
}

pub fn publish_authority_proposed(env: &Env, current: Address, proposed: Address, timestamp: u64) {
    env.events().publish(
        (symbol_short!("AUTH_PROP"), current.clone()),
        AuthorityProposedEvent {
            current,
            proposed,
            timestamp,
        },
    );
}

pub fn publish_authority_accepted(env: &Env, previous: Address, current: Address, timestamp: u64) {
    env.events().publish(
        (symbol_short!("AUTH_ACPT"), current.clone()),
        AuthorityAcceptedEvent {
            previous,
            current,
            timestamp,
        },
    );
}

pub fn publish_authority_cancelled(
    env: &Env,
    current: Address,
    cancelled: Address,
    timestamp: u64,
) {
    env.events().publish(
        (symbol_short!("AUTH_CNCL"), current.clone()),
        AuthorityCancelledEvent {
            current,
            cancelled,
            timestamp,
        },
    );
}
