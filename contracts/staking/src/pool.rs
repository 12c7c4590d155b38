use soroban_sdk::{contracttype, Address};

use crate::{
    errors::ContractError,
    math::{self, MAX_REWARD_RATE, MAX_STAKE_AMOUNT},
};

/// Longest accepted lock period (four years).
pub const MAX_LOCK_PERIOD: u64 = 126_144_000;

/// The tunable part of the pool.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolParams {
    /// Reward units per staked unit per second, scaled by
    /// [`math::REWARD_RATE_SCALE`].
    pub reward_rate: i128,
    pub min_stake_amount: i128,
    pub max_stake_amount: i128,
    /// Seconds after the latest stake before principal can be withdrawn.
    pub lock_period: u64,
}

impl PoolParams {
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.reward_rate < 0 || self.reward_rate > MAX_REWARD_RATE {
            return Err(ContractError::InvalidParameters);
        }
        if self.min_stake_amount < 0
            || self.min_stake_amount > self.max_stake_amount
            || self.max_stake_amount > MAX_STAKE_AMOUNT
        {
            return Err(ContractError::InvalidParameters);
        }
        if self.lock_period > MAX_LOCK_PERIOD {
            return Err(ContractError::InvalidParameters);
        }
        Ok(())
    }
}

/// Partial update applied by `update_parameters`; `None` keeps the current
/// value.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ParamUpdate {
    pub reward_rate: Option<i128>,
    pub min_stake_amount: Option<i128>,
    pub max_stake_amount: Option<i128>,
    pub lock_period: Option<u64>,
}

impl ParamUpdate {
    pub fn apply_to(&self, current: &PoolParams) -> PoolParams {
        PoolParams {
            reward_rate: self.reward_rate.unwrap_or(current.reward_rate),
            min_stake_amount: self.min_stake_amount.unwrap_or(current.min_stake_amount),
            max_stake_amount: self.max_stake_amount.unwrap_or(current.max_stake_amount),
            lock_period: self.lock_period.unwrap_or(current.lock_period),
        }
    }
}

/// The singleton pool record.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakingPool {
    pub authority: Address,
    pub pending_authority: Option<Address>,
    pub stake_token: Address,
    pub reward_token: Address,
    pub params: PoolParams,
    pub total_staked: i128,
    pub is_paused: bool,
    /// Cumulative `reward_rate × seconds`. Each rate epoch is folded in at
    /// the rate that applied during it.
    pub reward_index: i128,
    pub index_updated_at: u64,
    pub rate_updated_at: u64,
    pub active_stakers: u32,
    pub total_rewards_funded: i128,
    pub total_rewards_distributed: i128,
    pub created_at: u64,
}

impl StakingPool {
    pub fn new(
        authority: Address,
        stake_token: Address,
        reward_token: Address,
        params: PoolParams,
        now: u64,
    ) -> Result<Self, ContractError> {
        params.validate()?;
        if stake_token == reward_token {
            return Err(ContractError::InvalidParameters);
        }
        Ok(Self {
            authority,
            pending_authority: None,
            stake_token,
            reward_token,
            params,
            total_staked: 0,
            is_paused: false,
            reward_index: 0,
            index_updated_at: now,
            rate_updated_at: now,
            active_stakers: 0,
            total_rewards_funded: 0,
            total_rewards_distributed: 0,
            created_at: now,
        })
    }

    /// Bring `reward_index` forward to `now` at the current rate.
    pub fn accrue_index(&mut self, now: u64) -> Result<(), ContractError> {
        let elapsed = math::elapsed(self.index_updated_at, now)?;
        let delta = math::index_delta(self.params.reward_rate, elapsed)?;
        self.reward_index = math::add(self.reward_index, delta)?;
        self.index_updated_at = now;
        Ok(())
    }

    /// Swap in new parameters. The index must already be at `now` so the
    /// old rate covers everything up to the change.
    pub fn apply_params(&mut self, params: PoolParams, now: u64) -> Result<(), ContractError> {
        params.validate()?;
        if params.max_stake_amount < self.params.max_stake_amount
            && params.max_stake_amount < self.total_staked
        {
            return Err(ContractError::InvalidParameters);
        }
        if params.reward_rate != self.params.reward_rate {
            self.rate_updated_at = now;
        }
        self.params = params;
        Ok(())
    }

    pub fn check_bounds(&self, staked_amount: i128) -> Result<(), ContractError> {
        if staked_amount < self.params.min_stake_amount {
            return Err(ContractError::BelowMinimum);
        }
        if staked_amount > self.params.max_stake_amount {
            return Err(ContractError::AboveMaximum);
        }
        Ok(())
    }

    pub fn stats(&self, now: u64) -> Result<StakingStats, ContractError> {
        let mut view = self.clone();
        view.accrue_index(now)?;
        Ok(StakingStats {
            authority: view.authority,
            total_staked: view.total_staked,
            reward_rate: view.params.reward_rate,
            min_stake_amount: view.params.min_stake_amount,
            max_stake_amount: view.params.max_stake_amount,
            lock_period: view.params.lock_period,
            is_paused: view.is_paused,
            reward_index: view.reward_index,
            active_stakers: view.active_stakers,
            total_rewards_funded: view.total_rewards_funded,
            total_rewards_distributed: view.total_rewards_distributed,
            current_time: now,
        })
    }
}

/// Read-only snapshot returned by `get_staking_stats`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakingStats {
    pub authority: Address,
    pub total_staked: i128,
    pub reward_rate: i128,
    pub min_stake_amount: i128,
    pub max_stake_amount: i128,
    pub lock_period: u64,
    pub is_paused: bool,
    pub reward_index: i128,
    pub active_stakers: u32,
    pub total_rewards_funded: i128,
    pub total_rewards_distributed: i128,
    pub current_time: u64,
}
