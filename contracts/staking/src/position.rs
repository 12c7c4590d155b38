use soroban_sdk::{contracttype, Address};

use crate::{errors::ContractError, math};

/// One owner's stake record.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakePosition {
    pub owner: Address,
    pub staked_amount: i128,
    /// Time of the most recent increase; the whole position unlocks at
    /// `stake_timestamp + lock_period`.
    pub stake_timestamp: u64,
    pub accrued_reward: i128,
    /// Scaled sub-unit accrual carried between settlements.
    pub reward_remainder: i128,
    /// Pool reward index at the last settlement.
    pub index_paid: i128,
    pub last_update_timestamp: u64,
    pub total_claimed: i128,
}

impl StakePosition {
    /// Empty position for `owner`, anchored at the current pool index so it
    /// earns nothing for time before it existed.
    pub fn open(owner: Address, reward_index: i128, now: u64) -> Self {
        Self {
            owner,
            staked_amount: 0,
            stake_timestamp: now,
            accrued_reward: 0,
            reward_remainder: 0,
            index_paid: reward_index,
            last_update_timestamp: now,
            total_claimed: 0,
        }
    }

    /// Bring accrual up to `reward_index` as of `now`.
    ///
    /// `reward_index` must already be brought forward to `now` by the pool.
    pub fn settle(&mut self, reward_index: i128, now: u64) -> Result<(), ContractError> {
        math::elapsed(self.last_update_timestamp, now)?;
        let delta = math::sub(reward_index, self.index_paid)?;
        let accrual = math::accrue(self.staked_amount, delta, self.reward_remainder)?;

        self.accrued_reward = math::add(self.accrued_reward, accrual.whole)?;
        self.reward_remainder = accrual.remainder;
        self.index_paid = reward_index;
        self.last_update_timestamp = now;
        Ok(())
    }

    pub fn lock_expiry(&self, lock_period: u64) -> Result<u64, ContractError> {
        self.stake_timestamp
            .checked_add(lock_period)
            .ok_or(ContractError::ArithmeticError)
    }

    pub fn is_unlocked(&self, lock_period: u64, now: u64) -> Result<bool, ContractError> {
        Ok(now >= self.lock_expiry(lock_period)?)
    }

    pub fn is_active(&self) -> bool {
        self.staked_amount > 0
    }
}
