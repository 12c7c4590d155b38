//! The staking ledger: validates operations against a pool snapshot and, when
//! relevant, one position snapshot, then returns the resulting records.
//!
//! Nothing in this module writes storage. Each operation:
//!
//! 1. checks the signer and every precondition,
//! 2. brings the pool index and the position forward to a single "now",
//! 3. computes the new records on clones,
//! 4. performs the custody transfer (the only external side effect),
//! 5. hands back a [`Transition`] for the caller to commit.
//!
//! A failure at any step returns before the caller commits anything, and the
//! custody transfer is the last fallible step, so either every effect of an
//! operation lands or none does.

use soroban_sdk::Address;

use crate::{
    errors::{ContractError, TransferError},
    math,
    pool::{ParamUpdate, PoolParams, StakingPool, StakingStats},
    position::StakePosition,
};

/// Trusted time source. Must never go backwards between calls.
pub trait Clock {
    fn now(&self) -> u64;
}

/// Confirms that `identity` authorised the current call.
pub trait SignerVerifier {
    fn verify_signer(&self, identity: &Address) -> bool;
}

/// Moves one asset between custody accounts.
pub trait Custody {
    /// Balance `owner` can currently transfer.
    fn available(&self, owner: &Address) -> i128;

    fn transfer(&self, from: &Address, to: &Address, amount: i128) -> Result<(), TransferError>;
}

/// Records produced by a successful operation, ready to be committed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Transition {
    pub pool: StakingPool,
    pub position: Option<StakePosition>,
    /// Amount moved by the operation (principal, reward or funding).
    pub amount: i128,
    pub timestamp: u64,
}

impl Transition {
    fn pool_only(pool: StakingPool, timestamp: u64) -> Self {
        Self {
            pool,
            position: None,
            amount: 0,
            timestamp,
        }
    }
}

pub struct StakingLedger<C, V, T> {
    clock: C,
    verifier: V,
    /// Custody of the staked asset.
    principal: T,
    /// Custody of the reward asset.
    rewards: T,
    /// Account that holds pooled principal and the reward reserve.
    vault: Address,
}

impl<C: Clock, V: SignerVerifier, T: Custody> StakingLedger<C, V, T> {
    pub fn new(clock: C, verifier: V, principal: T, rewards: T, vault: Address) -> Self {
        Self {
            clock,
            verifier,
            principal,
            rewards,
            vault,
        }
    }

    // ── Initialisation ──────────────────────────────────────────────────────

    pub fn initialize(
        &self,
        existing: Option<&StakingPool>,
        authority: &Address,
        stake_token: Address,
        reward_token: Address,
        params: PoolParams,
    ) -> Result<Transition, ContractError> {
        if existing.is_some() {
            return Err(ContractError::AlreadyInitialized);
        }
        self.require_signer(authority)?;

        let now = self.clock.now();
        let pool = StakingPool::new(authority.clone(), stake_token, reward_token, params, now)?;
        Ok(Transition::pool_only(pool, now))
    }

    // ── Position operations ─────────────────────────────────────────────────

    /// Deposit `amount` into `user`'s position. Resets the lock of the whole
    /// position.
    pub fn stake(
        &self,
        pool: &StakingPool,
        position: Option<&StakePosition>,
        user: &Address,
        amount: i128,
    ) -> Result<Transition, ContractError> {
        self.require_signer(user)?;
        Self::require_live(pool)?;
        if amount <= 0 {
            return Err(ContractError::InvalidParameters);
        }

        let now = self.clock.now();
        let (mut pool, mut position) = Self::settled(pool, position, user, now)?;
        let was_active = position.is_active();

        position.staked_amount = math::add(position.staked_amount, amount)?;
        pool.check_bounds(position.staked_amount)?;
        if self.principal.available(user) < amount {
            return Err(ContractError::InsufficientFunds);
        }

        pool.total_staked = math::add(pool.total_staked, amount)?;
        position.stake_timestamp = now;
        if !was_active {
            pool.active_stakers = pool
                .active_stakers
                .checked_add(1)
                .ok_or(ContractError::ArithmeticError)?;
        }

        self.principal.transfer(user, &self.vault, amount)?;

        Ok(Transition {
            pool,
            position: Some(position),
            amount,
            timestamp: now,
        })
    }

    /// Withdraw `amount` of principal once the position is unlocked.
    /// Settled rewards stay on the position.
    pub fn unstake(
        &self,
        pool: &StakingPool,
        position: Option<&StakePosition>,
        user: &Address,
        amount: i128,
    ) -> Result<Transition, ContractError> {
        self.require_signer(user)?;
        Self::require_live(pool)?;
        if amount <= 0 {
            return Err(ContractError::InvalidParameters);
        }
        let position = position.ok_or(ContractError::InsufficientStake)?;

        let now = self.clock.now();
        let (mut pool, mut position) = Self::settled(pool, Some(position), user, now)?;

        if amount > position.staked_amount {
            return Err(ContractError::InsufficientStake);
        }
        if !position.is_unlocked(pool.params.lock_period, now)? {
            return Err(ContractError::PositionLocked);
        }

        position.staked_amount = math::sub(position.staked_amount, amount)?;
        pool.total_staked = math::sub(pool.total_staked, amount)?;
        if !position.is_active() {
            pool.active_stakers = pool
                .active_stakers
                .checked_sub(1)
                .ok_or(ContractError::ArithmeticError)?;
        }

        self.principal.transfer(&self.vault, user, amount)?;

        Ok(Transition {
            pool,
            position: Some(position),
            amount,
            timestamp: now,
        })
    }

    /// Pay out everything `user` has accrued. `Transition::amount` is the
    /// payout.
    pub fn claim(
        &self,
        pool: &StakingPool,
        position: Option<&StakePosition>,
        user: &Address,
    ) -> Result<Transition, ContractError> {
        self.require_signer(user)?;
        Self::require_live(pool)?;
        let position = position.ok_or(ContractError::NothingToClaim)?;

        let now = self.clock.now();
        let (mut pool, mut position) = Self::settled(pool, Some(position), user, now)?;

        let payout = position.accrued_reward;
        if payout == 0 {
            return Err(ContractError::NothingToClaim);
        }

        position.accrued_reward = 0;
        position.total_claimed = math::add(position.total_claimed, payout)?;
        pool.total_rewards_distributed = math::add(pool.total_rewards_distributed, payout)?;

        self.rewards.transfer(&self.vault, user, payout)?;

        Ok(Transition {
            pool,
            position: Some(position),
            amount: payout,
            timestamp: now,
        })
    }

    /// Top up the reward reserve. Anyone may fund.
    pub fn fund_rewards(
        &self,
        pool: &StakingPool,
        funder: &Address,
        amount: i128,
    ) -> Result<Transition, ContractError> {
        self.require_signer(funder)?;
        if amount <= 0 {
            return Err(ContractError::InvalidParameters);
        }
        if self.rewards.available(funder) < amount {
            return Err(ContractError::InsufficientFunds);
        }

        let now = self.clock.now();
        let mut pool = pool.clone();
        pool.total_rewards_funded = math::add(pool.total_rewards_funded, amount)?;

        self.rewards.transfer(funder, &self.vault, amount)?;

        Ok(Transition {
            pool,
            position: None,
            amount,
            timestamp: now,
        })
    }

    // ── Authority operations ────────────────────────────────────────────────

    pub fn set_paused(
        &self,
        pool: &StakingPool,
        caller: &Address,
        paused: bool,
    ) -> Result<Transition, ContractError> {
        self.require_authority(pool, caller)?;

        let mut pool = pool.clone();
        pool.is_paused = paused;
        Ok(Transition::pool_only(pool, self.clock.now()))
    }

    /// Apply `update` over the current parameters.
    ///
    /// The index is brought forward at the old rate first, so accrual before
    /// this instant is never repriced. A lowered `max_stake_amount` is checked
    /// against the pool's `total_staked`, not the largest single position.
    pub fn update_parameters(
        &self,
        pool: &StakingPool,
        caller: &Address,
        update: &ParamUpdate,
    ) -> Result<Transition, ContractError> {
        self.require_authority(pool, caller)?;

        let now = self.clock.now();
        let mut pool = pool.clone();
        pool.accrue_index(now)?;
        let params = update.apply_to(&pool.params);
        pool.apply_params(params, now)?;
        Ok(Transition::pool_only(pool, now))
    }

    pub fn propose_authority(
        &self,
        pool: &StakingPool,
        caller: &Address,
        nominee: &Address,
    ) -> Result<Transition, ContractError> {
        self.require_authority(pool, caller)?;

        let mut pool = pool.clone();
        pool.pending_authority = Some(nominee.clone());
        Ok(Transition::pool_only(pool, self.clock.now()))
    }

    pub fn accept_authority(
        &self,
        pool: &StakingPool,
        caller: &Address,
    ) -> Result<Transition, ContractError> {
        self.require_signer(caller)?;
        match &pool.pending_authority {
            None => return Err(ContractError::NoPendingAuthority),
            Some(nominee) if nominee != caller => return Err(ContractError::Unauthorized),
            Some(_) => {}
        }

        let mut pool = pool.clone();
        pool.authority = caller.clone();
        pool.pending_authority = None;
        Ok(Transition::pool_only(pool, self.clock.now()))
    }

    pub fn cancel_authority_transfer(
        &self,
        pool: &StakingPool,
        caller: &Address,
    ) -> Result<Transition, ContractError> {
        self.require_authority(pool, caller)?;
        if pool.pending_authority.is_none() {
            return Err(ContractError::NoPendingAuthority);
        }

        let mut pool = pool.clone();
        pool.pending_authority = None;
        Ok(Transition::pool_only(pool, self.clock.now()))
    }

    // ── Views ───────────────────────────────────────────────────────────────

    /// Reward `position` could claim right now. Computed on copies.
    pub fn pending_rewards(
        &self,
        pool: &StakingPool,
        position: Option<&StakePosition>,
    ) -> Result<i128, ContractError> {
        let Some(position) = position else {
            return Ok(0);
        };
        let (_, position) =
            Self::settled(pool, Some(position), &position.owner, self.clock.now())?;
        Ok(position.accrued_reward)
    }

    pub fn stats(&self, pool: &StakingPool) -> Result<StakingStats, ContractError> {
        pool.stats(self.clock.now())
    }

    // ── Guards ──────────────────────────────────────────────────────────────

    fn require_signer(&self, identity: &Address) -> Result<(), ContractError> {
        if !self.verifier.verify_signer(identity) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn require_authority(&self, pool: &StakingPool, caller: &Address) -> Result<(), ContractError> {
        self.require_signer(caller)?;
        if *caller != pool.authority {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn require_live(pool: &StakingPool) -> Result<(), ContractError> {
        if pool.is_paused {
            return Err(ContractError::PoolPaused);
        }
        Ok(())
    }

    /// Clone the pool and the user's position (opening one if absent) and
    /// settle both to `now`.
    fn settled(
        pool: &StakingPool,
        position: Option<&StakePosition>,
        user: &Address,
        now: u64,
    ) -> Result<(StakingPool, StakePosition), ContractError> {
        let mut pool = pool.clone();
        pool.accrue_index(now)?;

        let mut position = match position {
            Some(existing) if existing.owner != *user => return Err(ContractError::Unauthorized),
            Some(existing) => existing.clone(),
            None => StakePosition::open(user.clone(), pool.reward_index, now),
        };
        position.settle(pool.reward_index, now)?;
        Ok((pool, position))
    }
}
