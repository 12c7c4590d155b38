#![no_std]

pub mod errors;
pub mod events;
pub mod ledger;
pub mod math;
pub mod platform;
pub mod pool;
pub mod position;
pub mod storage;

use soroban_sdk::{contract, contractimpl, Address, Env};

pub use errors::ContractError;
use ledger::Transition;
pub use pool::{ParamUpdate, PoolParams, StakingPool, StakingStats};
pub use position::StakePosition;

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingContract;

#[contractimpl]
impl StakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Create the pool.
    ///
    /// * `stake_token`  – SAC address of the token users stake.
    /// * `reward_token` – SAC address of the token paid as rewards. Must differ
    ///   from `stake_token`.
    /// * `reward_rate`  – reward units per staked unit per second, scaled by
    ///   [`math::REWARD_RATE_SCALE`].
    /// * `lock_period`  – seconds after the latest stake before withdrawal.
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        env: Env,
        authority: Address,
        stake_token: Address,
        reward_token: Address,
        reward_rate: i128,
        min_stake_amount: i128,
        max_stake_amount: i128,
        lock_period: u64,
    ) -> Result<(), ContractError> {
        let existing = storage::try_load_pool(&env);
        let params = PoolParams {
            reward_rate,
            min_stake_amount,
            max_stake_amount,
            lock_period,
        };

        let ledger = platform::ledger_with_tokens(&env, &stake_token, &reward_token);
        let t = ledger.initialize(
            existing.as_ref(),
            &authority,
            stake_token,
            reward_token,
            params,
        )?;
        storage::save_pool(&env, &t.pool);

        events::publish_initialized(
            &env,
            authority,
            t.pool.stake_token.clone(),
            t.pool.reward_token.clone(),
            t.pool.params.clone(),
            t.timestamp,
        );
        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` stake tokens. Pending rewards are settled first and
    /// the lock restarts for the whole position.
    pub fn stake(env: Env, user: Address, amount: i128) -> Result<(), ContractError> {
        let pool = storage::load_pool(&env)?;
        let position = storage::load_position(&env, &user);

        let t = platform::ledger_for(&env, &pool).stake(&pool, position.as_ref(), &user, amount)?;
        let position_staked = Self::commit(&env, &t);

        events::publish_staked(
            &env,
            user,
            t.amount,
            position_staked,
            t.pool.total_staked,
            t.timestamp,
        );
        Ok(())
    }

    /// Withdraw `amount` once the lock period has elapsed. Accrued rewards
    /// stay claimable.
    pub fn unstake(env: Env, user: Address, amount: i128) -> Result<(), ContractError> {
        let pool = storage::load_pool(&env)?;
        let position = storage::load_position(&env, &user);

        let t =
            platform::ledger_for(&env, &pool).unstake(&pool, position.as_ref(), &user, amount)?;
        let position_staked = Self::commit(&env, &t);

        events::publish_unstaked(
            &env,
            user,
            t.amount,
            position_staked,
            t.pool.total_staked,
            t.timestamp,
        );
        Ok(())
    }

    /// Transfer all accrued rewards to `user` and return the amount paid.
    pub fn claim_rewards(env: Env, user: Address) -> Result<i128, ContractError> {
        let pool = storage::load_pool(&env)?;
        let position = storage::load_position(&env, &user);

        let t = platform::ledger_for(&env, &pool).claim(&pool, position.as_ref(), &user)?;
        Self::commit(&env, &t);

        events::publish_reward_claimed(&env, user, t.amount, t.timestamp);
        Ok(t.amount)
    }

    /// Move `amount` reward tokens from `funder` into the reserve.
    pub fn fund_rewards(env: Env, funder: Address, amount: i128) -> Result<(), ContractError> {
        let pool = storage::load_pool(&env)?;

        let t = platform::ledger_for(&env, &pool).fund_rewards(&pool, &funder, amount)?;
        Self::commit(&env, &t);

        events::publish_rewards_funded(
            &env,
            funder,
            t.amount,
            t.pool.total_rewards_funded,
            t.timestamp,
        );
        Ok(())
    }

    // ── Authority functions ──────────────────────────────────────────────────

    pub fn pause(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::set_paused(&env, caller, true)
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::set_paused(&env, caller, false)
    }

    /// Change any subset of the pool parameters. Rewards up to now are
    /// settled at the previous rate.
    ///
    /// `max_stake_amount` can only be lowered to a value of at least the
    /// pool's `total_staked`, even when every individual position would fit.
    pub fn update_parameters(
        env: Env,
        caller: Address,
        reward_rate: Option<i128>,
        min_stake_amount: Option<i128>,
        max_stake_amount: Option<i128>,
        lock_period: Option<u64>,
    ) -> Result<(), ContractError> {
        let pool = storage::load_pool(&env)?;
        let update = ParamUpdate {
            reward_rate,
            min_stake_amount,
            max_stake_amount,
            lock_period,
        };

        let t = platform::ledger_for(&env, &pool).update_parameters(&pool, &caller, &update)?;
        Self::commit(&env, &t);

        events::publish_params_updated(&env, caller, t.pool.params.clone(), t.timestamp);
        Ok(())
    }

    // ── Authority transfer (two-step) ────────────────────────────────────────

    /// Nominate `new_authority`, who must call `accept_authority` to take
    /// over.
    pub fn propose_authority(
        env: Env,
        caller: Address,
        new_authority: Address,
    ) -> Result<(), ContractError> {
        let pool = storage::load_pool(&env)?;

        let t = platform::ledger_for(&env, &pool).propose_authority(&pool, &caller, &new_authority)?;
        Self::commit(&env, &t);

        events::publish_authority_proposed(&env, caller, new_authority, t.timestamp);
        Ok(())
    }

    pub fn accept_authority(env: Env, new_authority: Address) -> Result<(), ContractError> {
        let pool = storage::load_pool(&env)?;

        let t = platform::ledger_for(&env, &pool).accept_authority(&pool, &new_authority)?;
        Self::commit(&env, &t);

        events::publish_authority_accepted(&env, pool.authority, new_authority, t.timestamp);
        Ok(())
    }

    pub fn cancel_authority_transfer(env: Env, caller: Address) -> Result<(), ContractError> {
        let pool = storage::load_pool(&env)?;

        let t = platform::ledger_for(&env, &pool).cancel_authority_transfer(&pool, &caller)?;
        Self::commit(&env, &t);

        if let Some(cancelled) = pool.pending_authority {
            events::publish_authority_cancelled(&env, caller, cancelled, t.timestamp);
        }
        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Pool state with the reward index brought forward to now.
    pub fn get_staking_stats(env: Env) -> Result<StakingStats, ContractError> {
        let pool = storage::load_pool(&env)?;
        platform::ledger_for(&env, &pool).stats(&pool)
    }

    /// The stored position, as of its last settlement.
    pub fn get_position(env: Env, user: Address) -> Option<StakePosition> {
        storage::load_position(&env, &user)
    }

    pub fn get_staked(env: Env, user: Address) -> i128 {
        storage::load_position(&env, &user)
            .map(|p| p.staked_amount)
            .unwrap_or(0)
    }

    /// Reward `user` could claim right now, without mutating state.
    pub fn get_pending_rewards(env: Env, user: Address) -> Result<i128, ContractError> {
        let pool = storage::load_pool(&env)?;
        let position = storage::load_position(&env, &user);
        platform::ledger_for(&env, &pool).pending_rewards(&pool, position.as_ref())
    }

    /// Earliest time `user` can unstake.
    pub fn get_lock_expiry(env: Env, user: Address) -> Result<u64, ContractError> {
        let pool = storage::load_pool(&env)?;
        let position =
            storage::load_position(&env, &user).ok_or(ContractError::InsufficientStake)?;
        position.lock_expiry(pool.params.lock_period)
    }

    pub fn is_initialized(env: Env) -> bool {
        storage::has_pool(&env)
    }

    pub fn get_authority(env: Env) -> Result<Address, ContractError> {
        Ok(storage::load_pool(&env)?.authority)
    }

    pub fn get_pending_authority(env: Env) -> Option<Address> {
        storage::try_load_pool(&env).and_then(|pool| pool.pending_authority)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn set_paused(env: &Env, caller: Address, paused: bool) -> Result<(), ContractError> {
        let pool = storage::load_pool(env)?;

        let t = platform::ledger_for(env, &pool).set_paused(&pool, &caller, paused)?;
        Self::commit(env, &t);

        events::publish_pause_changed(env, caller, paused, t.timestamp);
        Ok(())
    }

    /// Persist a successful transition. Returns the position's staked amount
    /// after the operation (zero when none was touched).
    fn commit(env: &Env, t: &Transition) -> i128 {
        storage::save_pool(env, &t.pool);
        match &t.position {
            Some(position) => {
                storage::save_position(env, position);
                position.staked_amount
            }
            None => 0,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_admin;
