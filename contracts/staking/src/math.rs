//! Checked fixed-point arithmetic for reward accrual.
//!
//! Every quantity handled here (amounts, rates, index values) is
//! non-negative. Operations fail with [`ContractError::ArithmeticError`]
//! instead of wrapping or saturating, and a subtraction that would go below
//! zero counts as underflow.

use crate::errors::ContractError;

/// Fixed-point scale applied to `reward_rate`.
///
/// A rate of `REWARD_RATE_SCALE` pays one reward unit per staked unit per
/// second, so `reward = staked × rate × elapsed / REWARD_RATE_SCALE`.
pub const REWARD_RATE_SCALE: i128 = 1_000_000_000;

/// Largest accepted reward rate (one reward unit per staked unit per second).
pub const MAX_REWARD_RATE: i128 = REWARD_RATE_SCALE;

/// Largest principal a single position may hold.
pub const MAX_STAKE_AMOUNT: i128 = u64::MAX as i128;

/// Result of settling one interval: whole reward units plus the scaled
/// remainder that must be carried into the next settlement.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Accrual {
    pub whole: i128,
    pub remainder: i128,
}

pub fn add(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_add(b).ok_or(ContractError::ArithmeticError)
}

pub fn sub(a: i128, b: i128) -> Result<i128, ContractError> {
    match a.checked_sub(b) {
        Some(v) if v >= 0 => Ok(v),
        _ => Err(ContractError::ArithmeticError),
    }
}

pub fn mul(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_mul(b).ok_or(ContractError::ArithmeticError)
}

/// Truncating division. Division by zero is an arithmetic error.
pub fn div(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_div(b).ok_or(ContractError::ArithmeticError)
}

/// Seconds between two timestamps. A clock that runs backwards is rejected.
pub fn elapsed(from: u64, to: u64) -> Result<u64, ContractError> {
    to.checked_sub(from).ok_or(ContractError::InvalidTimestamp)
}

/// Growth of the per-unit reward index over `elapsed` seconds at `rate`.
pub fn index_delta(rate: i128, elapsed: u64) -> Result<i128, ContractError> {
    mul(rate, elapsed as i128)
}

/// Fold `staked × index_delta` into whole reward units, carrying the scaled
/// remainder from the previous settlement.
///
/// Because nothing is discarded, settling `[t0, t2]` once produces the same
/// total as settling `[t0, t1]` and `[t1, t2]` separately.
pub fn accrue(staked: i128, index_delta: i128, remainder: i128) -> Result<Accrual, ContractError> {
    let scaled = add(mul(staked, index_delta)?, remainder)?;
    let whole = div(scaled, REWARD_RATE_SCALE)?;
    let remainder = sub(scaled, mul(whole, REWARD_RATE_SCALE)?)?;
    Ok(Accrual { whole, remainder })
}

/// `staked × rate × elapsed / REWARD_RATE_SCALE`, truncated.
///
/// Closed-form reference for a single interval; the ledger itself settles
/// through [`accrue`].
pub fn reward_for(staked: i128, rate: i128, elapsed: u64) -> Result<i128, ContractError> {
    div(mul(staked, index_delta(rate, elapsed)?)?, REWARD_RATE_SCALE)
}
