use soroban_sdk::contracterror;

/// Failures surfaced by every staking entry point.
///
/// Codes are part of the contract ABI and must not be renumbered.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    /// Signer check failed, or the caller is not the owner/authority.
    Unauthorized = 3,
    /// Pool parameters violate their bounds, or an amount is not positive.
    InvalidParameters = 4,
    PoolPaused = 5,
    BelowMinimum = 6,
    AboveMaximum = 7,
    /// The position's lock period has not elapsed.
    PositionLocked = 8,
    InsufficientStake = 9,
    /// The caller does not hold enough of the asset being deposited.
    InsufficientFunds = 10,
    NothingToClaim = 11,
    /// Checked arithmetic overflowed, underflowed or divided by zero.
    ArithmeticError = 12,
    /// The custody platform refused a transfer.
    TransferError = 13,
    /// The clock reported a time earlier than the last settlement.
    InvalidTimestamp = 14,
    NoPendingAuthority = 15,
}

/// Opaque refusal from the custody platform.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TransferError;

impl From<TransferError> for ContractError {
    fn from(_: TransferError) -> Self {
        ContractError::TransferError
    }
}
