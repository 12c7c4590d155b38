//! Host-backed collaborators for [`StakingLedger`].

use soroban_sdk::{token, Address, Env};

use crate::{
    errors::TransferError,
    ledger::{Clock, Custody, SignerVerifier, StakingLedger},
    pool::StakingPool,
};

pub struct LedgerClock {
    env: Env,
}

impl Clock for LedgerClock {
    fn now(&self) -> u64 {
        self.env.ledger().timestamp()
    }
}

/// Signer checks through host auth. A missing signature aborts the
/// invocation inside `require_auth`, so a returned value is always `true`.
pub struct AuthVerifier;

impl SignerVerifier for AuthVerifier {
    fn verify_signer(&self, identity: &Address) -> bool {
        identity.require_auth();
        true
    }
}

/// Custody of one token contract.
pub struct TokenCustody {
    env: Env,
    token: Address,
}

impl TokenCustody {
    pub fn new(env: &Env, token: &Address) -> Self {
        Self {
            env: env.clone(),
            token: token.clone(),
        }
    }

    fn client(&self) -> token::Client<'_> {
        token::Client::new(&self.env, &self.token)
    }
}

impl Custody for TokenCustody {
    fn available(&self, owner: &Address) -> i128 {
        self.client().balance(owner)
    }

    fn transfer(&self, from: &Address, to: &Address, amount: i128) -> Result<(), TransferError> {
        match self.client().try_transfer(from, to, &amount) {
            Ok(Ok(())) => Ok(()),
            _ => Err(TransferError),
        }
    }
}

pub type ContractLedger = StakingLedger<LedgerClock, AuthVerifier, TokenCustody>;

/// Ledger over the contract's own account, using the pool's two tokens.
pub fn ledger_for(env: &Env, pool: &StakingPool) -> ContractLedger {
    ledger_with_tokens(env, &pool.stake_token, &pool.reward_token)
}

pub fn ledger_with_tokens(env: &Env, stake_token: &Address, reward_token: &Address) -> ContractLedger {
    StakingLedger::new(
        LedgerClock { env: env.clone() },
        AuthVerifier,
        TokenCustody::new(env, stake_token),
        TokenCustody::new(env, reward_token),
        env.current_contract_address(),
    )
}
