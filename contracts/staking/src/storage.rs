use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::{errors::ContractError, pool::StakingPool, position::StakePosition};

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

// ── Storage key symbols ──────────────────────────────────────────────────────

const POOL: Symbol = symbol_short!("POOL");
// Positions live in persistent storage under (POSITION, owner).
const POSITION: Symbol = symbol_short!("POSITION");

fn position_key(owner: &Address) -> (Symbol, Address) {
    (POSITION, owner.clone())
}

fn extend_ttl(env: &Env, key: &(Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Pool ─────────────────────────────────────────────────────────────────────

pub fn has_pool(env: &Env) -> bool {
    env.storage().instance().has(&POOL)
}

pub fn try_load_pool(env: &Env) -> Option<StakingPool> {
    env.storage().instance().get(&POOL)
}

pub fn load_pool(env: &Env) -> Result<StakingPool, ContractError> {
    try_load_pool(env).ok_or(ContractError::NotInitialized)
}

pub fn save_pool(env: &Env, pool: &StakingPool) {
    env.storage().instance().set(&POOL, pool);
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Positions ────────────────────────────────────────────────────────────────

pub fn load_position(env: &Env, owner: &Address) -> Option<StakePosition> {
    env.storage().persistent().get(&position_key(owner))
}

pub fn save_position(env: &Env, position: &StakePosition) {
    let key = position_key(&position.owner);
    env.storage().persistent().set(&key, position);
    extend_ttl(env, &key);
}
