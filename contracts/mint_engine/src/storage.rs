//! # Storage
//!
//! Typed helpers over Soroban's two storage tiers used by the mint engine:
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key             | Type            | Description                          |
//! |-----------------|-----------------|--------------------------------------|
//! | `Admin`         | `Address`       | Platform administrator               |
//! | `PaymentToken`  | `Address`       | SEP-41 token all sales settle in     |
//! | `Payment`       | `PaymentConfig` | Provider addresses and bps shares    |
//! | `ProjectCount`  | `u32`           | Auto-increment project ID counter    |
//! | `MinterCount`   | `u32`           | Auto-increment minter ID counter     |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                          | Type               | Description                       |
//! |------------------------------|--------------------|-----------------------------------|
//! | `ProjConfig(id)`             | `ProjectConfig`    | Immutable project configuration   |
//! | `ProjState(id)`              | `ProjectState`     | Mutable project state             |
//! | `Payee(id)`                  | `AdditionalPayee`  | Artist's additional payee         |
//! | `Minter(id)`                 | `MinterInfo`       | Registered strategy instance      |
//! | `MinterFor(project)`         | `u32`              | Assigned minter per project       |
//! | `Price(minter, project)`     | `PriceConfig`      | Strategy price configuration      |
//! | `Settlement(minter, project)`| `SettlementState`  | Settlement auction bookkeeping    |
//! | `Rcpt(minter, project, who)` | `Receipt`          | Per-purchaser settlement receipt  |
//! | `Gate(minter, project)`      | `GateConfig`       | Optional eligibility gate         |
//! | `MintCount(m, p, who)`       | `u32`              | Allowlist mints per address       |
//! | `TokenUsed(m, p, token)`     | `bool`             | Holder-gate token consumed flag   |
//! | `Owner(token_id)`            | `Address`          | Minted token owner                |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.
//!
//! ## Why split Config and State?
//!
//! Mints are high-frequency writes. `ProjectState` is a handful of words;
//! separating it from the write-once config keeps the `record_mint` hot path
//! cheap while the public API still returns the reconstructed `Project`.

use soroban_sdk::{contracttype, panic_with_error, Address, Env};

use crate::types::{
    AdditionalPayee, GateConfig, MinterInfo, PaymentConfig, PriceConfig, Project, ProjectConfig,
    ProjectState, Receipt, SettlementState,
};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

/// All contract storage keys.
///
/// Instance-tier keys live as long as the contract and are extended together.
/// Persistent-tier keys hold per-project / per-minter data with independent
/// TTLs.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Platform administrator (Instance).
    Admin,
    /// Payment token every sale settles in (Instance).
    PaymentToken,
    /// Provider payment routing (Instance).
    Payment,
    /// Global auto-increment counter for project IDs (Instance).
    ProjectCount,
    /// Global auto-increment counter for minter IDs (Instance).
    MinterCount,
    /// Immutable project configuration keyed by ID (Persistent).
    ProjConfig(u32),
    /// Mutable project state keyed by ID (Persistent).
    ProjState(u32),
    /// Additional payee per project (Persistent).
    Payee(u32),
    /// Registered minter instance (Persistent).
    Minter(u32),
    /// Minter assigned to a project (Persistent).
    MinterFor(u32),
    /// Price configuration per (minter, project) (Persistent).
    Price(u32, u32),
    /// Settlement state per (minter, project) (Persistent).
    Settlement(u32, u32),
    /// Settlement receipt per (minter, project, purchaser) (Persistent).
    Rcpt(u32, u32, Address),
    /// Eligibility gate per (minter, project) (Persistent).
    Gate(u32, u32),
    /// Allowlist mints per (minter, project, address) (Persistent).
    MintCount(u32, u32, Address),
    /// Holder-gate consumed flag per (minter, project, qualifying token) (Persistent).
    TokenUsed(u32, u32, u64),
    /// Owner of a minted token (Persistent).
    Owner(u64),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn has_admin(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
    bump_instance(env);
}

/// Retrieve the platform administrator. Fails if `init` never ran.
pub fn admin(env: &Env) -> Address {
    bump_instance(env);
    match env.storage().instance().get(&DataKey::Admin) {
        Some(a) => a,
        None => panic_with_error!(env, Error::NotAuthorized),
    }
}

pub fn set_payment_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::PaymentToken, token);
    bump_instance(env);
}

pub fn payment_token(env: &Env) -> Address {
    bump_instance(env);
    match env.storage().instance().get(&DataKey::PaymentToken) {
        Some(t) => t,
        None => panic_with_error!(env, Error::PriceNotConfigured),
    }
}

pub fn set_payment_config(env: &Env, config: &PaymentConfig) {
    env.storage().instance().set(&DataKey::Payment, config);
    bump_instance(env);
}

pub fn payment_config(env: &Env) -> PaymentConfig {
    bump_instance(env);
    match env.storage().instance().get(&DataKey::Payment) {
        Some(c) => c,
        None => panic_with_error!(env, Error::PriceNotConfigured),
    }
}

/// Atomically reads, increments, and stores the project counter.
/// Returns the ID to use for the *current* project (pre-increment value).
pub fn get_and_increment_project_id(env: &Env) -> u32 {
    bump_instance(env);
    let current: u32 = env
        .storage()
        .instance()
        .get(&DataKey::ProjectCount)
        .unwrap_or(0);
    env.storage()
        .instance()
        .set(&DataKey::ProjectCount, &(current + 1));
    current
}

/// Atomically reads, increments, and stores the minter counter.
pub fn get_and_increment_minter_id(env: &Env) -> u32 {
    bump_instance(env);
    let current: u32 = env
        .storage()
        .instance()
        .get(&DataKey::MinterCount)
        .unwrap_or(0);
    env.storage()
        .instance()
        .set(&DataKey::MinterCount, &(current + 1));
    current
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Extend the TTL for a persistent storage key.
fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Save both the immutable config and initial mutable state for a new project.
pub fn save_project(env: &Env, config: &ProjectConfig, state: &ProjectState) {
    let config_key = DataKey::ProjConfig(config.id);
    let state_key = DataKey::ProjState(config.id);
    env.storage().persistent().set(&config_key, config);
    env.storage().persistent().set(&state_key, state);
    bump_persistent(env, &config_key);
    bump_persistent(env, &state_key);
}

/// Load the full `Project` by combining config and state.
pub fn load_project(env: &Env, id: u32) -> Project {
    let config = load_project_config(env, id);
    let state = load_project_state(env, id);
    Project {
        id: config.id,
        artist: config.artist,
        active: state.active,
        paused: state.paused,
        invocations: state.invocations,
        max_invocations: state.max_invocations,
    }
}

/// Load only the immutable project configuration.
pub fn load_project_config(env: &Env, id: u32) -> ProjectConfig {
    let key = DataKey::ProjConfig(id);
    let config: ProjectConfig = match env.storage().persistent().get(&key) {
        Some(c) => c,
        None => panic_with_error!(env, Error::ProjectNotFound),
    };
    bump_persistent(env, &key);
    config
}

/// Overwrite the project configuration (artist reassignment only).
pub fn save_project_config(env: &Env, config: &ProjectConfig) {
    let key = DataKey::ProjConfig(config.id);
    env.storage().persistent().set(&key, config);
    bump_persistent(env, &key);
}

/// Load only the mutable project state.
pub fn load_project_state(env: &Env, id: u32) -> ProjectState {
    let key = DataKey::ProjState(id);
    let state: ProjectState = match env.storage().persistent().get(&key) {
        Some(s) => s,
        None => panic_with_error!(env, Error::ProjectNotFound),
    };
    bump_persistent(env, &key);
    state
}

/// Save only the mutable project state (optimized for mints and toggles).
pub fn save_project_state(env: &Env, id: u32, state: &ProjectState) {
    let key = DataKey::ProjState(id);
    env.storage().persistent().set(&key, state);
    bump_persistent(env, &key);
}

pub fn save_additional_payee(env: &Env, project_id: u32, payee: &AdditionalPayee) {
    let key = DataKey::Payee(project_id);
    env.storage().persistent().set(&key, payee);
    bump_persistent(env, &key);
}

pub fn load_additional_payee(env: &Env, project_id: u32) -> Option<AdditionalPayee> {
    let key = DataKey::Payee(project_id);
    let payee: Option<AdditionalPayee> = env.storage().persistent().get(&key);
    if payee.is_some() {
        bump_persistent(env, &key);
    }
    payee
}

pub fn save_minter(env: &Env, minter: &MinterInfo) {
    let key = DataKey::Minter(minter.id);
    env.storage().persistent().set(&key, minter);
    bump_persistent(env, &key);
}

pub fn load_minter(env: &Env, id: u32) -> MinterInfo {
    let key = DataKey::Minter(id);
    let minter: MinterInfo = match env.storage().persistent().get(&key) {
        Some(m) => m,
        None => panic_with_error!(env, Error::MinterNotFound),
    };
    bump_persistent(env, &key);
    minter
}

pub fn set_minter_for_project(env: &Env, project_id: u32, minter_id: u32) {
    let key = DataKey::MinterFor(project_id);
    env.storage().persistent().set(&key, &minter_id);
    bump_persistent(env, &key);
}

pub fn minter_for_project(env: &Env, project_id: u32) -> Option<u32> {
    let key = DataKey::MinterFor(project_id);
    let id: Option<u32> = env.storage().persistent().get(&key);
    if id.is_some() {
        bump_persistent(env, &key);
    }
    id
}

pub fn remove_minter_for_project(env: &Env, project_id: u32) {
    env.storage()
        .persistent()
        .remove(&DataKey::MinterFor(project_id));
}

pub fn save_price_config(env: &Env, minter_id: u32, project_id: u32, config: &PriceConfig) {
    let key = DataKey::Price(minter_id, project_id);
    env.storage().persistent().set(&key, config);
    bump_persistent(env, &key);
}

pub fn load_price_config(env: &Env, minter_id: u32, project_id: u32) -> Option<PriceConfig> {
    let key = DataKey::Price(minter_id, project_id);
    let config: Option<PriceConfig> = env.storage().persistent().get(&key);
    if config.is_some() {
        bump_persistent(env, &key);
    }
    config
}

pub fn remove_price_config(env: &Env, minter_id: u32, project_id: u32) {
    env.storage()
        .persistent()
        .remove(&DataKey::Price(minter_id, project_id));
}

pub fn save_settlement(env: &Env, minter_id: u32, project_id: u32, state: &SettlementState) {
    let key = DataKey::Settlement(minter_id, project_id);
    env.storage().persistent().set(&key, state);
    bump_persistent(env, &key);
}

pub fn load_settlement(env: &Env, minter_id: u32, project_id: u32) -> Option<SettlementState> {
    let key = DataKey::Settlement(minter_id, project_id);
    let state: Option<SettlementState> = env.storage().persistent().get(&key);
    if state.is_some() {
        bump_persistent(env, &key);
    }
    state
}

pub fn remove_settlement(env: &Env, minter_id: u32, project_id: u32) {
    env.storage()
        .persistent()
        .remove(&DataKey::Settlement(minter_id, project_id));
}

pub fn save_receipt(env: &Env, minter_id: u32, project_id: u32, purchaser: &Address, rcpt: &Receipt) {
    let key = DataKey::Rcpt(minter_id, project_id, purchaser.clone());
    env.storage().persistent().set(&key, rcpt);
    bump_persistent(env, &key);
}

pub fn load_receipt(env: &Env, minter_id: u32, project_id: u32, purchaser: &Address) -> Option<Receipt> {
    let key = DataKey::Rcpt(minter_id, project_id, purchaser.clone());
    let rcpt: Option<Receipt> = env.storage().persistent().get(&key);
    if rcpt.is_some() {
        bump_persistent(env, &key);
    }
    rcpt
}

pub fn save_gate(env: &Env, minter_id: u32, project_id: u32, gate: &GateConfig) {
    let key = DataKey::Gate(minter_id, project_id);
    env.storage().persistent().set(&key, gate);
    bump_persistent(env, &key);
}

pub fn load_gate(env: &Env, minter_id: u32, project_id: u32) -> Option<GateConfig> {
    let key = DataKey::Gate(minter_id, project_id);
    let gate: Option<GateConfig> = env.storage().persistent().get(&key);
    if gate.is_some() {
        bump_persistent(env, &key);
    }
    gate
}

pub fn remove_gate(env: &Env, minter_id: u32, project_id: u32) {
    env.storage()
        .persistent()
        .remove(&DataKey::Gate(minter_id, project_id));
}

pub fn mint_count(env: &Env, minter_id: u32, project_id: u32, who: &Address) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::MintCount(minter_id, project_id, who.clone()))
        .unwrap_or(0)
}

pub fn set_mint_count(env: &Env, minter_id: u32, project_id: u32, who: &Address, count: u32) {
    let key = DataKey::MintCount(minter_id, project_id, who.clone());
    env.storage().persistent().set(&key, &count);
    bump_persistent(env, &key);
}

pub fn token_used(env: &Env, minter_id: u32, project_id: u32, token_id: u64) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::TokenUsed(minter_id, project_id, token_id))
        .unwrap_or(false)
}

pub fn mark_token_used(env: &Env, minter_id: u32, project_id: u32, token_id: u64) {
    let key = DataKey::TokenUsed(minter_id, project_id, token_id);
    env.storage().persistent().set(&key, &true);
    bump_persistent(env, &key);
}

pub fn set_token_owner(env: &Env, token_id: u64, owner: &Address) {
    let key = DataKey::Owner(token_id);
    env.storage().persistent().set(&key, owner);
    bump_persistent(env, &key);
}

pub fn token_owner(env: &Env, token_id: u64) -> Address {
    let key = DataKey::Owner(token_id);
    let owner: Address = match env.storage().persistent().get(&key) {
        Some(o) => o,
        None => panic_with_error!(env, Error::TokenNotFound),
    };
    bump_persistent(env, &key);
    owner
}
