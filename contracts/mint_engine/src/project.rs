//! # Project Ledger
//!
//! Owns per-project state: identity, activation flags, invocation counters.
//!
//! `record_mint` is the single serialization point preventing over-minting:
//! the capacity check and the counter increment happen in one transaction,
//! and any later panic in the purchase path (gate, payment, transfer) rolls
//! the increment back with everything else.

use soroban_sdk::{panic_with_error, Address, Env};

use crate::types::{ProjectConfig, ProjectState};
use crate::{events, storage, Error};

/// Token ids are namespaced per project in blocks of one million.
pub const ONE_MILLION: u64 = 1_000_000;

/// Every project starts with the full token-id namespace available; the
/// artist may only shrink it from there.
pub const DEFAULT_MAX_INVOCATIONS: u64 = ONE_MILLION;

/// Allocate the next sequential project id. Projects start inactive and
/// paused; no purchase can succeed until the admin activates the project and
/// the artist unpauses it.
pub fn create(env: &Env, artist: &Address) -> u32 {
    let id = storage::get_and_increment_project_id(env);
    let config = ProjectConfig {
        id,
        artist: artist.clone(),
    };
    let state = ProjectState {
        active: false,
        paused: true,
        invocations: 0,
        max_invocations: DEFAULT_MAX_INVOCATIONS,
    };
    storage::save_project(env, &config, &state);
    events::project_created(env, id, artist);
    id
}

pub fn toggle_active(env: &Env, project_id: u32) -> bool {
    let mut state = storage::load_project_state(env, project_id);
    state.active = !state.active;
    storage::save_project_state(env, project_id, &state);
    events::project_active(env, project_id, state.active);
    state.active
}

pub fn toggle_paused(env: &Env, project_id: u32) -> bool {
    let mut state = storage::load_project_state(env, project_id);
    state.paused = !state.paused;
    storage::save_project_state(env, project_id, &state);
    events::project_paused(env, project_id, state.paused);
    state.paused
}

/// Max invocations may only decrease, and never below the invocations already
/// recorded.
pub fn update_max_invocations(env: &Env, project_id: u32, new_max: u64) {
    let mut state = storage::load_project_state(env, project_id);
    if new_max > state.max_invocations || new_max < state.invocations {
        panic_with_error!(env, Error::InvalidTransition);
    }
    state.max_invocations = new_max;
    storage::save_project_state(env, project_id, &state);
    events::max_invocations_updated(env, project_id, new_max);
}

/// Atomically check mintability and capacity, increment the invocation
/// counter, and record the new token's owner.
///
/// Returns the minted token id: `project_id * 1_000_000 + invocation_index`.
pub fn record_mint(env: &Env, project_id: u32, to: &Address) -> u64 {
    let mut state = storage::load_project_state(env, project_id);
    if !state.active || state.paused {
        panic_with_error!(env, Error::ProjectNotMintable);
    }
    if state.invocations >= state.max_invocations {
        panic_with_error!(env, Error::CapacityExceeded);
    }
    let token_id = project_id as u64 * ONE_MILLION + state.invocations;
    state.invocations += 1;
    storage::save_project_state(env, project_id, &state);
    storage::set_token_owner(env, token_id, to);
    token_id
}
