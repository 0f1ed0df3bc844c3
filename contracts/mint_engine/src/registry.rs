//! # Minter Registry
//!
//! Maps each project to exactly one approved pricing-strategy instance and
//! maintains the approved set. An instance that is assigned to a project but
//! no longer approved may not mint; an approved instance that is not the
//! current assignment may not mint either.

use soroban_sdk::{panic_with_error, Env};

use crate::types::{MinterInfo, MinterKind};
use crate::{events, storage, Error};

/// Register a new strategy instance. Instances start unapproved and must be
/// approved before any project can be pointed at them.
pub fn add_minter(env: &Env, kind: MinterKind) -> u32 {
    let id = storage::get_and_increment_minter_id(env);
    let minter = MinterInfo {
        id,
        kind: kind.clone(),
        approved: false,
    };
    storage::save_minter(env, &minter);
    events::minter_added(env, id, &kind);
    id
}

pub fn approve(env: &Env, minter_id: u32) {
    let mut minter = storage::load_minter(env, minter_id);
    minter.approved = true;
    storage::save_minter(env, &minter);
    events::minter_approved(env, minter_id);
}

/// Revoking approval deauthorizes the instance everywhere at once, including
/// projects it is still assigned to.
pub fn revoke(env: &Env, minter_id: u32) {
    let mut minter = storage::load_minter(env, minter_id);
    minter.approved = false;
    storage::save_minter(env, &minter);
    events::minter_revoked(env, minter_id);
}

/// Point `project_id` at `minter_id`, overwriting any prior assignment. The
/// prior minter is implicitly deauthorized for this project even though it
/// may remain approved for others.
pub fn assign(env: &Env, project_id: u32, minter_id: u32) {
    let minter = storage::load_minter(env, minter_id);
    if !minter.approved {
        panic_with_error!(env, Error::UnapprovedStrategy);
    }
    storage::set_minter_for_project(env, project_id, minter_id);
    events::minter_assigned(env, project_id, minter_id);
}

pub fn remove_assignment(env: &Env, project_id: u32) {
    storage::remove_minter_for_project(env, project_id);
    events::minter_removed(env, project_id);
}

/// Gate at the head of every purchase: the calling instance must be both the
/// current assignment for the project and in the approved set.
pub fn authorize(env: &Env, project_id: u32, minter_id: u32) -> MinterInfo {
    let minter = storage::load_minter(env, minter_id);
    let assigned = storage::minter_for_project(env, project_id);
    if !minter.approved || assigned != Some(minter_id) {
        panic_with_error!(env, Error::NotAuthorizedMinter);
    }
    minter
}
