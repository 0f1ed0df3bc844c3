//! # Access
//!
//! Capability checks for administrative and artist operations.
//!
//! The engine never verifies identity itself: the Soroban host's
//! `require_auth` proves the caller controls an address, and this module only
//! answers "is that address the platform admin / the artist of this project".
//! Every check requires authorization first so a failed capability check can
//! never be probed without a signature.

use soroban_sdk::{panic_with_error, Address, Env};

use crate::storage;
use crate::Error;

/// True if `caller` is the platform administrator.
pub fn is_admin(env: &Env, caller: &Address) -> bool {
    storage::admin(env) == *caller
}

/// True if `caller` is the artist of `project_id`.
pub fn is_artist(env: &Env, caller: &Address, project_id: u32) -> bool {
    storage::load_project_config(env, project_id).artist == *caller
}

/// Authorize `caller` and require the admin capability.
pub fn require_admin(env: &Env, caller: &Address) {
    caller.require_auth();
    if !is_admin(env, caller) {
        panic_with_error!(env, Error::NotAuthorized);
    }
}

/// Authorize `caller` and require the artist capability for `project_id`.
pub fn require_artist(env: &Env, caller: &Address, project_id: u32) {
    caller.require_auth();
    if !is_artist(env, caller, project_id) {
        panic_with_error!(env, Error::NotAuthorized);
    }
}

/// Authorize `caller` and require either capability.
pub fn require_artist_or_admin(env: &Env, caller: &Address, project_id: u32) {
    caller.require_auth();
    if !is_admin(env, caller) && !is_artist(env, caller, project_id) {
        panic_with_error!(env, Error::NotAuthorized);
    }
}
