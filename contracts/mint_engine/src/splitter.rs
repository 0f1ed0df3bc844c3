//! # Payment Splitter
//!
//! Distributes a sale's proceeds across up to four stakeholders: render
//! provider, platform provider, additional payee, and artist.
//!
//! Integer division truncates; every truncation remainder accrues to the
//! artist, whose share is computed by subtraction. The four shares therefore
//! sum to the input amount exactly, for any amount and any valid bps
//! configuration.

use soroban_sdk::{panic_with_error, token, Address, Env};

use crate::events::FundsSplit;
use crate::{events, storage, Error};

pub const BPS_DENOMINATOR: i128 = 10_000;

/// Computed shares for one sale. `render + platform + additional + artist`
/// equals the amount passed to [`compute_shares`].
pub struct Shares {
    pub render: i128,
    pub platform: i128,
    pub additional: i128,
    pub artist: i128,
}

/// Pure share computation, separated from transfer execution for testing.
pub fn compute_shares(
    amount: i128,
    render_bps: u32,
    platform_bps: u32,
    additional_bps: u32,
) -> Shares {
    let render = amount * render_bps as i128 / BPS_DENOMINATOR;
    let platform = amount * platform_bps as i128 / BPS_DENOMINATOR;
    let remainder = amount - render - platform;
    let additional = remainder * additional_bps as i128 / BPS_DENOMINATOR;
    let artist = remainder - additional;
    Shares {
        render,
        platform,
        additional,
        artist,
    }
}

/// All-or-nothing transfer out of the contract's balance. A refused transfer
/// aborts the whole purchase transaction, mint included.
pub fn pay_out(env: &Env, token: &token::Client, to: &Address, amount: i128) {
    if amount == 0 {
        return;
    }
    if token
        .try_transfer(&env.current_contract_address(), to, &amount)
        .is_err()
    {
        panic_with_error!(env, Error::TransferFailed);
    }
}

/// Split `amount` (already held by the contract) among the project's
/// stakeholders and execute the transfers.
pub fn split_funds(env: &Env, project_id: u32, amount: i128) {
    if amount == 0 {
        return;
    }
    let payment = storage::payment_config(env);
    let artist = storage::load_project_config(env, project_id).artist;
    let additional_payee = storage::load_additional_payee(env, project_id);
    let additional_bps = additional_payee.as_ref().map(|p| p.bps).unwrap_or(0);

    let shares = compute_shares(amount, payment.render_bps, payment.platform_bps, additional_bps);

    let token = token::Client::new(env, &storage::payment_token(env));
    pay_out(env, &token, &payment.render_provider, shares.render);
    pay_out(env, &token, &payment.platform_provider, shares.platform);
    if let Some(payee) = &additional_payee {
        pay_out(env, &token, &payee.payee, shares.additional);
    }
    pay_out(env, &token, &artist, shares.artist);

    events::funds_split(
        env,
        project_id,
        &FundsSplit {
            render_share: shares.render,
            platform_share: shares.platform,
            additional_share: shares.additional,
            artist_share: shares.artist,
        },
    );
}
