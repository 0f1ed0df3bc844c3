//! # Pricing
//!
//! Price functions and parameter validation for the strategy variants.
//!
//! All arithmetic is pure `i128` integer math. The exponential decay uses a
//! right shift per whole half-life plus a linear interpolation inside the
//! current half-life period, so two nodes evaluating the same ledger
//! timestamp always compute the same price.

use soroban_sdk::{panic_with_error, Env};

use crate::types::{ExpAuction, LinearAuction, PriceConfig, SettlementState};
use crate::Error;

/// Linear auctions must run for at least one hour.
pub const MIN_AUCTION_LENGTH_SECONDS: u64 = 3_600;

/// Bounds on the exponential half-life, in seconds.
pub const MIN_HALF_LIFE_SECONDS: u64 = 300;
pub const MAX_HALF_LIFE_SECONDS: u64 = 3_600;

pub fn validate_linear(env: &Env, auction: &LinearAuction) {
    if auction.start_price <= auction.base_price
        || auction.base_price <= 0
        || auction.end_time <= auction.start_time
        || auction.end_time - auction.start_time < MIN_AUCTION_LENGTH_SECONDS
    {
        panic_with_error!(env, Error::InvalidAuctionParams);
    }
}

pub fn validate_exp(env: &Env, auction: &ExpAuction) {
    if auction.start_price <= auction.base_price
        || auction.base_price <= 0
        || auction.half_life < MIN_HALF_LIFE_SECONDS
        || auction.half_life > MAX_HALF_LIFE_SECONDS
    {
        panic_with_error!(env, Error::InvalidAuctionParams);
    }
}

/// Price of a linear decay auction at `now`.
///
/// Decreases linearly from `start_price` at `start_time` to `base_price` at
/// `end_time` and stays at `base_price` thereafter.
pub fn linear_price(env: &Env, auction: &LinearAuction, now: u64) -> i128 {
    if now < auction.start_time {
        panic_with_error!(env, Error::AuctionNotStarted);
    }
    if now >= auction.end_time {
        return auction.base_price;
    }
    let elapsed = (now - auction.start_time) as i128;
    let duration = (auction.end_time - auction.start_time) as i128;
    auction.start_price - (auction.start_price - auction.base_price) * elapsed / duration
}

/// Price of an exponential decay auction at `now`.
///
/// One right shift per whole half-life elapsed, then a linear interpolation
/// across the partial half-life, clamped to `base_price`.
pub fn exp_price(env: &Env, auction: &ExpAuction, now: u64) -> i128 {
    if now < auction.start_time {
        panic_with_error!(env, Error::AuctionNotStarted);
    }
    let elapsed = now - auction.start_time;
    let whole_half_lives = elapsed / auction.half_life;
    if whole_half_lives >= 127 {
        return auction.base_price;
    }
    let mut price = auction.start_price >> (whole_half_lives as u32);
    price -= price * ((elapsed % auction.half_life) as i128) / (auction.half_life as i128) / 2;
    if price < auction.base_price {
        auction.base_price
    } else {
        price
    }
}

/// Current purchase price for any configured strategy.
pub fn current_price(env: &Env, config: &PriceConfig, now: u64) -> i128 {
    match config {
        PriceConfig::Fixed(price) => *price,
        PriceConfig::Linear(auction) => linear_price(env, auction, now),
        PriceConfig::Exp(auction) => exp_price(env, auction, now),
    }
}

/// True once the auction's price curve has begun (configuration is frozen
/// from this point until a reset).
pub fn auction_started(config: &PriceConfig, now: u64) -> bool {
    match config {
        PriceConfig::Fixed(_) => false,
        PriceConfig::Linear(auction) => now >= auction.start_time,
        PriceConfig::Exp(auction) => now >= auction.start_time,
    }
}

/// The clearing price of a settlement auction, if one is fixed yet.
///
/// Fixed explicitly by finalization (sellout or artist-triggered), or
/// implicitly once the decay reaches the floor.
pub fn settlement_clearing_price(
    env: &Env,
    auction: &ExpAuction,
    state: &SettlementState,
    now: u64,
) -> Option<i128> {
    if state.finalized {
        return Some(state.clearing_price);
    }
    if now >= auction.start_time && exp_price(env, auction, now) == auction.base_price {
        return Some(auction.base_price);
    }
    None
}

/// A fresh settlement ledger for a newly configured auction.
pub fn new_settlement_state(start_price: i128) -> SettlementState {
    SettlementState {
        latest_purchase_price: start_price,
        num_purchases: 0,
        finalized: false,
        clearing_price: 0,
        revenues_withdrawn: false,
    }
}
