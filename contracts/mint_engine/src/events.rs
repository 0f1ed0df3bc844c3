//! # Events
//!
//! Contract events published by the engine, one struct per event.
//!
//! Topics follow the `(symbol, project_id)` convention so indexers can filter
//! a single project's history with one topic match. Registry events that are
//! not project-scoped use `(symbol, minter_id)` instead.

use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env};

use crate::types::MinterKind;

/// Topic `("created", project_id)`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectCreated {
    pub project_id: u32,
    pub artist: Address,
}

/// Topic `("minted", project_id)`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenMinted {
    pub token_id: u64,
    pub to: Address,
    pub minter_id: u32,
    pub price_paid: i128,
}

/// Topic `("split", project_id)`. The four shares always sum to the sale
/// price routed through the splitter.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundsSplit {
    pub render_share: i128,
    pub platform_share: i128,
    pub additional_share: i128,
    pub artist_share: i128,
}

/// Topic `("auction", project_id)`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuctionSet {
    pub minter_id: u32,
    pub start_time: u64,
    pub start_price: i128,
    pub base_price: i128,
}

/// Topic `("receipt", project_id)`. Mirrors the purchaser's stored receipt
/// after each settlement purchase.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReceiptUpdated {
    pub purchaser: Address,
    pub net_posted: i128,
    pub num_purchased: u64,
}

/// Topic `("settled", project_id)`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuctionFinalized {
    pub minter_id: u32,
    pub clearing_price: i128,
}

/// Topic `("claimed", project_id)`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RefundClaimed {
    pub purchaser: Address,
    pub amount: i128,
}

/// Topic `("revenues", project_id)`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RevenuesWithdrawn {
    pub minter_id: u32,
    pub amount: i128,
}

pub fn project_created(env: &Env, project_id: u32, artist: &Address) {
    env.events().publish(
        (symbol_short!("created"), project_id),
        ProjectCreated {
            project_id,
            artist: artist.clone(),
        },
    );
}

pub fn project_active(env: &Env, project_id: u32, active: bool) {
    env.events()
        .publish((symbol_short!("active"), project_id), active);
}

pub fn project_paused(env: &Env, project_id: u32, paused: bool) {
    env.events()
        .publish((symbol_short!("paused"), project_id), paused);
}

pub fn max_invocations_updated(env: &Env, project_id: u32, max_invocations: u64) {
    env.events()
        .publish((symbol_short!("max_inv"), project_id), max_invocations);
}

pub fn artist_updated(env: &Env, project_id: u32, artist: &Address) {
    env.events()
        .publish((symbol_short!("artist"), project_id), artist.clone());
}

pub fn payee_updated(env: &Env, project_id: u32, payee: &Address, bps: u32) {
    env.events()
        .publish((symbol_short!("payee_set"), project_id), (payee.clone(), bps));
}

pub fn admin_updated(env: &Env, admin: &Address) {
    env.events()
        .publish((symbol_short!("admin_set"),), admin.clone());
}

pub fn provider_shares_updated(env: &Env, render_bps: u32, platform_bps: u32) {
    env.events()
        .publish((symbol_short!("shares"),), (render_bps, platform_bps));
}

pub fn provider_addresses_updated(env: &Env, render: &Address, platform: &Address) {
    env.events().publish(
        (symbol_short!("providers"),),
        (render.clone(), platform.clone()),
    );
}

pub fn minter_added(env: &Env, minter_id: u32, kind: &MinterKind) {
    env.events()
        .publish((symbol_short!("mintr_add"), minter_id), kind.clone());
}

pub fn minter_approved(env: &Env, minter_id: u32) {
    env.events()
        .publish((symbol_short!("approved"), minter_id), ());
}

pub fn minter_revoked(env: &Env, minter_id: u32) {
    env.events()
        .publish((symbol_short!("revoked"), minter_id), ());
}

pub fn minter_assigned(env: &Env, project_id: u32, minter_id: u32) {
    env.events()
        .publish((symbol_short!("mintr_set"), project_id), minter_id);
}

pub fn minter_removed(env: &Env, project_id: u32) {
    env.events()
        .publish((symbol_short!("mintr_rm"), project_id), ());
}

pub fn price_configured(env: &Env, project_id: u32, minter_id: u32, price: i128) {
    env.events().publish(
        (symbol_short!("price_set"), project_id),
        (minter_id, price),
    );
}

pub fn auction_set(env: &Env, project_id: u32, details: &AuctionSet) {
    env.events()
        .publish((symbol_short!("auction"), project_id), details.clone());
}

pub fn auction_reset(env: &Env, project_id: u32, minter_id: u32) {
    env.events()
        .publish((symbol_short!("auc_reset"), project_id), minter_id);
}

pub fn root_set(env: &Env, project_id: u32, minter_id: u32, root: &BytesN<32>) {
    env.events().publish(
        (symbol_short!("root_set"), project_id),
        (minter_id, root.clone()),
    );
}

pub fn gate_set(env: &Env, project_id: u32, minter_id: u32) {
    env.events()
        .publish((symbol_short!("gate_set"), project_id), minter_id);
}

pub fn token_minted(env: &Env, project_id: u32, minted: &TokenMinted) {
    env.events()
        .publish((symbol_short!("minted"), project_id), minted.clone());
}

pub fn funds_split(env: &Env, project_id: u32, split: &FundsSplit) {
    env.events()
        .publish((symbol_short!("split"), project_id), split.clone());
}

pub fn receipt_updated(env: &Env, project_id: u32, receipt: &ReceiptUpdated) {
    env.events()
        .publish((symbol_short!("receipt"), project_id), receipt.clone());
}

pub fn auction_finalized(env: &Env, project_id: u32, minter_id: u32, clearing_price: i128) {
    env.events().publish(
        (symbol_short!("settled"), project_id),
        AuctionFinalized {
            minter_id,
            clearing_price,
        },
    );
}

pub fn refund_claimed(env: &Env, project_id: u32, purchaser: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("claimed"), project_id),
        RefundClaimed {
            purchaser: purchaser.clone(),
            amount,
        },
    );
}

pub fn revenues_withdrawn(env: &Env, project_id: u32, minter_id: u32, amount: i128) {
    env.events().publish(
        (symbol_short!("revenues"), project_id),
        RevenuesWithdrawn { minter_id, amount },
    );
}
