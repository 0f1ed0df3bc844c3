//! # Mint Engine Contract
//!
//! This is the root crate of the **Minting Authorization & Pricing Engine**.
//! It exposes the single Soroban contract `MintEngine` whose entry points
//! cover the full lifecycle of a hosted generative-art platform:
//!
//! | Phase         | Entry Point(s)                                              |
//! |---------------|-------------------------------------------------------------|
//! | Bootstrap     | [`MintEngine::init`], `update_admin`                        |
//! | Projects      | `add_project`, `toggle_project_is_active`, `toggle_project_is_paused`, `update_max_invocations`, `update_artist_address` |
//! | Registry      | `add_minter`, `approve_minter`, `revoke_minter`, `set_minter_for_project`, `remove_minter_for_project` |
//! | Pricing       | `set_fixed_price`, `set_auction_details_linear`, `set_auction_details_exp`, `reset_auction_details` |
//! | Gating        | `set_merkle_root`, `set_allowlist_limiter`, `set_holder_gate`, `clear_gate` |
//! | Purchases     | [`MintEngine::purchase`], [`MintEngine::purchase_to`]       |
//! | Settlement    | `finalize_auction`, `claim_refund`, `withdraw_revenues`     |
//! | Payments      | `update_provider_shares`, `update_provider_addresses`, `update_additional_payee` |
//! | Queries       | `get_project`, `owner_of`, `get_minter`, `minter_for_project`, `get_price_info`, `get_receipt` |
//!
//! ## Architecture
//!
//! Authorization is fully delegated to [`access`]. Storage access is fully
//! delegated to [`storage`]. The purchase pipeline composes [`registry`]
//! (who may mint), [`gate`] (who may buy), [`pricing`] (at what price),
//! [`project`] (the mint itself) and [`splitter`] (where the money goes).
//! This file contains **only** the public entry points — no business logic
//! lives here directly.
//!
//! Every entry point either completes or panics with an [`Error`]; the
//! Soroban host rolls back all storage writes and token movements of a failed
//! invocation, so a purchase can never leave a partial mint or partial
//! payment behind.

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, contractmeta, panic_with_error, token, Address, BytesN,
    Env,
};

mod access;
mod events;
mod gate;
mod pricing;
mod project;
mod registry;
mod splitter;
mod storage;
mod types;

#[cfg(test)]
mod test_pricing;
#[cfg(test)]
mod test_settlement;
#[cfg(test)]
mod test_splitter;

use types::{
    AdditionalPayee, ExpAuction, GateConfig, HolderGate, LinearAuction, MerkleGate, PaymentConfig,
    PriceConfig,
};

pub use types::{
    GateProof, HolderProof, MinterInfo, MinterKind, PriceInfo, Project, Receipt, SettlementState,
};

contractmeta!(key = "Description", val = "Minting authorization & pricing engine");

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotAuthorized = 2,
    ProjectNotFound = 3,
    NotAuthorizedMinter = 4,
    UnapprovedStrategy = 5,
    ProjectNotMintable = 6,
    CapacityExceeded = 7,
    InvalidTransition = 8,
    PriceNotConfigured = 9,
    AuctionNotStarted = 10,
    AuctionAlreadyFinalized = 11,
    InsufficientPayment = 12,
    NotEligible = 13,
    InvalidProof = 14,
    DoubleClaim = 15,
    TransferFailed = 16,
    InvalidAuctionParams = 17,
    InvalidShares = 18,
    MinterNotFound = 19,
    AuctionNotFinalized = 20,
    RevenuesAlreadyCollected = 21,
    TokenNotFound = 22,
    NothingToClaim = 23,
}

#[contract]
pub struct MintEngine;

#[contractimpl]
impl MintEngine {
    // ─────────────────────────────────────────────────────────
    // Bootstrap
    // ─────────────────────────────────────────────────────────

    /// Initialise the contract: platform admin, payment token, and provider
    /// payment routing.
    ///
    /// Must be called exactly once immediately after deployment. Subsequent
    /// calls panic with `Error::AlreadyInitialized`.
    pub fn init(
        env: Env,
        admin: Address,
        payment_token: Address,
        render_provider: Address,
        render_bps: u32,
        platform_provider: Address,
        platform_bps: u32,
    ) {
        admin.require_auth();
        if storage::has_admin(&env) {
            panic_with_error!(&env, Error::AlreadyInitialized);
        }
        if render_bps as u64 + platform_bps as u64 > splitter::BPS_DENOMINATOR as u64 {
            panic_with_error!(&env, Error::InvalidShares);
        }
        storage::set_admin(&env, &admin);
        storage::set_payment_token(&env, &payment_token);
        storage::set_payment_config(
            &env,
            &PaymentConfig {
                render_provider,
                render_bps,
                platform_provider,
                platform_bps,
            },
        );
        events::admin_updated(&env, &admin);
    }

    /// Hand the admin capability to `new_admin`. The previous admin loses it
    /// immediately.
    pub fn update_admin(env: Env, caller: Address, new_admin: Address) {
        access::require_admin(&env, &caller);
        storage::set_admin(&env, &new_admin);
        events::admin_updated(&env, &new_admin);
    }

    // ─────────────────────────────────────────────────────────
    // Project ledger
    // ─────────────────────────────────────────────────────────

    /// Register a new project for `artist`. Returns the sequential project id.
    pub fn add_project(env: Env, caller: Address, artist: Address) -> u32 {
        access::require_admin(&env, &caller);
        project::create(&env, &artist)
    }

    /// Flip the admin-controlled active flag. Returns the new value.
    pub fn toggle_project_is_active(env: Env, caller: Address, project_id: u32) -> bool {
        access::require_admin(&env, &caller);
        project::toggle_active(&env, project_id)
    }

    /// Flip the artist-controlled paused flag. Returns the new value.
    pub fn toggle_project_is_paused(env: Env, caller: Address, project_id: u32) -> bool {
        access::require_artist(&env, &caller, project_id);
        project::toggle_paused(&env, project_id)
    }

    /// Lower a project's max invocations. May only decrease, and never below
    /// the invocations already recorded.
    pub fn update_max_invocations(env: Env, caller: Address, project_id: u32, new_max: u64) {
        access::require_artist(&env, &caller, project_id);
        project::update_max_invocations(&env, project_id, new_max);
    }

    /// Reassign the artist of a project.
    pub fn update_artist_address(env: Env, caller: Address, project_id: u32, artist: Address) {
        access::require_admin(&env, &caller);
        let mut config = storage::load_project_config(&env, project_id);
        config.artist = artist.clone();
        storage::save_project_config(&env, &config);
        events::artist_updated(&env, project_id, &artist);
    }

    /// Retrieve a project by its ID.
    pub fn get_project(env: Env, project_id: u32) -> Project {
        storage::load_project(&env, project_id)
    }

    /// Owner of a minted token.
    pub fn owner_of(env: Env, token_id: u64) -> Address {
        storage::token_owner(&env, token_id)
    }

    // ─────────────────────────────────────────────────────────
    // Minter registry
    // ─────────────────────────────────────────────────────────

    /// Register a new pricing-strategy instance of the given kind. The
    /// instance starts unapproved.
    pub fn add_minter(env: Env, caller: Address, kind: MinterKind) -> u32 {
        access::require_admin(&env, &caller);
        registry::add_minter(&env, kind)
    }

    /// Add `minter_id` to the approved set.
    pub fn approve_minter(env: Env, caller: Address, minter_id: u32) {
        access::require_admin(&env, &caller);
        registry::approve(&env, minter_id);
    }

    /// Remove `minter_id` from the approved set. Projects still assigned to
    /// it can no longer mint until reassigned or re-approved.
    pub fn revoke_minter(env: Env, caller: Address, minter_id: u32) {
        access::require_admin(&env, &caller);
        registry::revoke(&env, minter_id);
    }

    /// Assign the approved minter `minter_id` to `project_id`, overwriting
    /// any prior assignment.
    pub fn set_minter_for_project(env: Env, caller: Address, project_id: u32, minter_id: u32) {
        access::require_artist_or_admin(&env, &caller, project_id);
        registry::assign(&env, project_id, minter_id);
    }

    /// Clear the project's minter assignment entirely.
    pub fn remove_minter_for_project(env: Env, caller: Address, project_id: u32) {
        access::require_artist_or_admin(&env, &caller, project_id);
        registry::remove_assignment(&env, project_id);
    }

    pub fn get_minter(env: Env, minter_id: u32) -> MinterInfo {
        storage::load_minter(&env, minter_id)
    }

    pub fn minter_for_project(env: Env, project_id: u32) -> Option<u32> {
        storage::minter_for_project(&env, project_id)
    }

    // ─────────────────────────────────────────────────────────
    // Pricing configuration
    // ─────────────────────────────────────────────────────────

    /// Configure the constant price of a set-price minter for a project.
    pub fn set_fixed_price(env: Env, caller: Address, minter_id: u32, project_id: u32, price: i128) {
        access::require_artist(&env, &caller, project_id);
        Self::require_kind(&env, minter_id, MinterKind::SetPrice);
        if price <= 0 {
            panic_with_error!(&env, Error::InvalidAuctionParams);
        }
        storage::save_price_config(&env, minter_id, project_id, &PriceConfig::Fixed(price));
        events::price_configured(&env, project_id, minter_id, price);
    }

    /// Configure a linear decay auction. Rejected once a previously
    /// configured auction has started; reset it first.
    pub fn set_auction_details_linear(
        env: Env,
        caller: Address,
        minter_id: u32,
        project_id: u32,
        start_time: u64,
        end_time: u64,
        start_price: i128,
        base_price: i128,
    ) {
        access::require_artist(&env, &caller, project_id);
        Self::require_kind(&env, minter_id, MinterKind::DaLinear);
        let auction = LinearAuction {
            start_time,
            end_time,
            start_price,
            base_price,
        };
        pricing::validate_linear(&env, &auction);
        Self::require_not_started(&env, minter_id, project_id);
        storage::save_price_config(&env, minter_id, project_id, &PriceConfig::Linear(auction));
        events::auction_set(
            &env,
            project_id,
            &events::AuctionSet {
                minter_id,
                start_time,
                start_price,
                base_price,
            },
        );
    }

    /// Configure an exponential decay auction with settlement. Rejected once
    /// a previously configured auction has started or has been finalized.
    pub fn set_auction_details_exp(
        env: Env,
        caller: Address,
        minter_id: u32,
        project_id: u32,
        start_time: u64,
        half_life: u64,
        start_price: i128,
        base_price: i128,
    ) {
        access::require_artist(&env, &caller, project_id);
        Self::require_kind(&env, minter_id, MinterKind::DaExpSettlement);
        let auction = ExpAuction {
            start_time,
            half_life,
            start_price,
            base_price,
        };
        pricing::validate_exp(&env, &auction);
        if let Some(state) = storage::load_settlement(&env, minter_id, project_id) {
            if state.finalized {
                panic_with_error!(&env, Error::AuctionAlreadyFinalized);
            }
            if state.num_purchases > 0 {
                panic_with_error!(&env, Error::InvalidTransition);
            }
        }
        Self::require_not_started(&env, minter_id, project_id);
        storage::save_price_config(&env, minter_id, project_id, &PriceConfig::Exp(auction));
        storage::save_settlement(
            &env,
            minter_id,
            project_id,
            &pricing::new_settlement_state(start_price),
        );
        events::auction_set(
            &env,
            project_id,
            &events::AuctionSet {
                minter_id,
                start_time,
                start_price,
                base_price,
            },
        );
    }

    /// Clear the price configuration for a (minter, project) pair.
    ///
    /// Settlement auctions refuse a reset once purchases exist, since the
    /// recorded receipts must stay claimable against a clearing price.
    pub fn reset_auction_details(env: Env, caller: Address, minter_id: u32, project_id: u32) {
        access::require_artist_or_admin(&env, &caller, project_id);
        if let Some(state) = storage::load_settlement(&env, minter_id, project_id) {
            if state.finalized {
                panic_with_error!(&env, Error::AuctionAlreadyFinalized);
            }
            if state.num_purchases > 0 {
                panic_with_error!(&env, Error::InvalidTransition);
            }
            storage::remove_settlement(&env, minter_id, project_id);
        }
        storage::remove_price_config(&env, minter_id, project_id);
        events::auction_reset(&env, project_id, minter_id);
    }

    /// Whether a price is configured, and the price a purchase would pay
    /// right now (the start price for an auction that has not begun).
    pub fn get_price_info(env: Env, minter_id: u32, project_id: u32) -> PriceInfo {
        let now = env.ledger().timestamp();
        match storage::load_price_config(&env, minter_id, project_id) {
            None => PriceInfo {
                configured: false,
                price: 0,
            },
            Some(PriceConfig::Fixed(price)) => PriceInfo {
                configured: true,
                price,
            },
            Some(PriceConfig::Linear(auction)) => PriceInfo {
                configured: true,
                price: if now < auction.start_time {
                    auction.start_price
                } else {
                    pricing::linear_price(&env, &auction, now)
                },
            },
            Some(PriceConfig::Exp(auction)) => PriceInfo {
                configured: true,
                price: if now < auction.start_time {
                    auction.start_price
                } else {
                    pricing::exp_price(&env, &auction, now)
                },
            },
        }
    }

    // ─────────────────────────────────────────────────────────
    // Gating
    // ─────────────────────────────────────────────────────────

    /// Set or rotate the Merkle allowlist root. Rotation invalidates every
    /// outstanding proof in the same transaction.
    pub fn set_merkle_root(
        env: Env,
        caller: Address,
        minter_id: u32,
        project_id: u32,
        root: BytesN<32>,
    ) {
        access::require_artist(&env, &caller, project_id);
        let limiter_disabled = match storage::load_gate(&env, minter_id, project_id) {
            Some(GateConfig::Merkle(existing)) => existing.limiter_disabled,
            _ => false,
        };
        storage::save_gate(
            &env,
            minter_id,
            project_id,
            &GateConfig::Merkle(MerkleGate {
                root: root.clone(),
                limiter_disabled,
            }),
        );
        events::root_set(&env, project_id, minter_id, &root);
    }

    /// Enable or disable the one-mint-per-address limiter of a Merkle gate.
    pub fn set_allowlist_limiter(
        env: Env,
        caller: Address,
        minter_id: u32,
        project_id: u32,
        disabled: bool,
    ) {
        access::require_artist(&env, &caller, project_id);
        let mut merkle = match storage::load_gate(&env, minter_id, project_id) {
            Some(GateConfig::Merkle(m)) => m,
            _ => panic_with_error!(&env, Error::InvalidTransition),
        };
        merkle.limiter_disabled = disabled;
        storage::save_gate(&env, minter_id, project_id, &GateConfig::Merkle(merkle));
        events::gate_set(&env, project_id, minter_id);
    }

    /// Gate purchases on holding (or being delegated for) a token of
    /// `collection`.
    pub fn set_holder_gate(
        env: Env,
        caller: Address,
        minter_id: u32,
        project_id: u32,
        collection: Address,
        delegation_registry: Option<Address>,
    ) {
        access::require_artist(&env, &caller, project_id);
        storage::save_gate(
            &env,
            minter_id,
            project_id,
            &GateConfig::Holder(HolderGate {
                collection,
                delegation_registry,
            }),
        );
        events::gate_set(&env, project_id, minter_id);
    }

    /// Remove any configured gate.
    pub fn clear_gate(env: Env, caller: Address, minter_id: u32, project_id: u32) {
        access::require_artist(&env, &caller, project_id);
        storage::remove_gate(&env, minter_id, project_id);
        events::gate_set(&env, project_id, minter_id);
    }

    // ─────────────────────────────────────────────────────────
    // Purchases
    // ─────────────────────────────────────────────────────────

    /// Purchase a mint of `project_id` through minter `minter_id`, paying up
    /// to `payment_amount`. Returns the minted token id.
    ///
    /// Excess over the current price is refunded immediately, except through
    /// a settlement minter, where the full amount is retained against the
    /// eventual clearing price.
    pub fn purchase(
        env: Env,
        minter_id: u32,
        project_id: u32,
        payer: Address,
        payment_amount: i128,
        proof: Option<GateProof>,
    ) -> u64 {
        Self::purchase_inner(
            &env,
            minter_id,
            project_id,
            &payer,
            &payer,
            payment_amount,
            &proof,
        )
    }

    /// Like [`MintEngine::purchase`], minting to `recipient` instead of the
    /// payer. Gating eligibility is still judged against the payer.
    pub fn purchase_to(
        env: Env,
        minter_id: u32,
        project_id: u32,
        payer: Address,
        recipient: Address,
        payment_amount: i128,
        proof: Option<GateProof>,
    ) -> u64 {
        Self::purchase_inner(
            &env,
            minter_id,
            project_id,
            &payer,
            &recipient,
            payment_amount,
            &proof,
        )
    }

    // ─────────────────────────────────────────────────────────
    // Settlement
    // ─────────────────────────────────────────────────────────

    /// Fix the clearing price of a settlement auction ahead of its natural
    /// floor: the latest purchase price, or the current computed price when
    /// no purchases exist. Terminal; further purchases are rejected.
    pub fn finalize_auction(env: Env, caller: Address, minter_id: u32, project_id: u32) {
        access::require_artist_or_admin(&env, &caller, project_id);
        Self::require_kind(&env, minter_id, MinterKind::DaExpSettlement);
        let auction = Self::exp_auction(&env, minter_id, project_id);
        let mut state = Self::settlement(&env, minter_id, project_id, &auction);
        if state.finalized {
            panic_with_error!(&env, Error::AuctionAlreadyFinalized);
        }
        let now = env.ledger().timestamp();
        let price = pricing::exp_price(&env, &auction, now);
        state.clearing_price = if price == auction.base_price {
            auction.base_price
        } else if state.num_purchases > 0 {
            state.latest_purchase_price
        } else {
            price
        };
        state.finalized = true;
        storage::save_settlement(&env, minter_id, project_id, &state);
        events::auction_finalized(&env, project_id, minter_id, state.clearing_price);
    }

    /// Claim the settlement refund owed to `purchaser`:
    /// `net_posted - clearing_price * num_purchased`. An address without a
    /// purchase receipt panics with `Error::NothingToClaim`; a receipt
    /// settles exactly once and a repeat claim panics with
    /// `Error::DoubleClaim`. The owed amount may be zero when every purchase
    /// was made at the clearing price.
    pub fn claim_refund(env: Env, minter_id: u32, project_id: u32, purchaser: Address) -> i128 {
        purchaser.require_auth();
        Self::require_kind(&env, minter_id, MinterKind::DaExpSettlement);
        let auction = Self::exp_auction(&env, minter_id, project_id);
        let state = Self::settlement(&env, minter_id, project_id, &auction);
        let now = env.ledger().timestamp();
        let clearing = match pricing::settlement_clearing_price(&env, &auction, &state, now) {
            Some(c) => c,
            None => panic_with_error!(&env, Error::AuctionNotFinalized),
        };
        let mut receipt = match storage::load_receipt(&env, minter_id, project_id, &purchaser) {
            Some(r) => r,
            None => panic_with_error!(&env, Error::NothingToClaim),
        };
        if receipt.claimed {
            panic_with_error!(&env, Error::DoubleClaim);
        }
        let settled_position = clearing * receipt.num_purchased as i128;
        let owed = receipt.net_posted - settled_position;
        receipt.net_posted = settled_position;
        receipt.claimed = true;
        storage::save_receipt(&env, minter_id, project_id, &purchaser, &receipt);

        if owed > 0 {
            let token = token::Client::new(&env, &storage::payment_token(&env));
            splitter::pay_out(&env, &token, &purchaser, owed);
            events::refund_claimed(&env, project_id, &purchaser, owed);
        }
        owed
    }

    /// Route the auction's revenues (`clearing_price * num_purchases`)
    /// through the payment splitter, exactly once.
    pub fn withdraw_revenues(env: Env, caller: Address, minter_id: u32, project_id: u32) {
        access::require_artist_or_admin(&env, &caller, project_id);
        Self::require_kind(&env, minter_id, MinterKind::DaExpSettlement);
        let auction = Self::exp_auction(&env, minter_id, project_id);
        let mut state = Self::settlement(&env, minter_id, project_id, &auction);
        if state.revenues_withdrawn {
            panic_with_error!(&env, Error::RevenuesAlreadyCollected);
        }
        let now = env.ledger().timestamp();
        let clearing = match pricing::settlement_clearing_price(&env, &auction, &state, now) {
            Some(c) => c,
            None => panic_with_error!(&env, Error::AuctionNotFinalized),
        };
        // Withdrawing locks the implicit floor finalization in permanently.
        state.finalized = true;
        state.clearing_price = clearing;
        state.revenues_withdrawn = true;
        storage::save_settlement(&env, minter_id, project_id, &state);

        let amount = clearing * state.num_purchases as i128;
        splitter::split_funds(&env, project_id, amount);
        events::revenues_withdrawn(&env, project_id, minter_id, amount);
    }

    /// A purchaser's current settlement receipt.
    pub fn get_receipt(env: Env, minter_id: u32, project_id: u32, purchaser: Address) -> Receipt {
        storage::load_receipt(&env, minter_id, project_id, &purchaser).unwrap_or(Receipt {
            net_posted: 0,
            num_purchased: 0,
            claimed: false,
        })
    }

    // ─────────────────────────────────────────────────────────
    // Payment configuration
    // ─────────────────────────────────────────────────────────

    /// Update the render/platform provider bps shares.
    pub fn update_provider_shares(env: Env, caller: Address, render_bps: u32, platform_bps: u32) {
        access::require_admin(&env, &caller);
        if render_bps as u64 + platform_bps as u64 > splitter::BPS_DENOMINATOR as u64 {
            panic_with_error!(&env, Error::InvalidShares);
        }
        let mut payment = storage::payment_config(&env);
        payment.render_bps = render_bps;
        payment.platform_bps = platform_bps;
        storage::set_payment_config(&env, &payment);
        events::provider_shares_updated(&env, render_bps, platform_bps);
    }

    /// Update the render/platform provider payout addresses.
    pub fn update_provider_addresses(
        env: Env,
        caller: Address,
        render_provider: Address,
        platform_provider: Address,
    ) {
        access::require_admin(&env, &caller);
        let mut payment = storage::payment_config(&env);
        payment.render_provider = render_provider.clone();
        payment.platform_provider = platform_provider.clone();
        storage::set_payment_config(&env, &payment);
        events::provider_addresses_updated(&env, &render_provider, &platform_provider);
    }

    /// Configure the project's additional payee, paid a bps fraction of the
    /// artist remainder.
    pub fn update_additional_payee(
        env: Env,
        caller: Address,
        project_id: u32,
        payee: Address,
        bps: u32,
    ) {
        access::require_artist(&env, &caller, project_id);
        if bps > splitter::BPS_DENOMINATOR as u32 {
            panic_with_error!(&env, Error::InvalidShares);
        }
        storage::save_additional_payee(&env, project_id, &AdditionalPayee {
            payee: payee.clone(),
            bps,
        });
        events::payee_updated(&env, project_id, &payee, bps);
    }

    // ─────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────

    fn require_kind(env: &Env, minter_id: u32, kind: MinterKind) {
        let minter = storage::load_minter(env, minter_id);
        if minter.kind != kind {
            panic_with_error!(env, Error::InvalidTransition);
        }
    }

    /// A configured auction whose curve has begun is frozen; it must be
    /// reset before new details are accepted.
    fn require_not_started(env: &Env, minter_id: u32, project_id: u32) {
        if let Some(config) = storage::load_price_config(env, minter_id, project_id) {
            if pricing::auction_started(&config, env.ledger().timestamp()) {
                panic_with_error!(env, Error::InvalidTransition);
            }
        }
    }

    fn exp_auction(env: &Env, minter_id: u32, project_id: u32) -> ExpAuction {
        match storage::load_price_config(env, minter_id, project_id) {
            Some(PriceConfig::Exp(auction)) => auction,
            _ => panic_with_error!(env, Error::PriceNotConfigured),
        }
    }

    fn settlement(
        env: &Env,
        minter_id: u32,
        project_id: u32,
        auction: &ExpAuction,
    ) -> SettlementState {
        storage::load_settlement(env, minter_id, project_id)
            .unwrap_or_else(|| pricing::new_settlement_state(auction.start_price))
    }

    fn purchase_inner(
        env: &Env,
        minter_id: u32,
        project_id: u32,
        payer: &Address,
        recipient: &Address,
        payment_amount: i128,
        proof: &Option<GateProof>,
    ) -> u64 {
        payer.require_auth();

        // 1. The calling strategy must be assigned and approved.
        let minter = registry::authorize(env, project_id, minter_id);

        // 2. Eligibility; consumes one unit, rolled back on any later panic.
        gate::check_and_consume(env, minter_id, project_id, payer, proof);

        let now = env.ledger().timestamp();
        let token = token::Client::new(env, &storage::payment_token(env));

        match minter.kind {
            MinterKind::DaExpSettlement => {
                let auction = Self::exp_auction(env, minter_id, project_id);
                let mut state = Self::settlement(env, minter_id, project_id, &auction);
                if state.finalized {
                    panic_with_error!(env, Error::AuctionAlreadyFinalized);
                }

                // 3–4. Price check.
                let price = pricing::exp_price(env, &auction, now);
                if payment_amount < price {
                    panic_with_error!(env, Error::InsufficientPayment);
                }

                // 5. Mint.
                let token_id = project::record_mint(env, project_id, recipient);

                // 6. Retain the full payment against the clearing price.
                Self::transfer_in(env, &token, payer, payment_amount);
                let mut receipt = storage::load_receipt(env, minter_id, project_id, payer)
                    .unwrap_or(Receipt {
                        net_posted: 0,
                        num_purchased: 0,
                        claimed: false,
                    });
                receipt.net_posted += payment_amount;
                receipt.num_purchased += 1;
                storage::save_receipt(env, minter_id, project_id, payer, &receipt);
                events::receipt_updated(
                    env,
                    project_id,
                    &events::ReceiptUpdated {
                        purchaser: payer.clone(),
                        net_posted: receipt.net_posted,
                        num_purchased: receipt.num_purchased,
                    },
                );

                state.latest_purchase_price = price;
                state.num_purchases += 1;

                // Sellout fixes the clearing price at the last price paid.
                let proj = storage::load_project_state(env, project_id);
                if proj.invocations >= proj.max_invocations {
                    state.finalized = true;
                    state.clearing_price = price;
                    events::auction_finalized(env, project_id, minter_id, price);
                }
                storage::save_settlement(env, minter_id, project_id, &state);

                events::token_minted(
                    env,
                    project_id,
                    &events::TokenMinted {
                        token_id,
                        to: recipient.clone(),
                        minter_id,
                        price_paid: payment_amount,
                    },
                );
                token_id
            }
            MinterKind::SetPrice | MinterKind::DaLinear => {
                // 3. Price.
                let config = match storage::load_price_config(env, minter_id, project_id) {
                    Some(c) => c,
                    None => panic_with_error!(env, Error::PriceNotConfigured),
                };
                let price = pricing::current_price(env, &config, now);

                // 4. Payment must cover it.
                if payment_amount < price {
                    panic_with_error!(env, Error::InsufficientPayment);
                }

                // 5. Mint.
                let token_id = project::record_mint(env, project_id, recipient);

                // 6. Split the price; refund the excess immediately.
                Self::transfer_in(env, &token, payer, payment_amount);
                splitter::split_funds(env, project_id, price);
                splitter::pay_out(env, &token, payer, payment_amount - price);

                events::token_minted(
                    env,
                    project_id,
                    &events::TokenMinted {
                        token_id,
                        to: recipient.clone(),
                        minter_id,
                        price_paid: price,
                    },
                );
                token_id
            }
        }
    }

    fn transfer_in(env: &Env, token: &token::Client, payer: &Address, amount: i128) {
        if amount == 0 {
            return;
        }
        if token
            .try_transfer(payer, &env.current_contract_address(), &amount)
            .is_err()
        {
            panic_with_error!(env, Error::TransferFailed);
        }
    }
}
