//! # Types
//!
//! Shared data structures used across all modules of the mint engine.
//!
//! ## Design decisions
//!
//! ### Config / State split
//!
//! A `Project` is internally stored as two separate ledger entries:
//!
//! - [`ProjectConfig`] — written once at creation; mutated only by explicit
//!   administrative reassignment of the artist address.
//! - [`ProjectState`] — written on every mint and on flag toggles.
//!
//! The public API exposes the reconstructed [`Project`] struct for convenience.
//!
//! ### Auctions as a Finite-State Machine
//!
//! A decay auction moves strictly forward:
//!
//! ```text
//! Unconfigured ──► Scheduled ──► Active ──► Finalized(clearing_price)
//! ```
//!
//! `Scheduled` and `Active` are implied by the ledger timestamp relative to
//! the stored start time. `Finalized` only exists for the settlement variant
//! and is terminal: configuration calls against a finalized auction are
//! rejected.

use soroban_sdk::{contracttype, Address, BytesN, Vec};

/// The closed set of pricing-strategy variants a minter instance can have.
///
/// New strategies are added as new variants; the registry reasons about this
/// finite set rather than open-ended strategy contracts.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MinterKind {
    /// Artist-set constant price, no time dependency.
    SetPrice,
    /// Linear decay from start price to base price between two timestamps.
    DaLinear,
    /// Exponential decay with post-hoc settlement at a single clearing price.
    DaExpSettlement,
}

/// A registered pricing-strategy instance.
///
/// An instance may only execute mints while `approved` is true *and* it is
/// the minter currently assigned to the target project.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MinterInfo {
    pub id: u32,
    pub kind: MinterKind,
    pub approved: bool,
}

/// Immutable project configuration, written once at creation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectConfig {
    pub id: u32,
    /// Address that configures the project and receives the artist share.
    pub artist: Address,
}

/// Mutable project state, updated on mints and flag toggles.
///
/// Kept small so that the hot-path write of `record_mint` is cheap.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectState {
    /// Admin-controlled; projects start inactive.
    pub active: bool,
    /// Artist-controlled; projects start paused.
    pub paused: bool,
    /// Monotonic count of successful mints.
    pub invocations: u64,
    /// Mutable only downward, never below `invocations`.
    pub max_invocations: u64,
}

/// Full view of a project, reconstructed from the split storage entries.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Project {
    pub id: u32,
    pub artist: Address,
    pub active: bool,
    pub paused: bool,
    pub invocations: u64,
    pub max_invocations: u64,
}

/// Platform-wide payment routing, admin-set.
///
/// `render_bps + platform_bps` must not exceed 10_000.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PaymentConfig {
    pub render_provider: Address,
    pub render_bps: u32,
    pub platform_provider: Address,
    pub platform_bps: u32,
}

/// Optional per-project payee receiving a fraction of the artist remainder.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdditionalPayee {
    pub payee: Address,
    /// Basis points of the *artist remainder*, not of the whole sale.
    pub bps: u32,
}

/// Linear decay auction parameters.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LinearAuction {
    pub start_time: u64,
    pub end_time: u64,
    pub start_price: i128,
    pub base_price: i128,
}

/// Exponential decay auction parameters.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExpAuction {
    pub start_time: u64,
    /// Seconds for the price to halve.
    pub half_life: u64,
    pub start_price: i128,
    pub base_price: i128,
}

/// Per-(minter, project) price configuration.
///
/// The variant must match the minter's [`MinterKind`]; configuration entry
/// points enforce this.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PriceConfig {
    Fixed(i128),
    Linear(LinearAuction),
    Exp(ExpAuction),
}

/// Mutable settlement bookkeeping for an exponential settlement auction.
///
/// Separate from [`PriceConfig`] so price-decay logic stays independent from
/// refund accounting.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SettlementState {
    /// Price in effect at the most recent purchase.
    pub latest_purchase_price: i128,
    /// Total successful purchases through this auction.
    pub num_purchases: u64,
    /// True once the clearing price is fixed forever.
    pub finalized: bool,
    /// Meaningful only when `finalized`.
    pub clearing_price: i128,
    /// True once artist/provider revenues have been distributed.
    pub revenues_withdrawn: bool,
}

/// Record of one purchaser's position in a settlement auction.
///
/// `net_posted` accumulates amounts paid and is reduced exactly once by a
/// settlement claim; `num_purchased` never decreases.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Receipt {
    pub net_posted: i128,
    pub num_purchased: u64,
    /// Set by the one settlement claim this receipt admits.
    pub claimed: bool,
}

/// Merkle allowlist gate parameters.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MerkleGate {
    /// Commitment to the eligible address set. Updating it invalidates all
    /// outstanding proofs atomically.
    pub root: BytesN<32>,
    /// When false, each address may mint at most once through this gate.
    pub limiter_disabled: bool,
}

/// Token-holder gate parameters.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HolderGate {
    /// Qualifying collection; must expose `owner_of(token_id) -> Address`.
    pub collection: Address,
    /// Optional delegation registry consulted for indirect ownership.
    pub delegation_registry: Option<Address>,
}

/// Optional gating predicate attached to a (minter, project) pair.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GateConfig {
    Merkle(MerkleGate),
    Holder(HolderGate),
}

/// Holder-gate eligibility evidence supplied by the purchaser.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HolderProof {
    /// Token in the qualifying collection being presented.
    pub token_id: u64,
    /// The vault address when minting via delegation; equal to the payer for
    /// direct ownership.
    pub owner: Address,
}

/// Eligibility evidence accompanying a purchase, matching the configured gate.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GateProof {
    Merkle(Vec<BytesN<32>>),
    Holder(HolderProof),
}

/// Result of a price query: whether a price has been configured, and the
/// price a purchase would pay right now.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PriceInfo {
    pub configured: bool,
    pub price: i128,
}
