//! Canonical event types emitted by the mint engine contract.
//!
//! These mirror the Soroban contract events defined in
//! `contracts/mint_engine/src/events.rs`.

use serde::{Deserialize, Serialize};

/// All recognised event kinds from the mint engine contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A new project was registered (`created` topic).
    ProjectCreated,
    /// The admin flipped a project's active flag (`active` topic).
    ProjectActive,
    /// The artist flipped a project's paused flag (`paused` topic).
    ProjectPaused,
    /// A project's max invocations was lowered (`max_inv` topic).
    MaxInvocationsUpdated,
    /// A project's artist was reassigned (`artist` topic).
    ArtistUpdated,
    /// A project's additional payee was configured (`payee_set` topic).
    PayeeUpdated,
    /// The platform admin changed (`admin_set` topic).
    AdminUpdated,
    /// The provider bps shares changed (`shares` topic).
    ProviderSharesUpdated,
    /// The provider payout addresses changed (`providers` topic).
    ProviderAddressesUpdated,
    /// A pricing strategy was registered (`mintr_add` topic).
    MinterAdded,
    /// A strategy joined the approved set (`approved` topic).
    MinterApproved,
    /// A strategy left the approved set (`revoked` topic).
    MinterRevoked,
    /// A strategy was assigned to a project (`mintr_set` topic).
    MinterAssigned,
    /// A project's strategy assignment was cleared (`mintr_rm` topic).
    MinterRemoved,
    /// A fixed price was configured (`price_set` topic).
    PriceConfigured,
    /// Auction details were configured (`auction` topic).
    AuctionSet,
    /// A price configuration was cleared (`auc_reset` topic).
    AuctionReset,
    /// A Merkle allowlist root was set or rotated (`root_set` topic).
    RootSet,
    /// A gate was configured, toggled, or cleared (`gate_set` topic).
    GateSet,
    /// A token was minted through a purchase (`minted` topic).
    TokenMinted,
    /// Sale proceeds were split among stakeholders (`split` topic).
    FundsSplit,
    /// A settlement receipt changed (`receipt` topic).
    ReceiptUpdated,
    /// A settlement auction's clearing price was fixed (`settled` topic).
    AuctionFinalized,
    /// A settlement refund was paid out (`claimed` topic).
    RefundClaimed,
    /// Settlement revenues were routed to stakeholders (`revenues` topic).
    RevenuesWithdrawn,
    /// An event from this contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol string produced by Soroban into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "created" => Self::ProjectCreated,
            "active" => Self::ProjectActive,
            "paused" => Self::ProjectPaused,
            "max_inv" => Self::MaxInvocationsUpdated,
            "artist" => Self::ArtistUpdated,
            "payee_set" => Self::PayeeUpdated,
            "admin_set" => Self::AdminUpdated,
            "shares" => Self::ProviderSharesUpdated,
            "providers" => Self::ProviderAddressesUpdated,
            "mintr_add" => Self::MinterAdded,
            "approved" => Self::MinterApproved,
            "revoked" => Self::MinterRevoked,
            "mintr_set" => Self::MinterAssigned,
            "mintr_rm" => Self::MinterRemoved,
            "price_set" => Self::PriceConfigured,
            "auction" => Self::AuctionSet,
            "auc_reset" => Self::AuctionReset,
            "root_set" => Self::RootSet,
            "gate_set" => Self::GateSet,
            "minted" => Self::TokenMinted,
            "split" => Self::FundsSplit,
            "receipt" => Self::ReceiptUpdated,
            "settled" => Self::AuctionFinalized,
            "claimed" => Self::RefundClaimed,
            "revenues" => Self::RevenuesWithdrawn,
            _ => Self::Unknown,
        }
    }

    /// Whether the second topic carries a minter id rather than a project id.
    pub fn minter_scoped(&self) -> bool {
        matches!(
            self,
            Self::MinterAdded | Self::MinterApproved | Self::MinterRevoked
        )
    }

    /// Return a short identifier string suitable for storage in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProjectCreated => "project_created",
            Self::ProjectActive => "project_active",
            Self::ProjectPaused => "project_paused",
            Self::MaxInvocationsUpdated => "max_invocations_updated",
            Self::ArtistUpdated => "artist_updated",
            Self::PayeeUpdated => "payee_updated",
            Self::AdminUpdated => "admin_updated",
            Self::ProviderSharesUpdated => "provider_shares_updated",
            Self::ProviderAddressesUpdated => "provider_addresses_updated",
            Self::MinterAdded => "minter_added",
            Self::MinterApproved => "minter_approved",
            Self::MinterRevoked => "minter_revoked",
            Self::MinterAssigned => "minter_assigned",
            Self::MinterRemoved => "minter_removed",
            Self::PriceConfigured => "price_configured",
            Self::AuctionSet => "auction_set",
            Self::AuctionReset => "auction_reset",
            Self::RootSet => "root_set",
            Self::GateSet => "gate_set",
            Self::TokenMinted => "token_minted",
            Self::FundsSplit => "funds_split",
            Self::ReceiptUpdated => "receipt_updated",
            Self::AuctionFinalized => "auction_finalized",
            Self::RefundClaimed => "refund_claimed",
            Self::RevenuesWithdrawn => "revenues_withdrawn",
            Self::Unknown => "unknown",
        }
    }
}

/// A fully decoded mint engine event, ready to be stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MintEvent {
    pub event_type: String,
    pub project_id: Option<String>,
    pub minter_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub token_id: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// A raw event record as stored in / read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_type: String,
    pub project_id: Option<String>,
    pub minter_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub token_id: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}
