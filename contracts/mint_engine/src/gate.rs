//! # Gating
//!
//! Optional eligibility predicates consulted before a purchase is admitted:
//! a Merkle-proof allowlist and a token-holder gate with optional delegated
//! wallets.
//!
//! The holder gate never trusts ownership or delegation claims from the
//! caller. Ownership is read from the qualifying collection and delegation
//! from a decoupled registry, both through read-only cross-contract queries;
//! nothing from either is cached here.

use soroban_sdk::{contractclient, panic_with_error, xdr::ToXdr, Address, Bytes, BytesN, Env, Vec};

use crate::types::{GateConfig, GateProof, HolderGate, HolderProof, MerkleGate};
use crate::{storage, Error};

/// Query surface of a qualifying collection.
#[contractclient(name = "CollectionClient")]
pub trait Collection {
    /// Returns the owner of `token_id`; panics if the token does not exist.
    fn owner_of(env: Env, token_id: u64) -> Address;
}

/// Query surface of the delegation registry. The gate accepts delegations
/// scoped to everything, to the qualifying collection, or to the exact token.
#[contractclient(name = "DelegationRegistryClient")]
pub trait DelegationRegistry {
    fn check_delegate_for_all(env: Env, delegate: Address, vault: Address) -> bool;
    fn check_delegate_for_contract(
        env: Env,
        delegate: Address,
        vault: Address,
        collection: Address,
    ) -> bool;
    fn check_delegate_for_token(
        env: Env,
        delegate: Address,
        vault: Address,
        collection: Address,
        token_id: u64,
    ) -> bool;
}

// ── Merkle allowlist ─────────────────────────────────────────────────

/// Leaf hash: `sha256(xdr(address))`.
pub fn hash_address(env: &Env, address: &Address) -> BytesN<32> {
    let bytes = address.clone().to_xdr(env);
    env.crypto().sha256(&bytes).to_bytes()
}

/// Interior node hash over the sorted pair, so proofs need no left/right
/// flags.
pub fn hash_pair(env: &Env, a: &BytesN<32>, b: &BytesN<32>) -> BytesN<32> {
    let mut joined = Bytes::new(env);
    if a.to_array() <= b.to_array() {
        joined.append(&Bytes::from_slice(env, &a.to_array()));
        joined.append(&Bytes::from_slice(env, &b.to_array()));
    } else {
        joined.append(&Bytes::from_slice(env, &b.to_array()));
        joined.append(&Bytes::from_slice(env, &a.to_array()));
    }
    env.crypto().sha256(&joined).to_bytes()
}

/// Recompute the Merkle path from `address` up and compare against `root`.
pub fn verify_proof(
    env: &Env,
    root: &BytesN<32>,
    address: &Address,
    proof: &Vec<BytesN<32>>,
) -> bool {
    let mut node = hash_address(env, address);
    for sibling in proof.iter() {
        node = hash_pair(env, &node, &sibling);
    }
    node == *root
}

fn check_merkle(
    env: &Env,
    minter_id: u32,
    project_id: u32,
    gate: &MerkleGate,
    payer: &Address,
    proof: &Vec<BytesN<32>>,
) {
    if !verify_proof(env, &gate.root, payer, proof) {
        panic_with_error!(env, Error::InvalidProof);
    }
    if !gate.limiter_disabled {
        let minted = storage::mint_count(env, minter_id, project_id, payer);
        if minted >= 1 {
            panic_with_error!(env, Error::NotEligible);
        }
        storage::set_mint_count(env, minter_id, project_id, payer, minted + 1);
    }
}

// ── Token-holder gate ────────────────────────────────────────────────

fn check_holder(
    env: &Env,
    minter_id: u32,
    project_id: u32,
    gate: &HolderGate,
    payer: &Address,
    proof: &HolderProof,
) {
    if storage::token_used(env, minter_id, project_id, proof.token_id) {
        panic_with_error!(env, Error::NotEligible);
    }

    let owner = CollectionClient::new(env, &gate.collection).owner_of(&proof.token_id);
    let eligible = if owner == *payer {
        true
    } else if owner == proof.owner {
        match &gate.delegation_registry {
            Some(registry) => {
                let client = DelegationRegistryClient::new(env, registry);
                client.check_delegate_for_all(payer, &owner)
                    || client.check_delegate_for_contract(payer, &owner, &gate.collection)
                    || client.check_delegate_for_token(payer, &owner, &gate.collection, &proof.token_id)
            }
            None => false,
        }
    } else {
        false
    };

    if !eligible {
        panic_with_error!(env, Error::NotEligible);
    }
    storage::mark_token_used(env, minter_id, project_id, proof.token_id);
}

// ── Entry ────────────────────────────────────────────────────────────

/// Consult the configured gate, if any, and consume one eligibility unit.
///
/// Called inside the purchase transaction: a later failure rolls the
/// consumption back, so no unit is ever spent on a failed purchase.
pub fn check_and_consume(
    env: &Env,
    minter_id: u32,
    project_id: u32,
    payer: &Address,
    proof: &Option<GateProof>,
) {
    let gate = match storage::load_gate(env, minter_id, project_id) {
        Some(g) => g,
        None => return,
    };
    match (gate, proof) {
        (GateConfig::Merkle(merkle), Some(GateProof::Merkle(path))) => {
            check_merkle(env, minter_id, project_id, &merkle, payer, path)
        }
        (GateConfig::Holder(holder), Some(GateProof::Holder(holder_proof))) => {
            check_holder(env, minter_id, project_id, &holder, payer, holder_proof)
        }
        // Wrong or missing proof shape for the configured gate.
        (GateConfig::Merkle(_), _) => panic_with_error!(env, Error::InvalidProof),
        (GateConfig::Holder(_), _) => panic_with_error!(env, Error::NotEligible),
    }
}
