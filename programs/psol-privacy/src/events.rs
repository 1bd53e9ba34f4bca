//! Event definitions for the privacy pool.
//!
//! Events are emitted for off-chain indexing and client synchronization.
//! Clients MUST index `TransactEvent` to reconstruct their view of the
//! tree and to locate their own leaves for future proof generation.

use anchor_lang::prelude::*;

/// Emitted when a new privacy pool is initialized.
#[event]
pub struct PoolInitialized {
    pub pool: Pubkey,
    pub authority: Pubkey,
    pub vault: Pubkey,
    pub merkle_tree: Pubkey,
    pub verification_key: Pubkey,
    pub max_deposit_amount: u64,
    pub timestamp: i64,
}

/// Emitted when a verification key is set or updated.
#[event]
pub struct VerificationKeySet {
    pub pool: Pubkey,
    pub authority: Pubkey,
    pub timestamp: i64,
}

/// Emitted when a verification key is permanently locked.
#[event]
pub struct VerificationKeyLocked {
    pub pool: Pubkey,
    pub authority: Pubkey,
    pub timestamp: i64,
}

/// Emitted on every successful `transact` call (SPEC_FULL.md §6).
///
/// CRITICAL: clients must index this event to reconstruct the Merkle
/// tree and to locate the leaves and nullifiers that concern them —
/// the on-chain state only stores roots and spent-nullifier markers,
/// not the leaves themselves.
#[event]
pub struct TransactEvent {
    pub pool: Pubkey,
    pub new_root: [u8; 32],
    pub leaf_index_1: u64,
    pub leaf_index_2: u64,
    pub nullifier_1: [u8; 32],
    pub nullifier_2: [u8; 32],
    pub output_commitment_1: [u8; 32],
    pub output_commitment_2: [u8; 32],
    pub ext_amount: i64,
    pub fee: u64,
    pub timestamp: i64,
}

#[event]
pub struct PoolPaused {
    pub pool: Pubkey,
    pub authority: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct PoolUnpaused {
    pub pool: Pubkey,
    pub authority: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct AuthorityTransferred {
    pub pool: Pubkey,
    pub old_authority: Pubkey,
    pub new_authority: Pubkey,
    pub timestamp: i64,
}
