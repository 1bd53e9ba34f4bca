//! State account definitions for the privacy pool.
//!
//! # Account overview
//!
//! ## Pool Configuration (`PoolConfig`)
//! - PDA seeds: `["pool"]` — one program deployment, one native-SOL pool.
//! - Authority, fee policy, pause state, cached sibling addresses.
//!
//! ## Merkle Tree (`MerkleTree`)
//! - PDA seeds: `["merkle_tree", pool_config]`
//! - Fixed-height incremental Merkle tree for commitment storage.
//! - `filled_subtrees` pattern for O(height) insertions, `root_history`
//!   ring buffer for still-valid stale roots.
//!
//! ## Verification Key (`VerificationKeyAccount`)
//! - PDA seeds: `["verification_key", pool_config]`
//! - Stores the Groth16 verification key; `is_locked` makes it
//!   write-once after the operator is done configuring it.
//!
//! ## Spent Nullifier (`SpentNullifier`)
//! - PDA seeds: `["nullifier", pool_config, nullifier_hash]`
//! - Per-nullifier account for O(1) double-spend detection.
//! - Created during `transact`; existence = spent.

pub mod merkle_tree;
pub mod pool_config;
pub mod spent_nullifier;
pub mod verification_key;

pub use merkle_tree::MerkleTree;
pub use pool_config::PoolConfig;
pub use spent_nullifier::SpentNullifier;
pub use verification_key::VerificationKeyAccount;
