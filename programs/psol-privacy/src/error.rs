//! Unified error types for the privacy pool.
//!
//! Error codes are stable across versions for client compatibility.

use anchor_lang::prelude::*;

#[error_code]
pub enum PrivacyError {
    // ========== Field / Encoding Errors (6000-6009) ==========
    /// A field element is not canonically encoded (>= the scalar modulus).
    #[msg("Value is out of range for the BN254 scalar field")]
    OutOfRange, // 6000

    // ========== Proof Errors (6010-6019) ==========
    /// ZK proof verification failed.
    #[msg("Invalid proof: verification failed")]
    InvalidProof, // 6010

    /// Proof data has incorrect format or length.
    #[msg("Invalid proof format: expected 256 bytes (A: 64, B: 128, C: 64)")]
    InvalidProofFormat, // 6011

    /// Public inputs do not match expected format.
    #[msg("Invalid public inputs for proof verification")]
    InvalidPublicInputs, // 6012

    /// Verification key not set for this pool.
    #[msg("Verification key not configured for this pool")]
    VerificationKeyNotConfigured, // 6013

    /// Verification key has been permanently locked.
    #[msg("Verification key is locked and can no longer be changed")]
    VerificationKeyLocked, // 6014

    // ========== Merkle Tree Errors (6020-6029) ==========
    /// Merkle root not found in recent history.
    #[msg("Merkle root not in recent history")]
    UnknownRoot, // 6020

    /// Merkle tree has reached maximum capacity.
    #[msg("Merkle tree is full")]
    MerkleTreeFull, // 6021

    // ========== Nullifier Errors (6030-6039) ==========
    /// The two input nullifiers of a transact call are identical.
    #[msg("Input nullifiers must be distinct")]
    DuplicateNullifier, // 6030

    /// Nullifier has already been spent (double-spend attempt).
    #[msg("Nullifier already spent")]
    AlreadySpent, // 6031

    // ========== External Data / Amount Errors (6040-6049) ==========
    /// `ext_data_hash` does not match the recomputed hash of the
    /// recipient/relayer/fee fields actually supplied.
    #[msg("External data hash does not match supplied recipient/relayer/fee data")]
    BadExtData, // 6040

    /// Caller-supplied fee is below `min_fee` by more than the tolerance margin.
    #[msg("Supplied fee is insufficient")]
    InsufficientFee, // 6041

    /// A deposit's `ext_amount` exceeds the pool's configured maximum.
    #[msg("Deposit amount exceeds the pool's configured maximum")]
    DepositTooLarge, // 6042

    /// Vault has insufficient balance to pay out a withdrawal.
    #[msg("Insufficient vault balance")]
    InsufficientBalance, // 6043

    /// A fee rate or margin supplied to `initialize_pool` exceeds 10000 bps.
    #[msg("Fee rate or margin exceeds 10000 basis points")]
    InvalidFeeRate, // 6044

    // ========== Authorization Errors (6050-6059) ==========
    /// Operation not authorized for caller.
    #[msg("Unauthorized: caller is not pool authority")]
    Unauthorized, // 6050

    /// Pool is paused.
    #[msg("Pool is paused")]
    PoolPaused, // 6051

    // ========== Overflow Errors (6060-6069) ==========
    /// Arithmetic overflow occurred.
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow, // 6060
}
