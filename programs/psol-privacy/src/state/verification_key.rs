//! Verification key storage for Groth16 proofs (SPEC_FULL.md §4.D).
//!
//! Stores the VK produced by the circuit's trusted setup. A freshly
//! initialized pool has no VK configured; `set_verification_key` writes
//! it, and `lock_verification_key` (SPEC_FULL.md's Open Question 2,
//! see `DESIGN.md`) permanently forbids any further write, since a VK
//! swap after a pool has live deposits would let a new prover forge
//! proofs against commitments it never actually authorized.
//!
//! # Point encodings
//! - G1 points: 64 bytes uncompressed (32-byte x, 32-byte y)
//! - G2 points: 128 bytes uncompressed, (c1, c0) host-precompile order

use anchor_lang::prelude::*;

use crate::crypto::groth16::{VerifyingKey, NUM_PUBLIC_INPUTS};
use crate::error::PrivacyError;

/// Number of IC points the fixed 7-public-input circuit requires.
pub const VK_IC_LEN: usize = NUM_PUBLIC_INPUTS + 1;

/// Groth16 verification key account.
///
/// PDA seeds: `[b"verification_key", pool_config.key().as_ref()]`
#[account]
pub struct VerificationKeyAccount {
    pub pool: Pubkey,
    pub vk_alpha_g1: [u8; 64],
    pub vk_beta_g2: [u8; 128],
    pub vk_gamma_g2: [u8; 128],
    pub vk_delta_g2: [u8; 128],
    pub vk_ic: [[u8; 64]; VK_IC_LEN],
    pub is_initialized: bool,
    /// Once true, `set_verification_key` always fails.
    pub is_locked: bool,
    pub bump: u8,
}

impl VerificationKeyAccount {
    pub const LEN: usize = 8 // discriminator
        + 32  // pool
        + 64  // vk_alpha_g1
        + 128 // vk_beta_g2
        + 128 // vk_gamma_g2
        + 128 // vk_delta_g2
        + (64 * VK_IC_LEN) // vk_ic
        + 1   // is_initialized
        + 1   // is_locked
        + 1; // bump

    pub fn initialize(&mut self, pool: Pubkey, bump: u8) {
        self.pool = pool;
        self.vk_alpha_g1 = [0u8; 64];
        self.vk_beta_g2 = [0u8; 128];
        self.vk_gamma_g2 = [0u8; 128];
        self.vk_delta_g2 = [0u8; 128];
        self.vk_ic = [[0u8; 64]; VK_IC_LEN];
        self.is_initialized = false;
        self.is_locked = false;
        self.bump = bump;
    }

    /// Write the VK. Rejected once [`Self::is_locked`] — callers must
    /// check that themselves via [`Self::require_unlocked`] before
    /// mutating, since this method has no way to bail out of an
    /// in-progress account borrow.
    pub fn set_vk(
        &mut self,
        alpha_g1: [u8; 64],
        beta_g2: [u8; 128],
        gamma_g2: [u8; 128],
        delta_g2: [u8; 128],
        ic: [[u8; 64]; VK_IC_LEN],
    ) {
        self.vk_alpha_g1 = alpha_g1;
        self.vk_beta_g2 = beta_g2;
        self.vk_gamma_g2 = gamma_g2;
        self.vk_delta_g2 = delta_g2;
        self.vk_ic = ic;
        self.is_initialized = true;
    }

    pub fn require_unlocked(&self) -> Result<()> {
        require!(!self.is_locked, PrivacyError::VerificationKeyLocked);
        Ok(())
    }

    pub fn lock(&mut self) {
        self.is_locked = true;
    }

    pub fn is_valid(&self) -> bool {
        self.is_initialized
    }

    /// Always `NUM_PUBLIC_INPUTS` — the circuit binding is fixed, not
    /// derived from whatever IC length happens to have been uploaded.
    pub fn expected_public_inputs(&self) -> usize {
        NUM_PUBLIC_INPUTS
    }

    /// Build the fixed-shape [`VerifyingKey`] the verifier consumes.
    pub fn to_verifying_key(&self) -> VerifyingKey {
        VerifyingKey {
            alpha_g1: self.vk_alpha_g1,
            beta_g2: self.vk_beta_g2,
            gamma_g2: self.vk_gamma_g2,
            delta_g2: self.vk_delta_g2,
            ic: self.vk_ic,
        }
    }
}
