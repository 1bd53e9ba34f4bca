//! Pool configuration state account.
//!
//! Stores authority, fee policy, and the cached addresses of the other
//! pool singletons. SPEC_FULL.md §4.E's fee policy (`min_fee`/
//! `validate_fee`) is computed in [`crate::fee`] against the rate fields
//! stored here.

use anchor_lang::prelude::*;

use crate::error::PrivacyError;

/// Main pool configuration account.
///
/// PDA seeds: `[b"pool"]`. The pool moves native SOL (SPEC_FULL.md §4.E
/// Open Question 4) rather than an SPL token, so there is no mint to key
/// the seeds on — one program deployment serves exactly one pool.
#[account]
pub struct PoolConfig {
    /// Pool authority (admin) — can pause, set/lock the VK, transfer authority.
    pub authority: Pubkey,

    /// Native SOL vault PDA address (cached for convenience).
    pub vault: Pubkey,

    /// Merkle tree account address (cached for convenience).
    pub merkle_tree: Pubkey,

    /// Verification key account address (cached for convenience).
    pub verification_key: Pubkey,

    /// Deposit fee rate, in basis points.
    pub deposit_fee_rate_bps: u16,

    /// Withdrawal fee rate, in basis points.
    pub withdrawal_fee_rate_bps: u16,

    /// Allowed slack between `min_fee` and the caller-supplied fee, in
    /// basis points (SPEC_FULL.md §4.E).
    pub fee_error_margin_bps: u16,

    /// Upper bound on the magnitude of a single deposit's `ext_amount`.
    pub max_deposit_amount: u64,

    /// Total number of successful `transact` calls with `ext_amount > 0`.
    pub total_deposits: u64,

    /// Total number of successful `transact` calls with `ext_amount < 0`.
    pub total_withdrawals: u64,

    /// Blocks deposits and withdrawals when true.
    pub is_paused: bool,

    /// Whether the verification key has been set at least once.
    pub vk_configured: bool,

    /// PDA bump seed.
    pub bump: u8,

    /// Reserved space for future upgrades.
    pub _reserved: [u8; 64],
}

impl PoolConfig {
    pub const LEN: usize = 8 // discriminator
        + 32 // authority
        + 32 // vault
        + 32 // merkle_tree
        + 32 // verification_key
        + 2  // deposit_fee_rate_bps
        + 2  // withdrawal_fee_rate_bps
        + 2  // fee_error_margin_bps
        + 8  // max_deposit_amount
        + 8  // total_deposits
        + 8  // total_withdrawals
        + 1  // is_paused
        + 1  // vk_configured
        + 1  // bump
        + 64; // reserved

    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        &mut self,
        authority: Pubkey,
        vault: Pubkey,
        merkle_tree: Pubkey,
        verification_key: Pubkey,
        deposit_fee_rate_bps: u16,
        withdrawal_fee_rate_bps: u16,
        fee_error_margin_bps: u16,
        max_deposit_amount: u64,
        bump: u8,
    ) {
        self.authority = authority;
        self.vault = vault;
        self.merkle_tree = merkle_tree;
        self.verification_key = verification_key;
        self.deposit_fee_rate_bps = deposit_fee_rate_bps;
        self.withdrawal_fee_rate_bps = withdrawal_fee_rate_bps;
        self.fee_error_margin_bps = fee_error_margin_bps;
        self.max_deposit_amount = max_deposit_amount;
        self.total_deposits = 0;
        self.total_withdrawals = 0;
        self.is_paused = false;
        self.vk_configured = false;
        self.bump = bump;
        self._reserved = [0u8; 64];
    }

    pub fn require_not_paused(&self) -> Result<()> {
        require!(!self.is_paused, PrivacyError::PoolPaused);
        Ok(())
    }

    pub fn require_vk_configured(&self) -> Result<()> {
        require!(self.vk_configured, PrivacyError::VerificationKeyNotConfigured);
        Ok(())
    }

    pub fn increment_deposits(&mut self) -> Result<()> {
        self.total_deposits = self
            .total_deposits
            .checked_add(1)
            .ok_or(error!(PrivacyError::ArithmeticOverflow))?;
        Ok(())
    }

    pub fn increment_withdrawals(&mut self) -> Result<()> {
        self.total_withdrawals = self
            .total_withdrawals
            .checked_add(1)
            .ok_or(error!(PrivacyError::ArithmeticOverflow))?;
        Ok(())
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.is_paused = paused;
    }

    pub fn set_vk_configured(&mut self, configured: bool) {
        self.vk_configured = configured;
    }

    pub fn transfer_authority(&mut self, new_authority: Pubkey) {
        self.authority = new_authority;
    }
}
