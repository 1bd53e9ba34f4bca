//! Initialize a privacy pool.
//!
//! Tree height and root-history size are fixed by [`crate::constants`]
//! rather than caller-chosen (SPEC_FULL.md's Open Question 1, see
//! `DESIGN.md`) — this instruction only takes the fee policy and the
//! deposit cap.

use anchor_lang::prelude::*;

use crate::constants::BPS_DENOMINATOR;
use crate::error::PrivacyError;
use crate::events::PoolInitialized;
use crate::state::{
    merkle_tree::MerkleTree, pool_config::PoolConfig, verification_key::VerificationKeyAccount,
};

#[derive(Accounts)]
pub struct InitializePool<'info> {
    #[account(
        init,
        payer = authority,
        space = PoolConfig::LEN,
        seeds = [b"pool"],
        bump
    )]
    pub pool_config: Box<Account<'info, PoolConfig>>,

    #[account(
        init,
        payer = authority,
        space = MerkleTree::SPACE,
        seeds = [b"merkle_tree", pool_config.key().as_ref()],
        bump
    )]
    pub merkle_tree: Box<Account<'info, MerkleTree>>,

    #[account(
        init,
        payer = authority,
        space = VerificationKeyAccount::LEN,
        seeds = [b"verification_key", pool_config.key().as_ref()],
        bump
    )]
    pub verification_key: Box<Account<'info, VerificationKeyAccount>>,

    /// Native SOL vault. A `SystemAccount` PDA with no data, funded by
    /// `transact` transfers and drained by withdrawal transfers.
    #[account(
        seeds = [b"vault", pool_config.key().as_ref()],
        bump
    )]
    pub vault: SystemAccount<'info>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<InitializePool>,
    deposit_fee_rate_bps: u16,
    withdrawal_fee_rate_bps: u16,
    fee_error_margin_bps: u16,
    max_deposit_amount: u64,
) -> Result<()> {
    require!(
        deposit_fee_rate_bps as u64 <= BPS_DENOMINATOR
            && withdrawal_fee_rate_bps as u64 <= BPS_DENOMINATOR
            && fee_error_margin_bps as u64 <= BPS_DENOMINATOR,
        PrivacyError::InvalidFeeRate
    );

    let pool_config = &mut ctx.accounts.pool_config;
    let merkle_tree = &mut ctx.accounts.merkle_tree;
    let verification_key = &mut ctx.accounts.verification_key;

    pool_config.initialize(
        ctx.accounts.authority.key(),
        ctx.accounts.vault.key(),
        merkle_tree.key(),
        verification_key.key(),
        deposit_fee_rate_bps,
        withdrawal_fee_rate_bps,
        fee_error_margin_bps,
        max_deposit_amount,
        ctx.bumps.pool_config,
    );

    merkle_tree.initialize(pool_config.key(), ctx.bumps.merkle_tree)?;
    verification_key.initialize(pool_config.key(), ctx.bumps.verification_key);

    emit!(PoolInitialized {
        pool: pool_config.key(),
        authority: ctx.accounts.authority.key(),
        vault: ctx.accounts.vault.key(),
        merkle_tree: merkle_tree.key(),
        verification_key: verification_key.key(),
        max_deposit_amount,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Privacy pool initialized");
    Ok(())
}
