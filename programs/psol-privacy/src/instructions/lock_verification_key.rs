//! Permanently lock the verification key (SPEC_FULL.md's Open Question
//! 2, see `DESIGN.md`). After this call, `set_verification_key` always
//! fails — irreversible by design, since a VK swap after a pool has
//! live deposits would let a new prover forge proofs against
//! commitments it never actually authorized.

use anchor_lang::prelude::*;

use crate::error::PrivacyError;
use crate::events::VerificationKeyLocked;
use crate::state::{PoolConfig, VerificationKeyAccount};

#[derive(Accounts)]
pub struct LockVerificationKey<'info> {
    #[account(
        seeds = [b"pool"],
        bump = pool_config.bump,
        has_one = authority @ PrivacyError::Unauthorized,
    )]
    pub pool_config: Account<'info, PoolConfig>,

    #[account(
        mut,
        seeds = [b"verification_key", pool_config.key().as_ref()],
        bump = verification_key.bump,
        constraint = verification_key.pool == pool_config.key() @ PrivacyError::Unauthorized,
        constraint = verification_key.is_valid() @ PrivacyError::VerificationKeyNotConfigured,
    )]
    pub verification_key: Account<'info, VerificationKeyAccount>,

    pub authority: Signer<'info>,
}

pub fn handler(ctx: Context<LockVerificationKey>) -> Result<()> {
    ctx.accounts.verification_key.lock();

    emit!(VerificationKeyLocked {
        pool: ctx.accounts.pool_config.key(),
        authority: ctx.accounts.authority.key(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Verification key locked");

    Ok(())
}
