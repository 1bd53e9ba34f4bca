//! Configure the Groth16 verification key. Authority-only, rejected
//! once the VK has been locked (see `lock_verification_key`).

use anchor_lang::prelude::*;

use crate::crypto::curve_utils::is_g1_identity;
use crate::error::PrivacyError;
use crate::events::VerificationKeySet;
use crate::state::verification_key::VK_IC_LEN;
use crate::state::{PoolConfig, VerificationKeyAccount};

#[derive(Accounts)]
pub struct SetVerificationKey<'info> {
    #[account(
        mut,
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
    )]
    pub verification_key: Account<'info, VerificationKeyAccount>,

    pub authority: Signer<'info>,
}

pub fn handler(
    ctx: Context<SetVerificationKey>,
    vk_alpha_g1: [u8; 64],
    vk_beta_g2: [u8; 128],
    vk_gamma_g2: [u8; 128],
    vk_delta_g2: [u8; 128],
    vk_ic: Vec<[u8; 64]>,
) -> Result<()> {
    let pool_config = &mut ctx.accounts.pool_config;
    let verification_key = &mut ctx.accounts.verification_key;

    verification_key.require_unlocked()?;

    require!(
        vk_ic.len() == VK_IC_LEN,
        PrivacyError::InvalidPublicInputs
    );
    require!(!is_g1_identity(&vk_alpha_g1), PrivacyError::InvalidProof);
    require!(!is_g1_identity(&vk_ic[0]), PrivacyError::InvalidProof);

    let mut ic = [[0u8; 64]; VK_IC_LEN];
    ic.copy_from_slice(&vk_ic);

    verification_key.set_vk(vk_alpha_g1, vk_beta_g2, vk_gamma_g2, vk_delta_g2, ic);
    pool_config.set_vk_configured(true);

    emit!(VerificationKeySet {
        pool: pool_config.key(),
        authority: ctx.accounts.authority.key(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Verification key set");

    Ok(())
}
