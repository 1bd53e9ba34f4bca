//! Emergency stop — disables deposits and withdrawals. Authority-only.

use anchor_lang::prelude::*;

use crate::error::PrivacyError;
use crate::events::PoolPaused;
use crate::state::PoolConfig;

#[derive(Accounts)]
pub struct PausePool<'info> {
    #[account(
        mut,
        seeds = [b"pool"],
        bump = pool_config.bump,
        has_one = authority @ PrivacyError::Unauthorized,
    )]
    pub pool_config: Account<'info, PoolConfig>,

    pub authority: Signer<'info>,
}

pub fn handler(ctx: Context<PausePool>) -> Result<()> {
    let pool_config = &mut ctx.accounts.pool_config;

    pool_config.set_paused(true);

    emit!(PoolPaused {
        pool: pool_config.key(),
        authority: ctx.accounts.authority.key(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Pool paused by authority");

    Ok(())
}
