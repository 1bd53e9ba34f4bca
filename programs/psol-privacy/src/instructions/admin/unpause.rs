//! Resume pool operations after an emergency pause. Authority-only.

use anchor_lang::prelude::*;

use crate::error::PrivacyError;
use crate::events::PoolUnpaused;
use crate::state::PoolConfig;

#[derive(Accounts)]
pub struct UnpausePool<'info> {
    #[account(
        mut,
        seeds = [b"pool"],
        bump = pool_config.bump,
        has_one = authority @ PrivacyError::Unauthorized,
    )]
    pub pool_config: Account<'info, PoolConfig>,

    pub authority: Signer<'info>,
}

pub fn handler(ctx: Context<UnpausePool>) -> Result<()> {
    let pool_config = &mut ctx.accounts.pool_config;

    pool_config.set_paused(false);

    emit!(PoolUnpaused {
        pool: pool_config.key(),
        authority: ctx.accounts.authority.key(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Pool unpaused by authority");

    Ok(())
}
