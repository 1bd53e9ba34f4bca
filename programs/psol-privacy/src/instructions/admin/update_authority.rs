//! Transfer pool admin rights to a new address. Authority-only.

use anchor_lang::prelude::*;

use crate::error::PrivacyError;
use crate::events::AuthorityTransferred;
use crate::state::PoolConfig;

#[derive(Accounts)]
pub struct UpdateAuthority<'info> {
    #[account(
        mut,
        seeds = [b"pool"],
        bump = pool_config.bump,
        has_one = authority @ PrivacyError::Unauthorized,
    )]
    pub pool_config: Account<'info, PoolConfig>,

    pub authority: Signer<'info>,
}

pub fn handler(ctx: Context<UpdateAuthority>, new_authority: Pubkey) -> Result<()> {
    let pool_config = &mut ctx.accounts.pool_config;
    let old_authority = pool_config.authority;

    require!(new_authority != old_authority, PrivacyError::Unauthorized);
    require!(new_authority != Pubkey::default(), PrivacyError::Unauthorized);

    pool_config.transfer_authority(new_authority);

    emit!(AuthorityTransferred {
        pool: pool_config.key(),
        old_authority,
        new_authority,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Authority transferred");

    Ok(())
}
