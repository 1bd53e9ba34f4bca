//! Privacy pool for shielded native-SOL value transfer.

use anchor_lang::prelude::*;

pub mod constants;
pub mod crypto;
pub mod error;
pub mod events;
pub mod fee;
pub mod instructions;
pub mod state;

#[cfg(test)]
mod tests;

use instructions::*;

declare_id!("Ddokrq1M6hT9Vu63k4JWqVRSecyLeotNf8xKknKfRwvZ");

#[program]
pub mod psol_privacy {
    use super::*;

    pub fn initialize_pool(
        ctx: Context<InitializePool>,
        deposit_fee_rate_bps: u16,
        withdrawal_fee_rate_bps: u16,
        fee_error_margin_bps: u16,
        max_deposit_amount: u64,
    ) -> Result<()> {
        instructions::initialize_pool::handler(
            ctx,
            deposit_fee_rate_bps,
            withdrawal_fee_rate_bps,
            fee_error_margin_bps,
            max_deposit_amount,
        )
    }

    pub fn set_verification_key(
        ctx: Context<SetVerificationKey>,
        vk_alpha_g1: [u8; 64],
        vk_beta_g2: [u8; 128],
        vk_gamma_g2: [u8; 128],
        vk_delta_g2: [u8; 128],
        vk_ic: Vec<[u8; 64]>,
    ) -> Result<()> {
        instructions::set_verification_key::handler(
            ctx,
            vk_alpha_g1,
            vk_beta_g2,
            vk_gamma_g2,
            vk_delta_g2,
            vk_ic,
        )
    }

    pub fn lock_verification_key(ctx: Context<LockVerificationKey>) -> Result<()> {
        instructions::lock_verification_key::handler(ctx)
    }

    /// The canonical transact transition: validates a proof, consumes
    /// two nullifiers, inserts two commitments, and moves native value
    /// per the sign of `ext_amount`.
    #[allow(clippy::too_many_arguments)]
    pub fn transact(
        ctx: Context<Transact>,
        proof_data: Vec<u8>,
        root: [u8; 32],
        ext_data_hash: [u8; 32],
        input_nullifier1: [u8; 32],
        input_nullifier2: [u8; 32],
        output_commitment1: [u8; 32],
        output_commitment2: [u8; 32],
        ext_amount: i64,
        fee: u64,
        memo: [u8; 32],
    ) -> Result<()> {
        instructions::transact::handler(
            ctx,
            proof_data,
            root,
            ext_data_hash,
            input_nullifier1,
            input_nullifier2,
            output_commitment1,
            output_commitment2,
            ext_amount,
            fee,
            memo,
        )
    }

    /// Legacy deposit entry point; delegates to `transact` with a
    /// positive `ext_amount`.
    #[allow(clippy::too_many_arguments)]
    pub fn deposit(
        ctx: Context<Deposit>,
        proof_data: Vec<u8>,
        root: [u8; 32],
        ext_data_hash: [u8; 32],
        input_nullifier1: [u8; 32],
        input_nullifier2: [u8; 32],
        output_commitment1: [u8; 32],
        output_commitment2: [u8; 32],
        amount: u64,
        fee: u64,
        memo: [u8; 32],
    ) -> Result<()> {
        instructions::deposit::handler(
            ctx,
            proof_data,
            root,
            ext_data_hash,
            input_nullifier1,
            input_nullifier2,
            output_commitment1,
            output_commitment2,
            amount,
            fee,
            memo,
        )
    }

    /// Legacy withdraw entry point; delegates to `transact` with a
    /// negative `ext_amount`.
    #[allow(clippy::too_many_arguments)]
    pub fn withdraw(
        ctx: Context<Withdraw>,
        proof_data: Vec<u8>,
        root: [u8; 32],
        ext_data_hash: [u8; 32],
        input_nullifier1: [u8; 32],
        input_nullifier2: [u8; 32],
        output_commitment1: [u8; 32],
        output_commitment2: [u8; 32],
        amount: u64,
        fee: u64,
        memo: [u8; 32],
    ) -> Result<()> {
        instructions::withdraw::handler(
            ctx,
            proof_data,
            root,
            ext_data_hash,
            input_nullifier1,
            input_nullifier2,
            output_commitment1,
            output_commitment2,
            amount,
            fee,
            memo,
        )
    }

    pub fn pause_pool(ctx: Context<PausePool>) -> Result<()> {
        instructions::admin::pause::handler(ctx)
    }

    pub fn unpause_pool(ctx: Context<UnpausePool>) -> Result<()> {
        instructions::admin::unpause::handler(ctx)
    }

    pub fn update_authority(ctx: Context<UpdateAuthority>, new_authority: Pubkey) -> Result<()> {
        instructions::admin::update_authority::handler(ctx, new_authority)
    }
}
