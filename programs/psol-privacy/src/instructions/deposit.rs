//! Legacy `deposit` entry point (SPEC_FULL.md's Open Question 3, see
//! `DESIGN.md`). A thin wrapper around [`crate::instructions::transact`]
//! with `ext_amount` forced positive — kept for clients still calling
//! the pre-`transact` two-instruction (deposit/withdraw) surface.
//! Same accounts, same proof shape, same two-nullifier/two-commitment
//! transition underneath.

use anchor_lang::prelude::*;

use crate::error::PrivacyError;
use crate::instructions::transact::{self, Transact};

pub type Deposit<'info> = Transact<'info>;

#[allow(clippy::too_many_arguments)]
pub fn handler(
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
    require!(amount > 0, PrivacyError::InvalidPublicInputs);
    let ext_amount = i64::try_from(amount).map_err(|_| error!(PrivacyError::DepositTooLarge))?;

    transact::handler(
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
