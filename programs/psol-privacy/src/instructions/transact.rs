//! The canonical `transact` transition (SPEC_FULL.md §4.F): atomically
//! validates a Groth16 proof, consumes two nullifiers, inserts two
//! commitments, moves native value, and advances the root history.
//!
//! `deposit`/`withdraw` (kept for client compatibility, SPEC_FULL.md's
//! Open Question 3) are thin wrappers around this handler with their
//! second nullifier/commitment slots zeroed, generalizing the shape
//! `withdraw.rs` originally implemented for a single leg:
//! validate → verify → mark → transfer → emit.
//!
//! `ext_amount` is signed: positive moves value from the caller into the
//! vault (a deposit leg), negative moves value from the vault to
//! `recipient` (a withdrawal leg), zero moves no native value at all (a
//! pure shielded transfer between commitments). `fee` is always paid to
//! `relayer` (the external-data tuple's fee recipient, SPEC_FULL.md §6)
//! out of whichever side is already paying — the submitter for a
//! deposit or internal transfer, the vault's outgoing transfer for a
//! withdrawal — so the vault's own balance only ever moves by
//! `ext_amount` (SPEC_FULL.md §8 Property 4).
//!
//! The checks below run in the exact order SPEC_FULL.md §4.F numbers
//! them (root → nullifier freshness → ext-data binding → fee → proof →
//! deposit cap), since a call that violates more than one at once must
//! surface the first violation in that order, not whichever check
//! happens to be cheapest to run.

use std::io::Cursor;

use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Allocate, Assign, Transfer};

use crate::crypto::groth16::{self, Groth16Proof};
use crate::crypto::poseidon::{decode, poseidon_n, u64_to_bytes32_be};
use crate::crypto::public_inputs::TransactPublicInputs;
use crate::crypto::{encode_signed_amount, pubkey_to_scalar};
use crate::error::PrivacyError;
use crate::events::TransactEvent;
use crate::fee::validate_fee;
use crate::state::{MerkleTree, PoolConfig, SpentNullifier, VerificationKeyAccount};

#[derive(Accounts)]
#[instruction(
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
)]
pub struct Transact<'info> {
    #[account(
        mut,
        seeds = [b"pool"],
        bump = pool_config.bump,
    )]
    pub pool_config: Account<'info, PoolConfig>,

    #[account(
        mut,
        seeds = [b"merkle_tree", pool_config.key().as_ref()],
        bump = merkle_tree.bump,
        constraint = merkle_tree.pool == pool_config.key() @ PrivacyError::Unauthorized,
    )]
    pub merkle_tree: Account<'info, MerkleTree>,

    #[account(
        seeds = [b"verification_key", pool_config.key().as_ref()],
        bump = verification_key.bump,
        constraint = verification_key.pool == pool_config.key() @ PrivacyError::Unauthorized,
        constraint = verification_key.is_initialized @ PrivacyError::VerificationKeyNotConfigured,
    )]
    pub verification_key: Account<'info, VerificationKeyAccount>,

    /// Not `init`: Anchor's own `init` constraint runs (and fails with
    /// its own generic account-creation error) before the handler body
    /// ever executes, which would pre-empt the spec-mandated
    /// `AlreadySpent` kind. The handler checks existence itself and
    /// creates the account manually once all earlier checks pass, using
    /// the same pre-funding-tolerant transfer/allocate/assign sequence
    /// Anchor's `init` uses internally (see `create_nullifier_record`) —
    /// not the monolithic `CreateAccount` system instruction, which
    /// rejects any destination that already holds lamports and would
    /// therefore be griefable by anyone front-running this call with a
    /// 1-lamport transfer to the (deterministic, publicly-derivable)
    /// nullifier PDA address.
    /// CHECK: PDA derivation enforced by `seeds`/`bump`; existence and
    /// ownership are checked explicitly in the handler.
    #[account(
        mut,
        seeds = [b"nullifier", pool_config.key().as_ref(), input_nullifier1.as_ref()],
        bump
    )]
    pub spent_nullifier1: UncheckedAccount<'info>,

    /// CHECK: see `spent_nullifier1`.
    #[account(
        mut,
        seeds = [b"nullifier", pool_config.key().as_ref(), input_nullifier2.as_ref()],
        bump
    )]
    pub spent_nullifier2: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [b"vault", pool_config.key().as_ref()],
        bump,
    )]
    pub vault: SystemAccount<'info>,

    /// Payout destination for a withdrawal leg (`ext_amount < 0`). Unused
    /// and unchecked when `ext_amount >= 0`.
    /// CHECK: only ever credited lamports via `system_program::transfer`.
    #[account(mut)]
    pub recipient: UncheckedAccount<'info>,

    /// Fee recipient bound into `ext_data_hash` (the relayer who
    /// submitted this call on the user's behalf, or the user itself for
    /// a self-relayed call). Always credited `fee` lamports.
    /// CHECK: only ever credited lamports via `system_program::transfer`.
    #[account(mut)]
    pub relayer: UncheckedAccount<'info>,

    #[account(mut)]
    pub submitter: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// `Poseidon(recipient, relayer, fee, ext_amount, memo)`, binding the
/// public `ext_data_hash` input to the exact payout this call performs
/// so a prover can't construct a valid proof for one recipient/relayer/
/// fee/memo and have this instruction execute a different payout
/// (SPEC_FULL.md §6).
fn compute_ext_data_hash(
    recipient: &Pubkey,
    relayer: &Pubkey,
    fee: u64,
    ext_amount: i64,
    memo: [u8; 32],
) -> Result<[u8; 32]> {
    poseidon_n(&[
        pubkey_to_scalar(recipient),
        pubkey_to_scalar(relayer),
        u64_to_bytes32_be(fee),
        encode_signed_amount(ext_amount),
        memo,
    ])
}

/// A nullifier PDA only ever holds a [`SpentNullifier`] record once this
/// program has actually assigned itself as its owner and written that
/// record — a raw lamport balance is not sufficient evidence of that,
/// since `input_nullifier1`/`input_nullifier2` are plaintext instruction
/// arguments (SPEC_FULL.md §4.F, §6) and the PDA address they derive is
/// therefore publicly computable before this instruction lands. Anyone
/// who observes a pending `transact` transaction can pre-fund that PDA
/// with a trivial System-program transfer; checking `lamports() > 0`
/// would let that front-run permanently masquerade as `AlreadySpent` for
/// a nullifier nobody ever spent. Ownership, not balance, is the actual
/// spent-or-not bit.
fn is_nullifier_spent(nullifier_account: &AccountInfo) -> bool {
    nullifier_account.owner == &crate::ID && nullifier_account.data_len() > 0
}

#[allow(clippy::too_many_arguments)]
pub fn handler(
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
    let pool_config = &mut ctx.accounts.pool_config;
    let merkle_tree = &mut ctx.accounts.merkle_tree;
    let verification_key = &ctx.accounts.verification_key;

    pool_config.require_not_paused()?;
    pool_config.require_vk_configured()?;

    // Step 1 (SPEC_FULL.md §4.F): root validity. `decode` rejects a
    // non-canonical root (e.g. the field modulus itself) with
    // `OutOfRange` before the tree lookup is ever paid for
    // (SPEC_FULL.md §8 scenario 5).
    decode(root)?;
    require!(merkle_tree.is_known_root(&root), PrivacyError::UnknownRoot);

    // Step 2: nullifier freshness.
    decode(input_nullifier1)?;
    decode(input_nullifier2)?;
    require!(
        input_nullifier1 != input_nullifier2,
        PrivacyError::DuplicateNullifier
    );
    require!(
        !is_nullifier_spent(&ctx.accounts.spent_nullifier1),
        PrivacyError::AlreadySpent
    );
    require!(
        !is_nullifier_spent(&ctx.accounts.spent_nullifier2),
        PrivacyError::AlreadySpent
    );

    // Step 3: external-data binding.
    let recomputed_ext_data_hash = compute_ext_data_hash(
        &ctx.accounts.recipient.key(),
        &ctx.accounts.relayer.key(),
        fee,
        ext_amount,
        memo,
    )?;
    require!(
        recomputed_ext_data_hash == ext_data_hash,
        PrivacyError::BadExtData
    );

    // Step 4: fee policy.
    require!(
        validate_fee(ext_amount, fee, pool_config),
        PrivacyError::InsufficientFee
    );

    // Step 5: proof verification. `public_inputs.validate()` also
    // canonically re-checks `root`/the nullifiers (cheap, already
    // guaranteed to pass by steps 1-2) and canonically checks
    // `public_amount`/`ext_data_hash`/the commitments, which nothing
    // above has validated yet.
    let public_inputs = TransactPublicInputs::new(
        root,
        encode_signed_amount(ext_amount),
        ext_data_hash,
        input_nullifier1,
        input_nullifier2,
        output_commitment1,
        output_commitment2,
    );
    public_inputs.validate()?;

    let proof = Groth16Proof::from_bytes(&proof_data)?;
    let vk = verification_key.to_verifying_key();
    let proof_valid = groth16::verify(&proof, &vk, &public_inputs.to_field_elements())?;
    require!(proof_valid, PrivacyError::InvalidProof);

    // Step 6: deposit cap.
    if ext_amount > 0 {
        require!(
            (ext_amount as u64) <= pool_config.max_deposit_amount,
            PrivacyError::DepositTooLarge
        );
    }

    // Step 7: mark nullifiers spent.
    let now = Clock::get()?.unix_timestamp;
    let slot = Clock::get()?.slot;
    let pool_key = pool_config.key();

    create_nullifier_record(
        &ctx.accounts.spent_nullifier1,
        pool_key,
        input_nullifier1,
        ctx.bumps.spent_nullifier1,
        now,
        slot,
        &ctx.accounts.submitter,
        &ctx.accounts.system_program,
    )?;
    create_nullifier_record(
        &ctx.accounts.spent_nullifier2,
        pool_key,
        input_nullifier2,
        ctx.bumps.spent_nullifier2,
        now,
        slot,
        &ctx.accounts.submitter,
        &ctx.accounts.system_program,
    )?;

    // Step 8: insert commitments.
    let (leaf_index_1, leaf_index_2) =
        merkle_tree.insert_two_leaves(output_commitment1, output_commitment2)?;
    let new_root = merkle_tree.get_current_root();

    // Step 9: move value.
    move_value(
        ext_amount,
        fee,
        pool_key,
        ctx.bumps.vault,
        &ctx.accounts.submitter,
        &ctx.accounts.vault,
        &ctx.accounts.recipient,
        &ctx.accounts.relayer,
        &ctx.accounts.system_program,
    )?;

    if ext_amount > 0 {
        pool_config.increment_deposits()?;
    } else if ext_amount < 0 {
        pool_config.increment_withdrawals()?;
    }

    // Step 10: emit event.
    emit!(TransactEvent {
        pool: pool_config.key(),
        new_root,
        leaf_index_1,
        leaf_index_2,
        nullifier_1: input_nullifier1,
        nullifier_2: input_nullifier2,
        output_commitment_1: output_commitment1,
        output_commitment_2: output_commitment2,
        ext_amount,
        fee,
        timestamp: now,
    });

    msg!("transact complete, new root at leaf index {}", leaf_index_2);

    Ok(())
}

/// Fund and write a [`SpentNullifier`] record at `nullifier_account`'s PDA
/// address. Callers MUST have already checked [`is_nullifier_spent`] for
/// this account — this function only (re-)asserts it defensively, since
/// creating an already-owned account would otherwise silently overwrite
/// another nullifier's record.
///
/// Deliberately avoids the monolithic `system_program::create_account`
/// CPI: that system instruction refuses to touch any destination that
/// already holds nonzero lamports (`AccountAlreadyInUse`), and this PDA's
/// address is publicly derivable from the plaintext `nullifier_hash`
/// instruction argument before the transaction lands — anyone can
/// front-run it with a trivial 1-lamport transfer. Instead this mirrors
/// the transfer-then-`allocate`-then-`assign` sequence Anchor's own
/// `init` account-creation helper uses for exactly this reason: top up
/// any lamport shortfall below rent-exemption (a no-op if the account
/// already holds enough, pre-funded or not), `allocate` the account's
/// space, then `assign` it to this program. `allocate`/`assign` only
/// succeed while the account is still owned by the system program with
/// zero data, which is exactly the pre-funded-but-untouched state a
/// front-run produces and [`is_nullifier_spent`] correctly reports as
/// "not yet spent".
#[allow(clippy::too_many_arguments)]
fn create_nullifier_record<'info>(
    nullifier_account: &UncheckedAccount<'info>,
    pool_key: Pubkey,
    nullifier_hash: [u8; 32],
    bump: u8,
    spent_at: i64,
    spent_slot: u64,
    payer: &Signer<'info>,
    system_program: &Program<'info, System>,
) -> Result<()> {
    require!(
        !is_nullifier_spent(nullifier_account),
        PrivacyError::AlreadySpent
    );

    let bump_seed = [bump];
    let seeds: &[&[u8]] = &[
        b"nullifier",
        pool_key.as_ref(),
        nullifier_hash.as_ref(),
        &bump_seed,
    ];
    let signer_seeds: &[&[&[u8]]] = &[seeds];

    let space = SpentNullifier::LEN;
    let rent_exempt_lamports = Rent::get()?.minimum_balance(space);
    let current_lamports = nullifier_account.lamports();

    if current_lamports < rent_exempt_lamports {
        let shortfall = rent_exempt_lamports - current_lamports;
        system_program::transfer(
            CpiContext::new(
                system_program.to_account_info(),
                Transfer {
                    from: payer.to_account_info(),
                    to: nullifier_account.to_account_info(),
                },
            ),
            shortfall,
        )?;
    }

    system_program::allocate(
        CpiContext::new_with_signer(
            system_program.to_account_info(),
            Allocate {
                account_to_allocate: nullifier_account.to_account_info(),
            },
            signer_seeds,
        ),
        space as u64,
    )?;

    system_program::assign(
        CpiContext::new_with_signer(
            system_program.to_account_info(),
            Assign {
                account_to_assign: nullifier_account.to_account_info(),
            },
            signer_seeds,
        ),
        &crate::ID,
    )?;

    let mut record = SpentNullifier {
        pool: Pubkey::default(),
        nullifier_hash: [0u8; 32],
        spent_at: 0,
        spent_slot: 0,
        bump: 0,
    };
    record.initialize(pool_key, nullifier_hash, spent_at, spent_slot, bump);

    let account_info = nullifier_account.to_account_info();
    let mut data = account_info.try_borrow_mut_data()?;
    let mut cursor = Cursor::new(&mut data[..]);
    record.try_serialize(&mut cursor)?;

    Ok(())
}

/// Move native SOL per `ext_amount`'s sign (SPEC_FULL.md §8 Property 4:
/// the vault's balance changes by exactly `ext_amount`, never
/// `ext_amount + fee` or `ext_amount - fee`):
///
/// - `ext_amount > 0` (deposit leg): `ext_amount` moves submitter -> vault;
///   `fee` moves submitter -> relayer, independently.
/// - `ext_amount < 0` (withdrawal leg): `|ext_amount|` moves vault ->
///   recipient and vault -> relayer combined (`fee` comes out of the
///   vault's one outgoing transfer, split between the two destinations),
///   so the vault's total outflow is exactly `|ext_amount|`.
/// - `ext_amount == 0` (pure shielded transfer): no vault movement;
///   `fee` moves submitter -> relayer.
///
/// Takes individual account infos rather than `&Context<Transact>` so it
/// can be called while other fields of `ctx.accounts` are still mutably
/// borrowed by the caller.
#[allow(clippy::too_many_arguments)]
fn move_value<'info>(
    ext_amount: i64,
    fee: u64,
    pool_key: Pubkey,
    vault_bump: u8,
    submitter: &Signer<'info>,
    vault: &SystemAccount<'info>,
    recipient: &UncheckedAccount<'info>,
    relayer: &UncheckedAccount<'info>,
    system_program: &Program<'info, System>,
) -> Result<()> {
    let transfer_from_submitter = |to: AccountInfo<'info>, amount: u64| -> Result<()> {
        if amount == 0 {
            return Ok(());
        }
        let cpi_accounts = Transfer {
            from: submitter.to_account_info(),
            to,
        };
        let cpi_ctx = CpiContext::new(system_program.to_account_info(), cpi_accounts);
        system_program::transfer(cpi_ctx, amount)
    };

    let transfer_from_vault = |to: AccountInfo<'info>, amount: u64| -> Result<()> {
        if amount == 0 {
            return Ok(());
        }
        let vault_seeds: &[&[u8]] = &[b"vault", pool_key.as_ref(), &[vault_bump]];
        let signer_seeds: &[&[&[u8]]] = &[vault_seeds];
        let cpi_accounts = Transfer {
            from: vault.to_account_info(),
            to,
        };
        let cpi_ctx =
            CpiContext::new_with_signer(system_program.to_account_info(), cpi_accounts, signer_seeds);
        system_program::transfer(cpi_ctx, amount)
    };

    if ext_amount > 0 {
        transfer_from_submitter(vault.to_account_info(), ext_amount as u64)?;
        transfer_from_submitter(relayer.to_account_info(), fee)?;
    } else if ext_amount < 0 {
        let magnitude = ext_amount.unsigned_abs();
        let payout = magnitude
            .checked_sub(fee)
            .ok_or(error!(PrivacyError::InsufficientBalance))?;
        require!(
            vault.lamports() >= magnitude,
            PrivacyError::InsufficientBalance
        );
        transfer_from_vault(recipient.to_account_info(), payout)?;
        transfer_from_vault(relayer.to_account_info(), fee)?;
    } else {
        transfer_from_submitter(relayer.to_account_info(), fee)?;
    }

    Ok(())
}
