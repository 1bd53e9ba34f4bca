//! Field & Poseidon primitive.
//!
//! `poseidon2`/`poseidon_n` must be byte-for-byte identical to whatever the
//! off-chain circuit uses, or every proof silently fails to verify against
//! the tree this program maintains. We adopt the Light-Protocol-compatible
//! Poseidon-over-BN254 parameterization (`t = 3` for the 2-ary case) via the
//! `light-poseidon` crate's `new_circom` constructor, which is the same
//! parameter set circom/snarkjs-generated circuits use — the same crate and
//! calling convention already appear elsewhere in this corpus (see
//! `DESIGN.md`).

use anchor_lang::prelude::*;
use ark_bn254::Fr;
use light_poseidon::{Poseidon, PoseidonBytesHasher};

use crate::crypto::curve_utils::{is_valid_scalar, ScalarField};
use crate::error::PrivacyError;

/// Canonicalize a 32-byte big-endian input into a `Scalar`.
///
/// Errors with [`PrivacyError::OutOfRange`] if `bytes` is `>=` the BN254
/// scalar field modulus.
pub fn decode(bytes: [u8; 32]) -> Result<ScalarField> {
    require!(is_valid_scalar(&bytes), PrivacyError::OutOfRange);
    Ok(bytes)
}

/// A `Scalar` is already its own canonical 32-byte big-endian encoding.
pub fn encode(x: ScalarField) -> [u8; 32] {
    x
}

fn poseidon_hash(inputs: &[&[u8; 32]]) -> Result<[u8; 32]> {
    let mut hasher =
        Poseidon::<Fr>::new_circom(inputs.len()).map_err(|_| error!(PrivacyError::InvalidProof))?;
    hasher
        .hash_bytes_be(inputs)
        .map_err(|_| error!(PrivacyError::InvalidProof))
}

/// The 2-ary Poseidon permutation (`t = 3`) used for every Merkle tree
/// internal node.
pub fn poseidon2(a: &ScalarField, b: &ScalarField) -> Result<ScalarField> {
    poseidon_hash(&[a, b])
}

/// Variable-arity Poseidon over 1-5 field elements, used for nullifier
/// hashing, leaf commitments (off-chain), and the external-data hash.
pub fn poseidon_n(xs: &[ScalarField]) -> Result<ScalarField> {
    require!(!xs.is_empty() && xs.len() <= 5, PrivacyError::InvalidProof);
    let refs: Vec<&[u8; 32]> = xs.iter().collect();
    poseidon_hash(&refs)
}

/// `true` iff `hash` is the all-zero scalar (the level-0 zero value).
pub fn is_zero_hash(hash: &[u8; 32]) -> bool {
    hash.iter().all(|&b| b == 0)
}

/// Widen `value` into the low-order (last 8) big-endian bytes of a scalar.
pub fn u64_to_bytes32_be(value: u64) -> [u8; 32] {
    let mut out = [0u8; 32];
    out[24..].copy_from_slice(&value.to_be_bytes());
    out
}

/// Widen `value` as a little-endian u64 in the first 8 bytes, zero-padded.
/// Kept for formats (e.g. instruction wire layout) that are explicitly
/// little-endian for integer fields per SPEC_FULL.md §6.
pub fn u64_to_bytes32(value: u64) -> [u8; 32] {
    let mut out = [0u8; 32];
    out[..8].copy_from_slice(&value.to_le_bytes());
    out
}

/// The empty-leaf value at tree level 0: the all-zero scalar.
pub fn empty_leaf_hash() -> [u8; 32] {
    [0u8; 32]
}

/// Precompute `ZERO_HASH[0..=height]`: `ZERO_HASH[0] = 0`,
/// `ZERO_HASH[l] = Poseidon(ZERO_HASH[l-1], ZERO_HASH[l-1])`.
pub fn compute_zero_hashes(height: usize) -> Result<Vec<[u8; 32]>> {
    let mut zeros = Vec::with_capacity(height + 1);
    zeros.push(empty_leaf_hash());
    for l in 1..=height {
        let prev = zeros[l - 1];
        zeros.push(poseidon2(&prev, &prev)?);
    }
    Ok(zeros)
}

/// Off-chain note formulas, exposed so client/test code sharing this crate
/// computes the same bytes the circuit does. The on-chain `transact`
/// transition never calls these itself — commitments and nullifier hashes
/// arrive as opaque scalars (SPEC_FULL.md §3) — but they must live
/// alongside `poseidon2`/`poseidon_n` so their parameters can never drift
/// apart.
pub mod offchain {
    use super::*;

    /// `Poseidon(secret, nullifier_preimage, amount)`.
    pub fn compute_commitment(
        secret: &ScalarField,
        nullifier_preimage: &ScalarField,
        amount: u64,
    ) -> Result<ScalarField> {
        poseidon_n(&[*secret, *nullifier_preimage, u64_to_bytes32_be(amount)])
    }

    /// `Poseidon(nullifier_preimage)`.
    pub fn compute_nullifier_hash(nullifier_preimage: &ScalarField) -> Result<ScalarField> {
        poseidon_n(&[*nullifier_preimage])
    }
}
