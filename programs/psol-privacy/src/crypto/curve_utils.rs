//! BN254 elliptic curve utilities.
//!
//! Point validation beyond the point-at-infinity check is delegated to the
//! host's `alt_bn128` precompile: an invalid (off-curve or wrong-subgroup)
//! point simply makes the precompile call fail, which the verifier in
//! [`crate::crypto::groth16`] turns into [`PrivacyError::InvalidProof`].
//! This module owns the parts that must be computed off the precompile
//! path: identity checks and the one field negation Groth16 needs
//! (`-proof_a`, `-alpha`).

use anchor_lang::prelude::*;
use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::PrivacyError;

/// BN254 base field modulus (p), big-endian.
/// p = 21888242871839275222246405745257275088696311157297823662689037894645226208583
pub const BN254_FIELD_MODULUS: [u8; 32] = [
    0x30, 0x64, 0x4e, 0x72, 0xe1, 0x31, 0xa0, 0x29,
    0xb8, 0x50, 0x45, 0xb6, 0x81, 0x81, 0x58, 0x5d,
    0x97, 0x81, 0x6a, 0x91, 0x68, 0x71, 0xca, 0x8d,
    0x3c, 0x20, 0x8c, 0x16, 0xd8, 0x7c, 0xfd, 0x47,
];

/// BN254 scalar field modulus (r), big-endian — order of G1/G2.
/// r = 21888242871839275222246405745257275088548364400416034343698204186575808495617
pub const BN254_SCALAR_MODULUS: [u8; 32] = [
    0x30, 0x64, 0x4e, 0x72, 0xe1, 0x31, 0xa0, 0x29,
    0xb8, 0x50, 0x45, 0xb6, 0x81, 0x81, 0x58, 0x5d,
    0x28, 0x33, 0xe8, 0x48, 0x79, 0xb9, 0x70, 0x91,
    0x43, 0xe1, 0xf5, 0x93, 0xf0, 0x00, 0x00, 0x01,
];

/// G1 point, uncompressed (64 bytes: 32-byte x || 32-byte y, big-endian).
pub type G1Point = [u8; 64];

/// G2 point, uncompressed (128 bytes: x.c1 || x.c0 || y.c1 || y.c0, big-endian).
pub type G2Point = [u8; 128];

/// Scalar field element (32 bytes, big-endian, canonical iff `< BN254_SCALAR_MODULUS`).
pub type ScalarField = [u8; 32];

pub fn is_g1_identity(point: &G1Point) -> bool {
    point.iter().all(|&b| b == 0)
}

pub fn is_g2_identity(point: &G2Point) -> bool {
    point.iter().all(|&b| b == 0)
}

/// `true` iff `scalar` is strictly less than the BN254 scalar field modulus.
pub fn is_valid_scalar(scalar: &ScalarField) -> bool {
    BigUint::from_bytes_be(scalar) < BigUint::from_bytes_be(&BN254_SCALAR_MODULUS)
}

/// Negate a G1 point's y-coordinate modulo the base field: `-P = (x, p - y)`.
/// `-O = O`.
pub fn negate_g1(point: &G1Point) -> Result<G1Point> {
    if is_g1_identity(point) {
        return Ok(*point);
    }

    let modulus = BigUint::from_bytes_be(&BN254_FIELD_MODULUS);
    let y = BigUint::from_bytes_be(&point[32..64]);
    if y >= modulus {
        return Err(error!(PrivacyError::InvalidProof));
    }

    let neg_y = if y.is_zero() { y } else { &modulus - &y };
    let neg_y_bytes = neg_y.to_bytes_be();

    let mut out = *point;
    let start = 32 + (32 - neg_y_bytes.len());
    out[32..start].fill(0);
    out[start..64].copy_from_slice(&neg_y_bytes);
    Ok(out)
}

/// Widen a `u64` into a canonical scalar by placing it in the low-order
/// (last 8) big-endian bytes, matching [`crate::crypto::poseidon::u64_to_bytes32_be`].
pub fn u64_to_scalar(value: u64) -> ScalarField {
    let mut scalar = [0u8; 32];
    scalar[24..].copy_from_slice(&value.to_be_bytes());
    scalar
}

/// Widen a `Pubkey` into a scalar. `Pubkey` bytes are not guaranteed to be
/// a canonical field element; callers that feed this into Poseidon rely on
/// `light-poseidon`'s internal reduction mod `r`.
pub fn pubkey_to_scalar(pubkey: &Pubkey) -> ScalarField {
    pubkey.to_bytes()
}

/// Encode a signed `ext_amount` as the scalar field element the circuit's
/// `public_amount` input uses: non-negative values widen directly,
/// negative values wrap modulo `r` (`r - |amount|`), the same signed/
/// field convention the offchain prover must use to agree with this
/// program on the public input.
pub fn encode_signed_amount(ext_amount: i64) -> ScalarField {
    if ext_amount >= 0 {
        return u64_to_scalar(ext_amount as u64);
    }
    let modulus = BigUint::from_bytes_be(&BN254_SCALAR_MODULUS);
    let magnitude = BigUint::from(ext_amount.unsigned_abs());
    let wrapped = &modulus - &magnitude;
    let bytes = wrapped.to_bytes_be();
    let mut out = [0u8; 32];
    let start = 32 - bytes.len();
    out[start..].copy_from_slice(&bytes);
    out
}
