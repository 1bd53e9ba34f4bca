//! Cryptographic primitives for the pSol privacy pool.
//!
//! ## curve_utils
//! BN254 field/point helpers: identity checks, canonical-scalar checks, G1
//! negation.
//!
//! ## poseidon
//! The field & Poseidon primitive (SPEC_FULL.md §4.A): `encode`/`decode`,
//! `poseidon2`/`poseidon_n`, the `ZERO_HASH` table, and the off-chain note
//! formulas kept alongside them so parameters can never drift apart.
//!
//! ## groth16
//! The Groth16 verifier binding (SPEC_FULL.md §4.D): fixed verification
//! key shape, public-input linear combination, host pairing check.
//!
//! ## public_inputs
//! The seven-field `transact` public-input structure and its ordering.
//!
//! # Security model
//!
//! - All verification functions are fail-closed.
//! - Invalid proofs are always rejected.
//! - Curve points are validated before use (point-at-infinity at minimum;
//!   on-curve/subgroup validity is enforced by the host precompile itself).
//! - No dev-mode bypass in production builds.

pub mod curve_utils;
pub mod groth16;
pub mod poseidon;
pub mod public_inputs;

pub use curve_utils::{
    encode_signed_amount, is_g1_identity, is_g2_identity, is_valid_scalar, negate_g1,
    pubkey_to_scalar, u64_to_scalar, BN254_FIELD_MODULUS, BN254_SCALAR_MODULUS, G1Point, G2Point,
    ScalarField,
};

pub use groth16::{verify, Groth16Proof, VerifyingKey, NUM_PUBLIC_INPUTS, PROOF_DATA_LEN};

pub use poseidon::{
    compute_zero_hashes, decode, empty_leaf_hash, encode, is_zero_hash, offchain, poseidon2,
    poseidon_n, u64_to_bytes32, u64_to_bytes32_be,
};

pub use public_inputs::{TransactPublicInputs, TransactPublicInputsBuilder};
