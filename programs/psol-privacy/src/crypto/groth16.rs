//! Groth16 (BN254) verifier binding.
//!
//! All group arithmetic goes through the host's `alt_bn128` precompile
//! (`solana-bn254`), never a software fallback — SPEC_FULL.md §4.D forbids
//! the latter on performance-critical paths. The accumulation/pairing
//! shape mirrors the Pinocchio-based verifier used elsewhere in this
//! corpus (`zorb-labs-solana-privacy-hackathon-2026/programs/shielded-pool/
//! src/groth16.rs`), adapted to uncompressed 64/128/64-byte proof points
//! and this program's Anchor error type.

use anchor_lang::prelude::*;
use solana_bn254::prelude::{
    alt_bn128_g1_addition_be, alt_bn128_g1_multiplication_be, alt_bn128_pairing_be,
};

use crate::crypto::curve_utils::{is_g1_identity, negate_g1, G1Point, G2Point, ScalarField};
use crate::error::PrivacyError;

/// `n = 7`: the fixed number of public inputs the circuit exposes
/// (SPEC_FULL.md §4.D, §6).
pub const NUM_PUBLIC_INPUTS: usize = 7;

/// Uncompressed Groth16 proof: `A, C ∈ G1` (64 bytes each), `B ∈ G2` (128 bytes).
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct Groth16Proof {
    pub a: G1Point,
    pub b: G2Point,
    pub c: G1Point,
}

pub const PROOF_DATA_LEN: usize = 64 + 128 + 64;

impl Groth16Proof {
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        require!(data.len() == PROOF_DATA_LEN, PrivacyError::InvalidProofFormat);
        let mut a = [0u8; 64];
        let mut b = [0u8; 128];
        let mut c = [0u8; 64];
        a.copy_from_slice(&data[0..64]);
        b.copy_from_slice(&data[64..192]);
        c.copy_from_slice(&data[192..256]);
        Ok(Self { a, b, c })
    }

    pub fn to_bytes(&self) -> [u8; PROOF_DATA_LEN] {
        let mut out = [0u8; PROOF_DATA_LEN];
        out[0..64].copy_from_slice(&self.a);
        out[64..192].copy_from_slice(&self.b);
        out[192..256].copy_from_slice(&self.c);
        out
    }
}

/// The fixed, compile-time verification key specialized for the transact
/// circuit. `ic.len()` MUST equal `NUM_PUBLIC_INPUTS + 1 = 8`.
pub struct VerifyingKey {
    pub alpha_g1: G1Point,
    pub beta_g2: G2Point,
    pub gamma_g2: G2Point,
    pub delta_g2: G2Point,
    pub ic: [G1Point; NUM_PUBLIC_INPUTS + 1],
}

/// `vk_x := IC[0] + Σ public_inputs[i] · IC[i+1]`, via the host G1
/// multiplication/addition precompiles (SPEC_FULL.md §4.D step 2).
fn prepare_vk_x(vk: &VerifyingKey, public_inputs: &[ScalarField; NUM_PUBLIC_INPUTS]) -> Result<G1Point> {
    let mut acc = vk.ic[0];
    for (i, input) in public_inputs.iter().enumerate() {
        let mut mul_input = [0u8; 96];
        mul_input[0..64].copy_from_slice(&vk.ic[i + 1]);
        mul_input[64..96].copy_from_slice(input);

        let scaled = alt_bn128_g1_multiplication_be(&mul_input)
            .map_err(|_| error!(PrivacyError::InvalidProof))?;

        let mut add_input = [0u8; 128];
        add_input[0..64].copy_from_slice(&acc);
        add_input[64..128].copy_from_slice(&scaled);

        let sum =
            alt_bn128_g1_addition_be(&add_input).map_err(|_| error!(PrivacyError::InvalidProof))?;

        acc.copy_from_slice(&sum);
    }
    Ok(acc)
}

/// SPEC_FULL.md §4.D: verify a Groth16 proof against `vk` and the ordered
/// public inputs `[root, public_amount, ext_data_hash, input_nullifier1,
/// input_nullifier2, output_commitment1, output_commitment2]`.
pub fn verify(
    proof: &Groth16Proof,
    vk: &VerifyingKey,
    public_inputs: &[ScalarField; NUM_PUBLIC_INPUTS],
) -> Result<bool> {
    // Step 1: reject point-at-infinity proof components.
    require!(!is_g1_identity(&proof.a), PrivacyError::InvalidProof);
    require!(!is_g1_identity(&proof.c), PrivacyError::InvalidProof);

    // Step 2: vk_x = IC[0] + Σ input_i · IC[i+1].
    let vk_x = prepare_vk_x(vk, public_inputs)?;

    // Step 3: e(A,B) · e(-α,β) · e(-vk_x,γ) · e(-C,δ) == 1.
    let neg_alpha = negate_g1(&vk.alpha_g1)?;
    let neg_vk_x = negate_g1(&vk_x)?;
    let neg_c = negate_g1(&proof.c)?;

    let mut pairing_input = Vec::with_capacity(4 * (64 + 128));
    pairing_input.extend_from_slice(&proof.a);
    pairing_input.extend_from_slice(&proof.b);
    pairing_input.extend_from_slice(&neg_alpha);
    pairing_input.extend_from_slice(&vk.beta_g2);
    pairing_input.extend_from_slice(&neg_vk_x);
    pairing_input.extend_from_slice(&vk.gamma_g2);
    pairing_input.extend_from_slice(&neg_c);
    pairing_input.extend_from_slice(&vk.delta_g2);

    let pairing_result =
        alt_bn128_pairing_be(&pairing_input).map_err(|_| error!(PrivacyError::InvalidProof))?;

    // Step 4: precompile returns a 32-byte big-endian 0/1.
    Ok(pairing_result[31] == 1)
}
