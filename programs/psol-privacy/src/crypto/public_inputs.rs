//! Public inputs for the `transact` circuit.
//!
//! SPEC_FULL.md §6: `[root, public_amount, ext_data_hash, input_nullifier1,
//! input_nullifier2, output_commitment1, output_commitment2]`, seven
//! field elements in exactly this order. This replaces the teacher's
//! six-field `ZkPublicInputs` (root/nullifier/recipient/amount/relayer/
//! relayer_fee), which was shaped for a single-leg withdrawal rather than
//! the canonical two-nullifier/two-commitment transact transition; the
//! fluent-builder idiom is kept.

use anchor_lang::prelude::*;

use crate::crypto::groth16::NUM_PUBLIC_INPUTS;
use crate::crypto::poseidon::{decode, is_zero_hash};
use crate::error::PrivacyError;

/// The seven ordered public inputs bound to a single `transact` proof.
#[derive(Clone, Debug)]
pub struct TransactPublicInputs {
    pub root: [u8; 32],
    pub public_amount: [u8; 32],
    pub ext_data_hash: [u8; 32],
    pub input_nullifier1: [u8; 32],
    pub input_nullifier2: [u8; 32],
    pub output_commitment1: [u8; 32],
    pub output_commitment2: [u8; 32],
}

impl TransactPublicInputs {
    pub const COUNT: usize = NUM_PUBLIC_INPUTS;

    #[allow(clippy::too_many_arguments)]
    pub fn new(
        root: [u8; 32],
        public_amount: [u8; 32],
        ext_data_hash: [u8; 32],
        input_nullifier1: [u8; 32],
        input_nullifier2: [u8; 32],
        output_commitment1: [u8; 32],
        output_commitment2: [u8; 32],
    ) -> Self {
        Self {
            root,
            public_amount,
            ext_data_hash,
            input_nullifier1,
            input_nullifier2,
            output_commitment1,
            output_commitment2,
        }
    }

    /// Canonical-encoding and freshness validation. Does not check the
    /// nullifier registry or tree membership — those are the caller's
    /// (`instructions::transact`) responsibility, since they require
    /// account access this pure structure doesn't have.
    pub fn validate(&self) -> Result<()> {
        decode(self.root)?;
        decode(self.public_amount)?;
        decode(self.ext_data_hash)?;
        decode(self.input_nullifier1)?;
        decode(self.input_nullifier2)?;
        decode(self.output_commitment1)?;
        decode(self.output_commitment2)?;

        require!(!is_zero_hash(&self.root), PrivacyError::UnknownRoot);
        require!(
            self.input_nullifier1 != self.input_nullifier2,
            PrivacyError::DuplicateNullifier
        );

        Ok(())
    }

    /// Field elements in the exact circuit order (SPEC_FULL.md §6).
    pub fn to_field_elements(&self) -> [[u8; 32]; Self::COUNT] {
        [
            self.root,
            self.public_amount,
            self.ext_data_hash,
            self.input_nullifier1,
            self.input_nullifier2,
            self.output_commitment1,
            self.output_commitment2,
        ]
    }
}

#[derive(Default)]
pub struct TransactPublicInputsBuilder {
    root: Option<[u8; 32]>,
    public_amount: Option<[u8; 32]>,
    ext_data_hash: Option<[u8; 32]>,
    input_nullifier1: Option<[u8; 32]>,
    input_nullifier2: Option<[u8; 32]>,
    output_commitment1: Option<[u8; 32]>,
    output_commitment2: Option<[u8; 32]>,
}

impl TransactPublicInputsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(mut self, v: [u8; 32]) -> Self {
        self.root = Some(v);
        self
    }

    pub fn public_amount(mut self, v: [u8; 32]) -> Self {
        self.public_amount = Some(v);
        self
    }

    pub fn ext_data_hash(mut self, v: [u8; 32]) -> Self {
        self.ext_data_hash = Some(v);
        self
    }

    pub fn input_nullifier1(mut self, v: [u8; 32]) -> Self {
        self.input_nullifier1 = Some(v);
        self
    }

    pub fn input_nullifier2(mut self, v: [u8; 32]) -> Self {
        self.input_nullifier2 = Some(v);
        self
    }

    pub fn output_commitment1(mut self, v: [u8; 32]) -> Self {
        self.output_commitment1 = Some(v);
        self
    }

    pub fn output_commitment2(mut self, v: [u8; 32]) -> Self {
        self.output_commitment2 = Some(v);
        self
    }

    pub fn build(self) -> Result<TransactPublicInputs> {
        let inputs = TransactPublicInputs {
            root: self.root.ok_or(error!(PrivacyError::UnknownRoot))?,
            public_amount: self
                .public_amount
                .ok_or(error!(PrivacyError::InvalidProof))?,
            ext_data_hash: self.ext_data_hash.ok_or(error!(PrivacyError::BadExtData))?,
            input_nullifier1: self
                .input_nullifier1
                .ok_or(error!(PrivacyError::InvalidProof))?,
            input_nullifier2: self
                .input_nullifier2
                .ok_or(error!(PrivacyError::InvalidProof))?,
            output_commitment1: self
                .output_commitment1
                .ok_or(error!(PrivacyError::InvalidProof))?,
            output_commitment2: self
                .output_commitment2
                .unwrap_or([0u8; 32]),
        };

        inputs.validate()?;
        Ok(inputs)
    }
}
