//! Cross-module integration tests.
//!
//! Each module under `crypto/` and `state/` carries its own `#[cfg(test)]`
//! unit tests exercising its own API in isolation. This module instead
//! wires several of those APIs together the way `instructions::transact`
//! does, to catch mismatches at the seams (e.g. the external-data hash
//! binding, the Merkle tree's root-history eviction, the capacity
//! boundary) that no single module's unit tests can see on their own.

#[cfg(test)]
mod ext_data_hash_binding {
    use crate::crypto::poseidon::u64_to_bytes32_be;
    use crate::crypto::{encode_signed_amount, poseidon_n, pubkey_to_scalar};
    use anchor_lang::prelude::Pubkey;

    #[allow(clippy::too_many_arguments)]
    fn ext_data_hash(
        recipient: &Pubkey,
        relayer: &Pubkey,
        fee: u64,
        ext_amount: i64,
        memo: [u8; 32],
    ) -> [u8; 32] {
        poseidon_n(&[
            pubkey_to_scalar(recipient),
            pubkey_to_scalar(relayer),
            u64_to_bytes32_be(fee),
            encode_signed_amount(ext_amount),
            memo,
        ])
        .unwrap()
    }

    #[test]
    fn changing_any_single_field_changes_the_hash() {
        let recipient = Pubkey::new_unique();
        let relayer = Pubkey::new_unique();
        let fee = 1_000u64;
        let ext_amount = 50_000i64;
        let memo = [7u8; 32];

        let base = ext_data_hash(&recipient, &relayer, fee, ext_amount, memo);

        let other_recipient = Pubkey::new_unique();
        assert_ne!(base, ext_data_hash(&other_recipient, &relayer, fee, ext_amount, memo));

        let other_relayer = Pubkey::new_unique();
        assert_ne!(base, ext_data_hash(&recipient, &other_relayer, fee, ext_amount, memo));

        assert_ne!(base, ext_data_hash(&recipient, &relayer, fee + 1, ext_amount, memo));
        assert_ne!(base, ext_data_hash(&recipient, &relayer, fee, ext_amount + 1, memo));
        assert_ne!(base, ext_data_hash(&recipient, &relayer, fee, -ext_amount, memo));

        let mut other_memo = memo;
        other_memo[0] ^= 0xFF;
        assert_ne!(base, ext_data_hash(&recipient, &relayer, fee, ext_amount, other_memo));
    }

    #[test]
    fn is_deterministic() {
        let recipient = Pubkey::new_unique();
        let relayer = Pubkey::new_unique();
        let h1 = ext_data_hash(&recipient, &relayer, 10, 100, [1u8; 32]);
        let h2 = ext_data_hash(&recipient, &relayer, 10, 100, [1u8; 32]);
        assert_eq!(h1, h2);
    }
}

#[cfg(test)]
mod public_inputs_and_proof_pipeline {
    use crate::crypto::curve_utils::BN254_SCALAR_MODULUS;
    use crate::crypto::groth16::{verify, Groth16Proof, VerifyingKey, NUM_PUBLIC_INPUTS};
    use crate::crypto::public_inputs::TransactPublicInputs;

    /// The order `instructions::transact::handler` runs in: validate the
    /// public-input structure (canonical encoding, non-zero root, distinct
    /// nullifiers) before ever touching the proof. A non-canonical field
    /// must be rejected here, not surfaced as a cryptic precompile failure.
    #[test]
    fn non_canonical_public_input_rejected_before_proof_check() {
        let inputs = TransactPublicInputs::new(
            [1u8; 32],
            BN254_SCALAR_MODULUS, // not canonical: == the scalar modulus
            [3u8; 32],
            [4u8; 32],
            [5u8; 32],
            [6u8; 32],
            [0u8; 32],
        );
        assert!(inputs.validate().is_err());
    }

    #[test]
    fn duplicate_nullifiers_rejected_before_proof_check() {
        let inputs = TransactPublicInputs::new(
            [1u8; 32], [2u8; 32], [3u8; 32], [9u8; 32], [9u8; 32], [6u8; 32], [7u8; 32],
        );
        assert!(inputs.validate().is_err());
    }

    /// An all-zero proof `A` must be rejected outright (point-at-infinity
    /// can never satisfy a sound Groth16 relation) without ever reaching
    /// the pairing precompile, which has no defined behavior on inputs
    /// this degenerate.
    #[test]
    fn zero_proof_fails_closed_even_with_a_trivial_vk() {
        let vk = VerifyingKey {
            alpha_g1: [0u8; 64],
            beta_g2: [0u8; 128],
            gamma_g2: [0u8; 128],
            delta_g2: [0u8; 128],
            ic: [[0u8; 64]; NUM_PUBLIC_INPUTS + 1],
        };
        let proof = Groth16Proof {
            a: [0u8; 64],
            b: [0u8; 128],
            c: [0u8; 64],
        };
        let inputs = TransactPublicInputs::new(
            [1u8; 32], [0u8; 32], [0u8; 32], [1u8; 32], [2u8; 32], [0u8; 32], [0u8; 32],
        );
        assert!(inputs.validate().is_ok());
        let result = verify(&proof, &vk, &inputs.to_field_elements());
        assert!(result.is_err());
    }
}

#[cfg(test)]
mod merkle_tree_integration {
    use crate::constants::{ROOT_HISTORY_SIZE, TREE_HEIGHT};
    use crate::crypto::poseidon;
    use crate::state::MerkleTree;
    use anchor_lang::prelude::Pubkey;

    fn fresh_tree() -> Box<MerkleTree> {
        let mut tree = Box::new(MerkleTree {
            pool: Pubkey::default(),
            next_leaf_index: 0,
            root_cursor: 0,
            bump: 255,
            current_root: [0u8; 32],
            root_history: [[0u8; 32]; ROOT_HISTORY_SIZE],
            filled_subtrees: [[0u8; 32]; TREE_HEIGHT],
            zeros: [[0u8; 32]; TREE_HEIGHT + 1],
        });
        tree.initialize(Pubkey::default(), 255).unwrap();
        tree
    }

    /// SPEC_FULL.md §8 Property 2: a root that falls out of the
    /// [`ROOT_HISTORY_SIZE`]-entry window is no longer accepted as a
    /// proof's `root` input. The ring buffer's write cursor wraps
    /// exactly at `ROOT_HISTORY_SIZE` insertions, so the empty-tree root
    /// (written at index 0 by `initialize`) is the first victim.
    #[test]
    fn root_history_evicts_the_oldest_root_after_a_full_cycle() {
        let mut tree = fresh_tree();
        let empty_root = tree.current_root;

        for i in 0..(ROOT_HISTORY_SIZE as u64 - 1) {
            tree.insert_leaf([i as u8; 32]).unwrap();
            assert!(
                tree.is_known_root(&empty_root),
                "empty root must still be known before the cycle completes"
            );
        }

        tree.insert_leaf([0xFF; 32]).unwrap();
        assert!(
            !tree.is_known_root(&empty_root),
            "empty root must be evicted once the ring buffer wraps"
        );
    }

    /// SPEC_FULL.md §8 Property 1: every insertion strictly advances
    /// `next_leaf_index` and produces a root distinct from the previous
    /// one (append-only, no silent overwrite).
    #[test]
    fn sequential_insertions_monotonically_advance_and_change_the_root() {
        let mut tree = fresh_tree();
        let mut prev_root = tree.current_root;

        for i in 0..8u64 {
            let index = tree.insert_leaf([i as u8 + 1; 32]).unwrap();
            assert_eq!(index, i);
            assert_ne!(tree.current_root, prev_root);
            prev_root = tree.current_root;
        }
        assert_eq!(tree.next_leaf_index, 8);
    }

    /// A minimal, height-parameterized reimplementation of
    /// `MerkleTree::insert_leaf`'s filled-subtree algorithm, used only to
    /// exercise the capacity boundary at a tractable height — the real
    /// account's height is fixed at compile time
    /// ([`crate::constants::TREE_HEIGHT`] = 26, i.e. 2^26 leaves), far too
    /// large to fill in a test.
    struct SmallTree {
        height: usize,
        next_leaf_index: u64,
        filled_subtrees: Vec<[u8; 32]>,
        zeros: Vec<[u8; 32]>,
    }

    impl SmallTree {
        fn new(height: usize) -> Self {
            let zeros = poseidon::compute_zero_hashes(height).unwrap();
            Self {
                height,
                next_leaf_index: 0,
                filled_subtrees: zeros[..height].to_vec(),
                zeros,
            }
        }

        fn capacity(&self) -> u64 {
            1u64 << self.height as u64
        }

        fn is_full(&self) -> bool {
            self.next_leaf_index >= self.capacity()
        }

        fn insert(&mut self, commitment: [u8; 32]) -> Result<u64, &'static str> {
            if self.is_full() {
                return Err("tree full");
            }
            let leaf_index = self.next_leaf_index;
            let mut current_hash = commitment;
            let mut current_index = leaf_index;

            for level in 0..self.height {
                let is_right_child = (current_index & 1) == 1;
                current_index >>= 1;
                if is_right_child {
                    let left = self.filled_subtrees[level];
                    current_hash = poseidon::poseidon2(&left, &current_hash).unwrap();
                } else {
                    self.filled_subtrees[level] = current_hash;
                    current_hash = poseidon::poseidon2(&current_hash, &self.zeros[level]).unwrap();
                }
            }
            self.next_leaf_index += 1;
            Ok(leaf_index)
        }
    }

    /// SPEC_FULL.md §8 scenario 6: a tree at capacity rejects any further
    /// insertion rather than silently overwriting a leaf.
    #[test]
    fn capacity_boundary_rejects_insertion_once_full() {
        let mut tree = SmallTree::new(2); // capacity = 4
        assert_eq!(tree.capacity(), 4);

        for i in 0..4u8 {
            assert!(tree.insert([i; 32]).is_ok());
        }
        assert!(tree.is_full());
        assert_eq!(tree.insert([99u8; 32]), Err("tree full"));
    }
}

#[cfg(test)]
mod fee_policy_integration {
    use crate::fee::{min_fee, validate_fee};
    use crate::state::pool_config::PoolConfig;

    fn config(deposit_bps: u16, withdrawal_bps: u16, margin_bps: u16, max_deposit: u64) -> PoolConfig {
        let mut c = PoolConfig {
            authority: Default::default(),
            vault: Default::default(),
            merkle_tree: Default::default(),
            verification_key: Default::default(),
            deposit_fee_rate_bps: deposit_bps,
            withdrawal_fee_rate_bps: withdrawal_bps,
            fee_error_margin_bps: margin_bps,
            max_deposit_amount: max_deposit,
            total_deposits: 0,
            total_withdrawals: 0,
            is_paused: false,
            vk_configured: false,
            bump: 0,
            _reserved: [0u8; 64],
        };
        c.initialize(
            c.authority,
            c.vault,
            c.merkle_tree,
            c.verification_key,
            deposit_bps,
            withdrawal_bps,
            margin_bps,
            max_deposit,
            0,
        );
        c
    }

    /// SPEC_FULL.md §8 scenario 4, worked end to end against a config
    /// shaped like `initialize_pool` would actually produce it.
    #[test]
    fn withdrawal_floor_matches_the_documented_scenario() {
        let c = config(0, 25, 500, u64::MAX);
        assert_eq!(min_fee(-1_000_000, &c), 2_375);
        assert!(!validate_fee(-1_000_000, 2_374, &c));
        assert!(validate_fee(-1_000_000, 2_375, &c));
    }

    #[test]
    fn deposit_cap_and_fee_floor_are_independent_checks() {
        let c = config(100, 50, 0, 500_000);
        // A deposit at exactly the cap pays the deposit-rate floor.
        assert_eq!(min_fee(500_000, &c), 5_000);
    }
}

#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;

    use crate::crypto::poseidon::{compute_zero_hashes, is_zero_hash, poseidon2, poseidon_n};
    use crate::crypto::{encode_signed_amount, is_valid_scalar, u64_to_scalar};
    use crate::fee::min_fee;
    use crate::state::pool_config::PoolConfig;

    fn config_with(deposit_bps: u16, withdrawal_bps: u16, margin_bps: u16) -> PoolConfig {
        PoolConfig {
            authority: Default::default(),
            vault: Default::default(),
            merkle_tree: Default::default(),
            verification_key: Default::default(),
            deposit_fee_rate_bps: deposit_bps,
            withdrawal_fee_rate_bps: withdrawal_bps,
            fee_error_margin_bps: margin_bps,
            max_deposit_amount: u64::MAX,
            total_deposits: 0,
            total_withdrawals: 0,
            is_paused: false,
            vk_configured: false,
            bump: 0,
            _reserved: [0u8; 64],
        }
    }

    proptest! {
        #[test]
        fn poseidon2_is_deterministic_for_any_input(
            a in prop::array::uniform32(any::<u8>()),
            b in prop::array::uniform32(any::<u8>()),
        ) {
            let h1 = poseidon2(&a, &b).unwrap();
            let h2 = poseidon2(&a, &b).unwrap();
            prop_assert_eq!(h1, h2);
        }

        #[test]
        fn poseidon2_is_order_sensitive_unless_inputs_match(
            a in prop::array::uniform32(any::<u8>()),
            b in prop::array::uniform32(any::<u8>()),
        ) {
            prop_assume!(a != b);
            let forward = poseidon2(&a, &b).unwrap();
            let backward = poseidon2(&b, &a).unwrap();
            prop_assert_ne!(forward, backward);
        }

        #[test]
        fn poseidon_n_is_deterministic_at_every_supported_arity(
            x1 in prop::array::uniform32(any::<u8>()),
            x2 in prop::array::uniform32(any::<u8>()),
            x3 in prop::array::uniform32(any::<u8>()),
        ) {
            for arity in 1..=3 {
                let xs = [x1, x2, x3][..arity].to_vec();
                let h1 = poseidon_n(&xs).unwrap();
                let h2 = poseidon_n(&xs).unwrap();
                prop_assert_eq!(h1, h2);
            }
        }

        #[test]
        fn zero_hash_table_is_consistent_for_any_height(height in 1usize..=20) {
            let zeros = compute_zero_hashes(height).unwrap();
            prop_assert_eq!(zeros.len(), height + 1);
            prop_assert!(is_zero_hash(&zeros[0]));
            for l in 1..=height {
                prop_assert_eq!(zeros[l], poseidon2(&zeros[l - 1], &zeros[l - 1]).unwrap());
            }
        }

        #[test]
        fn encode_signed_amount_is_always_a_canonical_scalar(amount in any::<i64>()) {
            let encoded = encode_signed_amount(amount);
            prop_assert!(is_valid_scalar(&encoded));
        }

        #[test]
        fn encode_signed_amount_nonnegative_matches_u64_widening(amount in 0i64..i64::MAX) {
            prop_assert_eq!(encode_signed_amount(amount), u64_to_scalar(amount as u64));
        }

        /// SPEC_FULL.md §8 Property 5: the fee floor never exceeds the raw
        /// expected fee, for any rate/margin the pool could be configured
        /// with (0..=10000 bps, enforced at `initialize_pool`).
        #[test]
        fn fee_floor_never_exceeds_the_raw_expected_fee(
            magnitude in 0u64..1_000_000_000_000,
            rate_bps in 0u16..=10_000,
            margin_bps in 0u16..=10_000,
        ) {
            let c = config_with(rate_bps, rate_bps, margin_bps);
            let expected = magnitude.saturating_mul(rate_bps as u64) / 10_000;
            let floor = min_fee(magnitude as i64, &c);
            prop_assert!(floor <= expected);
        }

        #[test]
        fn fee_floor_is_monotonic_in_the_margin(
            magnitude in 1u64..1_000_000_000,
            rate_bps in 1u16..=10_000,
            margin_a in 0u16..=5_000,
            margin_b in 0u16..=5_000,
        ) {
            let lower_margin = margin_a.min(margin_b);
            let higher_margin = margin_a.max(margin_b);
            let c_lower = config_with(rate_bps, rate_bps, lower_margin);
            let c_higher = config_with(rate_bps, rate_bps, higher_margin);
            prop_assert!(min_fee(magnitude as i64, &c_higher) <= min_fee(magnitude as i64, &c_lower));
        }
    }
}
