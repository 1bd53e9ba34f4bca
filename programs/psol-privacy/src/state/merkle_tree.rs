//! Incremental Merkle tree for commitment storage (SPEC_FULL.md §4.B).
//!
//! Append-only, `filled_subtrees`-cached, O(height) per insertion. Height
//! and root-history size are fixed by [`crate::constants::TREE_HEIGHT`] /
//! [`crate::constants::ROOT_HISTORY_SIZE`] rather than configurable at
//! `initialize_pool` time (see `DESIGN.md`, Open Question 1): a tree grown
//! to one height can never be verified against a circuit compiled for
//! another, so leaving it instruction-configurable only invites a
//! mismatched deployment.

use anchor_lang::prelude::*;

use crate::constants::{ROOT_HISTORY_SIZE, TREE_HEIGHT};
use crate::crypto::poseidon;
use crate::error::PrivacyError;

/// Incremental Merkle tree state account.
///
/// PDA seeds: `[b"merkle_tree", pool_config.key().as_ref()]`. `pool` links
/// back to the owning [`crate::state::pool_config::PoolConfig`], which is
/// the account that actually gates admin authority — this account stores
/// no authority pubkey of its own to avoid a second copy that could drift.
#[account]
pub struct MerkleTree {
    /// Owning pool config.
    pub pool: Pubkey,
    /// Total leaves ever inserted; also the index the next insertion uses.
    pub next_leaf_index: u64,
    /// Write cursor into `root_history` (advances circularly).
    pub root_cursor: u64,
    pub bump: u8,
    /// Root of the tree as of the most recent insertion.
    pub current_root: [u8; 32],
    /// Circular buffer of the last [`ROOT_HISTORY_SIZE`] roots, oldest
    /// entries overwritten first. Lets a prover build against a root that
    /// is no longer current but hasn't aged out yet.
    pub root_history: [[u8; 32]; ROOT_HISTORY_SIZE],
    /// Rightmost filled hash at each level, one per tree level.
    pub filled_subtrees: [[u8; 32]; TREE_HEIGHT],
    /// `zeros[0] = 0`; `zeros[l] = Poseidon(zeros[l-1], zeros[l-1])`.
    /// Computed once at `initialize` and cached — Poseidon isn't a const
    /// fn, so there is no way to bake this table in at compile time.
    pub zeros: [[u8; 32]; TREE_HEIGHT + 1],
}

impl MerkleTree {
    /// Account space, including the 8-byte Anchor discriminator.
    pub const SPACE: usize = 8
        + 32
        + 8
        + 8
        + 1
        + 32
        + (32 * ROOT_HISTORY_SIZE)
        + (32 * TREE_HEIGHT)
        + (32 * (TREE_HEIGHT + 1));

    /// Initialize empty tree state: zero table, filled-subtree cache seeded
    /// with zeros, root history seeded with the empty-tree root.
    pub fn initialize(&mut self, pool: Pubkey, bump: u8) -> Result<()> {
        self.pool = pool;
        self.bump = bump;
        self.next_leaf_index = 0;
        self.root_cursor = 0;

        let zeros = Self::compute_zero_values()?;
        self.zeros = zeros;

        for level in 0..TREE_HEIGHT {
            self.filled_subtrees[level] = zeros[level];
        }

        self.current_root = zeros[TREE_HEIGHT];
        self.root_history = [[0u8; 32]; ROOT_HISTORY_SIZE];
        self.root_history[0] = self.current_root;

        Ok(())
    }

    /// `zeros[0..=TREE_HEIGHT]`, matching the circuit's empty-subtree
    /// values exactly — see [`poseidon::compute_zero_hashes`].
    fn compute_zero_values() -> Result<[[u8; 32]; TREE_HEIGHT + 1]> {
        let computed = poseidon::compute_zero_hashes(TREE_HEIGHT)?;
        let mut zeros = [[0u8; 32]; TREE_HEIGHT + 1];
        zeros.copy_from_slice(&computed);
        Ok(zeros)
    }

    /// Insert `commitment` as the next leaf, returning its index.
    pub fn insert_leaf(&mut self, commitment: [u8; 32]) -> Result<u64> {
        require!(!self.is_full(), PrivacyError::MerkleTreeFull);

        let leaf_index = self.next_leaf_index;
        let mut current_hash = commitment;
        let mut current_index = leaf_index;

        for level in 0..TREE_HEIGHT {
            let is_right_child = (current_index & 1) == 1;
            current_index >>= 1;

            if is_right_child {
                let left_sibling = self.filled_subtrees[level];
                current_hash = poseidon::poseidon2(&left_sibling, &current_hash)?;
            } else {
                self.filled_subtrees[level] = current_hash;
                current_hash = poseidon::poseidon2(&current_hash, &self.zeros[level])?;
            }
        }

        self.current_root = current_hash;

        self.root_cursor = (self.root_cursor + 1) % ROOT_HISTORY_SIZE as u64;
        self.root_history[self.root_cursor as usize] = current_hash;

        self.next_leaf_index = self
            .next_leaf_index
            .checked_add(1)
            .ok_or(error!(PrivacyError::ArithmeticOverflow))?;

        Ok(leaf_index)
    }

    /// Insert two leaves (the transact transition always produces exactly
    /// two output commitments — SPEC_FULL.md §4.F). Returns their indices
    /// in insertion order.
    pub fn insert_two_leaves(&mut self, first: [u8; 32], second: [u8; 32]) -> Result<(u64, u64)> {
        let first_index = self.insert_leaf(first)?;
        let second_index = self.insert_leaf(second)?;
        Ok((first_index, second_index))
    }

    /// `true` iff `root` is the current root or still within history.
    pub fn is_known_root(&self, root: &[u8; 32]) -> bool {
        if *root == self.current_root {
            return true;
        }
        self.root_history.iter().any(|r| r == root)
    }

    pub fn get_current_root(&self) -> [u8; 32] {
        self.current_root
    }

    pub fn get_next_leaf_index(&self) -> u64 {
        self.next_leaf_index
    }

    pub fn capacity(&self) -> u64 {
        1u64 << TREE_HEIGHT as u64
    }

    pub fn is_full(&self) -> bool {
        self.next_leaf_index >= self.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_is_reasonable() {
        assert!(MerkleTree::SPACE < 10_000_000);
    }

    #[test]
    fn zero_values_deterministic() {
        let a = MerkleTree::compute_zero_values().unwrap();
        let b = MerkleTree::compute_zero_values().unwrap();
        assert_eq!(a, b);
        assert!(poseidon::is_zero_hash(&a[0]));
    }

    #[test]
    fn insert_advances_index_and_root_history() {
        let mut tree = Box::new(MerkleTree {
            pool: Pubkey::default(),
            next_leaf_index: 0,
            root_cursor: 0,
            bump: 0,
            current_root: [0u8; 32],
            root_history: [[0u8; 32]; ROOT_HISTORY_SIZE],
            filled_subtrees: [[0u8; 32]; TREE_HEIGHT],
            zeros: [[0u8; 32]; TREE_HEIGHT + 1],
        });
        tree.initialize(Pubkey::default(), 255).unwrap();

        let empty_root = tree.current_root;
        let leaf = [7u8; 32];
        let index = tree.insert_leaf(leaf).unwrap();
        assert_eq!(index, 0);
        assert_eq!(tree.next_leaf_index, 1);
        assert_ne!(tree.current_root, empty_root);
        assert!(tree.is_known_root(&tree.current_root));
        assert!(tree.is_known_root(&empty_root));
    }

    #[test]
    fn insert_two_leaves_assigns_sequential_indices() {
        let mut tree = Box::new(MerkleTree {
            pool: Pubkey::default(),
            next_leaf_index: 0,
            root_cursor: 0,
            bump: 0,
            current_root: [0u8; 32],
            root_history: [[0u8; 32]; ROOT_HISTORY_SIZE],
            filled_subtrees: [[0u8; 32]; TREE_HEIGHT],
            zeros: [[0u8; 32]; TREE_HEIGHT + 1],
        });
        tree.initialize(Pubkey::default(), 255).unwrap();

        let (first, second) = tree.insert_two_leaves([1u8; 32], [2u8; 32]).unwrap();
        assert_eq!(first, 0);
        assert_eq!(second, 1);
        assert_eq!(tree.next_leaf_index, 2);
    }

    #[test]
    fn capacity_matches_tree_height() {
        let tree = Box::new(MerkleTree {
            pool: Pubkey::default(),
            next_leaf_index: 0,
            root_cursor: 0,
            bump: 0,
            current_root: [0u8; 32],
            root_history: [[0u8; 32]; ROOT_HISTORY_SIZE],
            filled_subtrees: [[0u8; 32]; TREE_HEIGHT],
            zeros: [[0u8; 32]; TREE_HEIGHT + 1],
        });
        assert_eq!(tree.capacity(), 1u64 << TREE_HEIGHT);
        assert!(!tree.is_full());
    }
}
