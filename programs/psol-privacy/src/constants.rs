//! Program-wide constants fixed by the circuit binding (SPEC_FULL.md §4.B,
//! §4.D). These are not per-pool configurable: a pool initialized against
//! one height or one public-input count can never interoperate with a
//! circuit compiled for another.

/// Tree height. Capacity is `2^TREE_HEIGHT` leaves.
pub const TREE_HEIGHT: usize = 26;

/// Size of the root-history ring buffer (`K` in SPEC_FULL.md §3/§4.B).
pub const ROOT_HISTORY_SIZE: usize = 100;

/// Basis-point denominator used throughout the fee policy.
pub const BPS_DENOMINATOR: u64 = 10_000;
