//! Fee policy (SPEC_FULL.md §4.E).
//!
//! Deposits and withdrawals pay a basis-point fee against the magnitude
//! of `ext_amount`; `min_fee` itself bakes in `fee_error_margin_bps` as a
//! tolerance below the raw expected fee, since the client may have priced
//! the fee slightly differently (e.g. against a stale config snapshot)
//! than the program sees it at execution time. `validate_fee` then accepts
//! any caller-supplied fee at or above that floor.

use crate::constants::BPS_DENOMINATOR;
use crate::state::pool_config::PoolConfig;

/// `expected = |ext_amount| * rate_bps / BPS_DENOMINATOR`, where `rate_bps`
/// is the deposit rate for `ext_amount >= 0` and the withdrawal rate for
/// `ext_amount < 0`; `tolerance = expected * fee_error_margin_bps /
/// BPS_DENOMINATOR`. Returns `expected - tolerance`, saturating at zero and
/// never overflowing on pathological (fee_rate, amount) combinations.
pub fn min_fee(ext_amount: i64, config: &PoolConfig) -> u64 {
    let magnitude = ext_amount.unsigned_abs();
    let rate_bps = if ext_amount >= 0 {
        config.deposit_fee_rate_bps
    } else {
        config.withdrawal_fee_rate_bps
    };
    let expected = magnitude.saturating_mul(rate_bps as u64) / BPS_DENOMINATOR;
    let tolerance = expected.saturating_mul(config.fee_error_margin_bps as u64) / BPS_DENOMINATOR;
    expected.saturating_sub(tolerance)
}

/// `true` iff `provided_fee >= min_fee(ext_amount, config)`.
pub fn validate_fee(ext_amount: i64, provided_fee: u64, config: &PoolConfig) -> bool {
    provided_fee >= min_fee(ext_amount, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(deposit_bps: u16, withdrawal_bps: u16, margin_bps: u16) -> PoolConfig {
        let mut c = PoolConfig {
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
        };
        c.set_paused(false);
        c
    }

    #[test]
    fn deposit_fee_uses_deposit_rate() {
        let c = config(100, 50, 0); // 1% deposit, 0.5% withdrawal
        assert_eq!(min_fee(1_000_000, &c), 10_000);
    }

    #[test]
    fn withdrawal_fee_uses_withdrawal_rate() {
        let c = config(100, 50, 0);
        assert_eq!(min_fee(-1_000_000, &c), 5_000);
    }

    #[test]
    fn exact_fee_is_always_valid() {
        let c = config(100, 50, 0);
        let required = min_fee(1_000_000, &c);
        assert!(validate_fee(1_000_000, required, &c));
    }

    #[test]
    fn overpaying_is_valid() {
        let c = config(100, 50, 0);
        let required = min_fee(1_000_000, &c);
        assert!(validate_fee(1_000_000, required + 1, &c));
    }

    #[test]
    fn margin_lowers_the_floor() {
        // withdrawal rate 25 bps, margin 500 bps, ext_amount = -1_000_000
        // (spec §8 end-to-end scenario 4): expected = 2500, tolerance =
        // 125, floor = 2375.
        let c = config(0, 25, 500);
        let required = min_fee(-1_000_000, &c);
        assert_eq!(required, 2_375);
        assert!(!validate_fee(-1_000_000, 2_374, &c));
        assert!(validate_fee(-1_000_000, 2_375, &c));
    }

    #[test]
    fn underpaying_beyond_margin_is_rejected() {
        let c = config(100, 50, 10); // 0.1% tolerance
        let required = min_fee(1_000_000, &c);
        assert!(!validate_fee(1_000_000, required - 1, &c));
    }

    #[test]
    fn zero_amount_requires_zero_fee() {
        let c = config(100, 50, 0);
        assert_eq!(min_fee(0, &c), 0);
        assert!(validate_fee(0, 0, &c));
    }

    #[test]
    fn zero_margin_requires_exact_expected_floor() {
        let c = config(100, 50, 0);
        let expected = 1_000_000u64 * 100 / 10_000;
        assert_eq!(min_fee(1_000_000, &c), expected);
    }
}
