//! Batch self-check against the legacy cross-check table.
//!
//! The deployment scripts carried four hardcoded `tick -> sqrtPriceX96`
//! values and compared every run against them. Those values predate the
//! exact-integer-power computation and disagree with it beyond roughly
//! eleven significant digits, so a disagreement here is a report entry
//! with a signed difference, not a failure: the remaining ticks are still
//! converted.

use eyre::Result;
use num_bigint::{BigInt, BigUint};
use tracing::warn;

use crate::convert::sqrt_price_x96_with_precision;
use crate::precision::Precision;

/// Ticks exercised by the original deployment scripts.
pub const DEFAULT_TICKS: [i32; 6] = [-322400, -253400, -207400, 207400, 253400, 322400];

/// Legacy cross-check values, keyed by tick.
pub const CROSS_CHECK_TABLE: [(i32, &str); 4] = [
    (-322400, "7914118485757900357632"),
    (-253400, "249254842934311822295040"),
    (253400, "25183469503242882170212176944431104"),
    (322400, "793152347588122760560699178810867712"),
];

/// Outcome of converting one tick during a self-check run.
#[derive(Clone, Debug)]
pub struct CheckOutcome {
    /// Tick that was converted.
    pub tick: i32,
    /// Computed sqrtPriceX96.
    pub computed: BigUint,
    /// Cross-check value, when the tick is in the table.
    pub expected: Option<BigUint>,
    /// `computed - expected`, when a cross-check value exists.
    pub difference: Option<BigInt>,
}

impl CheckOutcome {
    /// `Some(true)` on a match, `Some(false)` on a mismatch, `None` when
    /// the tick has no cross-check value.
    pub fn matched(&self) -> Option<bool> {
        self.expected
            .as_ref()
            .map(|expected| *expected == self.computed)
    }
}

/// Cross-check value for `tick`, when the table has one.
pub fn expected_for(tick: i32) -> Option<BigUint> {
    CROSS_CHECK_TABLE
        .iter()
        .find(|(table_tick, _)| *table_tick == tick)
        .and_then(|(_, digits)| digits.parse().ok())
}

/// Converts one tick and compares it against the cross-check table.
///
/// # Errors
/// Returns an error when the tick is out of range; a cross-check mismatch
/// is recorded in the outcome, not an error.
pub fn check_tick(tick: i32, precision: Precision) -> Result<CheckOutcome> {
    let computed = sqrt_price_x96_with_precision(tick, precision)?;
    let expected = expected_for(tick);
    let difference = expected
        .as_ref()
        .map(|expected| BigInt::from(computed.clone()) - BigInt::from(expected.clone()));

    Ok(CheckOutcome {
        tick,
        computed,
        expected,
        difference,
    })
}

/// Runs the self-check over `ticks`, reporting mismatches and continuing.
///
/// # Errors
/// Returns an error only when a tick cannot be converted at all.
pub fn run_self_check(ticks: &[i32], precision: Precision) -> Result<Vec<CheckOutcome>> {
    let mut outcomes = Vec::with_capacity(ticks.len());
    for &tick in ticks {
        let outcome = check_tick(tick, precision)?;
        if outcome.matched() == Some(false) {
            warn!(
                tick,
                computed = %outcome.computed,
                expected = %outcome.expected.as_ref().map(ToString::to_string).unwrap_or_default(),
                difference = %outcome.difference.as_ref().map(ToString::to_string).unwrap_or_default(),
                "cross-check mismatch"
            );
        }
        outcomes.push(outcome);
    }
    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_ticks_have_expected_values() {
        for (tick, digits) in CROSS_CHECK_TABLE {
            let expected = expected_for(tick).unwrap();
            assert_eq!(expected.to_string(), digits);
        }
        assert!(expected_for(-207400).is_none());
        assert!(expected_for(0).is_none());
    }

    #[test]
    fn mismatch_is_reported_not_fatal() {
        let outcome = check_tick(-253400, Precision::default()).unwrap();
        assert_eq!(outcome.matched(), Some(false));
        assert_eq!(
            outcome.difference.unwrap().to_string(),
            "-7700030339784"
        );
    }

    #[test]
    fn untabled_tick_has_no_verdict() {
        let outcome = check_tick(0, Precision::default()).unwrap();
        assert_eq!(outcome.matched(), None);
        assert!(outcome.difference.is_none());
        assert_eq!(
            outcome.computed.to_string(),
            "79228162514264337593543950336"
        );
    }

    #[test]
    fn run_continues_past_mismatches() {
        let outcomes = run_self_check(&[-253400, 0], Precision::default()).unwrap();
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].matched(), Some(false));
        assert_eq!(outcomes[1].matched(), None);
    }

    #[test]
    fn out_of_range_tick_propagates_error() {
        assert!(check_tick(900000, Precision::default()).is_err());
    }
}
