//! Tick bounds for the 1.0001-base price grid.

use eyre::{eyre, Result};

/// Lowest tick representable in the Q64.96 square-root price.
pub const MIN_TICK: i32 = -887272;

/// Highest tick representable in the Q64.96 square-root price.
///
/// `sqrt(1.0001^MAX_TICK) * 2^96` is a 160-bit integer, the widest value
/// the on-chain `uint160` encoding can hold.
pub const MAX_TICK: i32 = 887272;

/// Checks that `tick` lies within [`MIN_TICK`]`..=`[`MAX_TICK`].
///
/// # Errors
/// Returns an error for out-of-range ticks. Beyond the representable range
/// the exact exponentiation would also grow without bound, so rejection
/// happens before any allocation.
pub fn validate_tick(tick: i32) -> Result<()> {
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(eyre!(
            "tick {} outside supported range {}..={}",
            tick,
            MIN_TICK,
            MAX_TICK
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_symmetric() {
        assert_eq!(MIN_TICK, -MAX_TICK);
    }

    #[test]
    fn accepts_in_range_ticks() {
        for tick in [MIN_TICK, -1, 0, 1, MAX_TICK] {
            assert!(validate_tick(tick).is_ok(), "tick {tick} should be valid");
        }
    }

    #[test]
    fn rejects_out_of_range_ticks() {
        for tick in [MIN_TICK - 1, MAX_TICK + 1, i32::MIN, i32::MAX] {
            assert!(validate_tick(tick).is_err(), "tick {tick} should be rejected");
        }
    }
}
