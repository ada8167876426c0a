//! sqrtprice-math: arbitrary-precision tick to sqrtPriceX96 conversion.
//!
//! Maps a signed tick on the 1.0001-base price grid to
//! `floor(sqrt(1.0001^tick) * 2^96)`, the Q64.96 square-root price used by
//! concentrated-liquidity pools. The exponentiation runs over exact
//! integers (`1.0001 = 10001/10000`); rounding happens once, at the final
//! integer square root.

pub mod convert;
pub mod format;
pub mod precision;
pub mod tick;
pub mod verify;

pub use convert::{
    sqrt_price_x96, sqrt_price_x96_checked, sqrt_price_x96_with_precision, X96_FRAC_BITS,
};
pub use precision::Precision;
pub use tick::{validate_tick, MAX_TICK, MIN_TICK};
pub use verify::{check_tick, run_self_check, CheckOutcome, DEFAULT_TICKS};
