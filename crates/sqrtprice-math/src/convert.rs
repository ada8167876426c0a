//! Tick to sqrtPriceX96 conversion.
//!
//! ## Math
//!
//! For tick `t`, the Q64.96 square-root price is
//!
//! ```text
//! sqrtPriceX96 = floor(sqrt(1.0001^t) * 2^96)
//! ```
//!
//! with `1.0001 = 10001/10000`. Raising a rounded approximation of the
//! base to the `t`-th power compounds error over `|t|` multiplications, so
//! the powers are taken over exact integers instead:
//!
//! ```text
//! t >= 0:  ratio = 10001^t / 10000^t
//! t <  0:  ratio = 10000^|t| / 10001^|t|
//! ```
//!
//! The ratio is scaled into fixed point and a single truncated integer
//! square root produces the result. All rounding lives in that one step.
//!
//! ## No f64 in Computation
//!
//! The computation path is integer-only end to end. At tick magnitudes in
//! the hundreds of thousands the result spans well over 100 bits; double
//! precision cannot reproduce the floor bit-exactly.

use eyre::{eyre, Result};
use num_bigint::BigUint;
use tracing::debug;

use crate::precision::Precision;
use crate::tick::validate_tick;

/// Fractional bits of the Q64.96 output.
pub const X96_FRAC_BITS: u32 = 96;

/// Converts a tick to sqrtPriceX96 at the default precision.
///
/// # Errors
/// Returns an error when `tick` is outside the supported range.
pub fn sqrt_price_x96(tick: i32) -> Result<BigUint> {
    sqrt_price_x96_with_precision(tick, Precision::default())
}

/// Converts a tick to sqrtPriceX96 at an explicit working precision.
///
/// # Errors
/// Returns an error when `tick` is outside the supported range.
pub fn sqrt_price_x96_with_precision(tick: i32, precision: Precision) -> Result<BigUint> {
    validate_tick(tick)?;
    debug!(tick, frac_bits = precision.frac_bits(), "converting tick");
    Ok(convert_at(tick, precision.frac_bits()))
}

/// Converts a tick and verifies the result is stable under widened
/// precision.
///
/// Recomputes with [`Precision::WIDEN_STEP_BITS`] extra fractional bits; a
/// disagreement means the requested guard budget was insufficient.
///
/// # Errors
/// Returns an error when `tick` is out of range or the two computations
/// disagree.
pub fn sqrt_price_x96_checked(tick: i32, precision: Precision) -> Result<BigUint> {
    validate_tick(tick)?;
    let narrow = convert_at(tick, precision.frac_bits());
    let wide = convert_at(tick, precision.widened().frac_bits());
    if narrow != wide {
        return Err(eyre!(
            "precision of {} fractional bits is insufficient for tick {}: widening by {} bits changed the result",
            precision.frac_bits(),
            tick,
            Precision::WIDEN_STEP_BITS
        ));
    }
    Ok(narrow)
}

/// `floor(sqrt((10001/10000)^tick) * 2^frac_bits)`, rescaled to 96
/// fractional bits.
fn convert_at(tick: i32, frac_bits: u32) -> BigUint {
    let n = tick.unsigned_abs();
    let (numerator, denominator) = if tick >= 0 {
        (pow_10001(n), pow_10000(n))
    } else {
        (pow_10000(n), pow_10001(n))
    };

    // radicand = floor(ratio * 2^(2 * frac_bits)). For x >= 0,
    // floor(isqrt(floor(x))) == floor(sqrt(x)), so this floor division
    // cannot move the rounded root.
    let radicand = (numerator << (2 * frac_bits)) / denominator;
    let root = radicand.sqrt();
    root >> (frac_bits - X96_FRAC_BITS)
}

fn pow_10001(exponent: u32) -> BigUint {
    BigUint::from(10001u32).pow(exponent)
}

fn pow_10000(exponent: u32) -> BigUint {
    BigUint::from(10000u32).pow(exponent)
}
