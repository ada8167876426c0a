//! Working precision for the fixed-point square root.
//!
//! The original workflow configured a process-global decimal precision
//! before computing anything. Here precision is an explicit value threaded
//! into each conversion call, so no hidden global state is involved.

use eyre::{eyre, Result};

/// Number of fractional bits carried through the square-root step.
///
/// The conversion scales the exact ratio `(10001/10000)^tick` to
/// `frac_bits` fractional bits before taking the integer square root, then
/// shifts the root down to the 96 fractional bits of the Q64.96 output.
/// Bits beyond 96 are guard bits.
///
/// The power step is exact, so the only rounding ahead of the square root
/// is the floor division that forms the radicand, and
/// `floor(isqrt(floor(x))) == floor(sqrt(x))` for any `x >= 0` — the guard
/// budget does not have to grow with `|tick|`. The default still carries
/// [`Precision::DEFAULT_GUARD_BITS`] guard bits, and
/// [`crate::sqrt_price_x96_checked`] verifies the budget instead of
/// assuming it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Precision {
    frac_bits: u32,
}

impl Precision {
    /// Minimum fractional bits: the output scale itself.
    pub const MIN_FRAC_BITS: u32 = 96;

    /// Guard bits carried by [`Precision::default`].
    pub const DEFAULT_GUARD_BITS: u32 = 32;

    /// Extra bits used when cross-checking a result at widened precision.
    pub const WIDEN_STEP_BITS: u32 = 64;

    /// Creates a precision of `frac_bits` fractional bits.
    ///
    /// # Errors
    /// Returns an error when `frac_bits` is below [`Precision::MIN_FRAC_BITS`].
    pub fn new(frac_bits: u32) -> Result<Self> {
        if frac_bits < Self::MIN_FRAC_BITS {
            return Err(eyre!(
                "precision of {} fractional bits is below the {}-bit output scale",
                frac_bits,
                Self::MIN_FRAC_BITS
            ));
        }
        Ok(Self { frac_bits })
    }

    /// Precision with `guard` bits beyond the output scale.
    pub fn with_guard_bits(guard: u32) -> Self {
        Self {
            frac_bits: Self::MIN_FRAC_BITS + guard,
        }
    }

    /// Total fractional bits.
    pub fn frac_bits(&self) -> u32 {
        self.frac_bits
    }

    /// Guard bits beyond the output scale.
    pub fn guard_bits(&self) -> u32 {
        self.frac_bits - Self::MIN_FRAC_BITS
    }

    /// The same precision widened by [`Precision::WIDEN_STEP_BITS`].
    pub fn widened(&self) -> Self {
        Self {
            frac_bits: self.frac_bits + Self::WIDEN_STEP_BITS,
        }
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self::with_guard_bits(Self::DEFAULT_GUARD_BITS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_carries_guard_bits() {
        let precision = Precision::default();
        assert_eq!(precision.frac_bits(), 128);
        assert_eq!(precision.guard_bits(), Precision::DEFAULT_GUARD_BITS);
    }

    #[test]
    fn rejects_sub_output_scale() {
        assert!(Precision::new(95).is_err());
        assert!(Precision::new(0).is_err());
        assert_eq!(Precision::new(96).unwrap().guard_bits(), 0);
    }

    #[test]
    fn widened_adds_step() {
        let precision = Precision::with_guard_bits(0);
        assert_eq!(
            precision.widened().frac_bits(),
            96 + Precision::WIDEN_STEP_BITS
        );
    }
}
