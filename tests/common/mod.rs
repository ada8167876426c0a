//! Shared test helpers.

#![allow(dead_code)]

use num_bigint::BigUint;

/// Parses a decimal literal into a `BigUint`.
///
/// # Panics
/// Panics on a malformed literal (test fixture error).
pub fn big(digits: &str) -> BigUint {
    digits.parse().expect("valid decimal literal")
}

/// The six ticks exercised by the original deployment scripts, paired with
/// the exact `floor(sqrt(1.0001^tick) * 2^96)` values.
pub const EXACT_SCRIPT_VALUES: [(i32, &str); 6] = [
    (-322400, "7914118585746382533283"),
    (-253400, "249254842926611791955256"),
    (-207400, "2485827413564259143490240"),
    (207400, "2525155890201713880629425236587124"),
    (253400, "25183469503278018405567370041933227"),
    (322400, "793152347589530806273839517798006814"),
];
