//! Presentation helpers for sqrtPriceX96 values.
//!
//! The deployment workflow records each value in four forms: plain
//! decimal, underscore-grouped decimal, `0x`-prefixed hex, and bit length.

use num_bigint::BigUint;

/// Decimal digits grouped in threes from the right with underscores.
pub fn underscore_grouped(value: &BigUint) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('_');
        }
        grouped.push(digit);
    }
    grouped
}

/// `0x`-prefixed lowercase hexadecimal.
pub fn hex_0x(value: &BigUint) -> String {
    format!("{value:#x}")
}

/// Number of significant bits; zero for zero.
pub fn bit_length(value: &BigUint) -> u64 {
    value.bits()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(digits: &str) -> BigUint {
        digits.parse().unwrap()
    }

    #[test]
    fn groups_from_the_right() {
        assert_eq!(underscore_grouped(&big("0")), "0");
        assert_eq!(underscore_grouped(&big("12")), "12");
        assert_eq!(underscore_grouped(&big("123")), "123");
        assert_eq!(underscore_grouped(&big("1234")), "1_234");
        assert_eq!(
            underscore_grouped(&big("79228162514264337593543950336")),
            "79_228_162_514_264_337_593_543_950_336"
        );
    }

    #[test]
    fn hex_is_lowercase_with_prefix() {
        assert_eq!(hex_0x(&big("255")), "0xff");
        assert_eq!(
            hex_0x(&big("2525155890201713880629425236587124")),
            "0x7c7ff2bc0c874defa100591fb274"
        );
    }

    #[test]
    fn bit_length_matches_magnitude() {
        assert_eq!(bit_length(&big("0")), 0);
        assert_eq!(bit_length(&big("1")), 1);
        assert_eq!(bit_length(&big("79228162514264337593543950336")), 97);
    }
}
