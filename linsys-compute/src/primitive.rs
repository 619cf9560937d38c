//! Functions to construct [`Integer`]s and [`Rational`]s from various types.

use rug::{ops::Pow, Integer, Rational};

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates an [`Integer`] from a string of decimal digits. Returns [`None`] if the string is not
/// a valid integer.
pub fn int_from_str(s: &str) -> Option<Integer> {
    Integer::from_str_radix(s, 10).ok()
}

/// Returns `10^exp` as an [`Integer`].
pub fn pow10(exp: u32) -> Integer {
    int(10).pow(exp)
}

/// Creates a [`Rational`] from the digits before and after the decimal point of a decimal number.
///
/// For example, `("2", "25")` is `9/4`. Returns [`None`] if either part contains something other
/// than decimal digits.
pub fn rational_from_decimal(integer: &str, fractional: &str) -> Option<Rational> {
    let integer = int_from_str(integer)?;
    if fractional.is_empty() {
        return Some(Rational::from(integer));
    }

    let scale = pow10(fractional.len() as u32);
    let fractional = int_from_str(fractional)?;
    Some(Rational::from((integer * &scale + fractional, scale)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_to_rational() {
        assert_eq!(rational_from_decimal("2", "5"), Some(Rational::from((5, 2))));
        assert_eq!(rational_from_decimal("0", "125"), Some(Rational::from((1, 8))));
        assert_eq!(rational_from_decimal("12", "00"), Some(Rational::from(12)));
        assert_eq!(rational_from_decimal("7", ""), Some(Rational::from(7)));
    }

    #[test]
    fn invalid_digits() {
        assert_eq!(int_from_str("12a"), None);
        assert_eq!(rational_from_decimal("1", "x"), None);
    }
}
