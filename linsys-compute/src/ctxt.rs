use crate::{
    error::{kind::OperationOutOfRange, Error},
    fraction::Fraction,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The default bound for both the numerator and the denominator of a displayed fraction.
pub const DEFAULT_MAX_COMPONENT: u32 = 999;

/// The context in which rows and equations are transformed.
///
/// The context holds the display range policy: the result of an operation is rejected with
/// [`OperationOutOfRange`] if any of its coefficients, in lowest terms, has a numerator or a
/// denominator larger than the bound. The bound is not a mathematical limit; it keeps the fractions
/// shown to the student legible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ctxt {
    /// The largest allowed magnitude of a reduced numerator.
    pub max_numerator: u32,

    /// The largest allowed reduced denominator.
    pub max_denominator: u32,
}

impl Default for Ctxt {
    fn default() -> Self {
        Self {
            max_numerator: DEFAULT_MAX_COMPONENT,
            max_denominator: DEFAULT_MAX_COMPONENT,
        }
    }
}

impl Ctxt {
    /// Creates a context with the given bounds.
    pub fn new(max_numerator: u32, max_denominator: u32) -> Self {
        Self { max_numerator, max_denominator }
    }

    /// Creates a context that accepts every fraction.
    pub fn unbounded() -> Self {
        Self::new(u32::MAX, u32::MAX)
    }

    /// Returns true if the fraction can be displayed under this context.
    pub fn is_in_range(&self, value: &Fraction) -> bool {
        value.numerator() <= self.max_numerator && *value.denominator() <= self.max_denominator
    }

    /// Returns [`OperationOutOfRange`] if the fraction cannot be displayed under this context.
    pub fn check_range(&self, value: &Fraction) -> Result<(), Error> {
        if self.is_in_range(value) {
            Ok(())
        } else {
            Err(Error::spanless(OperationOutOfRange {
                value: value.to_string(),
                max_numerator: self.max_numerator,
                max_denominator: self.max_denominator,
            }))
        }
    }

    /// Checks every fraction of the iterator, stopping at the first one out of range.
    pub fn check_all<'a>(&self, values: impl IntoIterator<Item = &'a Fraction>) -> Result<(), Error> {
        values.into_iter().try_for_each(|value| self.check_range(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bound() {
        let ctxt = Ctxt::default();
        assert!(ctxt.is_in_range(&Fraction::new(-999, 998).unwrap()));
        assert!(!ctxt.is_in_range(&Fraction::from(1000)));
        assert!(!ctxt.is_in_range(&Fraction::new(1, 1000).unwrap()));
    }

    #[test]
    fn out_of_range_error() {
        let err = Ctxt::new(10, 10).check_range(&Fraction::from(-11)).unwrap_err();
        assert_eq!(err.downcast_ref::<OperationOutOfRange>(), Some(&OperationOutOfRange {
            value: "-11".to_string(),
            max_numerator: 10,
            max_denominator: 10,
        }));
    }

    #[test]
    fn unbounded() {
        assert!(Ctxt::unbounded().is_in_range(&Fraction::new(123_456_789, 1_000_003).unwrap()));
    }
}
