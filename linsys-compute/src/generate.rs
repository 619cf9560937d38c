//! Random exercises.

use crate::{ctxt::Ctxt, error::Error, model::Equation, row::Row};
use log::debug;
use rand::Rng;
use std::ops::RangeInclusive;

/// The variables of a generated system.
pub const VARIABLES: (&str, &str) = ("x", "y");

/// The range of the values of the solution.
const SOLUTION_RANGE: RangeInclusive<i64> = -9..=9;

/// The range of the magnitudes of the coefficients.
const COEFFICIENT_RANGE: RangeInclusive<i64> = 1..=6;

/// How many systems are drawn before giving up on a context whose range is too small.
const MAX_ATTEMPTS: usize = 64;

fn coefficient<R: Rng + ?Sized>(rng: &mut R) -> i64 {
    let magnitude = rng.gen_range(COEFFICIENT_RANGE);
    if rng.gen_bool(0.5) { -magnitude } else { magnitude }
}

/// Draws two rows with integer coefficients whose system has the unique solution `(x, y)`.
fn random_rows<R: Rng + ?Sized>(rng: &mut R, x: i64, y: i64) -> [Row; 2] {
    let (a1, b1) = (coefficient(rng), coefficient(rng));
    let (a2, b2) = loop {
        let (a2, b2) = (coefficient(rng), coefficient(rng));
        if a1 * b2 != a2 * b1 {
            break (a2, b2);
        }
    };
    [Row::new(a1, b1, a1 * x + b1 * y), Row::new(a2, b2, a2 * x + b2 * y)]
}

/// Generates a system of two equations in `x` and `y` with a unique integer solution.
///
/// The solution is drawn from `-9..=9`, and the coefficients from `±1..=6`; systems whose
/// determinant is zero are rejected. Every number of the system is within the range of the
/// context, or the last range error is returned.
pub fn generate_system<R: Rng + ?Sized>(rng: &mut R, ctxt: &Ctxt) -> Result<[Equation; 2], Error> {
    let mut attempt = 0;
    loop {
        attempt += 1;
        let (x, y) = (rng.gen_range(SOLUTION_RANGE), rng.gen_range(SOLUTION_RANGE));
        let rows = random_rows(rng, x, y);
        match rows.iter().try_for_each(|row| ctxt.check_all(row.components())) {
            Ok(()) => {
                debug!("generated rows {} and {} with solution ({}, {})", rows[0], rows[1], x, y);
                return Ok([rows[0].to_equation(VARIABLES)?, rows[1].to_equation(VARIABLES)?]);
            },
            Err(err) if attempt >= MAX_ATTEMPTS => return Err(err),
            Err(_) => {},
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::kind::OperationOutOfRange;
    use crate::fraction::Fraction;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashMap;
    use super::*;

    /// Solves the system of two rows with Cramer's rule.
    fn solve(a: &Row, b: &Row) -> (Fraction, Fraction) {
        let det = &a.first * &b.second - &a.second * &b.first;
        assert!(!det.is_zero());
        let x = (&a.cost * &b.second - &a.second * &b.cost).checked_div(&det).unwrap();
        let y = (&a.first * &b.cost - &a.cost * &b.first).checked_div(&det).unwrap();
        (x, y)
    }

    #[test]
    fn unique_integer_solution() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let [first, second] = generate_system(&mut rng, &Ctxt::default()).unwrap();
            let [a, b] = Row::initialize_rows(&first, &second, VARIABLES).unwrap();
            let (x, y) = solve(&a, &b);
            assert!(x.is_integer() && y.is_integer());
            assert!(x.abs() <= Fraction::from(9) && y.abs() <= Fraction::from(9));

            let values = HashMap::from([("x".to_string(), x), ("y".to_string(), y)]);
            assert!(first.holds(&values).unwrap());
            assert!(second.holds(&values).unwrap());
        }
    }

    #[test]
    fn same_seed_same_system() {
        let first = generate_system(&mut StdRng::seed_from_u64(7), &Ctxt::default()).unwrap();
        let second = generate_system(&mut StdRng::seed_from_u64(7), &Ctxt::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn context_too_small() {
        let err = generate_system(&mut StdRng::seed_from_u64(1), &Ctxt::new(0, 1)).unwrap_err();
        assert!(err.is::<OperationOutOfRange>());
    }
}
