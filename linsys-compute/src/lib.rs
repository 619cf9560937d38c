//! Exact-rational transformations of systems of two linear equations in two variables.
//!
//! This crate is the algebraic core of an exercise environment for the elimination, substitution
//! and equalization methods. It contains:
//!
//! - [`fraction::Fraction`], an exact rational number that is always stored in lowest terms,
//! - the [`model`] of terms, coefficients and equations,
//! - [`row::Row`] and its elementary operations, used by the elimination method,
//! - the [`transform`]ations used by the substitution and equalization methods (isolating a
//!   variable, substituting an isolated variable, equating two isolations),
//! - [`classify`], pure queries describing the shape of an equation,
//! - [`session`]s, which keep an undoable history of the student's steps.
//!
//! All algebra is pure: every operation returns a new value and leaves its inputs untouched.
//! Errors are returned as [`linsys_error::Error`]s, so they can be reported with [`ariadne`].
//!
//! ```
//! use linsys_compute::{ctxt::Ctxt, row::Row, transform::compute_transformed_equation};
//! use linsys_compute::model::Equation;
//!
//! let first: Equation = "2x + 3y = 12".parse().unwrap();
//! let second: Equation = "x - y = 1".parse().unwrap();
//!
//! let isolated = compute_transformed_equation(&second, "x").unwrap();
//! assert_eq!(isolated.to_string(), "x = 1 + y");
//!
//! let [a, b] = Row::initialize_rows(&first, &second, ("x", "y")).unwrap();
//! assert_eq!(a.add(&b, &Ctxt::default()).unwrap().to_string(), "(3, 2, 13)");
//! ```
//!
//! # Features
//!
//! - `serde`: Derives [`serde`] traits for the model types provided by this crate.

pub mod classify;
pub mod ctxt;
pub mod error;
pub mod eval;
pub mod fraction;
pub mod generate;
pub mod model;
pub mod primitive;
pub mod row;
pub mod session;
pub mod transform;
