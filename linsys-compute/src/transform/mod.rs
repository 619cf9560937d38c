//! Transformations of whole equations, as used by the substitution and equalization methods.
//!
//! Every transformation is a pure function: it takes equations by reference and returns a new
//! [`Equation`](crate::model::Equation), so that the earlier lines of a notebook stay valid.

pub mod isolate;
pub mod simplify;
pub mod substitute;

pub use isolate::{
    compute_transformed_equation,
    divide_equation_by_factor,
    multiply_equation_by_factor,
    transform_equation,
};
pub use simplify::{combine_like_terms, to_standard_form};
pub use substitute::{equalize, substitute};
