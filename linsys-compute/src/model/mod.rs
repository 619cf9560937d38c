//! The model of a linear equation: [`Coefficient`]s, [`Term`]s, and [`Equation`]s.

pub mod coefficient;
pub mod equation;
pub mod term;

pub use coefficient::Coefficient;
pub use equation::{Equation, Side};
pub use term::{Operator, Term};
