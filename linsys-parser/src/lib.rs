//! Tokenizer and parser for the input of a linear system solver: factor expressions such as
//! `-3/2` and equations such as `2x + 3y = 12`.
//!
//! Use [`parser::Parser`] to turn user input into an abstract syntax tree. Errors produced by the
//! parser carry the spans of the offending tokens, and can be reported with
//! [`linsys_error::Error::report_to_stderr`].

pub mod parser;
pub mod tokenizer;
