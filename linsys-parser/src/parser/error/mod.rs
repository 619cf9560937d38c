pub mod kind;

pub use linsys_error::Error;
