use linsys_error::Error;
use std::ops::Range;

/// Utility enum to package the errors of a command.
#[derive(Debug)]
pub enum ReplError {
    /// Several errors, such as one per equation of a system.
    Many(Vec<Error>),

    /// A single error.
    One(Error),
}

impl ReplError {
    /// Report the errors in this [`ReplError`] to stderr, highlighting their spans in the given
    /// input.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) {
        for err in self.errors() {
            if let Err(io_err) = err.report_to_stderr(src_id, input) {
                log::error!("could not print the report: {}", io_err);
            }
        }
    }

    /// Returns the packaged errors.
    pub fn errors(&self) -> &[Error] {
        match self {
            Self::Many(errs) => errs,
            Self::One(err) => std::slice::from_ref(err),
        }
    }
}

impl From<Error> for ReplError {
    fn from(err: Error) -> Self {
        Self::One(err)
    }
}

impl From<Vec<Error>> for ReplError {
    fn from(errs: Vec<Error>) -> Self {
        Self::Many(errs)
    }
}

/// Moves the spans of an error that was produced from a piece of the input line, so that they
/// point into the whole line.
pub fn shift(mut err: Error, offset: usize) -> Error {
    err.spans = err.spans
        .into_iter()
        .map(|Range { start, end }| start + offset..end + offset)
        .collect();
    err
}
