//! Exercise sessions, which keep an undoable history of the student's steps.
//!
//! A session owns its history and reports what the student does to a [`TelemetrySink`]. Nothing
//! outside of a session records telemetry.

pub mod elimination;
pub mod history;
pub mod notebook;
pub mod telemetry;

pub use elimination::{EliminationSession, OperationKind, RowOperation, State};
pub use history::History;
pub use notebook::{NotebookHint, NotebookSession};
pub use telemetry::{Action, TelemetryEvent, TelemetrySink};
