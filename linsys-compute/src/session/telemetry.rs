#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A step taken by the student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Action {
    Add,
    Subtract,
    Multiply,
    Divide,
    Isolate,
    Substitute,
    Equalize,
    Combine,
    Scale,
    Undo,
    Redo,
}

/// An event recorded by a [`TelemetrySink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TelemetryEvent {
    /// A step was applied successfully.
    Action(Action),

    /// A step was rejected.
    Error,

    /// A hint was requested.
    Hint,
}

/// Receives the events of a session.
///
/// Sessions report every successful step, every rejected step, and every hint request to their
/// sink. The algebra functions of this crate never report anything themselves.
pub trait TelemetrySink {
    /// Called when a step was applied successfully.
    fn record_action(&mut self, action: Action);

    /// Called when a step was rejected.
    fn record_error(&mut self);

    /// Called when a hint was requested.
    fn record_hint(&mut self);
}

/// Discards every event.
impl TelemetrySink for () {
    fn record_action(&mut self, _: Action) {}

    fn record_error(&mut self) {}

    fn record_hint(&mut self) {}
}

/// Collects every event, in order.
impl TelemetrySink for Vec<TelemetryEvent> {
    fn record_action(&mut self, action: Action) {
        self.push(TelemetryEvent::Action(action));
    }

    fn record_error(&mut self) {
        self.push(TelemetryEvent::Error);
    }

    fn record_hint(&mut self) {
        self.push(TelemetryEvent::Hint);
    }
}
