use linsys_compute::session::{Action, TelemetrySink};
use log::info;

/// Forwards the events of a session to the log, and counts them.
#[derive(Debug, Clone, Default)]
pub struct LogSink {
    pub actions: usize,
    pub errors: usize,
    pub hints: usize,
}

impl TelemetrySink for LogSink {
    fn record_action(&mut self, action: Action) {
        self.actions += 1;
        info!(target: "telemetry", "action {:?}", action);
    }

    fn record_error(&mut self) {
        self.errors += 1;
        info!(target: "telemetry", "error");
    }

    fn record_hint(&mut self) {
        self.hints += 1;
        info!(target: "telemetry", "hint");
    }
}
