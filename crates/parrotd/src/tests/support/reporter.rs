//! Test double for [`HealthReporter`] that records structured events for assertions.

use std::sync::Mutex;
use std::time::Duration;

use crate::bootstrap::BootstrapError;
use crate::health::HealthReporter;
use crate::store::StoreError;
use crate::transport::TransportError;

use parrot_config::Config;

/// Structured health events tracked during scenarios.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthEvent {
    BootstrapStarting,
    BootstrapSucceeded,
    BootstrapFailed(String),
    Connecting(u32),
    SessionEstablished,
    SessionEnded { error: String, retry_in: Duration },
    FlushSucceeded(usize),
    FlushFailed(String),
    ShutdownRequested,
}

/// Records health events for assertions.
#[derive(Debug, Default)]
pub struct RecordingHealthReporter {
    events: Mutex<Vec<HealthEvent>>,
}

impl RecordingHealthReporter {
    /// Captures a copy of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<HealthEvent> {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .clone()
    }

    pub fn record(&self, event: HealthEvent) {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .push(event);
    }
}

impl HealthReporter for RecordingHealthReporter {
    fn bootstrap_starting(&self) {
        self.record(HealthEvent::BootstrapStarting);
    }

    fn bootstrap_succeeded(&self, _config: &Config) {
        self.record(HealthEvent::BootstrapSucceeded);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        self.record(HealthEvent::BootstrapFailed(error.to_string()));
    }

    fn connecting(&self, attempt: u32) {
        self.record(HealthEvent::Connecting(attempt));
    }

    fn session_established(&self) {
        self.record(HealthEvent::SessionEstablished);
    }

    fn session_ended(&self, error: &TransportError, retry_in: Duration) {
        self.record(HealthEvent::SessionEnded {
            error: error.to_string(),
            retry_in,
        });
    }

    fn flush_succeeded(&self, documents: usize) {
        self.record(HealthEvent::FlushSucceeded(documents));
    }

    fn flush_failed(&self, error: &StoreError) {
        self.record(HealthEvent::FlushFailed(error.to_string()));
    }

    fn shutdown_requested(&self) {
        self.record(HealthEvent::ShutdownRequested);
    }
}
