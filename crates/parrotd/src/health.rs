//! Structured health reporting for bot lifecycle events.

use std::sync::Arc;
use std::time::Duration;

use crate::bootstrap::BootstrapError;
use crate::store::StoreError;
use crate::transport::TransportError;

use parrot_config::Config;

const HEALTH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::health");

/// Observer trait used to surface lifecycle events to telemetry sinks.
pub trait HealthReporter: Send + Sync {
    /// Invoked before configuration loading begins.
    fn bootstrap_starting(&self);

    /// Invoked after bootstrap completes successfully.
    fn bootstrap_succeeded(&self, config: &Config);

    /// Invoked when bootstrap fails.
    fn bootstrap_failed(&self, error: &BootstrapError);

    /// Invoked before each connection attempt.
    fn connecting(&self, attempt: u32);

    /// Invoked once the handshake has been sent.
    fn session_established(&self);

    /// Invoked when a session ends with a transport failure.
    fn session_ended(&self, error: &TransportError, retry_in: Duration);

    /// Invoked after stores were written.
    fn flush_succeeded(&self, documents: usize);

    /// Invoked when writing the stores fails.
    fn flush_failed(&self, error: &StoreError);

    /// Invoked when a shutdown signal stops the loop.
    fn shutdown_requested(&self);
}

impl<T> HealthReporter for Arc<T>
where
    T: HealthReporter,
{
    fn bootstrap_starting(&self) {
        (**self).bootstrap_starting();
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        (**self).bootstrap_succeeded(config);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        (**self).bootstrap_failed(error);
    }

    fn connecting(&self, attempt: u32) {
        (**self).connecting(attempt);
    }

    fn session_established(&self) {
        (**self).session_established();
    }

    fn session_ended(&self, error: &TransportError, retry_in: Duration) {
        (**self).session_ended(error, retry_in);
    }

    fn flush_succeeded(&self, documents: usize) {
        (**self).flush_succeeded(documents);
    }

    fn flush_failed(&self, error: &StoreError) {
        (**self).flush_failed(error);
    }

    fn shutdown_requested(&self) {
        (**self).shutdown_requested();
    }
}

/// Default reporter that records lifecycle events using `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredHealthReporter;

impl StructuredHealthReporter {
    /// Builds a new reporter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl HealthReporter for StructuredHealthReporter {
    fn bootstrap_starting(&self) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_starting",
            "starting bot bootstrap"
        );
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_succeeded",
            server = %config.server(),
            channel = %config.channel,
            target_language = %config.target_language,
            data_dir = %config.data_dir,
            log_filter = %config.log_filter(),
            log_format = ?config.log_format(),
            "bot bootstrap completed"
        );
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        tracing::error!(
            target: HEALTH_TARGET,
            event = "bootstrap_failed",
            error = %error,
            "bot bootstrap failed"
        );
    }

    fn connecting(&self, attempt: u32) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "connecting",
            attempt,
            "connecting to chat server"
        );
    }

    fn session_established(&self) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "session_established",
            "joined chat channel"
        );
    }

    fn session_ended(&self, error: &TransportError, retry_in: Duration) {
        tracing::warn!(
            target: HEALTH_TARGET,
            event = "session_ended",
            error = %error,
            retry_in_ms = retry_in.as_millis(),
            "chat session ended"
        );
    }

    fn flush_succeeded(&self, documents: usize) {
        if documents > 0 {
            tracing::debug!(
                target: HEALTH_TARGET,
                event = "flush_succeeded",
                documents,
                "stores written"
            );
        }
    }

    fn flush_failed(&self, error: &StoreError) {
        tracing::error!(
            target: HEALTH_TARGET,
            event = "flush_failed",
            error = %error,
            "failed to write stores"
        );
    }

    fn shutdown_requested(&self) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "shutdown_requested",
            "shutdown requested"
        );
    }
}
