//! Installs the bot's `tracing` subscriber.
//!
//! Output goes to stderr as JSON lines or compact text, filtered by the
//! configured directive. The subscriber is process-global, so only the first
//! bootstrap installs it; that bootstrap also logs the identity and channel
//! the bot was started for.

use std::io::{self, IsTerminal};

use once_cell::sync::OnceCell;
use tracing::{Subscriber, info, subscriber::SetGlobalDefaultError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::{self, time::UtcTime};

use parrot_config::{Config, LogFormat};

pub(crate) const TELEMETRY_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::telemetry");

static TELEMETRY_GUARD: OnceCell<()> = OnceCell::new();

/// Proof that logging is configured.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryHandle {
    installed_now: bool,
}

impl TelemetryHandle {
    /// Returns true when this call installed the global subscriber.
    #[must_use]
    pub fn installed_now(self) -> bool {
        self.installed_now
    }
}

/// Errors encountered while configuring telemetry.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The configured log filter is not a valid directive.
    #[error("invalid log filter: {0}")]
    Filter(String),
    /// Another subscriber was already installed.
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(SetGlobalDefaultError),
}

/// Installs the subscriber described by `config` unless one is already in
/// place.
///
/// # Errors
///
/// Returns a [`TelemetryError`] when the filter does not parse or the global
/// default cannot be set.
pub fn initialise(config: &Config) -> Result<TelemetryHandle, TelemetryError> {
    let mut installed_now = false;
    TELEMETRY_GUARD.get_or_try_init(|| {
        install_subscriber(config)?;
        installed_now = true;
        Ok::<(), TelemetryError>(())
    })?;
    if installed_now {
        info!(
            target: TELEMETRY_TARGET,
            bot = %config.bot_username,
            channel = %config.channel,
            target_language = %config.target_language,
            format = %config.log_format(),
            filter = %config.log_filter(),
            "logging ready"
        );
    }
    Ok(TelemetryHandle { installed_now })
}

fn install_subscriber(config: &Config) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_new(config.log_filter())
        .map_err(|error| TelemetryError::Filter(error.to_string()))?;
    tracing::subscriber::set_global_default(build_subscriber(config.log_format(), filter))
        .map_err(TelemetryError::Subscriber)
}

fn build_subscriber(format: LogFormat, filter: EnvFilter) -> Box<dyn Subscriber + Send + Sync> {
    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_timer(UtcTime::rfc_3339());
    match format {
        LogFormat::Json => Box::new(builder.json().flatten_event(true).finish()),
        LogFormat::Compact => Box::new(builder.compact().finish()),
    }
}
