//! Supervises the bot's connect, poll, and reconnect cycle.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::StructuredHealthReporter;
use crate::bootstrap::{SystemConfigLoader, SystemServices, bootstrap_with};
use crate::dispatch::{ChatEngine, Outbox};
use crate::health::HealthReporter;
use crate::transport::{ChatTransport, Connector, TcpConnector, TransportError};

use super::PROCESS_TARGET;
use super::backoff::Backoff;
use super::errors::LaunchError;
use super::shutdown::{ShutdownFlag, ShutdownSignal};

// Longest uninterrupted sleep while waiting to reconnect.
const SLEEP_SLICE: Duration = Duration::from_millis(100);

/// Runs the bot using the production collaborators until a termination
/// signal arrives.
///
/// # Errors
///
/// Returns a [`LaunchError`] when bootstrap fails, signal handlers cannot be
/// installed, or the final store flush fails.
pub fn run_bot() -> Result<(), LaunchError> {
    let reporter = Arc::new(StructuredHealthReporter::new());
    let bot = bootstrap_with(&SystemConfigLoader, reporter, &SystemServices)?;
    let shutdown = ShutdownFlag::new();
    shutdown.install_signal_handlers()?;

    let (config, engine, reporter) = bot.into_parts();
    let mut connector = TcpConnector::from_config(&config);
    let mut supervisor = Supervisor::new(
        engine,
        reporter,
        Outbox::new(config.channel.clone()),
        Backoff::from_config(&config),
    );
    supervisor.run(&mut connector, &shutdown)?;
    info!(
        target: PROCESS_TARGET,
        "shutdown sequence completed"
    );
    Ok(())
}

/// How a session ended when the transport failed.
#[derive(Debug)]
struct SessionFailure {
    error: TransportError,
    productive: bool,
}

/// Owns the engine across sessions and drives the event loop.
pub(crate) struct Supervisor {
    engine: ChatEngine,
    reporter: Arc<dyn HealthReporter>,
    outbox: Outbox,
    backoff: Backoff,
}

impl Supervisor {
    pub(crate) fn new(
        engine: ChatEngine,
        reporter: Arc<dyn HealthReporter>,
        outbox: Outbox,
        backoff: Backoff,
    ) -> Self {
        Self {
            engine,
            reporter,
            outbox,
            backoff,
        }
    }

    /// Connects and processes chat until `shutdown` is raised, reconnecting
    /// after transport failures. Stores are flushed after every session and
    /// once more on the way out.
    pub(crate) fn run<C, S>(&mut self, connector: &mut C, shutdown: &S) -> Result<(), LaunchError>
    where
        C: Connector,
        S: ShutdownSignal,
    {
        let mut attempt: u32 = 0;
        while !shutdown.is_requested() {
            attempt = attempt.saturating_add(1);
            self.reporter.connecting(attempt);
            let failure = match connector.connect() {
                Ok(mut transport) => {
                    self.reporter.session_established();
                    match self.run_session(&mut transport, shutdown) {
                        Ok(()) => break,
                        Err(failure) => failure,
                    }
                }
                Err(error) => SessionFailure {
                    error,
                    productive: false,
                },
            };

            if failure.productive {
                self.backoff.reset();
                attempt = 0;
            }
            self.flush(Instant::now());
            let delay = self.backoff.next_delay();
            self.reporter.session_ended(&failure.error, delay);
            sleep_unless_shutdown(delay, shutdown);
        }

        self.reporter.shutdown_requested();
        self.engine
            .flush_now(Instant::now())
            .map(|written| self.reporter.flush_succeeded(written))
            .map_err(|source| {
                self.reporter.flush_failed(&source);
                LaunchError::FinalFlush { source }
            })
    }

    /// Polls one session until shutdown or a transport failure.
    fn run_session<T, S>(&mut self, transport: &mut T, shutdown: &S) -> Result<(), SessionFailure>
    where
        T: ChatTransport,
        S: ShutdownSignal,
    {
        let mut productive = false;
        let fail = |error, productive| SessionFailure { error, productive };
        while !shutdown.is_requested() {
            let lines = transport
                .poll_lines()
                .map_err(|error| fail(error, productive))?;
            productive |= !lines.is_empty();
            for line in &lines {
                self.engine
                    .handle_line(line, Instant::now(), &mut self.outbox);
                for outbound in self.outbox.drain() {
                    transport
                        .send_line(&outbound)
                        .map_err(|error| fail(error, productive))?;
                }
            }
            self.flush_if_due(Instant::now());
        }
        Ok(())
    }

    fn flush_if_due(&mut self, now: Instant) {
        match self.engine.flush_if_due(now) {
            Ok(Some(written)) => self.reporter.flush_succeeded(written),
            Ok(None) => {}
            Err(error) => self.reporter.flush_failed(&error),
        }
    }

    fn flush(&mut self, now: Instant) {
        match self.engine.flush_now(now) {
            Ok(written) => self.reporter.flush_succeeded(written),
            Err(error) => self.reporter.flush_failed(&error),
        }
    }

    #[cfg(test)]
    pub(crate) fn engine(&self) -> &ChatEngine {
        &self.engine
    }
}

fn sleep_unless_shutdown<S: ShutdownSignal>(delay: Duration, shutdown: &S) {
    let deadline = Instant::now() + delay;
    loop {
        if shutdown.is_requested() {
            debug!(target: PROCESS_TARGET, "reconnect wait interrupted by shutdown");
            return;
        }
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return;
        }
        thread::sleep(remaining.min(SLEEP_SLICE));
    }
}
