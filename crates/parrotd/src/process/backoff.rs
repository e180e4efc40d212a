use std::time::Duration;

use parrot_config::Config;

/// Exponential reconnect delay.
///
/// The first failure waits `initial`; each further consecutive failure doubles
/// the wait up to `max`. A productive session resets the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backoff {
    initial: Duration,
    max: Duration,
    next: Duration,
}

impl Backoff {
    /// Builds a backoff; `max` is raised to `initial` when smaller.
    #[must_use]
    pub fn new(initial: Duration, max: Duration) -> Self {
        Self {
            initial,
            max: max.max(initial),
            next: initial,
        }
    }

    /// Builds the backoff from the reconnect settings.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.reconnect_delay(), config.reconnect_max_delay())
    }

    /// Returns the delay to wait now and advances the sequence.
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.next;
        self.next = delay.saturating_mul(2).min(self.max);
        delay
    }

    /// Restarts the sequence at the initial delay.
    pub fn reset(&mut self) {
        self.next = self.initial;
    }
}
