use std::time::{Duration, Instant};

/// Decides when the stores are written out.
///
/// Flushes are time-gated: one is due once `interval` has elapsed since the
/// previous flush. Commands that change the override store may ask for an
/// early flush, which becomes due at the next check.
#[derive(Debug, Clone)]
pub struct FlushSchedule {
    interval: Duration,
    last_flush: Instant,
    requested: bool,
}

impl FlushSchedule {
    /// Starts the schedule with `now` as the last flush time.
    #[must_use]
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last_flush: now,
            requested: false,
        }
    }

    /// Asks for a flush at the next check, regardless of the interval.
    pub fn request(&mut self) {
        self.requested = true;
    }

    /// Returns true when a flush should run at `now`.
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        self.requested || now.saturating_duration_since(self.last_flush) > self.interval
    }

    /// Records a completed flush.
    pub fn mark_flushed(&mut self, now: Instant) {
        self.last_flush = now;
        self.requested = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn due_only_after_interval() {
        let start = Instant::now();
        let mut schedule = FlushSchedule::new(Duration::from_secs(30), start);
        assert!(!schedule.is_due(start + Duration::from_secs(30)));
        assert!(schedule.is_due(start + Duration::from_secs(31)));

        schedule.mark_flushed(start + Duration::from_secs(31));
        assert!(!schedule.is_due(start + Duration::from_secs(40)));
    }

    #[test]
    fn request_makes_flush_due_immediately() {
        let start = Instant::now();
        let mut schedule = FlushSchedule::new(Duration::from_secs(30), start);
        schedule.request();
        assert!(schedule.is_due(start));
        schedule.mark_flushed(start);
        assert!(!schedule.is_due(start));
    }
}
