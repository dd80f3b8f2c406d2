//! Poll interval policy for waiting on jobs.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How often the client polls a job while waiting for it.
///
/// The first poll happens immediately; after each non-terminal status the
/// client sleeps for the current interval, then multiplies it by `backoff`
/// up to `max_interval_ms`. A `backoff` of `1.0` gives a fixed interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollPolicy {
    /// First sleep between polls, in milliseconds.
    pub initial_interval_ms: u64,
    /// Upper bound on the sleep, in milliseconds.
    pub max_interval_ms: u64,
    /// Growth factor applied after every poll.
    pub backoff: f64,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            initial_interval_ms: 500,
            max_interval_ms: 5_000,
            backoff: 2.0,
        }
    }
}

impl PollPolicy {
    /// Poll at a fixed interval.
    pub fn fixed(interval: Duration) -> Self {
        let ms = duration_ms(interval);
        Self {
            initial_interval_ms: ms,
            max_interval_ms: ms,
            backoff: 1.0,
        }
    }

    /// Exponential backoff from `initial` up to `max`.
    pub fn exponential(initial: Duration, max: Duration, backoff: f64) -> Self {
        Self {
            initial_interval_ms: duration_ms(initial),
            max_interval_ms: duration_ms(max),
            backoff,
        }
    }

    /// The first sleep interval (never zero).
    pub fn initial_interval(&self) -> Duration {
        Duration::from_millis(self.initial_interval_ms.max(1)).min(self.max_interval())
    }

    /// The largest sleep interval (never zero).
    pub fn max_interval(&self) -> Duration {
        Duration::from_millis(self.max_interval_ms.max(1))
    }

    /// Interval following `current`.
    pub fn next_interval(&self, current: Duration) -> Duration {
        let factor = if self.backoff.is_finite() {
            self.backoff.max(1.0)
        } else {
            1.0
        };
        let max = self.max_interval();
        let next = current.as_secs_f64() * factor;
        if next >= max.as_secs_f64() {
            max
        } else {
            Duration::from_secs_f64(next)
        }
    }

    /// The sequence of sleep intervals, starting with the first.
    pub fn intervals(&self) -> impl Iterator<Item = Duration> + '_ {
        std::iter::successors(Some(self.initial_interval()), |&d| {
            Some(self.next_interval(d))
        })
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
