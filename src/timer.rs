use std::time::{Duration, Instant};

use crate::error::TimerError;

/// Periodic tick source the engine arms on every (re)initialization.
pub trait TickTimer {
    /// Starts producing ticks every `interval`, replacing any previous schedule.
    fn arm(&mut self, interval: Duration) -> Result<(), TimerError>;

    /// Stops producing ticks.
    fn cancel(&mut self);

    fn is_armed(&self) -> bool;
}

#[derive(Debug, Clone, Copy)]
struct Schedule {
    interval: Duration,
    next_due: Instant,
}

/// Polled monotonic timer for a game loop that owns its own scheduling.
#[derive(Debug, Clone, Default)]
pub struct IntervalTimer {
    schedule: Option<Schedule>,
}

impl IntervalTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true once per elapsed interval.
    ///
    /// A late poll fires a single tick and re-schedules from `now`, so a
    /// stalled loop never produces a burst of catch-up ticks.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        let Some(schedule) = self.schedule.as_mut() else {
            return false;
        };

        if now < schedule.next_due {
            return false;
        }

        let next = schedule.next_due + schedule.interval;
        schedule.next_due = if next > now {
            next
        } else {
            now + schedule.interval
        };
        true
    }

    /// Time left until the next tick; `None` when disarmed.
    #[must_use]
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.schedule
            .map(|schedule| schedule.next_due.saturating_duration_since(now))
    }

    fn arm_at(&mut self, interval: Duration, now: Instant) -> Result<(), TimerError> {
        if interval.is_zero() {
            return Err(TimerError::ZeroInterval);
        }

        self.schedule = Some(Schedule {
            interval,
            next_due: now + interval,
        });
        Ok(())
    }
}

impl TickTimer for IntervalTimer {
    fn arm(&mut self, interval: Duration) -> Result<(), TimerError> {
        self.arm_at(interval, Instant::now())
    }

    fn cancel(&mut self) {
        self.schedule = None;
    }

    fn is_armed(&self) -> bool {
        self.schedule.is_some()
    }
}
