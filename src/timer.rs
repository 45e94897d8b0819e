//! Countdown timer for the assessment session.
//!
//! Remaining time is always re-derived from the recorded end instant, so
//! coarse or jittery ticks cannot accumulate drift. Reaching zero is a
//! terminal state until reset.

use std::time::{Duration, Instant};

/// Timer lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Expired,
}

/// Fixed-duration countdown driven by explicit clock readings.
#[derive(Debug, Clone)]
pub struct Countdown {
    total: Duration,
    state: TimerState,
    ends_at: Option<Instant>,
    remaining: Duration,
}

impl Countdown {
    pub fn new(total: Duration) -> Self {
        Self {
            total,
            state: TimerState::Idle,
            ends_at: None,
            remaining: total,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn is_expired(&self) -> bool {
        self.state == TimerState::Expired
    }

    /// Remaining time as of the last tick, clamped at zero.
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining.as_secs()
    }

    /// Idle → Running. Records the end instant; a start while already
    /// running or expired is ignored.
    pub fn start(&mut self, now: Instant) {
        if self.state != TimerState::Idle {
            return;
        }
        self.state = TimerState::Running;
        self.ends_at = Some(now + self.total);
        self.remaining = self.total;
    }

    /// Recompute remaining time. Returns true when the visible value or the
    /// state changed, so callers can redraw only when needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(ends_at) = self.ends_at else {
            return false;
        };
        if self.state != TimerState::Running {
            return false;
        }

        let remaining = ends_at.saturating_duration_since(now);
        let changed = remaining.as_secs() != self.remaining.as_secs();
        self.remaining = remaining;

        if remaining.is_zero() {
            self.state = TimerState::Expired;
            return true;
        }
        changed
    }

    /// Any state → Idle with the full duration restored.
    pub fn reset(&mut self) {
        self.state = TimerState::Idle;
        self.ends_at = None;
        self.remaining = self.total;
    }
}

/// Render seconds as zero-padded `MM:SS`.
pub fn format_mmss(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_countdown_expires_at_zero() {
        let mut timer = Countdown::new(Duration::from_secs(3600));
        let start = Instant::now();

        timer.start(start);
        assert_eq!(timer.state(), TimerState::Running);

        timer.tick(start + Duration::from_secs(1));
        assert_eq!(timer.remaining_secs(), 3599);

        timer.tick(start + Duration::from_secs(3600));
        assert_eq!(timer.remaining_secs(), 0);
        assert_eq!(timer.state(), TimerState::Expired);

        // Expired is terminal: later ticks never go negative or restart.
        timer.tick(start + Duration::from_secs(4000));
        assert_eq!(timer.remaining_secs(), 0);
        assert_eq!(timer.state(), TimerState::Expired);
    }

    #[test]
    fn reset_restores_idle_and_full_duration() {
        let mut timer = Countdown::new(Duration::from_secs(3600));
        let start = Instant::now();

        timer.start(start);
        timer.tick(start + Duration::from_secs(3600));
        assert!(timer.is_expired());

        timer.reset();
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.remaining_secs(), 3600);

        // Restartable after reset.
        timer.start(start + Duration::from_secs(4000));
        assert!(timer.is_running());
    }

    #[test]
    fn start_while_running_is_ignored() {
        let mut timer = Countdown::new(Duration::from_secs(60));
        let start = Instant::now();

        timer.start(start);
        timer.tick(start + Duration::from_secs(30));
        timer.start(start + Duration::from_secs(30));
        timer.tick(start + Duration::from_secs(30));
        assert_eq!(timer.remaining_secs(), 30);
    }

    #[test]
    fn formats_zero_padded() {
        assert_eq!(format_mmss(3600), "60:00");
        assert_eq!(format_mmss(65), "01:05");
        assert_eq!(format_mmss(0), "00:00");
        assert_eq!(format_mmss(599), "09:59");
    }
}
