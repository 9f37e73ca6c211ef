//! Tick scheduler — cadence state machine for periodic advancement.
//!
//! Decouples "when is a cycle due" from any timer primitive: the owner calls
//! `poll(now)` on whatever cadence it likes (a sleep loop, a UI frame, a
//! test with synthetic instants) and runs one advancement per due cycle.
//! `stop()` is the cancellation primitive — after it returns, `poll` yields
//! zero cycles until the next `start()`.

use std::time::{Duration, Instant};

/// Default advancement period (800 ms logical ticks).
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(800);

/// How many overdue cycles a single poll may report. A caller that stalls
/// (debugger, suspended laptop) catches up at most this far instead of
/// replaying the whole gap.
const MAX_CYCLES_PER_POLL: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SchedulerState {
    Stopped,
    /// `next_due` is when the next cycle fires.
    Running { next_due: Instant },
}

/// Start/stop cadence state machine.
#[derive(Debug)]
pub struct TickScheduler {
    period: Duration,
    state: SchedulerState,
}

impl TickScheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            state: SchedulerState::Stopped,
        }
    }

    pub fn with_default_period() -> Self {
        Self::new(DEFAULT_TICK_PERIOD)
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, SchedulerState::Running { .. })
    }

    /// Begin the cadence. Idempotent: starting while already running keeps
    /// the existing schedule, so a double start never doubles tick delivery.
    pub fn start(&mut self, now: Instant) {
        if self.is_running() {
            return;
        }
        tracing::debug!(period_ms = self.period.as_millis() as u64, "scheduler started");
        self.state = SchedulerState::Running {
            next_due: now + self.period,
        };
    }

    /// Halt the cadence. Safe to call when not running. After this returns,
    /// `poll` reports zero due cycles.
    pub fn stop(&mut self) {
        if self.is_running() {
            tracing::debug!("scheduler stopped");
        }
        self.state = SchedulerState::Stopped;
    }

    /// Number of cycles due at `now` (0 when stopped). Advances the internal
    /// deadline, so each due cycle is reported exactly once.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let SchedulerState::Running { next_due } = self.state else {
            return 0;
        };

        let mut due = 0u32;
        let mut deadline = next_due;
        while deadline <= now && due < MAX_CYCLES_PER_POLL {
            due += 1;
            deadline += self.period;
        }
        // Drop any backlog beyond the catch-up cap.
        while deadline <= now {
            deadline += self.period;
        }
        self.state = SchedulerState::Running { next_due: deadline };
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(800);

    #[test]
    fn starts_stopped() {
        let mut sched = TickScheduler::new(PERIOD);
        assert!(!sched.is_running());
        assert_eq!(sched.poll(Instant::now()), 0);
    }

    #[test]
    fn no_cycle_before_first_period_elapses() {
        let t0 = Instant::now();
        let mut sched = TickScheduler::new(PERIOD);
        sched.start(t0);
        assert_eq!(sched.poll(t0 + Duration::from_millis(799)), 0);
        assert_eq!(sched.poll(t0 + Duration::from_millis(800)), 1);
    }

    #[test]
    fn each_cycle_reported_exactly_once() {
        let t0 = Instant::now();
        let mut sched = TickScheduler::new(PERIOD);
        sched.start(t0);
        assert_eq!(sched.poll(t0 + PERIOD), 1);
        assert_eq!(sched.poll(t0 + PERIOD), 0);
        assert_eq!(sched.poll(t0 + 2 * PERIOD), 1);
    }

    #[test]
    fn start_is_idempotent() {
        let t0 = Instant::now();
        let mut sched = TickScheduler::new(PERIOD);
        sched.start(t0);
        sched.start(t0 + Duration::from_millis(400)); // no-op, schedule kept
        assert_eq!(sched.poll(t0 + PERIOD), 1);
        assert_eq!(sched.poll(t0 + PERIOD), 0);
    }

    #[test]
    fn stop_silences_polling() {
        let t0 = Instant::now();
        let mut sched = TickScheduler::new(PERIOD);
        sched.start(t0);
        sched.stop();
        assert_eq!(sched.poll(t0 + 10 * PERIOD), 0);
    }

    #[test]
    fn stop_when_not_running_is_safe() {
        let mut sched = TickScheduler::new(PERIOD);
        sched.stop();
        assert!(!sched.is_running());
    }

    #[test]
    fn restart_after_stop_resumes_from_new_origin() {
        let t0 = Instant::now();
        let mut sched = TickScheduler::new(PERIOD);
        sched.start(t0);
        sched.stop();
        let t1 = t0 + Duration::from_secs(10);
        sched.start(t1);
        assert_eq!(sched.poll(t1 + Duration::from_millis(799)), 0);
        assert_eq!(sched.poll(t1 + PERIOD), 1);
    }

    #[test]
    fn backlog_is_capped() {
        let t0 = Instant::now();
        let mut sched = TickScheduler::new(PERIOD);
        sched.start(t0);
        // 100 periods late: catch up at most MAX_CYCLES_PER_POLL.
        assert_eq!(sched.poll(t0 + 100 * PERIOD), 5);
        // The rest of the backlog was dropped, next poll is clean.
        assert_eq!(sched.poll(t0 + 100 * PERIOD), 0);
    }
}
