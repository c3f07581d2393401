use std::time::Duration;
use std::time::Instant;

use tracing::debug;

/// A repeating timer driven by explicit instants.
///
/// The timer never fires on its own. Whoever owns it asks [`IntervalTimer::fire`] whether a
/// period has elapsed, which keeps the run loop deterministic and lets the event loop sleep
/// until [`IntervalTimer::deadline`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalTimer {
    period: Duration,
    next: Instant,
}

impl IntervalTimer {
    /// Arm a timer whose first firing is one `period` after `now`
    pub fn start(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next: now + period,
        }
    }

    /// When the timer fires next
    pub fn deadline(&self) -> Instant {
        self.next
    }

    /// Whether the timer is due at `now`. Firings missed during a stall are dropped: the timer
    /// fires once and re-arms at the first deadline of its cadence after `now`.
    pub fn fire(&mut self, now: Instant) -> bool {
        if now < self.next || self.period.is_zero() {
            return false;
        }

        let late = now.duration_since(self.next).as_nanos() % self.period.as_nanos();
        // below `period`, so it fits in a u64
        let late = Duration::from_nanos(u64::try_from(late).unwrap_or(0));

        self.next = now + (self.period - late);

        true
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    #[default]
    Stopped,
    Running,
}

/// Decides when the simulation advances on its own.
///
/// While running it holds an armed [`IntervalTimer`]. Stopping drops the timer outright, so a
/// stale firing cannot be observed after a stop.
#[derive(Debug)]
pub struct RunLoopController {
    interval: Duration,
    timer: Option<IntervalTimer>,
}

impl RunLoopController {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            timer: None,
        }
    }

    pub fn state(&self) -> RunState {
        match self.timer {
            Some(_) => RunState::Running,
            None => RunState::Stopped,
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Start firing every `interval`. Starting a running loop keeps its current timer.
    pub fn start(&mut self, now: Instant) {
        if self.timer.is_some() {
            return;
        }

        debug!(interval_ms = self.interval.as_millis() as u64, "run loop started");
        self.timer = Some(IntervalTimer::start(self.interval, now));
    }

    /// Cancel the timer. Stopping a stopped loop does nothing.
    pub fn stop(&mut self) {
        if self.timer.take().is_some() {
            debug!("run loop stopped");
        }
    }

    pub fn toggle(&mut self, now: Instant) {
        match self.state() {
            RunState::Running => self.stop(),
            RunState::Stopped => self.start(now),
        }
    }

    /// Change the interval. A running loop restarts its timer with the new period from `now`.
    pub fn set_interval(&mut self, interval: Duration, now: Instant) {
        if interval == self.interval {
            return;
        }

        self.interval = interval;

        if self.timer.is_some() {
            debug!(interval_ms = interval.as_millis() as u64, "run loop restarted");
            self.timer = Some(IntervalTimer::start(interval, now));
        }
    }

    /// Whether a generation is due at `now`. Never while stopped.
    pub fn poll(&mut self, now: Instant) -> bool {
        self.timer.as_mut().is_some_and(|timer| timer.fire(now))
    }

    /// When the next generation is due, if running
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.as_ref().map(IntervalTimer::deadline)
    }
}
