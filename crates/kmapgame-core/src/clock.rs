//! Cancelable periodic tick source for session timers.

use std::time::Duration;

use tokio::time::{self, Instant, Interval, MissedTickBehavior};

/// A periodic ticker owned by a session.
///
/// Cancellation is ownership: dropping the `Ticker` stops all future ticks,
/// so a tick can never fire against a session that has moved on. Sessions
/// hold `Option<Ticker>` and replace it on phase transitions, which also
/// makes restarting idempotent — the old value is dropped when the option
/// is overwritten.
#[derive(Debug)]
pub struct Ticker {
    interval: Interval,
}

impl Ticker {
    /// Start ticking every `period`, with the first tick one full period
    /// from now.
    pub fn start(period: Duration) -> Self {
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }

    /// Wait for the next tick boundary.
    pub async fn tick(&mut self) -> Instant {
        self.interval.tick().await
    }
}
