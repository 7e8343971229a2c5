//! Minimum-duration gate for the loading experience.
//!
//! The gate resolves once a fixed floor has elapsed since it was started,
//! measured from the captured start instant, and reports a progress fraction
//! on a short periodic tick while it waits. It is a floor and never a timeout:
//! whatever runs alongside it may take longer.

use std::time::Duration;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Shortest time the loading state is shown.
pub const FLOOR_DURATION: Duration = Duration::from_secs(15);

/// Default progress tick, and the coarsest one allowed.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// `elapsed / floor`, clamped to `[0, 1]`. A zero floor is always complete.
pub fn progress_fraction(elapsed: Duration, floor: Duration) -> f64 {
    if floor.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / floor.as_secs_f64()).clamp(0.0, 1.0)
}

#[derive(Debug, Clone)]
pub struct MinimumDurationGate {
    floor: Duration,
    tick: Duration,
    started: Instant,
}

impl MinimumDurationGate {
    /// Starts the clock now.
    pub fn start(floor: Duration) -> Self {
        Self {
            floor,
            tick: TICK_INTERVAL,
            started: Instant::now(),
        }
    }

    /// Overrides the tick, kept within `1ms..=100ms`.
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick.clamp(MIN_TICK_INTERVAL, TICK_INTERVAL);
        self
    }

    pub fn floor(&self) -> Duration {
        self.floor
    }

    pub fn tick(&self) -> Duration {
        self.tick
    }

    pub fn deadline(&self) -> Instant {
        self.started + self.floor
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn progress(&self) -> f64 {
        progress_fraction(self.elapsed(), self.floor)
    }

    pub fn is_complete(&self) -> bool {
        Instant::now() >= self.deadline()
    }

    /// Waits until the floor has elapsed, calling `on_progress` on every tick
    /// and exactly once with `1.0` at the end. Reported values never decrease.
    ///
    /// Dropping the returned future stops the ticker.
    pub async fn wait<F>(&self, mut on_progress: F)
    where
        F: FnMut(f64),
    {
        let deadline = time::sleep_until(self.deadline());
        tokio::pin!(deadline);

        let mut ticker = time::interval(self.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut last = 0.0_f64;
        loop {
            tokio::select! {
                biased;
                _ = &mut deadline => break,
                _ = ticker.tick() => {
                    let fraction = self.progress().max(last);
                    // The deadline branch owns the final 1.0.
                    if fraction < 1.0 {
                        last = fraction;
                        on_progress(fraction);
                    }
                }
            }
        }

        on_progress(1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_fraction_clamps() {
        let floor = Duration::from_secs(15);
        assert_eq!(progress_fraction(Duration::ZERO, floor), 0.0);
        assert_eq!(progress_fraction(Duration::from_millis(7500), floor), 0.5);
        assert_eq!(progress_fraction(floor, floor), 1.0);
        assert_eq!(progress_fraction(Duration::from_secs(60), floor), 1.0);
        assert_eq!(progress_fraction(Duration::from_secs(1), Duration::ZERO), 1.0);
    }

    #[test]
    fn test_tick_never_coarser_than_default() {
        let gate = MinimumDurationGate::start(FLOOR_DURATION).with_tick(Duration::from_secs(1));
        assert_eq!(gate.tick(), TICK_INTERVAL);

        let gate = MinimumDurationGate::start(FLOOR_DURATION).with_tick(Duration::ZERO);
        assert_eq!(gate.tick(), Duration::from_millis(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_lasts_exactly_the_floor() {
        let start = Instant::now();
        let gate = MinimumDurationGate::start(FLOOR_DURATION);

        gate.wait(|_| {}).await;

        let elapsed = start.elapsed();
        assert!(elapsed >= FLOOR_DURATION);
        assert!(elapsed < FLOOR_DURATION + TICK_INTERVAL);
        assert!(gate.is_complete());
        assert_eq!(gate.progress(), 1.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_is_monotonic_and_ends_at_one() {
        let gate = MinimumDurationGate::start(FLOOR_DURATION);
        let mut reports = Vec::new();

        gate.wait(|fraction| reports.push(fraction)).await;

        // One report per 100ms tick plus the final one.
        assert!(reports.len() >= 150, "only {} reports", reports.len());
        assert!(reports.windows(2).all(|w| w[0] <= w[1]));
        assert!(reports.iter().all(|f| (0.0..=1.0).contains(f)));
        assert_eq!(*reports.last().unwrap(), 1.0);
        assert_eq!(reports.iter().filter(|f| **f == 1.0).count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_midway() {
        let gate = MinimumDurationGate::start(FLOOR_DURATION);
        time::advance(Duration::from_secs(3)).await;
        assert!((gate.progress() - 0.2).abs() < 1e-9);
        assert!(!gate.is_complete());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_wait_stops_ticks() {
        let gate = MinimumDurationGate::start(FLOOR_DURATION);
        let mut reports = 0usize;

        let _ = time::timeout(Duration::from_secs(2), gate.wait(|_| reports += 1)).await;
        let seen = reports;
        time::advance(Duration::from_secs(20)).await;

        assert!(seen > 0);
        assert_eq!(reports, seen);
    }
}
