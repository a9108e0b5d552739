//! Wall-clock bookkeeping for a run: the shared deadline and event timestamps.
//!
//! Built on `tokio::time::Instant` so tests running with a paused tokio clock get
//! deterministic, instant runs.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::random::RandomSource;

#[derive(Debug, Clone, Copy)]
pub struct SimulationClock {
    started_at: Instant,
    deadline: Instant,
}

impl SimulationClock {
    /// Starts the clock now; the deadline is `running_time` from now.
    pub fn start(running_time: Duration) -> Self {
        let started_at = Instant::now();
        Self {
            started_at,
            deadline: started_at + running_time,
        }
    }

    /// Milliseconds since the run started.
    pub fn now_ms(&self) -> u64 {
        let elapsed = Instant::now().saturating_duration_since(self.started_at);
        u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
    }

    pub fn is_past_deadline(&self) -> bool {
        Instant::now() >= self.deadline
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }
}

/// Inclusive range of pause lengths in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl DelayRange {
    pub const fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    pub const fn fixed(ms: u64) -> Self {
        Self::new(ms, ms)
    }

    pub fn is_valid(&self) -> bool {
        self.min_ms <= self.max_ms
    }

    /// Draws a pause uniformly from the range.
    pub fn sample(&self, random: &mut dyn RandomSource) -> Duration {
        if self.max_ms <= self.min_ms {
            return Duration::from_millis(self.min_ms);
        }
        let span = u32::try_from(self.max_ms - self.min_ms).unwrap_or(u32::MAX);
        Duration::from_millis(self.min_ms + u64::from(random.uniform(0, span)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SeededRandom;

    #[tokio::test(start_paused = true)]
    async fn deadline_passes_after_running_time() {
        let clock = SimulationClock::start(Duration::from_secs(2));
        assert!(!clock.is_past_deadline());
        assert_eq!(clock.now_ms(), 0);

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(!clock.is_past_deadline());
        assert_eq!(clock.now_ms(), 1500);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(clock.is_past_deadline());
    }

    #[test]
    fn samples_stay_inside_range() {
        let mut random = SeededRandom::new(Some(2));
        let range = DelayRange::new(100, 300);
        for _ in 0..200 {
            let d = range.sample(&mut random).as_millis();
            assert!((100..=300).contains(&d));
        }
        assert_eq!(
            DelayRange::fixed(10).sample(&mut random),
            Duration::from_millis(10)
        );
    }
}
