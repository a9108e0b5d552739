//! Test helpers for common test setup and utilities.
//!
//! This module provides shared test utilities to reduce duplication across test files.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::building::BuildingState;
use crate::clock::DelayRange;
use crate::elevator::Elevator;
use crate::fleet::Fleet;
use crate::random::{RandomSource, SharedRandom};
use crate::runner::Simulation;
use crate::scenario::PacingConfig;
use crate::telemetry::SimTelemetry;

/// Random source that replays a fixed script.
///
/// Each draw pops the next scripted value and clamps it into the requested range. Once
/// the script runs out every draw returns the low end of its range.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    script: VecDeque<u32>,
}

impl ScriptedRandom {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            script: values.into_iter().collect(),
        }
    }

    pub fn shared(values: impl IntoIterator<Item = u32>) -> SharedRandom {
        Rc::new(RefCell::new(Self::new(values)))
    }

    /// Values not consumed yet.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn uniform(&mut self, low: u32, high: u32) -> u32 {
        match self.script.pop_front() {
            Some(value) => value.clamp(low, high.max(low)),
            None => low,
        }
    }
}

/// Fixed, short pauses so paused-clock tests advance in predictable steps.
pub fn fast_pacing() -> PacingConfig {
    PacingConfig {
        move_delay: DelayRange::fixed(10),
        door_delay: DelayRange::fixed(5),
        pass_delay: DelayRange::fixed(1),
        poll_interval: DelayRange::fixed(10),
        arrival_jitter: DelayRange::fixed(50),
    }
}

/// `count` cars named `elev.1`, `elev.2`, ... with the same capacity, parked at floor 0.
pub fn test_elevators(count: usize, capacity: u32, floor_count: usize) -> Vec<Elevator> {
    (0..count)
        .map(|id| Elevator::new(id, format!("elev.{}", id + 1), capacity, floor_count))
        .collect()
}

/// A seeded simulation with fast pacing that records into the returned telemetry.
pub fn test_simulation(
    floor_count: usize,
    elevators: Vec<Elevator>,
    random: SharedRandom,
) -> (Simulation, Rc<RefCell<SimTelemetry>>) {
    let telemetry = SimTelemetry::shared();
    let simulation = Simulation::new(
        BuildingState::new(floor_count),
        Fleet::new(floor_count, elevators),
        random,
        telemetry.clone(),
    )
    .with_pacing(fast_pacing());
    (simulation, telemetry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_values_are_clamped_then_fall_back_to_low() {
        let mut random = ScriptedRandom::new([7, 0, 2]);
        assert_eq!(random.uniform(0, 3), 3);
        assert_eq!(random.uniform(1, 5), 1);
        assert_eq!(random.pick_index(4), 2);
        assert_eq!(random.remaining(), 0);
        assert_eq!(random.uniform(4, 9), 4);
    }
}
