#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use elevator_core::random::SeededRandom;
use elevator_core::runner::Simulation;
use elevator_core::telemetry::{ActorKind, EventTag, SimTelemetry};
use elevator_core::test_helpers::{test_elevators, test_simulation};

/// Builder configuration for reproducible test runs.
#[derive(Clone, Debug)]
pub struct TestRunConfig {
    pub seed: u64,
    pub floor_count: usize,
    pub elevator_count: usize,
    pub capacity: u32,
    pub running_time: Duration,
}

impl Default for TestRunConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            floor_count: 5,
            elevator_count: 2,
            capacity: 4,
            running_time: Duration::from_secs(5),
        }
    }
}

impl TestRunConfig {
    pub fn build(&self) -> (Simulation, Rc<RefCell<SimTelemetry>>) {
        let (simulation, telemetry) = test_simulation(
            self.floor_count,
            test_elevators(self.elevator_count, self.capacity, self.floor_count),
            SeededRandom::shared(Some(self.seed)),
        );
        (simulation.with_running_time(self.running_time), telemetry)
    }

    pub fn capacities(&self) -> Vec<u32> {
        vec![self.capacity; self.elevator_count]
    }
}

/// Number of `tag` events emitted by one actor.
pub fn count_events(
    telemetry: &SimTelemetry,
    actor: ActorKind,
    actor_id: usize,
    tag: EventTag,
) -> usize {
    telemetry
        .events_of(actor, actor_id)
        .filter(|event| event.tag == tag)
        .count()
}
