//! Agents: one repeating task per floor and one per elevator, all running on a single
//! thread until the shared deadline.
//!
//! Tasks only suspend at `tokio::time::sleep`. Every `RefCell` borrow below is released
//! before the next `.await`, so each read-modify-write on shared state completes
//! without another task observing it half-done.

mod elevator;
mod floor;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use serde::Serialize;

use crate::building::BuildingState;
use crate::clock::{DelayRange, SimulationClock};
use crate::direction::Direction;
use crate::elevator::Elevator;
use crate::fleet::Fleet;
use crate::random::SharedRandom;
use crate::scenario::PacingConfig;
use crate::telemetry::{ActorKind, EventTag, SharedSink, SimEvent};

pub use elevator::elevator_agent;
pub use floor::floor_agent;

/// What one agent reports when it observes the deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentOutcome {
    pub kind: ActorKind,
    pub id: usize,
    pub name: String,
    /// Completed trips for elevators, riders generated for floors.
    pub count: u64,
}

impl fmt::Display for AgentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ActorKind::Elevator => write!(
                f,
                "elevator {} ({}) finished after {} trips",
                self.id + 1,
                self.name,
                self.count
            ),
            ActorKind::Floor => write!(
                f,
                "floor {} finished after {} arrivals",
                self.name, self.count
            ),
        }
    }
}

/// Shared state every agent of one run works against.
pub struct AgentContext {
    pub building: Rc<RefCell<BuildingState>>,
    pub fleet: Rc<Fleet>,
    pub random: SharedRandom,
    pub sink: SharedSink,
    pub clock: SimulationClock,
    pub pacing: PacingConfig,
    /// Exclusive upper bound of riders per arrival draw.
    pub arrival_bound: u32,
}

impl AgentContext {
    fn pause(&self, range: DelayRange) -> Duration {
        range.sample(&mut *self.random.borrow_mut())
    }

    fn emit_car(&self, index: usize, car: &Elevator, tag: EventTag, magnitude: u64) {
        self.sink.borrow_mut().record(SimEvent {
            timestamp_ms: self.clock.now_ms(),
            actor: ActorKind::Elevator,
            actor_id: index,
            tag,
            magnitude,
            floor: car.current_floor(),
            direction: Some(car.direction()),
            occupancy: car.riders(),
        });
    }

    fn emit_floor(
        &self,
        floor: usize,
        direction: Option<Direction>,
        tag: EventTag,
        magnitude: u64,
        occupancy: u32,
    ) {
        self.sink.borrow_mut().record(SimEvent {
            timestamp_ms: self.clock.now_ms(),
            actor: ActorKind::Floor,
            actor_id: floor,
            tag,
            magnitude,
            floor,
            direction,
            occupancy,
        });
    }
}
