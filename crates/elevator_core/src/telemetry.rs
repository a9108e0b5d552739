//! Telemetry: structured event records emitted at every agent state transition,
//! and the sinks that receive them.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::{debug, log_enabled, Level};
use serde::{Deserialize, Serialize};

use crate::direction::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    Floor,
    Elevator,
}

impl fmt::Display for ActorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActorKind::Floor => f.write_str("floor"),
            ActorKind::Elevator => f.write_str("elevator"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTag {
    /// Agent started.
    Init,
    /// Riders showed up at a floor.
    Arrival,
    /// A new hall call was handed to the fleet; magnitude is the riders that raised it.
    HallCall,
    Load,
    /// Car is about to leave its floor.
    Move,
    Stop,
    Unload,
    /// Car went by a floor without stopping.
    Pass,
    /// Idle car waiting for work.
    Poll,
    /// Car returned to floor 0; magnitude is the trip count.
    CycleComplete,
    Done,
}

impl EventTag {
    pub const ALL: [EventTag; 11] = [
        EventTag::Init,
        EventTag::Arrival,
        EventTag::HallCall,
        EventTag::Load,
        EventTag::Move,
        EventTag::Stop,
        EventTag::Unload,
        EventTag::Pass,
        EventTag::Poll,
        EventTag::CycleComplete,
        EventTag::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventTag::Init => "init",
            EventTag::Arrival => "arrival",
            EventTag::HallCall => "hall-call",
            EventTag::Load => "load",
            EventTag::Move => "move",
            EventTag::Stop => "stop",
            EventTag::Unload => "unload",
            EventTag::Pass => "pass",
            EventTag::Poll => "poll",
            EventTag::CycleComplete => "cycle-complete",
            EventTag::Done => "done",
        }
    }
}

/// One state transition of one agent.
///
/// `floor` and `direction` are the actor's state after the transition. `occupancy` is
/// riders aboard for cars and riders waiting in `direction` for floors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimEvent {
    pub timestamp_ms: u64,
    pub actor: ActorKind,
    pub actor_id: usize,
    pub tag: EventTag,
    pub magnitude: u64,
    pub floor: usize,
    pub direction: Option<Direction>,
    pub occupancy: u32,
}

impl fmt::Display for SimEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:>7} ms] {} {} {} x{} at floor {}",
            self.timestamp_ms,
            self.actor,
            self.actor_id + 1,
            self.tag.as_str(),
            self.magnitude,
            self.floor + 1,
        )?;
        if let Some(direction) = self.direction {
            write!(f, " {direction}")?;
        }
        write!(f, " ({} riders)", self.occupancy)
    }
}

/// Receives events synchronously. Implementations must not block.
pub trait EventSink {
    fn record(&mut self, event: SimEvent);
}

pub type SharedSink = Rc<RefCell<dyn EventSink>>;

/// Per-tag event counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventCounts {
    pub init: u64,
    pub arrival: u64,
    pub hall_call: u64,
    pub load: u64,
    pub moves: u64,
    pub stop: u64,
    pub unload: u64,
    pub pass: u64,
    pub poll: u64,
    pub cycle_complete: u64,
    pub done: u64,
}

impl EventCounts {
    pub fn add(&mut self, tag: EventTag) {
        match tag {
            EventTag::Init => self.init += 1,
            EventTag::Arrival => self.arrival += 1,
            EventTag::HallCall => self.hall_call += 1,
            EventTag::Load => self.load += 1,
            EventTag::Move => self.moves += 1,
            EventTag::Stop => self.stop += 1,
            EventTag::Unload => self.unload += 1,
            EventTag::Pass => self.pass += 1,
            EventTag::Poll => self.poll += 1,
            EventTag::CycleComplete => self.cycle_complete += 1,
            EventTag::Done => self.done += 1,
        }
    }

    pub fn get(&self, tag: EventTag) -> u64 {
        match tag {
            EventTag::Init => self.init,
            EventTag::Arrival => self.arrival,
            EventTag::HallCall => self.hall_call,
            EventTag::Load => self.load,
            EventTag::Move => self.moves,
            EventTag::Stop => self.stop,
            EventTag::Unload => self.unload,
            EventTag::Pass => self.pass,
            EventTag::Poll => self.poll,
            EventTag::CycleComplete => self.cycle_complete,
            EventTag::Done => self.done,
        }
    }
}

/// In-memory recorder. Keeps every event for export and analysis.
#[derive(Debug, Default)]
pub struct SimTelemetry {
    pub events: Vec<SimEvent>,
    pub counts: EventCounts,
}

impl SimTelemetry {
    pub fn shared() -> Rc<RefCell<SimTelemetry>> {
        Rc::new(RefCell::new(Self::default()))
    }

    pub fn events_of(&self, actor: ActorKind, actor_id: usize) -> impl Iterator<Item = &SimEvent> {
        self.events
            .iter()
            .filter(move |e| e.actor == actor && e.actor_id == actor_id)
    }

    /// Sum of magnitudes over all events with `tag`.
    pub fn total(&self, tag: EventTag) -> u64 {
        self.events
            .iter()
            .filter(|e| e.tag == tag)
            .map(|e| e.magnitude)
            .sum()
    }
}

impl EventSink for SimTelemetry {
    fn record(&mut self, event: SimEvent) {
        self.counts.add(event.tag);
        self.events.push(event);
    }
}

/// Forwards every event to the `log` facade at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn record(&mut self, event: SimEvent) {
        if log_enabled!(Level::Debug) {
            debug!("{event}");
        }
    }
}

/// Fan-out to two sinks.
#[derive(Debug, Default)]
pub struct Tee<A, B> {
    pub first: A,
    pub second: B,
}

impl<A, B> Tee<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: EventSink, B: EventSink> EventSink for Tee<A, B> {
    fn record(&mut self, event: SimEvent) {
        self.first.record(event);
        self.second.record(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(tag: EventTag, magnitude: u64) -> SimEvent {
        SimEvent {
            timestamp_ms: 0,
            actor: ActorKind::Elevator,
            actor_id: 1,
            tag,
            magnitude,
            floor: 2,
            direction: Some(Direction::Down),
            occupancy: 3,
        }
    }

    #[test]
    fn recorder_counts_by_tag() {
        let mut telemetry = SimTelemetry::default();
        telemetry.record(event(EventTag::Load, 3));
        telemetry.record(event(EventTag::Load, 2));
        telemetry.record(event(EventTag::Pass, 0));

        assert_eq!(telemetry.counts.get(EventTag::Load), 2);
        assert_eq!(telemetry.counts.get(EventTag::Pass), 1);
        assert_eq!(telemetry.total(EventTag::Load), 5);
        assert_eq!(telemetry.events_of(ActorKind::Elevator, 1).count(), 3);
        assert_eq!(telemetry.events_of(ActorKind::Floor, 1).count(), 0);
    }

    #[test]
    fn tee_feeds_both_sinks() {
        let mut tee = Tee::new(SimTelemetry::default(), SimTelemetry::default());
        tee.record(event(EventTag::Stop, 0));
        assert_eq!(tee.first.events.len(), 1);
        assert_eq!(tee.second.events.len(), 1);
    }

    #[test]
    fn display_uses_one_based_labels() {
        let text = event(EventTag::Unload, 1).to_string();
        assert!(text.contains("elevator 2 unload x1 at floor 3 down"), "{text}");
    }
}
