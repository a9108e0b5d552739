use std::collections::HashMap;

use crate::telemetry::{ActorKind, SimEvent};

/// Checks that each actor's events carry non-decreasing timestamps.
/// Returns an error message if validation fails, None if valid.
pub fn validate_event_ordering(events: &[SimEvent]) -> Option<String> {
    let mut last_seen: HashMap<(ActorKind, usize), u64> = HashMap::new();
    for event in events {
        let key = (event.actor, event.actor_id);
        if let Some(&previous) = last_seen.get(&key) {
            if event.timestamp_ms < previous {
                return Some(format!(
                    "{} {}: {} at {} ms precedes earlier event at {} ms",
                    event.actor,
                    event.actor_id,
                    event.tag.as_str(),
                    event.timestamp_ms,
                    previous
                ));
            }
        }
        last_seen.insert(key, event.timestamp_ms);
    }
    None
}

/// Checks that no elevator changes floor by more than one between consecutive events.
pub fn validate_elevator_moves(events: &[SimEvent]) -> Option<String> {
    let mut last_floor: HashMap<usize, usize> = HashMap::new();
    for event in events.iter().filter(|e| e.actor == ActorKind::Elevator) {
        if let Some(&previous) = last_floor.get(&event.actor_id) {
            if previous.abs_diff(event.floor) > 1 {
                return Some(format!(
                    "elevator {}: jumped from floor {} to {} at {} ms",
                    event.actor_id, previous, event.floor, event.timestamp_ms
                ));
            }
        }
        last_floor.insert(event.actor_id, event.floor);
    }
    None
}

/// Checks that no elevator event reports more riders aboard than the car's capacity.
/// `capacities` is indexed by elevator id.
pub fn validate_occupancy(events: &[SimEvent], capacities: &[u32]) -> Option<String> {
    for event in events.iter().filter(|e| e.actor == ActorKind::Elevator) {
        let Some(&capacity) = capacities.get(event.actor_id) else {
            return Some(format!("elevator {}: unknown capacity", event.actor_id));
        };
        if event.occupancy > capacity {
            return Some(format!(
                "elevator {}: {} riders aboard exceeds capacity {} at {} ms",
                event.actor_id, event.occupancy, capacity, event.timestamp_ms
            ));
        }
    }
    None
}
