//! Building state: waiting riders and outstanding hall calls per floor and direction.

use crate::direction::{is_callable, panel_index, Direction};
use crate::error::BuildingError;

/// Per-floor waiting counters and hall-call flags.
///
/// A flag is set when riders are added and cleared exactly when the matching counter
/// returns to zero. Up slots at the top floor and down slots at floor 0 stay empty.
#[derive(Debug, Clone)]
pub struct BuildingState {
    floor_count: usize,
    waiting: [Vec<u32>; 2],
    calls: [Vec<bool>; 2],
    total_arrived: u64,
    total_boarded: u64,
}

impl BuildingState {
    pub fn new(floor_count: usize) -> Self {
        Self {
            floor_count,
            waiting: [vec![0; floor_count], vec![0; floor_count]],
            calls: [vec![false; floor_count], vec![false; floor_count]],
            total_arrived: 0,
            total_boarded: 0,
        }
    }

    pub fn floor_count(&self) -> usize {
        self.floor_count
    }

    pub fn top_floor(&self) -> usize {
        self.floor_count - 1
    }

    pub fn is_top(&self, floor: usize) -> bool {
        floor == self.top_floor()
    }

    pub fn is_bottom(&self, floor: usize) -> bool {
        floor == 0
    }

    /// One-based label used in reports ("1" is the ground floor).
    pub fn floor_label(&self, floor: usize) -> String {
        (floor + 1).to_string()
    }

    pub fn waiting(&self, floor: usize, direction: Direction) -> u32 {
        self.waiting[panel_index(direction)]
            .get(floor)
            .copied()
            .unwrap_or(0)
    }

    pub fn has_call(&self, floor: usize, direction: Direction) -> bool {
        self.calls[panel_index(direction)]
            .get(floor)
            .copied()
            .unwrap_or(false)
    }

    /// Riders currently waiting anywhere in the building.
    pub fn total_waiting(&self) -> u64 {
        self.waiting
            .iter()
            .flat_map(|counts| counts.iter())
            .map(|&n| u64::from(n))
            .sum()
    }

    /// Riders ever added through [`BuildingState::add_waiting`].
    pub fn total_arrived(&self) -> u64 {
        self.total_arrived
    }

    /// Riders ever removed through [`BuildingState::remove_waiting`].
    pub fn total_boarded(&self) -> u64 {
        self.total_boarded
    }

    /// Adds `riders` waiting to travel in `direction` and raises the hall-call flag.
    pub fn add_waiting(
        &mut self,
        floor: usize,
        direction: Direction,
        riders: u32,
    ) -> Result<(), BuildingError> {
        if !is_callable(floor, direction, self.floor_count) {
            return Err(BuildingError::NoSuchCall { floor, direction });
        }
        if riders == 0 {
            return Ok(());
        }
        let slot = panel_index(direction);
        self.waiting[slot][floor] += riders;
        self.calls[slot][floor] = true;
        self.total_arrived += u64::from(riders);
        Ok(())
    }

    /// Removes `riders` that boarded a car. Clears the hall-call flag when nobody is left.
    pub fn remove_waiting(
        &mut self,
        floor: usize,
        direction: Direction,
        riders: u32,
    ) -> Result<(), BuildingError> {
        let available = self.waiting(floor, direction);
        if riders > available {
            return Err(BuildingError::InsufficientWaiting {
                floor,
                direction,
                requested: riders,
                available,
            });
        }
        if riders == 0 {
            return Ok(());
        }
        let slot = panel_index(direction);
        self.waiting[slot][floor] -= riders;
        if self.waiting[slot][floor] == 0 {
            self.calls[slot][floor] = false;
        }
        self.total_boarded += u64::from(riders);
        Ok(())
    }
}
