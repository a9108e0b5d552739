//! One car: position, direction, occupancy and its car-call panel.
//!
//! The car sweeps the shaft end to end. Reversal is forced at both terminal floors,
//! regardless of pending calls. Between terminals it stops only where its panel has an
//! entry for the current direction.

use crate::building::BuildingState;
use crate::direction::{panel_index, Direction};
use crate::error::BuildingError;
use crate::random::RandomSource;

/// What the dispatcher needs to know about a car.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarPosition {
    pub index: usize,
    pub floor: usize,
    pub direction: Direction,
}

#[derive(Debug, Clone)]
pub struct Elevator {
    id: usize,
    name: String,
    capacity: u32,
    floors_served: usize,
    direction: Direction,
    current_floor: usize,
    riders: u32,
    car_calls: [Vec<bool>; 2],
}

impl Elevator {
    /// A new car parked at floor 0 heading up, empty, with a clear panel.
    pub fn new(id: usize, name: impl Into<String>, capacity: u32, floors_served: usize) -> Self {
        Self {
            id,
            name: name.into(),
            capacity,
            floors_served,
            direction: Direction::Up,
            current_floor: 0,
            riders: 0,
            car_calls: [vec![false; floors_served], vec![false; floors_served]],
        }
    }

    /// Places the car at `floor` travelling in `direction`. Terminal floors override the
    /// direction the same way [`Elevator::advance`] does.
    pub fn with_position(mut self, floor: usize, direction: Direction) -> Self {
        self.current_floor = floor.min(self.top_floor());
        self.direction = direction;
        self.reverse_at_terminal();
        self
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn floors_served(&self) -> usize {
        self.floors_served
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn current_floor(&self) -> usize {
        self.current_floor
    }

    pub fn riders(&self) -> u32 {
        self.riders
    }

    pub fn top_floor(&self) -> usize {
        self.floors_served.saturating_sub(1)
    }

    pub fn is_at_terminal(&self) -> bool {
        self.current_floor == 0 || self.current_floor == self.top_floor()
    }

    pub fn position(&self, index: usize) -> CarPosition {
        CarPosition {
            index,
            floor: self.current_floor,
            direction: self.direction,
        }
    }

    /// Moves one floor in the current direction, reversing on arrival at either terminal.
    pub fn advance(&mut self) {
        self.current_floor = match self.direction {
            Direction::Up => (self.current_floor + 1).min(self.top_floor()),
            Direction::Down => self.current_floor.saturating_sub(1),
        };
        self.reverse_at_terminal();
    }

    fn reverse_at_terminal(&mut self) {
        if self.current_floor == self.top_floor() {
            self.direction = Direction::Down;
        } else if self.current_floor == 0 {
            self.direction = Direction::Up;
        }
    }

    pub fn has_car_call(&self, floor: usize, direction: Direction) -> bool {
        self.car_calls[panel_index(direction)]
            .get(floor)
            .copied()
            .unwrap_or(false)
    }

    pub fn has_call_here(&self) -> bool {
        self.has_car_call(self.current_floor, self.direction)
    }

    pub fn has_any_call(&self) -> bool {
        self.car_calls.iter().flatten().any(|&set| set)
    }

    pub fn must_stop(&self) -> bool {
        self.has_call_here() || self.is_at_terminal()
    }

    /// Marks `floor`/`direction` on the panel. Up at the top floor and down at floor 0 are
    /// never set: the terminal stop is forced anyway.
    pub fn set_car_call(&mut self, floor: usize, direction: Direction) {
        let structurally_empty = match direction {
            Direction::Up => floor >= self.top_floor(),
            Direction::Down => floor == 0,
        };
        if structurally_empty || floor >= self.floors_served {
            return;
        }
        self.car_calls[panel_index(direction)][floor] = true;
    }

    /// Drops riders off. Everyone leaves at a terminal floor; elsewhere a uniform
    /// `0..=riders` leave. Returns how many left the car.
    pub fn unload(&mut self, random: &mut dyn RandomSource) -> u32 {
        if self.riders == 0 {
            return 0;
        }
        let leaving = if self.is_at_terminal() {
            self.riders
        } else {
            random.uniform(0, self.riders)
        };
        self.riders -= leaving;
        leaving
    }

    /// Boards as many riders waiting in the current direction as there is room for.
    /// Each boarded rider presses a destination strictly ahead. Returns the number boarded.
    pub fn load(
        &mut self,
        building: &mut BuildingState,
        random: &mut dyn RandomSource,
    ) -> Result<u32, BuildingError> {
        let floor = self.current_floor;
        let direction = self.direction;
        let room = self.capacity.saturating_sub(self.riders);
        let boarding = building.waiting(floor, direction).min(room);
        if boarding == 0 {
            return Ok(0);
        }
        building.remove_waiting(floor, direction, boarding)?;
        self.riders += boarding;

        for _ in 0..boarding {
            if let Some(destination) = self.pick_destination(random) {
                self.set_car_call(destination, direction);
            }
        }
        Ok(boarding)
    }

    fn pick_destination(&self, random: &mut dyn RandomSource) -> Option<usize> {
        let floor = self.current_floor as u32;
        match self.direction {
            Direction::Up if self.current_floor < self.top_floor() => {
                Some(random.uniform(floor + 1, self.top_floor() as u32) as usize)
            }
            Direction::Down if self.current_floor > 0 => {
                Some(random.uniform(0, floor - 1) as usize)
            }
            _ => None,
        }
    }

    /// Clears the panel entry served by the stop just made. The entry stays set when riders
    /// were left behind for lack of room, so the car comes back for them.
    pub fn clear_served_call(&mut self, building: &BuildingState) {
        let floor = self.current_floor;
        let direction = self.direction;
        if let Some(slot) = self.car_calls[panel_index(direction)].get_mut(floor) {
            *slot = building.waiting(floor, direction) > 0;
        }
    }
}
