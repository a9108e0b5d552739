//! The fleet owns every car and routes new hall calls to one of them.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::direction::Direction;
use crate::dispatch::{DispatchAlgorithm, HallCall, NearestCar};
use crate::elevator::{CarPosition, Elevator};
use crate::random::RandomSource;

/// A car shared between its own agent (movement, occupancy, panel) and the fleet
/// (panel only). Borrows are never held across a suspension point.
pub type SharedElevator = Rc<RefCell<Elevator>>;

#[derive(Debug)]
pub struct Fleet {
    floor_count: usize,
    elevators: Vec<SharedElevator>,
    algorithm: Box<dyn DispatchAlgorithm>,
}

impl Fleet {
    /// Fleet using [`NearestCar`] dispatch.
    pub fn new(floor_count: usize, elevators: Vec<Elevator>) -> Self {
        Self {
            floor_count,
            elevators: elevators
                .into_iter()
                .map(|car| Rc::new(RefCell::new(car)))
                .collect(),
            algorithm: Box::new(NearestCar),
        }
    }

    pub fn with_algorithm(mut self, algorithm: Box<dyn DispatchAlgorithm>) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn floor_count(&self) -> usize {
        self.floor_count
    }

    pub fn len(&self) -> usize {
        self.elevators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elevators.is_empty()
    }

    pub fn elevators(&self) -> &[SharedElevator] {
        &self.elevators
    }

    pub fn elevator(&self, index: usize) -> Option<&SharedElevator> {
        self.elevators.get(index)
    }

    pub fn positions(&self) -> Vec<CarPosition> {
        self.elevators
            .iter()
            .enumerate()
            .map(|(index, car)| car.borrow().position(index))
            .collect()
    }

    /// Assigns a new hall call to the closest car and marks that car's panel.
    /// Returns the index of the chosen car.
    pub fn request_stop(
        &self,
        floor: usize,
        direction: Direction,
        random: &mut dyn RandomSource,
    ) -> Option<usize> {
        let call = HallCall::new(floor, direction);
        let positions = self.positions();
        let chosen = self
            .algorithm
            .select_car(&positions, call, self.floor_count, random)?;
        let car = self.elevators.get(chosen)?;
        car.borrow_mut().set_car_call(floor, direction);
        debug!(
            "hall call {direction} at floor {floor} assigned to car {chosen} ({})",
            car.borrow().name()
        );
        Some(chosen)
    }
}
