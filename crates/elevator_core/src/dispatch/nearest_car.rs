use crate::direction::Direction;
use crate::elevator::CarPosition;

use super::algorithm::DispatchAlgorithm;
use super::types::HallCall;

/// Nearest-car dispatch: assign each hall call to the car with the shortest estimated
/// travel, assuming every car sweeps the shaft end to end.
///
/// # Distance estimate
///
/// With `max_dist = 2 * (floor_count - 1)` (one full round trip):
///
/// - Car heading the call's direction and not yet past the floor: the plain gap.
/// - Car heading the call's direction but already past it: `max_dist` minus how far it
///   has gone, plus the floor, i.e. it must finish the loop first.
/// - Car heading the opposite way: it runs to its end of the shaft and turns around,
///   `max_dist - floor - call` going up, `floor + call` going down.
///
/// This is a greedy estimate, not a service-time optimum. Door stops along the way are
/// ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct NearestCar;

impl DispatchAlgorithm for NearestCar {
    fn estimate_distance(&self, car: &CarPosition, call: HallCall, floor_count: usize) -> usize {
        let top = floor_count.saturating_sub(1);
        let max_dist = 2 * top;
        let car_floor = car.floor.min(top);
        let call_floor = call.floor.min(top);

        match (car.direction, call.direction) {
            (Direction::Up, Direction::Up) => {
                if call_floor >= car_floor {
                    call_floor - car_floor
                } else {
                    max_dist + call_floor - car_floor
                }
            }
            (Direction::Down, Direction::Down) => {
                if call_floor <= car_floor {
                    car_floor - call_floor
                } else {
                    max_dist + car_floor - call_floor
                }
            }
            (Direction::Up, Direction::Down) => max_dist - car_floor - call_floor,
            (Direction::Down, Direction::Up) => car_floor + call_floor,
        }
    }
}
