use crate::elevator::CarPosition;
use crate::random::RandomSource;

use super::types::HallCall;

/// Trait for dispatch policies that decide which car answers a hall call.
pub trait DispatchAlgorithm: std::fmt::Debug {
    /// Estimated travel distance (in floors) for `car` to reach `call` heading the
    /// call's direction. Lower is better.
    fn estimate_distance(&self, car: &CarPosition, call: HallCall, floor_count: usize) -> usize;

    /// Picks the car with the lowest estimate. Ties are broken uniformly at random
    /// through `random`. Returns the chosen car's `index`, or `None` for an empty fleet.
    fn select_car(
        &self,
        cars: &[CarPosition],
        call: HallCall,
        floor_count: usize,
        random: &mut dyn RandomSource,
    ) -> Option<usize> {
        let mut best: Option<usize> = None;
        let mut tied: Vec<usize> = Vec::new();

        for car in cars {
            let distance = self.estimate_distance(car, call, floor_count);
            match best {
                Some(best_distance) if distance > best_distance => {}
                Some(best_distance) if distance == best_distance => tied.push(car.index),
                _ => {
                    best = Some(distance);
                    tied.clear();
                    tied.push(car.index);
                }
            }
        }

        match tied.len() {
            0 => None,
            1 => Some(tied[0]),
            n => Some(tied[random.pick_index(n)]),
        }
    }
}
