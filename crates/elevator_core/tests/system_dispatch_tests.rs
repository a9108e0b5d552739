use elevator_core::direction::Direction;
use elevator_core::dispatch::{DispatchAlgorithm, HallCall, NearestCar};
use elevator_core::elevator::Elevator;
use elevator_core::fleet::Fleet;
use elevator_core::random::SeededRandom;
use elevator_core::test_helpers::ScriptedRandom;

#[test]
fn down_call_at_top_goes_to_the_car_already_there() {
    let fleet = Fleet::new(
        3,
        vec![
            Elevator::new(0, "A", 10, 3).with_position(2, Direction::Down),
            Elevator::new(1, "B", 10, 3),
        ],
    );
    let call = HallCall::new(2, Direction::Down);
    let positions = fleet.positions();
    assert_eq!(NearestCar.estimate_distance(&positions[0], call, 3), 0);
    assert_eq!(NearestCar.estimate_distance(&positions[1], call, 3), 2);

    let mut random = ScriptedRandom::default();
    assert_eq!(fleet.request_stop(2, Direction::Down, &mut random), Some(0));
    assert!(fleet.elevators()[0].borrow().has_car_call(2, Direction::Down));
    assert!(!fleet.elevators()[1].borrow().has_any_call());
}

#[test]
fn up_call_at_ground_picks_the_parked_car() {
    let fleet = Fleet::new(
        4,
        vec![
            Elevator::new(0, "A", 10, 4).with_position(2, Direction::Up),
            Elevator::new(1, "B", 10, 4),
        ],
    );
    let mut random = SeededRandom::new(Some(3));
    for _ in 0..20 {
        assert_eq!(fleet.request_stop(0, Direction::Up, &mut random), Some(1));
    }
}

#[test]
fn estimates_stay_within_a_full_loop() {
    let floor_count = 7;
    let max_dist = 2 * (floor_count - 1);
    for floor in 0..floor_count {
        for direction in [Direction::Up, Direction::Down] {
            let car = Elevator::new(0, "A", 10, floor_count)
                .with_position(floor, direction)
                .position(0);
            for call_floor in 0..floor_count {
                for call_direction in [Direction::Up, Direction::Down] {
                    let call = HallCall::new(call_floor, call_direction);
                    let distance = NearestCar.estimate_distance(&car, call, floor_count);
                    assert!(
                        distance <= max_dist,
                        "car {car:?} call {call:?} gave {distance}"
                    );
                }
            }
        }
    }
}

#[test]
fn ties_are_broken_by_the_random_source() {
    let fleet = Fleet::new(3, vec![Elevator::new(0, "A", 10, 3), Elevator::new(1, "B", 10, 3)]);
    let mut pick_second = ScriptedRandom::new([1]);
    assert_eq!(fleet.request_stop(1, Direction::Up, &mut pick_second), Some(1));
    assert!(fleet.elevators()[1].borrow().has_car_call(1, Direction::Up));
    assert!(!fleet.elevators()[0].borrow().has_any_call());
}
