mod support;

use std::iter;
use std::time::Duration;

use elevator_core::building::BuildingState;
use elevator_core::direction::Direction;
use elevator_core::error::{BuildingError, SimError};
use elevator_core::fleet::Fleet;
use elevator_core::runner::Simulation;
use elevator_core::telemetry::{ActorKind, EventTag, SimTelemetry};
use elevator_core::telemetry_export::{
    validate_elevator_moves, validate_event_ordering, validate_occupancy,
};
use elevator_core::test_helpers::{fast_pacing, test_elevators, ScriptedRandom};
use support::{count_events, TestRunConfig};

#[tokio::test(start_paused = true)]
async fn seeded_run_keeps_rider_accounting_consistent() {
    let config = TestRunConfig::default();
    let (simulation, telemetry) = config.build();

    let report = simulation.run().await.expect("run should finish at the deadline");

    assert_eq!(report.outcomes.len(), config.floor_count + config.elevator_count);
    assert!(report.total_arrived > 0, "five seconds should bring riders");
    assert!(report.total_boarded <= report.total_arrived);
    assert_eq!(
        report.total_arrived,
        report.total_boarded + report.still_waiting
    );
    assert!(report.elapsed_ms >= config.running_time.as_millis() as u64);

    let telemetry = telemetry.borrow();
    assert_eq!(telemetry.total(EventTag::Load), report.total_boarded);
    assert_eq!(telemetry.total(EventTag::Arrival), report.total_arrived);
}

#[tokio::test(start_paused = true)]
async fn event_stream_passes_validators() {
    let config = TestRunConfig {
        floor_count: 8,
        elevator_count: 3,
        capacity: 3,
        running_time: Duration::from_secs(20),
        ..Default::default()
    };
    let (simulation, telemetry) = config.build();
    simulation.run().await.expect("run");

    let telemetry = telemetry.borrow();
    assert!(validate_event_ordering(&telemetry.events).is_none());
    assert!(validate_elevator_moves(&telemetry.events).is_none());
    assert!(validate_occupancy(&telemetry.events, &config.capacities()).is_none());

    let top = config.floor_count - 1;
    for event in telemetry.events.iter().filter(|e| e.actor == ActorKind::Elevator) {
        if event.floor == top {
            assert_eq!(event.direction, Some(Direction::Down));
        }
        if event.floor == 0 && event.tag != EventTag::Init {
            assert_eq!(event.direction, Some(Direction::Up));
        }
    }
}

#[tokio::test(start_paused = true)]
async fn every_agent_reports_done_once_and_last() {
    let config = TestRunConfig::default();
    let (simulation, telemetry) = config.build();
    let report = simulation.run().await.expect("run");
    let telemetry = telemetry.borrow();

    for (kind, count) in [
        (ActorKind::Floor, config.floor_count),
        (ActorKind::Elevator, config.elevator_count),
    ] {
        for id in 0..count {
            assert_eq!(count_events(&telemetry, kind, id, EventTag::Init), 1);
            assert_eq!(count_events(&telemetry, kind, id, EventTag::Done), 1);
            let last = telemetry.events_of(kind, id).last().expect("events");
            assert_eq!(last.tag, EventTag::Done);
        }
    }

    for outcome in report.outcomes.iter().filter(|o| o.kind == ActorKind::Elevator) {
        let cycles = count_events(&telemetry, ActorKind::Elevator, outcome.id, EventTag::CycleComplete);
        assert_eq!(outcome.count, cycles as u64);
    }
}

#[tokio::test(start_paused = true)]
async fn agents_stop_shortly_after_the_deadline() {
    let config = TestRunConfig::default();
    let (simulation, telemetry) = config.build();
    simulation.run().await.expect("run");

    // Longest single pause in the fast pacing is the arrival jitter.
    let limit = config.running_time.as_millis() as u64 + 50;
    let telemetry = telemetry.borrow();
    assert!(telemetry.events.iter().all(|e| e.timestamp_ms <= limit));
}

/// Fresh runtime with a paused clock, so each replay starts from the same timer state.
fn paused_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .expect("runtime should build")
}

#[test]
fn same_seed_replays_the_same_run() {
    let config = TestRunConfig::default();

    let (first, first_events) = config.build();
    paused_runtime().block_on(first.run()).expect("first run");
    let (second, second_events) = config.build();
    paused_runtime().block_on(second.run()).expect("second run");

    assert!(!first_events.borrow().events.is_empty());
    assert_eq!(first_events.borrow().events, second_events.borrow().events);
}

#[tokio::test(start_paused = true)]
async fn idle_building_only_polls() {
    let config = TestRunConfig::default();
    let (simulation, telemetry) = config.build();
    let report = simulation.with_arrival_bound(1).run().await.expect("run");

    assert_eq!(report.total_arrived, 0);
    assert!(report.outcomes.iter().all(|outcome| outcome.count == 0));

    let telemetry = telemetry.borrow();
    for id in 0..config.elevator_count {
        assert!(count_events(&telemetry, ActorKind::Elevator, id, EventTag::Poll) > 0);
        assert_eq!(count_events(&telemetry, ActorKind::Elevator, id, EventTag::Move), 0);
    }
}

#[tokio::test(start_paused = true)]
async fn bookkeeping_failure_aborts_the_run() {
    // The fleet believes in three floors, the building only has two: a rider for the
    // up direction of floor 1 has no slot to wait in.
    let simulation = Simulation::new(
        BuildingState::new(2),
        Fleet::new(3, test_elevators(1, 10, 3)),
        ScriptedRandom::shared(iter::repeat(1).take(64)),
        SimTelemetry::shared(),
    )
    .with_pacing(fast_pacing())
    .with_running_time(Duration::from_secs(5));

    let err = simulation.run().await.expect_err("run should abort");
    assert!(matches!(
        err,
        SimError::InvariantViolation(BuildingError::NoSuchCall {
            floor: 1,
            direction: Direction::Up
        })
    ));
}

#[test]
fn blocking_run_drives_its_own_runtime() {
    let config = TestRunConfig {
        running_time: Duration::from_millis(200),
        ..Default::default()
    };
    let (simulation, _telemetry) = config.build();
    let report = simulation.run_blocking().expect("run");
    assert!(report.elapsed_ms >= 200);
    assert_eq!(report.outcomes.len(), config.floor_count + config.elevator_count);
}
