//! Load tests for elevator_core: long runs on a tall building with a paused clock.

mod support;

use std::time::{Duration, Instant};

use elevator_core::telemetry_export::{
    validate_elevator_moves, validate_event_ordering, validate_occupancy,
};
use support::TestRunConfig;

#[tokio::test(start_paused = true)]
#[ignore] // Only run explicitly: cargo test --package elevator_core --test load_tests -- --ignored
async fn test_sustained_load() {
    let config = TestRunConfig {
        seed: 7,
        floor_count: 30,
        elevator_count: 8,
        capacity: 12,
        running_time: Duration::from_secs(10 * 60),
    };
    let (simulation, telemetry) = config.build();

    let start = Instant::now();
    let report = simulation.run().await.expect("run");
    let duration = start.elapsed();

    let telemetry = telemetry.borrow();
    let events = telemetry.events.len();
    let events_per_sec = events as f64 / duration.as_secs_f64();
    println!(
        "Sustained load test: {} events in {:.2}s ({:.0} events/sec), {} riders boarded",
        events,
        duration.as_secs_f64(),
        events_per_sec,
        report.total_boarded
    );

    assert!(validate_event_ordering(&telemetry.events).is_none());
    assert!(validate_elevator_moves(&telemetry.events).is_none());
    assert!(validate_occupancy(&telemetry.events, &config.capacities()).is_none());
    assert_eq!(
        report.total_arrived,
        report.total_boarded + report.still_waiting
    );

    // Assert minimum performance threshold
    assert!(
        events_per_sec > 10_000.0,
        "throughput too low: {events_per_sec:.0} events/sec"
    );
}
