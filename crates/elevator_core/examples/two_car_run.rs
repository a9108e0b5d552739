//! Run the default two-car, three-floor building for twenty seconds and print the report.
//!
//! Run with: cargo run -p elevator_core --example two_car_run

use elevator_core::scenario::{build_simulation, SimConfig};
use elevator_core::telemetry::{EventTag, SimTelemetry};

fn main() {
    let config = SimConfig::default().with_seed(123).with_running_time_secs(20);
    let telemetry = SimTelemetry::shared();
    let simulation = match build_simulation(&config, telemetry.clone()) {
        Ok(simulation) => simulation,
        Err(err) => {
            eprintln!("invalid config: {err}");
            std::process::exit(1);
        }
    };

    match simulation.run_blocking() {
        Ok(report) => println!("{report}"),
        Err(err) => {
            eprintln!("run failed: {err}");
            std::process::exit(1);
        }
    }

    let telemetry = telemetry.borrow();
    println!(
        "{} events: {} stops, {} passes, {} polls",
        telemetry.events.len(),
        telemetry.counts.get(EventTag::Stop),
        telemetry.counts.get(EventTag::Pass),
        telemetry.counts.get(EventTag::Poll)
    );
}
