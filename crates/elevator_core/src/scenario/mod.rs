//! Scenario setup: the run configuration, loading it from JSON, and turning it into a
//! ready-to-run [`crate::runner::Simulation`].

mod build;
mod params;

pub use build::{build_fleet, build_simulation, load_config};
pub use params::{ElevatorConfig, PacingConfig, SimConfig};
