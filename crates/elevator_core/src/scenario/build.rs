use std::fs;
use std::path::Path;

use crate::building::BuildingState;
use crate::elevator::Elevator;
use crate::error::ConfigError;
use crate::fleet::Fleet;
use crate::random::SeededRandom;
use crate::runner::Simulation;
use crate::scenario::params::SimConfig;
use crate::telemetry::SharedSink;

/// Reads and validates a JSON config file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SimConfig, ConfigError> {
    let text = fs::read_to_string(path)?;
    SimConfig::from_json_str(&text)
}

/// One car per configured elevator, all parked at floor 0 heading up.
pub fn build_fleet(config: &SimConfig) -> Fleet {
    let elevators = config
        .elevators
        .iter()
        .enumerate()
        .map(|(id, car)| Elevator::new(id, car.name.clone(), car.capacity, car.floors_served))
        .collect();
    Fleet::new(config.floor_count, elevators)
}

/// Validates `config` and assembles a fresh building, fleet and seeded random source.
pub fn build_simulation(config: &SimConfig, sink: SharedSink) -> Result<Simulation, ConfigError> {
    config.validate()?;
    Ok(Simulation::new(
        BuildingState::new(config.floor_count),
        build_fleet(config),
        SeededRandom::shared(config.seed),
        sink,
    )
    .with_pacing(config.pacing)
    .with_running_time(config.running_time())
    .with_arrival_bound(config.arrival_bound()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::ElevatorConfig;
    use crate::telemetry::SimTelemetry;

    #[test]
    fn fleet_mirrors_config_order() {
        let mut config = SimConfig::default();
        config.elevators.push(ElevatorConfig::new("freight", 20, 3));
        let fleet = build_fleet(&config);
        assert_eq!(fleet.len(), 3);
        let freight = fleet.elevators()[2].borrow();
        assert_eq!(freight.name(), "freight");
        assert_eq!(freight.capacity(), 20);
        assert_eq!(freight.id(), 2);
        assert_eq!(freight.current_floor(), 0);
    }

    #[test]
    fn invalid_config_builds_nothing() {
        let config = SimConfig::default().with_running_time_secs(0);
        assert!(build_simulation(&config, SimTelemetry::shared()).is_err());
    }

    #[test]
    fn load_config_reads_json_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("building.json");
        std::fs::write(
            &path,
            r#"{"floor_count": 5, "elevators": [{"name": "A", "capacity": 8, "floors_served": 5}], "running_time_secs": 10, "seed": 3}"#,
        )
        .expect("write config");
        let config = load_config(&path).expect("load");
        assert_eq!(config.floor_count, 5);
        assert_eq!(config.seed, Some(3));

        assert!(matches!(
            load_config(dir.path().join("missing.json")),
            Err(ConfigError::Io(_))
        ));
    }
}
