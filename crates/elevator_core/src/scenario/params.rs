use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::clock::DelayRange;
use crate::error::ConfigError;

/// Default run length of the two-car demo building.
const DEFAULT_RUNNING_TIME_SECS: u64 = 80;
const DEFAULT_FLOOR_COUNT: usize = 3;
const DEFAULT_CAPACITY: u32 = 10;

/// One car as configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElevatorConfig {
    pub name: String,
    pub capacity: u32,
    pub floors_served: usize,
}

impl ElevatorConfig {
    pub fn new(name: impl Into<String>, capacity: u32, floors_served: usize) -> Self {
        Self {
            name: name.into(),
            capacity,
            floors_served,
        }
    }
}

/// Every timed pause in the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Travel time between adjacent floors.
    pub move_delay: DelayRange,
    /// Doors open at a stop, before unloading.
    pub door_delay: DelayRange,
    /// Going past a floor without stopping.
    pub pass_delay: DelayRange,
    /// Recheck interval of an idle car.
    pub poll_interval: DelayRange,
    /// Gap between two arrival draws at a floor.
    pub arrival_jitter: DelayRange,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            move_delay: DelayRange::new(100, 300),
            door_delay: DelayRange::new(100, 400),
            pass_delay: DelayRange::fixed(10),
            poll_interval: DelayRange::fixed(100),
            arrival_jitter: DelayRange::new(100, 900),
        }
    }
}

impl PacingConfig {
    fn named_ranges(&self) -> [(&'static str, DelayRange); 5] {
        [
            ("move_delay", self.move_delay),
            ("door_delay", self.door_delay),
            ("pass_delay", self.pass_delay),
            ("poll_interval", self.poll_interval),
            ("arrival_jitter", self.arrival_jitter),
        ]
    }
}

/// A complete run description: building, fleet, duration and pacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    pub floor_count: usize,
    pub elevators: Vec<ElevatorConfig>,
    pub running_time_secs: u64,
    /// Seed for the shared random source. `None` seeds from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Upper bound (exclusive) of riders drawn per floor, direction and cycle.
    /// Defaults to the floor count.
    #[serde(default)]
    pub max_arrivals_per_draw: Option<u32>,
    #[serde(default)]
    pub pacing: PacingConfig,
}

impl Default for SimConfig {
    /// Three floors, two cars of ten, eighty seconds.
    fn default() -> Self {
        Self {
            floor_count: DEFAULT_FLOOR_COUNT,
            elevators: vec![
                ElevatorConfig::new("elev.1", DEFAULT_CAPACITY, DEFAULT_FLOOR_COUNT),
                ElevatorConfig::new("elev.2", DEFAULT_CAPACITY, DEFAULT_FLOOR_COUNT),
            ],
            running_time_secs: DEFAULT_RUNNING_TIME_SECS,
            seed: None,
            max_arrivals_per_draw: None,
            pacing: PacingConfig::default(),
        }
    }
}

impl SimConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_running_time_secs(mut self, secs: u64) -> Self {
        self.running_time_secs = secs;
        self
    }

    pub fn with_pacing(mut self, pacing: PacingConfig) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_max_arrivals_per_draw(mut self, max: u32) -> Self {
        self.max_arrivals_per_draw = Some(max);
        self
    }

    pub fn running_time(&self) -> Duration {
        Duration::from_secs(self.running_time_secs)
    }

    pub fn arrival_bound(&self) -> u32 {
        self.max_arrivals_per_draw
            .unwrap_or_else(|| u32::try_from(self.floor_count).unwrap_or(u32::MAX))
    }

    /// Checks everything the core assumes about its input.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.floor_count < 2 {
            return Err(ConfigError::TooFewFloors(self.floor_count));
        }
        if self.elevators.is_empty() {
            return Err(ConfigError::NoElevators);
        }
        for elevator in &self.elevators {
            if elevator.capacity == 0 {
                return Err(ConfigError::ZeroCapacity {
                    elevator: elevator.name.clone(),
                });
            }
            if elevator.floors_served != self.floor_count {
                return Err(ConfigError::FloorsServedMismatch {
                    elevator: elevator.name.clone(),
                    floors_served: elevator.floors_served,
                    floor_count: self.floor_count,
                });
            }
        }
        if self.running_time_secs == 0 {
            return Err(ConfigError::ZeroRunningTime);
        }
        for (name, range) in self.pacing.named_ranges() {
            if !range.is_valid() {
                return Err(ConfigError::InvalidDelayRange {
                    name,
                    min_ms: range.min_ms,
                    max_ms: range.max_ms,
                });
            }
        }
        Ok(())
    }
}
