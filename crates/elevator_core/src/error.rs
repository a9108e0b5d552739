use std::error::Error;
use std::fmt;
use std::io;

use crate::direction::Direction;

/// Violations of the building's waiting-rider bookkeeping. These indicate a defect in
/// the caller (e.g. boarding the same riders twice), never a recoverable condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildingError {
    InsufficientWaiting {
        floor: usize,
        direction: Direction,
        requested: u32,
        available: u32,
    },
    NoSuchCall {
        floor: usize,
        direction: Direction,
    },
}

impl fmt::Display for BuildingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildingError::InsufficientWaiting {
                floor,
                direction,
                requested,
                available,
            } => write!(
                f,
                "cannot remove {requested} {direction} riders at floor {floor}: only {available} waiting"
            ),
            BuildingError::NoSuchCall { floor, direction } => {
                write!(f, "floor {floor} has no {direction} call button")
            }
        }
    }
}

impl Error for BuildingError {}

/// Rejected configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Json(serde_json::Error),
    TooFewFloors(usize),
    NoElevators,
    ZeroCapacity { elevator: String },
    FloorsServedMismatch {
        elevator: String,
        floors_served: usize,
        floor_count: usize,
    },
    ZeroRunningTime,
    InvalidDelayRange {
        name: &'static str,
        min_ms: u64,
        max_ms: u64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "failed to read config: {err}"),
            ConfigError::Json(err) => write!(f, "failed to parse config: {err}"),
            ConfigError::TooFewFloors(n) => {
                write!(f, "building needs at least 2 floors, got {n}")
            }
            ConfigError::NoElevators => f.write_str("config lists no elevators"),
            ConfigError::ZeroCapacity { elevator } => {
                write!(f, "elevator '{elevator}' has zero capacity")
            }
            ConfigError::FloorsServedMismatch {
                elevator,
                floors_served,
                floor_count,
            } => write!(
                f,
                "elevator '{elevator}' serves {floors_served} floors but the building has {floor_count}; partial service is not supported"
            ),
            ConfigError::ZeroRunningTime => f.write_str("running time must be positive"),
            ConfigError::InvalidDelayRange {
                name,
                min_ms,
                max_ms,
            } => write!(f, "{name}: min {min_ms} ms exceeds max {max_ms} ms"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Json(err)
    }
}

/// Why a simulation run ended early.
#[derive(Debug)]
pub enum SimError {
    Config(ConfigError),
    InvariantViolation(BuildingError),
    Runtime(io::Error),
    /// An agent task panicked or was cancelled before reporting.
    AgentAborted(String),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::Config(err) => write!(f, "invalid configuration: {err}"),
            SimError::InvariantViolation(err) => write!(f, "invariant violation: {err}"),
            SimError::Runtime(err) => write!(f, "failed to start runtime: {err}"),
            SimError::AgentAborted(reason) => write!(f, "agent aborted: {reason}"),
        }
    }
}

impl Error for SimError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SimError::Config(err) => Some(err),
            SimError::InvariantViolation(err) => Some(err),
            SimError::Runtime(err) => Some(err),
            SimError::AgentAborted(_) => None,
        }
    }
}

impl From<ConfigError> for SimError {
    fn from(err: ConfigError) -> Self {
        SimError::Config(err)
    }
}

impl From<BuildingError> for SimError {
    fn from(err: BuildingError) -> Self {
        SimError::InvariantViolation(err)
    }
}

impl From<io::Error> for SimError {
    fn from(err: io::Error) -> Self {
        SimError::Runtime(err)
    }
}
