pub mod agents;
pub mod building;
pub mod clock;
pub mod direction;
pub mod dispatch;
pub mod elevator;
pub mod error;
pub mod fleet;
pub mod random;
pub mod runner;
pub mod scenario;
pub mod telemetry;
pub mod telemetry_export;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
