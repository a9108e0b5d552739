pub mod algorithm;
pub mod nearest_car;
pub mod types;

pub use algorithm::DispatchAlgorithm;
pub use nearest_car::NearestCar;
pub use types::HallCall;
