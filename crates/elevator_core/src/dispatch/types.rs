use crate::direction::Direction;

/// A directional request raised at a floor, as seen by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HallCall {
    pub floor: usize,
    pub direction: Direction,
}

impl HallCall {
    pub fn new(floor: usize, direction: Direction) -> Self {
        Self { floor, direction }
    }
}
