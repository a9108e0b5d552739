//! Travel direction shared by hall calls, car calls and elevator state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Direction of travel. A car never idles: with no work it keeps its last direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Up, Direction::Down];
}

/// The other direction.
pub fn opposite(direction: Direction) -> Direction {
    match direction {
        Direction::Up => Direction::Down,
        Direction::Down => Direction::Up,
    }
}

/// Slot of a direction in two-element panels (`[up, down]`).
pub fn panel_index(direction: Direction) -> usize {
    match direction {
        Direction::Up => 0,
        Direction::Down => 1,
    }
}

/// Whether a hall call in `direction` can exist at `floor` in a building of `floor_count` floors.
/// There is no up call at the top floor and no down call at the bottom floor.
pub fn is_callable(floor: usize, direction: Direction, floor_count: usize) -> bool {
    match direction {
        Direction::Up => floor + 1 < floor_count,
        Direction::Down => floor > 0 && floor < floor_count,
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => f.write_str("up"),
            Direction::Down => f.write_str("down"),
        }
    }
}
