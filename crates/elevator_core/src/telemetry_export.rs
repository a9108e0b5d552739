//! Export of the recorded event log, plus consistency checks over it.

mod events;
mod utils;
mod validate;

pub use events::{write_events_parquet, EVENT_COLUMNS};
pub use utils::{actor_kind_code, direction_code, event_tag_code};
pub use validate::{validate_elevator_moves, validate_event_ordering, validate_occupancy};
