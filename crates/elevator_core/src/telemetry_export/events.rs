use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, UInt32Array, UInt64Array, UInt8Array};
use arrow::datatypes::Schema;

use crate::telemetry::SimEvent;

use super::utils::{
    actor_kind_code, direction_code, event_tag_code, nullable_u8_field, u32_field, u64_field,
    u8_field, write_record_batch,
};

/// Column names of the event table, in order.
pub const EVENT_COLUMNS: [&str; 8] = [
    "timestamp_ms",
    "actor_kind",
    "actor_id",
    "tag",
    "magnitude",
    "floor",
    "direction",
    "occupancy",
];

/// Writes one row per event. Enum columns use the codes from
/// [`actor_kind_code`], [`event_tag_code`] and [`direction_code`]; `direction` is null
/// for floor lifecycle events.
pub fn write_events_parquet<P: AsRef<Path>>(
    path: P,
    events: &[SimEvent],
) -> Result<(), Box<dyn Error>> {
    let mut timestamp_ms = Vec::with_capacity(events.len());
    let mut actor_kind = Vec::with_capacity(events.len());
    let mut actor_id = Vec::with_capacity(events.len());
    let mut tag = Vec::with_capacity(events.len());
    let mut magnitude = Vec::with_capacity(events.len());
    let mut floor = Vec::with_capacity(events.len());
    let mut direction = Vec::with_capacity(events.len());
    let mut occupancy = Vec::with_capacity(events.len());

    for event in events {
        timestamp_ms.push(event.timestamp_ms);
        actor_kind.push(actor_kind_code(event.actor));
        actor_id.push(event.actor_id as u64);
        tag.push(event_tag_code(event.tag));
        magnitude.push(event.magnitude);
        floor.push(event.floor as u64);
        direction.push(event.direction.map(direction_code));
        occupancy.push(event.occupancy);
    }

    let schema = Schema::new(vec![
        u64_field(EVENT_COLUMNS[0]),
        u8_field(EVENT_COLUMNS[1]),
        u64_field(EVENT_COLUMNS[2]),
        u8_field(EVENT_COLUMNS[3]),
        u64_field(EVENT_COLUMNS[4]),
        u64_field(EVENT_COLUMNS[5]),
        nullable_u8_field(EVENT_COLUMNS[6]),
        u32_field(EVENT_COLUMNS[7]),
    ]);

    let arrays: Vec<ArrayRef> = vec![
        Arc::new(UInt64Array::from(timestamp_ms)),
        Arc::new(UInt8Array::from(actor_kind)),
        Arc::new(UInt64Array::from(actor_id)),
        Arc::new(UInt8Array::from(tag)),
        Arc::new(UInt64Array::from(magnitude)),
        Arc::new(UInt64Array::from(floor)),
        Arc::new(UInt8Array::from(direction)),
        Arc::new(UInt32Array::from(occupancy)),
    ];

    write_record_batch(path, schema, arrays)
}
