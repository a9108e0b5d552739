use std::error::Error;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::ArrayRef;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use crate::direction::Direction;
use crate::telemetry::{ActorKind, EventTag};

pub(super) fn u64_field(name: &'static str) -> Field {
    Field::new(name, DataType::UInt64, false)
}

pub(super) fn u32_field(name: &'static str) -> Field {
    Field::new(name, DataType::UInt32, false)
}

pub(super) fn u8_field(name: &'static str) -> Field {
    Field::new(name, DataType::UInt8, false)
}

pub(super) fn nullable_u8_field(name: &'static str) -> Field {
    Field::new(name, DataType::UInt8, true)
}

pub(super) fn write_record_batch<P: AsRef<Path>>(
    path: P,
    schema: Schema,
    arrays: Vec<ArrayRef>,
) -> Result<(), Box<dyn Error>> {
    let schema = Arc::new(schema);
    let batch = RecordBatch::try_new(schema.clone(), arrays)?;
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

pub fn actor_kind_code(kind: ActorKind) -> u8 {
    match kind {
        ActorKind::Floor => 0,
        ActorKind::Elevator => 1,
    }
}

pub fn direction_code(direction: Direction) -> u8 {
    match direction {
        Direction::Up => 0,
        Direction::Down => 1,
    }
}

pub fn event_tag_code(tag: EventTag) -> u8 {
    match tag {
        EventTag::Init => 0,
        EventTag::Arrival => 1,
        EventTag::HallCall => 2,
        EventTag::Load => 3,
        EventTag::Move => 4,
        EventTag::Stop => 5,
        EventTag::Unload => 6,
        EventTag::Pass => 7,
        EventTag::Poll => 8,
        EventTag::CycleComplete => 9,
        EventTag::Done => 10,
    }
}
