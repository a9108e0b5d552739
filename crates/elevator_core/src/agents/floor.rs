use std::rc::Rc;

use log::trace;

use crate::direction::{is_callable, Direction};
use crate::error::SimError;
use crate::telemetry::{ActorKind, EventTag};

use super::{AgentContext, AgentOutcome};

/// Generates riders at `floor` until the deadline.
///
/// Each cycle draws an arrival count per direction the floor offers. A positive draw
/// first raises a hall call through the fleet (unless one is already outstanding) and
/// then adds the riders to the building.
pub async fn floor_agent(ctx: Rc<AgentContext>, floor: usize) -> Result<AgentOutcome, SimError> {
    let floor_count = ctx.fleet.floor_count();
    let directions: Vec<Direction> = Direction::ALL
        .into_iter()
        .filter(|&direction| is_callable(floor, direction, floor_count))
        .collect();
    let label = ctx.building.borrow().floor_label(floor);
    ctx.emit_floor(floor, None, EventTag::Init, 0, 0);

    let mut generated: u64 = 0;
    while !ctx.clock.is_past_deadline() {
        for &direction in &directions {
            generated += u64::from(arrive(&ctx, floor, direction)?);
        }
        let pause = ctx.pause(ctx.pacing.arrival_jitter);
        tokio::time::sleep(pause).await;
    }

    trace!("floor {label} done after {generated} arrivals");
    ctx.emit_floor(floor, None, EventTag::Done, generated, 0);
    Ok(AgentOutcome {
        kind: ActorKind::Floor,
        id: floor,
        name: label,
        count: generated,
    })
}

/// One arrival draw for `floor`/`direction`. Runs without suspending.
fn arrive(ctx: &AgentContext, floor: usize, direction: Direction) -> Result<u32, SimError> {
    let mut random = ctx.random.borrow_mut();
    let riders = random.uniform(0, ctx.arrival_bound.saturating_sub(1));
    if riders == 0 {
        return Ok(0);
    }

    let mut building = ctx.building.borrow_mut();
    if !building.has_call(floor, direction) {
        if ctx.fleet.request_stop(floor, direction, &mut *random).is_some() {
            ctx.emit_floor(
                floor,
                Some(direction),
                EventTag::HallCall,
                u64::from(riders),
                building.waiting(floor, direction),
            );
        }
    }
    building.add_waiting(floor, direction, riders)?;
    ctx.emit_floor(
        floor,
        Some(direction),
        EventTag::Arrival,
        u64::from(riders),
        building.waiting(floor, direction),
    );
    Ok(riders)
}
