use std::rc::Rc;

use log::trace;
use tokio::time::sleep;

use crate::error::SimError;
use crate::fleet::SharedElevator;
use crate::telemetry::{ActorKind, EventTag};

use super::{AgentContext, AgentOutcome};

/// Drives car `index` through move, arrive, service-or-pass until the deadline.
///
/// The car boards whoever is waiting at its start floor first. An empty car with a
/// clear panel polls instead of moving. The loop exits at the first deadline check
/// after the deadline, wherever the car is.
pub async fn elevator_agent(ctx: Rc<AgentContext>, index: usize) -> Result<AgentOutcome, SimError> {
    let car = ctx
        .fleet
        .elevator(index)
        .cloned()
        .ok_or_else(|| SimError::AgentAborted(format!("no elevator with index {index}")))?;
    let name = car.borrow().name().to_string();
    ctx.emit_car(index, &car.borrow(), EventTag::Init, 0);

    board(&ctx, &car, index)?;

    let mut trips: u64 = 0;
    if wait_for_work(&ctx, &car, index).await {
        serve_call_here(&ctx, &car, index).await?;
        while !ctx.clock.is_past_deadline() {
            ctx.emit_car(index, &car.borrow(), EventTag::Move, 0);
            if !has_work(&car) {
                if !wait_for_work(&ctx, &car, index).await {
                    break;
                }
                serve_call_here(&ctx, &car, index).await?;
            }

            sleep(ctx.pause(ctx.pacing.move_delay)).await;

            let must_stop = {
                let mut c = car.borrow_mut();
                c.advance();
                if c.current_floor() == 0 {
                    trips += 1;
                    ctx.emit_car(index, &c, EventTag::CycleComplete, trips);
                }
                c.must_stop()
            };

            if must_stop {
                ctx.emit_car(index, &car.borrow(), EventTag::Stop, 0);
                sleep(ctx.pause(ctx.pacing.door_delay)).await;
                service(&ctx, &car, index)?;
            } else {
                ctx.emit_car(index, &car.borrow(), EventTag::Pass, 0);
                sleep(ctx.pause(ctx.pacing.pass_delay)).await;
            }
        }
    }

    trace!("{name} done after {trips} trips");
    ctx.emit_car(index, &car.borrow(), EventTag::Done, trips);
    Ok(AgentOutcome {
        kind: ActorKind::Elevator,
        id: index,
        name,
        count: trips,
    })
}

fn has_work(car: &SharedElevator) -> bool {
    let c = car.borrow();
    c.has_any_call() || c.riders() > 0
}

/// Polls until the car has a call or riders. Returns `false` if the deadline came first.
async fn wait_for_work(ctx: &AgentContext, car: &SharedElevator, index: usize) -> bool {
    loop {
        if has_work(car) {
            return true;
        }
        if ctx.clock.is_past_deadline() {
            return false;
        }
        trace!("car {index} idle at floor {}", car.borrow().current_floor());
        ctx.emit_car(index, &car.borrow(), EventTag::Poll, 0);
        sleep(ctx.pause(ctx.pacing.poll_interval)).await;
    }
}

/// A car woken by a call at the floor it idles on serves it before leaving.
async fn serve_call_here(
    ctx: &AgentContext,
    car: &SharedElevator,
    index: usize,
) -> Result<(), SimError> {
    if !car.borrow().has_call_here() {
        return Ok(());
    }
    ctx.emit_car(index, &car.borrow(), EventTag::Stop, 0);
    sleep(ctx.pause(ctx.pacing.door_delay)).await;
    service(ctx, car, index)
}

/// Boards riders waiting at the car's floor in its direction. Runs without suspending.
fn board(ctx: &AgentContext, car: &SharedElevator, index: usize) -> Result<u32, SimError> {
    let mut c = car.borrow_mut();
    let mut building = ctx.building.borrow_mut();
    let boarded = c.load(&mut building, &mut *ctx.random.borrow_mut())?;
    c.clear_served_call(&building);
    ctx.emit_car(index, &c, EventTag::Load, u64::from(boarded));
    Ok(boarded)
}

/// Unload then load at the current floor. Runs without suspending.
fn service(ctx: &AgentContext, car: &SharedElevator, index: usize) -> Result<(), SimError> {
    {
        let mut c = car.borrow_mut();
        if c.riders() > 0 {
            let left = c.unload(&mut *ctx.random.borrow_mut());
            ctx.emit_car(index, &c, EventTag::Unload, u64::from(left));
        }
    }
    board(ctx, car, index)?;
    Ok(())
}
