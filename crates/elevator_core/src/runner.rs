//! Simulation runner: starts one agent per floor and per elevator on a single-threaded
//! local task set and collects their outcomes once the deadline passes.
//!
//! An agent that fails (a bookkeeping invariant broke) aborts every other agent and the
//! run returns that error.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use log::{error, info};
use serde::Serialize;
use tokio::task::{JoinSet, LocalSet};

use crate::agents::{elevator_agent, floor_agent, AgentContext, AgentOutcome};
use crate::building::BuildingState;
use crate::clock::SimulationClock;
use crate::error::SimError;
use crate::fleet::Fleet;
use crate::random::SharedRandom;
use crate::scenario::PacingConfig;
use crate::telemetry::SharedSink;

const DEFAULT_RUNNING_TIME: Duration = Duration::from_secs(80);

/// Totals and per-agent outcomes of a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub outcomes: Vec<AgentOutcome>,
    pub elapsed_ms: u64,
    pub total_arrived: u64,
    pub total_boarded: u64,
    pub still_waiting: u64,
    pub riders_aboard: u64,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            writeln!(f, "{outcome}")?;
        }
        write!(
            f,
            "{} riders arrived, {} boarded, {} still waiting, {} aboard after {:.1} s",
            self.total_arrived,
            self.total_boarded,
            self.still_waiting,
            self.riders_aboard,
            self.elapsed_ms as f64 / 1000.0
        )
    }
}

/// A fully wired building and fleet, ready to run once.
pub struct Simulation {
    building: Rc<RefCell<BuildingState>>,
    fleet: Rc<Fleet>,
    random: SharedRandom,
    sink: SharedSink,
    pacing: PacingConfig,
    running_time: Duration,
    arrival_bound: u32,
}

impl Simulation {
    pub fn new(building: BuildingState, fleet: Fleet, random: SharedRandom, sink: SharedSink) -> Self {
        let arrival_bound = u32::try_from(building.floor_count()).unwrap_or(u32::MAX);
        Self {
            building: Rc::new(RefCell::new(building)),
            fleet: Rc::new(fleet),
            random,
            sink,
            pacing: PacingConfig::default(),
            running_time: DEFAULT_RUNNING_TIME,
            arrival_bound,
        }
    }

    pub fn with_pacing(mut self, pacing: PacingConfig) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_running_time(mut self, running_time: Duration) -> Self {
        self.running_time = running_time;
        self
    }

    pub fn with_arrival_bound(mut self, arrival_bound: u32) -> Self {
        self.arrival_bound = arrival_bound;
        self
    }

    pub fn building(&self) -> &Rc<RefCell<BuildingState>> {
        &self.building
    }

    pub fn fleet(&self) -> &Rc<Fleet> {
        &self.fleet
    }

    /// Runs every agent until the deadline. Must be awaited on a tokio runtime with the
    /// time driver enabled; agents are spawned on an internal [`LocalSet`].
    pub async fn run(&self) -> Result<RunReport, SimError> {
        let clock = SimulationClock::start(self.running_time);
        let floor_count = self.building.borrow().floor_count();
        info!(
            "starting run: {} floors, {} elevators, {:?}",
            floor_count,
            self.fleet.len(),
            self.running_time
        );

        let ctx = Rc::new(AgentContext {
            building: Rc::clone(&self.building),
            fleet: Rc::clone(&self.fleet),
            random: Rc::clone(&self.random),
            sink: Rc::clone(&self.sink),
            clock,
            pacing: self.pacing,
            arrival_bound: self.arrival_bound,
        });
        let elevator_count = self.fleet.len();

        let local = LocalSet::new();
        let mut outcomes = local
            .run_until(async move {
                let mut agents = JoinSet::new();
                for floor in 0..floor_count {
                    agents.spawn_local(floor_agent(Rc::clone(&ctx), floor));
                }
                for index in 0..elevator_count {
                    agents.spawn_local(elevator_agent(Rc::clone(&ctx), index));
                }

                let mut outcomes = Vec::with_capacity(floor_count + elevator_count);
                while let Some(joined) = agents.join_next().await {
                    let failure = match joined {
                        Ok(Ok(outcome)) => {
                            outcomes.push(outcome);
                            continue;
                        }
                        Ok(Err(err)) => err,
                        Err(join_err) => SimError::AgentAborted(join_err.to_string()),
                    };
                    error!("run aborted: {failure}");
                    agents.abort_all();
                    return Err(failure);
                }
                Ok(outcomes)
            })
            .await?;
        outcomes.sort_by_key(|outcome| (outcome.kind, outcome.id));

        let building = self.building.borrow();
        let riders_aboard = self
            .fleet
            .elevators()
            .iter()
            .map(|car| u64::from(car.borrow().riders()))
            .sum();
        let report = RunReport {
            outcomes,
            elapsed_ms: clock.now_ms(),
            total_arrived: building.total_arrived(),
            total_boarded: building.total_boarded(),
            still_waiting: building.total_waiting(),
            riders_aboard,
        };
        info!(
            "run finished after {} ms: {} arrived, {} boarded",
            report.elapsed_ms, report.total_arrived, report.total_boarded
        );
        Ok(report)
    }

    /// Runs on a fresh current-thread runtime. For callers not already inside tokio.
    pub fn run_blocking(&self) -> Result<RunReport, SimError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;
        runtime.block_on(self.run())
    }
}
