//! `elevsim`: runs one elevator dispatch simulation and reports how every agent finished.

use std::cell::RefCell;
use std::error::Error;
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use clap::Parser;
use log::{error, info, warn, LevelFilter};

use elevator_core::scenario::{build_simulation, load_config, SimConfig};
use elevator_core::telemetry::{LogSink, SimTelemetry, Tee};
use elevator_core::telemetry_export::{
    validate_elevator_moves, validate_event_ordering, validate_occupancy, write_events_parquet,
};

#[derive(Parser, Debug)]
#[command(
    name = "elevsim",
    about = "Multi-elevator dispatch simulation",
    long_about = "Simulates riders arriving at floors and a fleet of cars answering their\n\
                  hall calls with nearest-car dispatch, then reports per-agent results."
)]
struct Args {
    /// JSON building description. Defaults to three floors and two cars of ten.
    #[arg(long, env = "ELEVSIM_CONFIG")]
    config: Option<PathBuf>,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Override the configured running time
    #[arg(long)]
    running_time_secs: Option<u64>,

    /// Write every recorded event to this Parquet file
    #[arg(long)]
    events_parquet: Option<PathBuf>,

    /// Write the run report to this JSON file
    #[arg(long)]
    summary_json: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(long, short)]
    quiet: bool,
}

impl Args {
    fn load(&self) -> Result<SimConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => SimConfig::default(),
        };
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(secs) = self.running_time_secs {
            config = config.with_running_time_secs(secs);
        }
        Ok(config)
    }
}

fn init_logging(quiet: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if quiet {
        builder.filter_level(LevelFilter::Warn);
    }
    builder.init();
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let config = args.load()?;
    let sink = Rc::new(RefCell::new(Tee::new(SimTelemetry::default(), LogSink)));
    let simulation = build_simulation(&config, sink.clone())?;

    let report = simulation.run_blocking()?;
    println!("{report}");

    let sink = sink.borrow();
    let events = &sink.first.events;
    info!("{} events recorded", events.len());

    let capacities: Vec<u32> = config.elevators.iter().map(|car| car.capacity).collect();
    let problems = [
        validate_event_ordering(events),
        validate_elevator_moves(events),
        validate_occupancy(events, &capacities),
    ];
    for problem in problems.into_iter().flatten() {
        warn!("event log check failed: {problem}");
    }

    if let Some(path) = &args.events_parquet {
        write_events_parquet(path, events)?;
        info!("wrote {} events to {}", events.len(), path.display());
    }
    if let Some(path) = &args.summary_json {
        serde_json::to_writer_pretty(File::create(path)?, &report)?;
        info!("wrote run report to {}", path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.quiet);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_built_in_building() {
        let args = Args::try_parse_from(["elevsim"]).expect("parse");
        let config = args.load().expect("default config");
        assert_eq!(config, SimConfig::default());
        assert!(!args.quiet);
    }

    #[test]
    fn overrides_apply_on_top_of_the_config() {
        let args = Args::try_parse_from([
            "elevsim",
            "--seed",
            "9",
            "--running-time-secs",
            "3",
            "--events-parquet",
            "out.parquet",
            "-q",
        ])
        .expect("parse");
        let config = args.load().expect("config");
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.running_time_secs, 3);
        assert_eq!(args.events_parquet, Some(PathBuf::from("out.parquet")));
        assert!(args.quiet);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let args =
            Args::try_parse_from(["elevsim", "--config", "/nonexistent/building.json"]).expect("parse");
        assert!(args.load().is_err());
    }

    #[test]
    fn short_run_writes_both_exports() {
        let dir = tempfile::tempdir().expect("tempdir");
        let events = dir.path().join("events.parquet");
        let summary = dir.path().join("summary.json");
        let args = Args::try_parse_from([
            "elevsim",
            "--seed",
            "1",
            "--running-time-secs",
            "1",
            "--events-parquet",
            events.to_str().expect("utf-8 path"),
            "--summary-json",
            summary.to_str().expect("utf-8 path"),
        ])
        .expect("parse");

        run(&args).expect("run");
        assert!(events.exists());
        let report: serde_json::Value =
            serde_json::from_reader(File::open(&summary).expect("summary")).expect("json");
        assert_eq!(report["outcomes"].as_array().map(Vec::len), Some(5));
    }
}
