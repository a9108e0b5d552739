use std::path::Path;
use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the elevator dispatch simulation workspace",
    long_about = "A unified CLI for running simulations, benchmarks,\n\
                  and CI checks in the elevator dispatch simulation workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the default building (3 floors, 2 cars, 80 s)
    Run {
        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run the tower building (12 floors, 3 cars) and export its events
    RunTower {
        /// Parquet output path
        #[arg(long, default_value = "tower_events.parquet")]
        events: String,
    },
    /// Run Criterion benchmarks
    Bench,
    /// Compare benchmarks: stash changes, create baseline, restore, compare
    BenchCompare,
    /// Run CI checks (fmt, clippy, tests, examples, benchmarks)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
    /// Run load tests (ignored tests in elevator_core)
    LoadTest,
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, and tests
    Check,
    /// Build and run the example
    Examples,
    /// Run benchmarks
    Bench,
    /// Run check + examples + bench
    All,
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn cargo(args: &[&str]) -> ExitStatus {
    eprintln!("+ cargo {}", args.join(" "));
    Command::new("cargo")
        .args(args)
        .status()
        .expect("failed to execute cargo")
}

fn git(args: &[&str]) -> ExitStatus {
    eprintln!("+ git {}", args.join(" "));
    Command::new("git")
        .args(args)
        .status()
        .expect("failed to execute git")
}

fn run_cargo(args: &[&str]) {
    let status = cargo(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn run_git(args: &[&str]) {
    let status = git(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn run_bench(extra: &[&str]) {
    let mut args = vec!["bench", "--package", "elevator_core", "--bench", "performance"];
    if !extra.is_empty() {
        args.push("--");
        args.extend_from_slice(extra);
    }
    run_cargo(&args);
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);

    step("Test elevator_core");
    run_cargo(&["test", "-p", "elevator_core"]);

    step("Test elevator_cli");
    run_cargo(&["test", "-p", "elevator_cli"]);
}

fn ci_examples() {
    step("Run example two_car_run");
    run_cargo(&[
        "run",
        "-p",
        "elevator_core",
        "--example",
        "two_car_run",
        "--release",
    ]);

    step("Run elevsim with a short seeded run");
    run_cargo(&[
        "run",
        "-p",
        "elevator_cli",
        "--release",
        "--",
        "--config",
        "configs/tower.json",
        "--running-time-secs",
        "5",
        "--quiet",
    ]);
}

fn ci_bench() {
    step("Run benchmarks");
    run_bench(&[]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { seed } => {
            let seed = seed.map(|seed| seed.to_string());
            let mut args = vec![
                "run",
                "-p",
                "elevator_cli",
                "--release",
                "--",
                "--config",
                "configs/default.json",
            ];
            if let Some(seed) = seed.as_deref() {
                args.extend_from_slice(&["--seed", seed]);
            }
            run_cargo(&args);
        }
        Commands::RunTower { events } => {
            run_cargo(&[
                "run",
                "-p",
                "elevator_cli",
                "--release",
                "--",
                "--config",
                "configs/tower.json",
                "--events-parquet",
                &events,
            ]);
        }
        Commands::Bench => run_bench(&[]),
        Commands::BenchCompare => {
            let baseline_dir = Path::new("target/criterion");
            if baseline_dir.exists() {
                step("Removing existing benchmark data");
                std::fs::remove_dir_all(baseline_dir).expect("failed to remove target/criterion");
            }

            step("Stashing current changes");
            run_git(&[
                "stash",
                "push",
                "-m",
                "Temporary stash for benchmark comparison",
            ]);

            step("Running benchmark to create baseline");
            run_bench(&["--save-baseline", "main"]);

            step("Reapplying changes");
            run_git(&["stash", "pop"]);

            step("Running benchmark comparing against baseline");
            run_bench(&["--baseline", "main"]);

            eprintln!("\nDone! Check the output above to see performance comparison.");
        }
        Commands::Ci { job } => {
            match job {
                CiJob::Check => ci_check(),
                CiJob::Examples => ci_examples(),
                CiJob::Bench => ci_bench(),
                CiJob::All => {
                    ci_check();
                    ci_examples();
                    ci_bench();
                }
            }
            eprintln!("\nCI job passed.");
        }
        Commands::LoadTest => {
            run_cargo(&[
                "test",
                "-p",
                "elevator_core",
                "--test",
                "load_tests",
                "--",
                "--ignored",
            ]);
        }
    }
}
