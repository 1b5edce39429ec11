//! Availability check entry point for CI.
//!
//! Usage: `availability_check [SCENARIO] [--seed N] [--json]`
//!
//! Applies the scenario (default `healthy_system`), runs the availability
//! tests, prints the report, and exits non-zero when the system is unhealthy.
//! The exit code is the sole integration contract with the scheduling
//! workflow. `--seed` switches to deterministic logical time; without it the
//! run paces on real time. `ALERT_THRESHOLD` overrides the healthy minimum.

use std::process;

use groupbuy_fitness::{
    AvailabilityHarness, AvailabilityReport, FitnessThresholds, HarnessResult, Providers,
};

struct Args {
    scenario: String,
    seed: Option<u64>,
    json: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut scenario = "healthy_system".to_string();
    let mut seed = None;
    let mut json = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--seed" => {
                let value = args.next().ok_or("--seed requires a value")?;
                seed = Some(
                    value
                        .parse()
                        .map_err(|_| format!("invalid seed '{value}'"))?,
                );
            }
            other if other.starts_with("--") => return Err(format!("unknown flag '{other}'")),
            other => scenario = other.to_string(),
        }
    }

    Ok(Args {
        scenario,
        seed,
        json,
    })
}

async fn run<P: Providers>(
    mut harness: AvailabilityHarness<P>,
    scenario: &str,
) -> HarnessResult<AvailabilityReport> {
    harness.apply_scenario_named(scenario)?;
    harness.run_availability_tests().await
}

fn render(report: &AvailabilityReport, json: bool) {
    if json {
        match serde_json::to_string_pretty(report) {
            Ok(body) => println!("{body}"),
            Err(error) => eprintln!("failed to serialize report: {error}"),
        }
    } else {
        println!("{report}");
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            process::exit(2);
        }
    };

    let thresholds = match FitnessThresholds::from_env() {
        Ok(thresholds) => thresholds,
        Err(error) => {
            eprintln!("{error}");
            process::exit(2);
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
    {
        Ok(runtime) => runtime,
        Err(error) => {
            eprintln!("failed to build runtime: {error}");
            process::exit(2);
        }
    };

    let outcome = runtime.block_on(async {
        match args.seed {
            Some(seed) => {
                let harness = AvailabilityHarness::with_thresholds(
                    groupbuy_fitness::SimProviders::new(seed),
                    thresholds,
                )?;
                run(harness, &args.scenario).await
            }
            None => {
                let harness = AvailabilityHarness::with_thresholds(
                    groupbuy_fitness::TokioProviders::new(),
                    thresholds,
                )?;
                run(harness, &args.scenario).await
            }
        }
    });

    match outcome {
        Ok(report) => {
            render(&report, args.json);
            process::exit(if report.score.is_healthy { 0 } else { 1 });
        }
        Err(error) => {
            eprintln!("{error}");
            process::exit(2);
        }
    }
}
