//! Simulator entry point — CLI wiring and config-driven engine construction.

use std::path::Path;
use std::process;

use coolsim::config::ScenarioConfig;
use coolsim::io::export::export_csv;
use coolsim::scenario::{build_environment, build_workload};
use coolsim::sim::engine::{Engine, SimOutput};
use coolsim::sim::kpi::mode_usage;

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    seed_override: Option<u64>,
    flex_override: Option<f64>,
    telemetry_out: Option<String>,
}

fn print_help() {
    eprintln!("coolsim — hourly datacenter cooling water/carbon simulator");
    eprintln!();
    eprintln!("Usage: coolsim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!("  --preset <name>          Use a built-in preset (baseline, desert_heat, carbon_first)");
    eprintln!("  --seed <u64>             Override the random seed of the synthetic series");
    eprintln!("  --flex-kwh <f64>         Override the total flexible energy budget");
    eprintln!("  --telemetry-out <path>   Export hourly results to CSV");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        seed_override: None,
        flex_override: None,
        telemetry_out: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --scenario requires a path argument");
                    process::exit(1);
                }
                cli.scenario_path = Some(args[i].clone());
            }
            "--preset" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --preset requires a name argument");
                    process::exit(1);
                }
                cli.preset = Some(args[i].clone());
            }
            "--seed" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --seed requires a u64 argument");
                    process::exit(1);
                }
                if let Ok(s) = args[i].parse::<u64>() {
                    cli.seed_override = Some(s);
                } else {
                    eprintln!("error: --seed value \"{}\" is not a valid u64", args[i]);
                    process::exit(1);
                }
            }
            "--flex-kwh" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --flex-kwh requires a f64 argument");
                    process::exit(1);
                }
                if let Ok(v) = args[i].parse::<f64>() {
                    cli.flex_override = Some(v);
                } else {
                    eprintln!("error: --flex-kwh value \"{}\" is not a valid f64", args[i]);
                    process::exit(1);
                }
            }
            "--telemetry-out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --telemetry-out requires a path argument");
                    process::exit(1);
                }
                cli.telemetry_out = Some(args[i].clone());
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

/// Builds the input series and runs the full simulation.
fn run_simulation(scenario: &ScenarioConfig) -> SimOutput {
    let environment = build_environment(scenario);
    let workload = build_workload(scenario);

    let engine = Engine::new(
        environment,
        workload,
        scenario.build_cooling(),
        scenario.build_water_params(),
        scenario.build_weights(),
    )
    .unwrap_or_else(|errors| {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    });

    engine
        .run(&scenario.build_schedule_request())
        .unwrap_or_else(|errors| {
            for e in &errors {
                eprintln!("{e}");
            }
            process::exit(1);
        })
}

fn main() {
    let cli = parse_args();

    // Load config: --scenario takes priority, then --preset, then baseline default
    let mut scenario = if let Some(ref path) = cli.scenario_path {
        match ScenarioConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match ScenarioConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        ScenarioConfig::baseline()
    };

    // Apply overrides
    if let Some(seed) = cli.seed_override {
        scenario.simulation.seed = seed;
    }
    if let Some(flex) = cli.flex_override {
        scenario.flex.total_flex_kwh = flex;
    }

    // Validate
    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    // Build and run
    let output = run_simulation(&scenario);

    // Print per-hour results
    for r in &output.hours {
        println!("{r}");
    }

    // Print mode usage and totals
    println!("\n--- Mode usage ---");
    for (mode, hours) in mode_usage(&output.hours) {
        println!("{mode:<10} {hours:>4} h");
    }
    println!("\n{}", output.totals);

    if output.unallocated_flex_kwh > 0.0 {
        eprintln!(
            "warning: {:.1} kWh of flexible energy could not be placed before hour {}",
            output.unallocated_flex_kwh, scenario.flex.deadline_hour
        );
    }

    // Export CSV if requested
    if let Some(ref path) = cli.telemetry_out {
        if let Err(e) = export_csv(&output.hours, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Telemetry written to {path}");
    }
}
