//! # REFECTORY Simulator
//!
//! Headless dining-hall run, driven from the command line.
//!
//! ```bash
//! # 8 students, default timings
//! refectory_sim
//!
//! # 20 students, fetch up to 500ms, dine up to 200ms
//! refectory_sim 20 500 200
//!
//! # reproducible run from a config file
//! refectory_sim --config lunch.toml --seed 42
//! ```

use std::env;
use std::process;

use refectory::{sim, SimConfig};

const USAGE: &str = "\
usage: refectory_sim [students] [max_fetch_ms] [max_dine_ms] [options]
options:
  --config <path>   load a TOML config before applying other arguments
  --seed <n>        RNG seed for think times
  --no-gate         disable the readiness gate
  --quiet           do not print per-event log lines";

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let config = match build_config(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("{USAGE}");
            process::exit(2);
        }
    };

    println!("═══════════════════════════════════════════════════════════════");
    println!("                   REFECTORY SIMULATOR v0.1.0");
    println!("                      nobody dines alone");
    println!("═══════════════════════════════════════════════════════════════");
    println!(
        "students={} fetch={}..{}ms dine={}..{}ms gate={} seed={}",
        config.students,
        config.min_fetch_ms,
        config.max_fetch_ms,
        config.min_dine_ms,
        config.max_dine_ms,
        config.readiness_gate,
        config.seed,
    );

    match sim::run(&config) {
        Ok(report) => {
            let stats = &report.stats;
            println!("───────────────────────────────────────────────────────────────");
            println!("run complete in {:.2?}", report.wall_time);
            println!("  seats taken / vacated : {} / {}", stats.total_entries, stats.total_exits);
            println!("  entry rendezvous      : {}", stats.paired_entries / 2);
            println!("  leave rendezvous      : {}", stats.paired_exits / 2);
            println!("  reinforced departures : {}", stats.reinforced_exits);
            println!("  peak occupancy        : {}", stats.peak_occupancy);
            println!("  events logged         : {}", report.events_logged);
            if stats.events_dropped > 0 {
                println!("  events dropped        : {}", stats.events_dropped);
            }
        }
        Err(err) => {
            eprintln!("[refectory] error: {err}");
            process::exit(1);
        }
    }
}

/// Builds the run configuration from CLI arguments.
///
/// `--config` is applied first so every other argument overrides the file.
/// Positional arguments follow the classic contract: student count, then
/// the fetch and dine upper bounds in milliseconds.
fn build_config(args: &[String]) -> Result<SimConfig, String> {
    let mut config = SimConfig::default();
    if let Some(pos) = args.iter().position(|a| a == "--config") {
        let path = args
            .get(pos + 1)
            .ok_or_else(|| "--config needs a path".to_string())?;
        config = SimConfig::from_toml_file(path).map_err(|e| e.to_string())?;
    }

    let mut positionals = 0usize;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                // Already applied above; skip the path operand.
                iter.next();
            }
            "--seed" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--seed needs a value".to_string())?;
                config.seed = value.parse().map_err(|_| format!("bad seed: {value}"))?;
            }
            "--no-gate" => config.readiness_gate = false,
            "--quiet" => config.log_events = false,
            other if other.starts_with("--") => {
                return Err(format!("unknown option: {other}"));
            }
            number => {
                let value: u64 = number
                    .parse()
                    .map_err(|_| format!("bad number: {number}"))?;
                match positionals {
                    0 => {
                        config.students = u32::try_from(value)
                            .map_err(|_| format!("too many students: {value}"))?;
                    }
                    1 => {
                        config.max_fetch_ms = value;
                        config.min_fetch_ms = config.min_fetch_ms.min(value);
                    }
                    2 => {
                        config.max_dine_ms = value;
                        config.min_dine_ms = config.min_dine_ms.min(value);
                    }
                    _ => return Err(format!("unexpected argument: {number}")),
                }
                positionals += 1;
            }
        }
    }
    Ok(config)
}
