//! Warpath Headless Balance Simulator
//!
//! Plays many runs with a fixed auto-play policy through the real game
//! session and reports victory rate, defeats per stage and pacing.
//!
//! Usage:
//!   cargo run --bin simulator -- [OPTIONS]
//!
//! Options:
//!   --runs N          Number of runs (default: 1000)
//!   --seed N          RNG seed; run i uses seed + i (default: random)
//!   --heal-below PCT  Heal under this HP percentage (default: 35)
//!   --power           Use power attacks on tough targets
//!   --verbose         One line per run
//!   --json            Print the report as JSON
//!   --quiet           Only the final summary line

use anyhow::{bail, Context, Result};
use warpath::simulator::{run_simulation, SimConfig};

// ── CLI Configuration ────────────────────────────────────────────────

struct CliArgs {
    config: SimConfig,
    json: bool,
    quiet: bool,
}

fn next_value<'a>(args: &mut impl Iterator<Item = &'a String>, flag: &str) -> Result<&'a String> {
    args.next()
        .with_context(|| format!("{flag} requires a value"))
}

fn parse_args(args: &[String]) -> Result<Option<CliArgs>> {
    let mut cli = CliArgs {
        config: SimConfig::default(),
        json: false,
        quiet: false,
    };
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--runs" => {
                cli.config.num_runs = next_value(&mut iter, "--runs")?
                    .parse()
                    .context("--runs requires a number")?;
            }
            "--seed" => {
                let seed = next_value(&mut iter, "--seed")?
                    .parse()
                    .context("--seed requires a number")?;
                cli.config.seed = Some(seed);
            }
            "--heal-below" => {
                let pct: f64 = next_value(&mut iter, "--heal-below")?
                    .parse()
                    .context("--heal-below requires a percentage")?;
                if !(0.0..=100.0).contains(&pct) {
                    bail!("--heal-below must be between 0 and 100, got {pct}");
                }
                cli.config.heal_below = pct / 100.0;
            }
            "--power" => cli.config.use_power = true,
            "--verbose" => cli.config.verbosity = 2,
            "--json" => cli.json = true,
            "--quiet" => cli.quiet = true,
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            other => {
                print_usage();
                bail!("unknown argument: {other}");
            }
        }
    }

    if cli.quiet || cli.json {
        cli.config.verbosity = 0;
    }
    Ok(Some(cli))
}

fn print_usage() {
    eprintln!(
        "Warpath Headless Balance Simulator\n\
         \n\
         Usage: simulator [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --runs N          Number of runs (default: 1000)\n\
         \x20 --seed N          RNG seed; run i uses seed + i (default: random)\n\
         \x20 --heal-below PCT  Heal under this HP percentage (default: 35)\n\
         \x20 --power           Use power attacks on tough targets\n\
         \x20 --verbose         One line per run\n\
         \x20 --json            Print the report as JSON\n\
         \x20 --quiet           Only the final summary line\n\
         \x20 --help, -h        Show this help"
    );
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let Some(cli) = parse_args(&args)? else {
        return Ok(());
    };

    tracing::debug!(config = ?cli.config, "starting simulation");
    let report = run_simulation(&cli.config);

    if cli.json {
        println!("{}", report.to_json()?);
    } else if cli.quiet {
        println!("{}", report.to_summary_line());
    } else {
        print!("{}", report.to_text());
    }
    Ok(())
}
