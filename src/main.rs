//! Gravity Sim entry point
//!
//! Headless driver: builds a system from a JSON config and/or flags, runs a
//! fixed number of ticks and logs periodic summaries. Set `RUST_LOG=debug`
//! to see individual merges.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use gravity_sim::{BoundaryPolicy, SimConfig, System};

#[derive(Parser, Debug)]
#[command(version, about = "Planar N-body gravity simulation")]
struct Args {
    /// JSON configuration file (missing fields take defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of bodies to spawn
    #[arg(short, long)]
    bodies: Option<usize>,

    /// Placement seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Wall behaviour: bounce or wraparound
    #[arg(long, value_parser = parse_policy)]
    boundary: Option<BoundaryPolicy>,

    /// Ticks to run
    #[arg(short = 'n', long, default_value_t = 1000)]
    steps: u64,

    /// Log a summary every this many ticks
    #[arg(long, default_value_t = 100)]
    report_every: u64,

    /// Print final body snapshots as JSON
    #[arg(long)]
    dump: bool,
}

fn parse_policy(s: &str) -> Result<BoundaryPolicy, String> {
    BoundaryPolicy::parse(s).ok_or_else(|| format!("unknown boundary policy `{s}`"))
}

// load here to keep main clean
fn load_config(args: &Args) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SimConfig::default(),
    };

    if let Some(count) = args.bodies {
        config.body_count = count;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(policy) = args.boundary {
        config.boundary = policy;
    }

    Ok(config)
}

fn report(system: &System) {
    let p = system.total_momentum();
    log::info!(
        "t={:8.2} bodies={:4} mass={:.1} momentum=({:.4}, {:.4}) kinetic={:.3}",
        system.sim_time(),
        system.len(),
        system.total_mass(),
        p.x,
        p.y,
        system.kinetic_energy()
    );
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let mut system = System::new(config).context("building simulation")?;
    log::info!("Gravity Sim starting (seed {})", system.seed());

    report(&system);
    let every = args.report_every.max(1);
    for n in 1..=args.steps {
        system.tick()?;
        if n % every == 0 {
            report(&system);
        }
        if system.len() <= 1 {
            log::info!("Everything merged after {n} ticks");
            break;
        }
    }
    report(&system);

    if args.dump {
        println!("{}", serde_json::to_string_pretty(&system.bodies())?);
    }

    Ok(())
}
