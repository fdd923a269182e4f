use lorentz_sim::{ScenarioConfig, Scenario, NVec2};
use lorentz_sim::run_2d;
use lorentz_sim::bench_step;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lorentz-sim", about = "Lorentz transformed point field viewer")]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, long = "file", default_value = "default.yaml")]
    file_name: String,

    /// Override the scenario seed
    #[arg(long)]
    seed: Option<u64>,

    /// Run this many fixed steps without opening a window
    #[arg(long)]
    headless: Option<u64>,

    /// Time the simulation step and exit
    #[arg(long)]
    bench: bool,

    /// Debug level logging
    #[arg(short, long)]
    verbose: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    if !config_path.exists() {
        warn!("scenario {} not found, using defaults", config_path.display());
        return Ok(ScenarioConfig::default());
    }

    let text = fs::read_to_string(&config_path)
        .with_context(|| format!("reading {}", config_path.display()))?;
    let scenario_cfg = ScenarioConfig::from_yaml_str(&text)
        .with_context(|| format!("parsing {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.bench {
        bench_step()?;
        return Ok(());
    }

    let mut scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    if let Some(seed) = args.seed {
        scenario_cfg.simulation.seed = seed;
    }

    let mut scenario = Scenario::build_scenario(scenario_cfg)?;

    match args.headless {
        Some(steps) => {
            scenario.run_headless(steps)?;
            let sim = &scenario.simulator;
            let first = sim.transformed_path().first().copied().unwrap_or_else(NVec2::zeros);
            info!(
                steps = sim.steps(),
                t = sim.time(),
                v = sim.velocity(),
                gamma = sim.gamma(),
                "headless run finished, path[0]' = ({:.4}, {:.4})",
                first.x,
                first.y
            );
        }
        None => run_2d(scenario),
    }

    Ok(())
}
