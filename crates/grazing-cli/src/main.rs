use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use grazing_core::config::SimConfig;
use grazing_core::world::World;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing::info;

const WARMUP_STEPS: usize = 10;
const BENCHMARK_STEPS: usize = 100;

#[derive(Parser)]
#[command(name = "grazing")]
#[command(about = "Deer-tree grazing simulation CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single simulation from a config file
    Run {
        /// Path to config file (JSON)
        #[arg(long)]
        config: PathBuf,

        /// Output directory for summary.json and results.txt (optional)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Number of steps to run (default: the config's max_steps)
        #[arg(long)]
        steps: Option<usize>,

        /// Record metrics every N steps
        #[arg(long, default_value_t = 10)]
        sample_every: usize,
    },
    /// Time the step loop on a few lattice sizes
    Benchmark,
    /// Dump the default configuration to stdout
    DumpDefaultConfig,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Patch densities of the default 406x406 lattice, scaled to `side`.
fn scaled_config(side: usize, initial_grazers: usize) -> SimConfig {
    let defaults = SimConfig::default();
    let area = (side * side) as f64 / (defaults.width * defaults.height) as f64;
    SimConfig {
        width: side,
        height: side,
        initial_grazers,
        initial_grown_patches: (defaults.initial_grown_patches as f64 * area) as usize,
        initial_juvenile_patches: (defaults.initial_juvenile_patches as f64 * area) as usize,
        ..defaults
    }
}

fn run_benchmark(side: usize, initial_grazers: usize) -> Result<()> {
    let config = scaled_config(side, initial_grazers);
    let patches = config.initial_patches();
    let mut world = World::new(config).context("failed to initialize benchmark world")?;

    for _ in 0..WARMUP_STEPS {
        world.step();
    }

    let mut total_pools = 0u64;
    let mut total_activation = 0u64;
    let mut total_time = 0u64;
    for _ in 0..BENCHMARK_STEPS {
        let timings = world.step();
        total_pools += timings.pools_us;
        total_activation += timings.activation_us;
        total_time += timings.total_us;
    }

    let avg_step_us = total_time as f64 / BENCHMARK_STEPS as f64;
    let steps_per_sec = 1_000_000.0 / avg_step_us.max(1.0);
    println!("--- {side}x{side} lattice, {initial_grazers} grazers, {patches} patches ---");
    println!("  Avg step:      {avg_step_us:.0} us ({steps_per_sec:.1} steps/sec)");
    println!(
        "  Breakdown:     pools={:.0} us, activation={:.0} us",
        total_pools as f64 / BENCHMARK_STEPS as f64,
        total_activation as f64 / BENCHMARK_STEPS as f64,
    );
    println!("  Live agents:   {}", world.agent_count());
    println!();
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::DumpDefaultConfig => {
            let config = SimConfig::default();
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Benchmark => {
            if cfg!(debug_assertions) {
                eprintln!("WARNING: running in debug mode. Results are not representative.");
                eprintln!("         Use: cargo run -p grazing-cli --release -- benchmark");
                eprintln!();
            }
            println!("=== Grazing step benchmark ===");
            println!("Warmup: {WARMUP_STEPS} steps, Benchmark: {BENCHMARK_STEPS} steps");
            println!();

            let sizes = [(100, 5), (203, 20), (406, 5), (406, 50)];
            for (side, grazers) in sizes {
                run_benchmark(side, grazers)?;
            }
        }
        Commands::Run {
            config,
            out,
            steps,
            sample_every,
        } => {
            let file = File::open(&config).context("failed to open config file")?;
            let reader = BufReader::new(file);
            let sim_config: SimConfig =
                serde_json::from_reader(reader).context("failed to parse config")?;
            sim_config.validate().context("Config validation error")?;

            info!(path = ?config, "loaded config");
            let mut world = World::new(sim_config).context("failed to initialize world")?;
            let summary = match steps {
                Some(steps) => world.try_run_experiment(steps, sample_every),
                None => world.run_to_completion(sample_every),
            }
            .context("invalid run arguments")?;

            let last = &summary.final_population;
            println!(
                "Run complete after {} steps. Grazers: {}, grown patches: {}, juvenile patches: {}",
                summary.steps, last.grazers, last.fully_grown_patches, last.juvenile_patches
            );

            if let Some(out_dir) = out {
                std::fs::create_dir_all(&out_dir).context("failed to create output directory")?;
                let summary_path = out_dir.join("summary.json");
                let file = File::create(summary_path).context("failed to create summary file")?;
                serde_json::to_writer_pretty(file, &summary).context("failed to write summary")?;
                std::fs::write(out_dir.join("results.txt"), summary.render_report())
                    .context("failed to write results report")?;
                println!("Results saved to {:?}", out_dir);
            }
        }
    }
    Ok(())
}
