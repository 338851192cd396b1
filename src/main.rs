//! PROTOCELL - CLI Entry Point

use clap::{Parser, Subcommand};
use protocell::snapshot::JsonRenderer;
use protocell::{benchmark, Config, Genotype, World};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "protocell")]
#[command(version)]
#[command(about = "Artificial-life simulator: mutating DNA, gene acquisition, biome foraging")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a new simulation
    Run {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,

        /// Number of days to simulate (overrides the config)
        #[arg(short, long)]
        days: Option<u32>,

        /// Output directory for snapshots and stats
        #[arg(short, long, default_value = "output")]
        output: PathBuf,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Quiet mode (minimal output)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run performance benchmark
    Benchmark {
        /// Number of days
        #[arg(short, long, default_value = "30")]
        days: u32,

        /// Population size
        #[arg(short, long, default_value = "10")]
        population: usize,
    },

    /// Generate default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "config.yaml")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            days,
            output,
            seed,
            quiet,
        } => run_simulation(config, days, output, seed, quiet),

        Commands::Benchmark { days, population } => run_benchmark(days, population),

        Commands::Init { output } => generate_config(output),
    }
}

fn run_simulation(
    config_path: PathBuf,
    days_override: Option<u32>,
    output: PathBuf,
    seed: Option<u64>,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Load or create config
    let mut config = if config_path.exists() {
        println!("Loading config from: {:?}", config_path);
        Config::from_file(&config_path)?
    } else {
        println!("Using default configuration");
        Config::default()
    };
    if let Some(days) = days_override {
        config.world.days = days;
    }

    // Create output directory
    std::fs::create_dir_all(&output)?;

    // Create world
    let mut world = if let Some(s) = seed {
        println!("Using seed: {}", s);
        World::new_with_seed(config.clone(), s)
    } else {
        World::new(config.clone())
    };
    world.populate(config.population.limit, Genotype::animal());

    println!("Starting simulation");
    println!("  Population: {}", world.population());
    println!(
        "  World: {0}x{0} ({1} biomes)",
        config.world.half_extent * 2.0,
        world.biomes.len()
    );
    println!("  DNA: {} bases per cell", config.dna_length());
    println!("  Days: {}", config.world.days);
    println!();

    let mut renderer = JsonRenderer::new(&output);
    let start = Instant::now();

    for _ in 0..config.world.days {
        world.run_with_renderer(1, &mut renderer);

        if !quiet {
            println!("{}", world.stats.summary());
        }
    }

    // The day loop runs to the configured end even after extinction, so
    // the renderer still receives every day and the final signal.
    if world.is_extinct() {
        println!("\nPopulation went extinct");
    }

    let elapsed = start.elapsed();

    println!();
    println!("=== Simulation Complete ===");
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    println!("Days: {}", world.day);
    println!("Final population: {}", world.population());
    println!("Seed: {}", world.seed());

    // Save stats history
    let stats_path = output.join("stats_history.json");
    world
        .stats_history
        .save(stats_path.to_str().ok_or("invalid output path")?)?;
    println!("Stats history: {:?}", stats_path);

    Ok(())
}

fn run_benchmark(days: u32, population: usize) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== PROTOCELL Benchmark ===");
    println!("Days: {}", days);
    println!("Population: {}", population);
    println!();

    let result = benchmark(days, population);
    println!("{}", result);

    Ok(())
}

fn generate_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    config.save(&output)?;
    println!("Configuration saved to: {:?}", output);
    Ok(())
}
