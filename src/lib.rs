//! # PROTOCELL
//!
//! Discrete-time artificial-life simulator: a population of cells inhabits
//! a bounded 2-D world, mutates a megabase-scale DNA string every day,
//! acquires resource-processing genes by substring matching, forages
//! energy from biome-stocked resources, and dies when the energy runs out.
//!
//! ## Quick Start
//!
//! ```rust
//! use protocell::{Config, Genotype, World};
//!
//! let mut config = Config::default();
//! config.cells.dna_megabases = 0.01; // keep the example fast
//! config.world.half_extent = 20.0;
//!
//! let mut world = World::new_with_seed(config, 42);
//! world.populate(10, Genotype::animal());
//! world.run(30);
//!
//! println!("Survivors: {}", world.population());
//! ```
//!
//! ## Reproducibility
//!
//! All randomness (DNA generation, mutation, direction picks, biome
//! stocking) flows through one seeded ChaCha8 generator; the day loop is
//! strictly sequential, so identical seeds give identical worlds.

pub mod biome;
pub mod cell;
pub mod config;
pub mod events;
pub mod genetics;
pub mod resource;
pub mod snapshot;
pub mod stats;
pub mod world;

// Re-export main types
pub use cell::Cell;
pub use config::Config;
pub use genetics::Genotype;
pub use world::World;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run a quick benchmark
pub fn benchmark(days: u32, population: usize) -> BenchmarkResult {
    use std::time::Instant;

    let mut config = Config::default();
    config.population.limit = population;

    let mut world = World::new_with_seed(config, 42);
    world.populate(population, Genotype::animal());

    let start = Instant::now();
    world.run(days);
    let elapsed = start.elapsed();

    BenchmarkResult {
        days,
        initial_population: population,
        final_population: world.population(),
        elapsed_secs: elapsed.as_secs_f64(),
        days_per_second: days as f64 / elapsed.as_secs_f64(),
    }
}

/// Benchmark result
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub days: u32,
    pub initial_population: usize,
    pub final_population: usize,
    pub elapsed_secs: f64,
    pub days_per_second: f64,
}

impl std::fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Benchmark Results ===")?;
        writeln!(f, "Days: {}", self.days)?;
        writeln!(
            f,
            "Population: {} -> {}",
            self.initial_population, self.final_population
        )?;
        writeln!(f, "Time: {:.3}s", self.elapsed_secs)?;
        writeln!(f, "Speed: {:.1} days/s", self.days_per_second)?;
        Ok(())
    }
}
