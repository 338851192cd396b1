//! Configuration system for the simulation.
//!
//! Supports YAML configuration files with sensible defaults. Malformed or
//! missing values are a fatal startup error, surfaced before any
//! simulation begins.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub world: WorldConfig,
    pub population: PopulationConfig,
    pub cells: CellConfig,
    pub evolution: EvolutionConfig,
    pub logging: LoggingConfig,
}

/// World/environment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Half-extent of the square map, centered on the origin
    pub half_extent: f64,
    /// Simulated duration in days
    pub days: u32,
    /// Probability that a catalog resource is stocked into a given biome
    pub biome_stock_chance: f64,
}

/// Population configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Number of cells created at populate time
    pub limit: usize,
}

/// Per-cell configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellConfig {
    /// DNA size in megabases (length = megabases x 1,000,000)
    pub dna_megabases: f64,
    /// Energy at birth
    pub initial_energy: u32,
    /// Maximum energy a cell can hold
    pub max_energy: u32,
    /// Energy debited by the reproduction stub
    pub reproduction_cost: u32,
}

/// Evolution configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Per-position mutation probability outside protected regions
    pub mutation_rate: f64,
    /// Per-position mutation probability inside acquired beneficial genes
    pub gene_mutation_rate: f64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Days between stats snapshots
    pub stats_interval: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            population: PopulationConfig::default(),
            cells: CellConfig::default(),
            evolution: EvolutionConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            half_extent: 100.0,
            days: 30,
            biome_stock_chance: 0.35,
        }
    }
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self { limit: 10 }
    }
}

impl Default for CellConfig {
    fn default() -> Self {
        Self {
            dna_megabases: 1.0,
            initial_energy: 10,
            max_energy: 10,
            reproduction_cost: 4,
        }
    }
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            mutation_rate: 2e-6,
            gene_mutation_rate: 2e-7,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            stats_interval: 1,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// DNA length in bases
    pub fn dna_length(&self) -> usize {
        (self.cells.dna_megabases * 1_000_000.0) as usize
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.world.half_extent < 1.0 {
            return Err("half_extent must be at least 1".to_string());
        }
        if self.world.days == 0 {
            return Err("days must be > 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.world.biome_stock_chance) {
            return Err("biome_stock_chance must be within [0, 1]".to_string());
        }
        if self.population.limit == 0 {
            return Err("population limit must be > 0".to_string());
        }
        if self.cells.dna_megabases <= 0.0 {
            return Err("dna_megabases must be > 0".to_string());
        }
        if self.cells.max_energy == 0 {
            return Err("max_energy must be > 0".to_string());
        }
        if self.cells.initial_energy > self.cells.max_energy {
            return Err("initial_energy cannot exceed max_energy".to_string());
        }
        if !(0.0..=1.0).contains(&self.evolution.mutation_rate) {
            return Err("mutation_rate must be within [0, 1]".to_string());
        }
        if !(0.0..=1.0).contains(&self.evolution.gene_mutation_rate) {
            return Err("gene_mutation_rate must be within [0, 1]".to_string());
        }
        if self.evolution.gene_mutation_rate > self.evolution.mutation_rate {
            return Err("gene_mutation_rate cannot exceed mutation_rate".to_string());
        }
        if self.logging.stats_interval == 0 {
            return Err("stats_interval must be > 0".to_string());
        }
        Ok(())
    }
}
