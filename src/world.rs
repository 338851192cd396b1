//! World orchestrator - seeds the environment and runs the day loop.

use crate::biome::BiomeGrid;
use crate::cell::{Cell, CellId};
use crate::config::Config;
use crate::events::CellEvent;
use crate::genetics::Genotype;
use crate::resource;
use crate::snapshot::{CellSnapshot, Renderer, WorldSnapshot};
use crate::stats::{Stats, StatsHistory};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

/// The simulation world
pub struct World {
    /// Every cell ever created; the dead stay enumerable for reporting.
    pub cells: Vec<Cell>,

    /// Immutable biome grid, read-only during a tick.
    pub biomes: BiomeGrid,

    /// Days elapsed
    pub day: u32,

    /// Configuration
    pub config: Config,

    /// Statistics
    pub stats: Stats,
    pub stats_history: StatsHistory,

    // ID generation
    next_cell_id: CellId,

    // Random number generator (seeded for reproducibility)
    rng: ChaCha8Rng,
    seed: u64,

    // Per-day tracking
    deaths_today: usize,
}

impl World {
    /// Create a new world with the given configuration
    pub fn new(config: Config) -> Self {
        let seed = rand::thread_rng().gen();
        Self::new_with_seed(config, seed)
    }

    /// Create a new world with a specific seed for reproducibility
    pub fn new_with_seed(config: Config, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let biomes = BiomeGrid::generate(
            config.world.half_extent,
            &resource::full_catalog(),
            config.world.biome_stock_chance,
            &mut rng,
        );

        Self {
            cells: Vec::new(),
            biomes,
            day: 0,
            stats: Stats::new(),
            stats_history: StatsHistory::new(config.logging.stats_interval),
            config,
            next_cell_id: 0,
            rng,
            seed,
            deaths_today: 0,
        }
    }

    /// Populate the world with `count` cells of the given genotype.
    ///
    /// All cells start at the origin with fresh random DNA; genes present
    /// in the birth DNA are logged as acquisitions.
    pub fn populate(&mut self, count: usize, genotype: Genotype) {
        let genotype = Arc::new(genotype);
        let dna_length = self.config.dna_length();
        let mut events = Vec::new();

        for _ in 0..count {
            events.clear();
            let id = self.next_cell_id;
            self.next_cell_id += 1;

            let cell = Cell::new(
                id,
                Arc::clone(&genotype),
                dna_length,
                self.config.cells.initial_energy,
                self.config.cells.max_energy,
                &mut self.rng,
                &mut events,
            );
            self.log_events(cell.id, &events);
            self.cells.push(cell);
        }

        log::info!(
            "World populated with {} {} cells",
            count,
            self.cells
                .first()
                .map(|c| c.genotype.name.as_str())
                .unwrap_or("unknown")
        );
    }

    /// Run one simulated day over every living cell.
    ///
    /// Strictly sequential: each cell finishes its full day cycle
    /// (breathe, eat, mutate, travel, sleep) before the next begins.
    pub fn step(&mut self) {
        self.day += 1;
        self.deaths_today = 0;
        let day = self.day;

        if self.population() > 0 {
            log::info!("Starting day {}", day);
            let max_energy = self.config.cells.max_energy;
            let general_rate = self.config.evolution.mutation_rate;
            let in_gene_rate = self.config.evolution.gene_mutation_rate;
            let mut events = Vec::new();

            for index in 0..self.cells.len() {
                // Some are dying in the process of living.
                if !self.cells[index].is_alive {
                    continue;
                }
                events.clear();

                let cell = &mut self.cells[index];
                let biome = self.biomes.resolve(cell.position);

                cell.breathe(biome, max_energy, &mut events);
                cell.eat(biome, max_energy, &mut events);
                cell.mutate(general_rate, in_gene_rate, &mut self.rng, &mut events);
                cell.travel(&self.biomes, &mut self.rng, &mut events);
                cell.sleep(day, &mut events);

                self.deaths_today += events
                    .iter()
                    .filter(|e| matches!(e, CellEvent::Died { .. }))
                    .count();
                let id = self.cells[index].id;
                self.log_events(id, &events);
            }
        }

        self.update_stats();
    }

    /// Translate engine events into log records. Purely observational;
    /// dropping these changes nothing about the simulation.
    fn log_events(&self, cell_id: CellId, events: &[CellEvent]) {
        for event in events {
            match event {
                CellEvent::GeneAcquired {
                    gene,
                    target,
                    medium,
                } => {
                    log::info!(
                        "cell {}: acquired gene {} to process {} from {}",
                        cell_id,
                        gene,
                        target,
                        medium
                    );
                }
                CellEvent::GeneLost { gene } => {
                    log::info!("cell {}: lost gene {}", cell_id, gene);
                }
                CellEvent::ResourceConsumed {
                    resource,
                    medium,
                    gained,
                    saturated,
                } => {
                    if *saturated {
                        log::info!(
                            "cell {}: energy filled up by {} ({})",
                            cell_id,
                            resource,
                            medium
                        );
                    } else {
                        log::debug!(
                            "cell {}: consumed {} ({}), +{} EU",
                            cell_id,
                            resource,
                            medium,
                            gained
                        );
                    }
                }
                CellEvent::Moved {
                    from,
                    to,
                    distance,
                    steps,
                    stalled,
                } => {
                    log::info!(
                        "cell {}: moved {} units in {} steps (from {:?} to {:?}){}",
                        cell_id,
                        distance,
                        steps,
                        from,
                        to,
                        if *stalled { " [stalled at boundary]" } else { "" }
                    );
                }
                CellEvent::BiomeEntered { biome } => {
                    log::debug!("cell {}: entered biome {}", cell_id, biome);
                }
                CellEvent::Died { day } => {
                    log::info!("cell {}: died on day {} (energy exhausted)", cell_id, day);
                }
            }
        }
    }

    fn update_stats(&mut self) {
        self.stats.day = self.day;
        self.stats.deaths = self.deaths_today;
        self.stats.update(&self.cells);

        if self.day % self.config.logging.stats_interval == 0 {
            self.stats_history.record(self.stats.clone());
        }
    }

    /// Run the simulation for the given number of days
    pub fn run(&mut self, days: u32) {
        for _ in 0..days {
            self.step();
        }
    }

    /// Run with a rendering collaborator observing each day.
    ///
    /// The renderer gets a read-only snapshot after every day, and the
    /// finalize signal when the configured final day is reached.
    pub fn run_with_renderer<R: Renderer>(&mut self, days: u32, renderer: &mut R) {
        for _ in 0..days {
            self.step();
            let snapshot = self.snapshot();
            renderer.render_day(&snapshot);
            if self.day == self.config.world.days {
                renderer.finalize();
            }
        }
    }

    /// Read-only snapshot of the full population
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            day: self.day,
            half_extent: self.biomes.half_extent(),
            cells: self.cells.iter().map(CellSnapshot::of).collect(),
        }
    }

    /// Get current living population count
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive).count()
    }

    /// Check if the population is extinct
    pub fn is_extinct(&self) -> bool {
        self.population() == 0
    }

    /// Get seed for reproducibility
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        let mut config = Config::default();
        config.world.half_extent = 20.0;
        config.population.limit = 5;
        config.cells.dna_megabases = 0.001; // 1000 bases keeps tests fast
        config.world.days = 10;
        config
    }

    fn populated_world(seed: u64) -> World {
        let config = test_config();
        let count = config.population.limit;
        let mut world = World::new_with_seed(config, seed);
        world.populate(count, Genotype::animal());
        world
    }

    #[test]
    fn test_world_creation() {
        let world = World::new_with_seed(test_config(), 42);
        assert_eq!(world.day, 0);
        assert!(world.cells.is_empty());
        assert_eq!(world.biomes.len(), 1600); // (2 * 20)^2
    }

    #[test]
    fn test_populate() {
        let world = populated_world(42);
        assert_eq!(world.population(), 5);
        assert!(world.cells.iter().all(|c| c.position == (0.0, 0.0)));
        assert!(world.cells.iter().all(|c| c.energy == 10));
    }

    #[test]
    fn test_step_advances_day() {
        let mut world = populated_world(42);
        world.step();
        assert_eq!(world.day, 1);
        world.run(4);
        assert_eq!(world.day, 5);
    }

    #[test]
    fn test_population_vector_never_shrinks() {
        let mut world = populated_world(42);
        world.run(10);
        // Dead cells are marked, never removed.
        assert_eq!(world.cells.len(), 5);
    }

    #[test]
    fn test_energy_stays_bounded() {
        let mut world = populated_world(7);
        for _ in 0..10 {
            world.step();
            for cell in &world.cells {
                assert!(cell.energy <= world.config.cells.max_energy);
            }
        }
    }

    #[test]
    fn test_reproducibility() {
        // Sequential execution plus one seeded RNG: identical seeds give
        // identical worlds, down to every position and every base.
        let mut world1 = populated_world(1234);
        let mut world2 = populated_world(1234);

        world1.run(8);
        world2.run(8);

        for (a, b) in world1.cells.iter().zip(&world2.cells) {
            assert_eq!(a.position, b.position);
            assert_eq!(a.energy, b.energy);
            assert_eq!(a.is_alive, b.is_alive);
            assert_eq!(a.dna(), b.dna());
        }
    }

    #[test]
    fn test_dead_cells_stay_dead_and_frozen() {
        let mut config = test_config();
        config.cells.initial_energy = 0;
        config.world.biome_stock_chance = 0.0;

        let mut world = World::new_with_seed(config, 5);
        world.populate(5, Genotype::animal());
        world.run(1);
        assert!(world.is_extinct());

        let frozen: Vec<(u32, (f64, f64))> =
            world.cells.iter().map(|c| (c.energy, c.position)).collect();

        world.run(5);
        for (cell, (energy, position)) in world.cells.iter().zip(&frozen) {
            assert!(!cell.is_alive);
            assert_eq!(cell.energy, *energy);
            assert_eq!(cell.position, *position);
        }
    }

    #[test]
    fn test_snapshot_matches_population() {
        let mut world = populated_world(42);
        world.run(3);
        let snapshot = world.snapshot();
        assert_eq!(snapshot.day, 3);
        assert_eq!(snapshot.cells.len(), world.cells.len());
    }

    #[test]
    fn test_renderer_receives_final_signal() {
        struct Counting {
            days: Vec<u32>,
            finalized: bool,
        }
        impl Renderer for Counting {
            fn render_day(&mut self, snapshot: &WorldSnapshot) {
                self.days.push(snapshot.day);
            }
            fn finalize(&mut self) {
                self.finalized = true;
            }
        }

        let mut world = populated_world(42);
        let days = world.config.world.days;
        let mut renderer = Counting {
            days: Vec::new(),
            finalized: false,
        };
        world.run_with_renderer(days, &mut renderer);

        assert_eq!(renderer.days.len(), days as usize);
        assert!(renderer.finalized);
    }

    #[test]
    fn test_stats_tracking() {
        let mut world = populated_world(42);
        world.run(6);
        assert_eq!(world.stats.day, 6);
        assert_eq!(world.stats_history.snapshots.len(), 6);
        assert!(!world.stats_history.population_series().is_empty());
    }
}
