//! Integration tests for PROTOCELL

use protocell::snapshot::{NullRenderer, Renderer, WorldSnapshot};
use protocell::{Config, Genotype, World};

fn small_config() -> Config {
    let mut config = Config::default();
    config.world.half_extent = 25.0;
    config.world.days = 20;
    config.population.limit = 8;
    config.cells.dna_megabases = 0.002; // 2000 bases
    config.evolution.mutation_rate = 0.001; // visible churn at this DNA size
    config.evolution.gene_mutation_rate = 0.0001;
    config
}

fn populated(seed: u64) -> World {
    let config = small_config();
    let count = config.population.limit;
    let mut world = World::new_with_seed(config, seed);
    world.populate(count, Genotype::animal());
    world
}

#[test]
fn test_full_simulation_cycle() {
    let mut world = populated(12345);
    let dna_lengths: Vec<usize> = world.cells.iter().map(|c| c.dna().len()).collect();

    world.run(20);
    assert_eq!(world.day, 20);

    for (cell, &length_at_birth) in world.cells.iter().zip(&dna_lengths) {
        // DNA length is invariant across every mutation pass.
        assert_eq!(cell.dna().len(), length_at_birth);

        // Energy stays within configured bounds.
        assert!(cell.energy <= world.config.cells.max_energy);

        // No accepted move ever left the open world square.
        let w = world.config.world.half_extent;
        for &(x, y) in &cell.position_history {
            assert!(x > -w && x < w && y > -w && y < w);
        }
    }
}

#[test]
fn test_seeded_runs_are_identical() {
    let mut world1 = populated(777);
    let mut world2 = populated(777);

    world1.run(15);
    world2.run(15);

    for (a, b) in world1.cells.iter().zip(&world2.cells) {
        assert_eq!(a.position, b.position);
        assert_eq!(a.position_history, b.position_history);
        assert_eq!(a.energy, b.energy);
        assert_eq!(a.visited_biomes, b.visited_biomes);
        assert_eq!(a.dna(), b.dna());
    }
}

#[test]
fn test_different_seeds_diverge() {
    let mut world1 = populated(1);
    let mut world2 = populated(2);

    world1.run(10);
    world2.run(10);

    let positions1: Vec<_> = world1.cells.iter().map(|c| c.position).collect();
    let positions2: Vec<_> = world2.cells.iter().map(|c| c.position).collect();
    assert_ne!(positions1, positions2);
}

#[test]
fn test_death_is_monotonic() {
    // Cells born with zero energy in a barren world reach the end of day
    // one at zero and die there. (Movement alone cannot kill: the step
    // budget floors at energy/2, so a cell at 1 EU stops walking.)
    let mut config = small_config();
    config.cells.initial_energy = 0;
    config.world.biome_stock_chance = 0.0;

    let mut world = World::new_with_seed(config, 9);
    world.populate(8, Genotype::animal());
    world.run(1);
    assert!(world.is_extinct(), "zero energy at day end is death");

    let frozen: Vec<_> = world.cells.iter().map(|c| (c.energy, c.position)).collect();
    world.run(10);
    for (cell, (energy, position)) in world.cells.iter().zip(&frozen) {
        assert!(!cell.is_alive);
        assert_eq!(cell.energy, *energy);
        assert_eq!(cell.position, *position);
    }

    // Dead cells remain enumerable for reporting.
    assert_eq!(world.cells.len(), 8);
    assert_eq!(world.snapshot().cells.len(), 8);
}

#[test]
fn test_renderer_contract() {
    struct Recorder {
        rendered: Vec<u32>,
        finalized_on: Option<u32>,
    }
    impl Renderer for Recorder {
        fn render_day(&mut self, snapshot: &WorldSnapshot) {
            self.rendered.push(snapshot.day);
        }
        fn finalize(&mut self) {
            self.finalized_on = Some(*self.rendered.last().unwrap());
        }
    }

    let mut world = populated(55);
    let days = world.config.world.days;
    let mut renderer = Recorder {
        rendered: Vec::new(),
        finalized_on: None,
    };
    world.run_with_renderer(days, &mut renderer);

    assert_eq!(renderer.rendered, (1..=days).collect::<Vec<_>>());
    assert_eq!(renderer.finalized_on, Some(days));
}

#[test]
fn test_simulation_outcome_independent_of_renderer() {
    let mut observed = populated(4242);
    let mut unobserved = populated(4242);

    let mut renderer = NullRenderer;
    observed.run_with_renderer(12, &mut renderer);
    unobserved.run(12);

    for (a, b) in observed.cells.iter().zip(&unobserved.cells) {
        assert_eq!(a.position, b.position);
        assert_eq!(a.energy, b.energy);
        assert_eq!(a.dna(), b.dna());
    }
}

#[test]
fn test_stats_tracking() {
    let mut world = populated(33333);
    world.run(10);

    assert_eq!(world.stats.day, 10);
    assert_eq!(world.stats_history.snapshots.len(), 10);

    let series = world.stats_history.population_series();
    assert_eq!(series.first().map(|&(day, _)| day), Some(1));
    // Population never grows: reproduction is a stub.
    for window in series.windows(2) {
        assert!(window[1].1 <= window[0].1);
    }
}

#[test]
fn test_gene_churn_observable() {
    // At a mutation rate of 1e-3 over 2000 bases and 20 days, acquisition
    // state is recomputed every day; just assert the derived sets stay
    // consistent with the DNA.
    let mut world = populated(2024);
    world.run(20);

    for cell in &world.cells {
        for name in cell.acquired_gene_names() {
            let gene = cell
                .genotype
                .genes
                .iter()
                .find(|g| g.name == name)
                .expect("acquired gene comes from the pool");
            assert!(cell.dna().contains(gene.sequence.as_bytes()));
        }
    }
}
