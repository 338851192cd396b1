//! Cell lifecycle engine.
//!
//! A cell owns its DNA, energy, and trajectory, and exposes the daily
//! operations the world sequences: breathe, eat, mutate, travel, sleep.
//! Every operation reports what happened as [`CellEvent`]s; side-channel
//! logging lives in the orchestrator.

use crate::biome::{Biome, BiomeGrid};
use crate::events::CellEvent;
use crate::genetics::{recompute_acquired, Dna, Genotype, ProtectedRegion};
use crate::resource::{Medium, Resource};
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;

/// Unique cell identifier.
pub type CellId = u64;

/// The 8 compass directions as unit offsets.
const DIRECTIONS: [(f64, f64); 8] = [
    (0.0, 1.0),   // N
    (1.0, 1.0),   // NE
    (1.0, 0.0),   // E
    (1.0, -1.0),  // SE
    (0.0, -1.0),  // S
    (-1.0, -1.0), // SW
    (-1.0, 0.0),  // W
    (-1.0, 1.0),  // NW
];

/// Attempts allowed per step of budget before a wedged cell gives up the
/// rest of the day's walk. Rejected candidates cost nothing, so without a
/// ceiling a maximally boxed-in cell would redraw forever.
const ATTEMPTS_PER_STEP: u64 = 16;
const MIN_ATTEMPT_CEILING: u64 = 64;

/// One organism.
pub struct Cell {
    pub id: CellId,
    /// Species gene pool, shared read-only.
    pub genotype: Arc<Genotype>,
    dna: Dna,
    /// `acquired[i]` mirrors genotype gene `i`; derived from DNA only.
    acquired: Vec<bool>,
    protected: Vec<ProtectedRegion>,
    /// Lowercase resource name -> gene indices able to process it. Built
    /// once at construction, replaces runtime attribute probing.
    capabilities: HashMap<String, Vec<usize>>,
    pub energy: u32,
    pub position: (f64, f64),
    pub last_position: (f64, f64),
    pub position_history: Vec<(f64, f64)>,
    pub visited_biomes: Vec<u32>,
    pub color: [u8; 3],
    pub is_alive: bool,
    recorded_origin_biome: bool,
}

impl Cell {
    /// Create a cell with fresh random DNA at the origin. Genes already
    /// present in the birth DNA are reported as acquisitions.
    pub fn new<R: Rng>(
        id: CellId,
        genotype: Arc<Genotype>,
        dna_length: usize,
        initial_energy: u32,
        max_energy: u32,
        rng: &mut R,
        events: &mut Vec<CellEvent>,
    ) -> Self {
        let dna = Dna::random(dna_length, rng);
        let color = [rng.gen(), rng.gen(), rng.gen()];
        let mut cell = Self::assemble(id, genotype, dna, initial_energy.min(max_energy), color);
        cell.report_birth_genes(events);
        cell
    }

    /// Build a cell around explicit DNA. Fixture constructor for tests and
    /// controlled experiments; the simulation itself uses [`Cell::new`].
    pub fn with_dna(id: CellId, genotype: Arc<Genotype>, dna: Dna, energy: u32) -> Self {
        Self::assemble(id, genotype, dna, energy, [200, 40, 40])
    }

    fn assemble(
        id: CellId,
        genotype: Arc<Genotype>,
        dna: Dna,
        energy: u32,
        color: [u8; 3],
    ) -> Self {
        let mut capabilities: HashMap<String, Vec<usize>> = HashMap::new();
        for (index, gene) in genotype.genes.iter().enumerate() {
            capabilities
                .entry(gene.target_resource.to_lowercase())
                .or_default()
                .push(index);
        }

        let acquisition = recompute_acquired(&dna, &genotype.genes);

        Self {
            id,
            genotype,
            dna,
            acquired: acquisition.acquired,
            protected: acquisition.protected,
            capabilities,
            energy,
            position: (0.0, 0.0),
            last_position: (0.0, 0.0),
            position_history: Vec::new(),
            visited_biomes: Vec::new(),
            color,
            is_alive: true,
            recorded_origin_biome: false,
        }
    }

    fn report_birth_genes(&self, events: &mut Vec<CellEvent>) {
        for (index, gene) in self.genotype.genes.iter().enumerate() {
            if self.acquired[index] {
                events.push(CellEvent::GeneAcquired {
                    gene: gene.name.clone(),
                    target: gene.target_resource.clone(),
                    medium: gene.medium,
                });
            }
        }
    }

    #[inline]
    pub fn dna(&self) -> &Dna {
        &self.dna
    }

    #[inline]
    pub fn protected_regions(&self) -> &[ProtectedRegion] {
        &self.protected
    }

    /// Names of the currently acquired genes.
    pub fn acquired_gene_names(&self) -> Vec<&str> {
        self.genotype
            .genes
            .iter()
            .enumerate()
            .filter(|(index, _)| self.acquired[*index])
            .map(|(_, gene)| gene.name.as_str())
            .collect()
    }

    pub fn has_gene(&self, name: &str) -> bool {
        self.genotype
            .genes
            .iter()
            .enumerate()
            .any(|(index, gene)| gene.name == name && self.acquired[index])
    }

    /// Whether some acquired gene can process a resource of this name.
    fn can_process(&self, resource_name: &str) -> bool {
        self.capabilities
            .get(&resource_name.to_lowercase())
            .map(|indices| indices.iter().any(|&i| self.acquired[i]))
            .unwrap_or(false)
    }

    /// Extract energy from whichever of `resources` the cell can process,
    /// in encounter order, saturating at `max_energy`. Saturation is
    /// sticky; later usable resources are still processed and reported
    /// with zero gain. No usable resource is a no-op, not an error.
    pub fn extract(
        &mut self,
        resources: &[Arc<Resource>],
        max_energy: u32,
        events: &mut Vec<CellEvent>,
    ) {
        debug_assert!(self.is_alive, "extract on a dead cell");
        for resource in resources {
            if !self.can_process(&resource.name) {
                continue;
            }
            let gained = resource.energy_yield.min(max_energy - self.energy);
            self.energy += gained;
            events.push(CellEvent::ResourceConsumed {
                resource: resource.name.clone(),
                medium: resource.medium,
                gained,
                saturated: self.energy == max_energy,
            });
        }
    }

    /// Breathe the current biome's air. No biome means nothing to breathe.
    pub fn breathe(
        &mut self,
        biome: Option<&Biome>,
        max_energy: u32,
        events: &mut Vec<CellEvent>,
    ) {
        if let Some(biome) = biome {
            self.extract(&biome.resources_from(Medium::Air), max_energy, events);
        }
    }

    /// Eat the current biome's biomass. No biome means nothing to eat.
    pub fn eat(&mut self, biome: Option<&Biome>, max_energy: u32, events: &mut Vec<CellEvent>) {
        if let Some(biome) = biome {
            self.extract(&biome.resources_from(Medium::Biomass), max_energy, events);
        }
    }

    /// Mutate every DNA position, then recompute the acquired-gene set.
    ///
    /// Positions inside a protected region mutate at `in_gene_rate`, the
    /// rest at `general_rate`. Gene gains and losses are reported; a gene
    /// whose sequence still matches is left untouched.
    pub fn mutate<R: Rng>(
        &mut self,
        general_rate: f64,
        in_gene_rate: f64,
        rng: &mut R,
        events: &mut Vec<CellEvent>,
    ) {
        debug_assert!(self.is_alive, "mutate on a dead cell");
        self.dna
            .mutate(&self.protected, general_rate, in_gene_rate, rng);

        let acquisition = recompute_acquired(&self.dna, &self.genotype.genes);
        for (index, gene) in self.genotype.genes.iter().enumerate() {
            match (self.acquired[index], acquisition.acquired[index]) {
                (false, true) => events.push(CellEvent::GeneAcquired {
                    gene: gene.name.clone(),
                    target: gene.target_resource.clone(),
                    medium: gene.medium,
                }),
                (true, false) => events.push(CellEvent::GeneLost {
                    gene: gene.name.clone(),
                }),
                _ => {}
            }
        }
        self.acquired = acquisition.acquired;
        self.protected = acquisition.protected;
    }

    /// One day's energy-bounded random walk.
    ///
    /// The step budget is `energy / 2`; each accepted step costs 1 EU.
    /// Candidates landing outside the open world square are rejected and
    /// redrawn without consuming budget or energy. A ceiling of 16
    /// attempts per budgeted step (minimum 64) guarantees termination for
    /// cells wedged against the boundary; hitting it ends the day's walk
    /// early and is reported as a stall.
    pub fn travel<R: Rng>(&mut self, grid: &BiomeGrid, rng: &mut R, events: &mut Vec<CellEvent>) {
        debug_assert!(self.is_alive, "travel on a dead cell");
        if self.energy == 0 {
            return;
        }

        // The starting biome counts as visited before any movement.
        if !self.recorded_origin_biome {
            self.recorded_origin_biome = true;
            if let Some(biome) = grid.resolve(self.position) {
                self.visited_biomes.push(biome.id);
                events.push(CellEvent::BiomeEntered { biome: biome.id });
            }
        }

        let start = self.position;
        let max_steps = self.energy / 2;
        let attempt_ceiling = (max_steps as u64 * ATTEMPTS_PER_STEP).max(MIN_ATTEMPT_CEILING);
        let mut steps = 0u32;
        let mut attempts = 0u64;
        let mut stalled = false;

        while steps < max_steps {
            attempts += 1;
            if attempts > attempt_ceiling {
                stalled = true;
                break;
            }

            let (dx, dy) = DIRECTIONS[rng.gen_range(0..DIRECTIONS.len())];
            let candidate = (self.position.0 + dx, self.position.1 + dy);
            if !grid.in_bounds(candidate) {
                continue;
            }

            self.last_position = self.position;
            self.position = candidate;
            self.position_history.push(candidate);
            self.energy -= 1;
            steps += 1;

            if let Some(biome) = grid.resolve(candidate) {
                if self.visited_biomes.last() != Some(&biome.id) {
                    events.push(CellEvent::BiomeEntered { biome: biome.id });
                }
                self.visited_biomes.push(biome.id);
            }
        }

        let distance = euclidean(start, self.position);
        events.push(CellEvent::Moved {
            from: start,
            to: self.position,
            distance,
            steps,
            stalled,
        });
    }

    /// End-of-day check: a cell with no energy left dies, permanently.
    pub fn sleep(&mut self, day: u32, events: &mut Vec<CellEvent>) {
        debug_assert!(self.is_alive, "sleep on a dead cell");
        if self.energy == 0 {
            self.is_alive = false;
            events.push(CellEvent::Died { day });
        }
    }

    /// Reproduction stub: debits the energy cost and nothing else. No
    /// offspring are created; the operation exists so the cost side of the
    /// contract is exercised until reproduction is implemented.
    pub fn reproduce(&mut self, energy_cost: u32) {
        debug_assert!(self.is_alive, "reproduce on a dead cell");
        self.energy = self.energy.saturating_sub(energy_cost);
    }
}

/// Euclidean distance, rounded to 3 decimals for reporting.
fn euclidean(a: (f64, f64), b: (f64, f64)) -> f64 {
    let d = (a.0 - b.0).hypot(a.1 - b.1);
    (d * 1000.0).round() / 1000.0
}
