//! Statistics tracking for the simulation.

use crate::cell::Cell;
use serde::{Deserialize, Serialize};

/// Statistics snapshot for one simulated day
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Stats {
    /// Day this snapshot was taken
    pub day: u32,
    /// Living cells
    pub population: usize,
    /// Total cells ever created (dead cells stay enumerable)
    pub total_cells: usize,
    /// Deaths during this day
    pub deaths: usize,
    /// Mean energy across living cells
    pub energy_mean: f64,
    /// Mean acquired-gene count across living cells
    pub genes_mean: f64,
    /// Mean trajectory length (accepted steps so far) across living cells
    pub steps_mean: f64,
    /// Distinct biomes visited by anyone so far
    pub biomes_visited: usize,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update stats from the current population
    pub fn update(&mut self, cells: &[Cell]) {
        self.total_cells = cells.len();
        let alive: Vec<&Cell> = cells.iter().filter(|c| c.is_alive).collect();
        self.population = alive.len();

        if alive.is_empty() {
            self.energy_mean = 0.0;
            self.genes_mean = 0.0;
            self.steps_mean = 0.0;
        } else {
            let n = alive.len() as f64;
            self.energy_mean = alive.iter().map(|c| c.energy as f64).sum::<f64>() / n;
            self.genes_mean = alive
                .iter()
                .map(|c| c.acquired_gene_names().len() as f64)
                .sum::<f64>()
                / n;
            self.steps_mean = alive
                .iter()
                .map(|c| c.position_history.len() as f64)
                .sum::<f64>()
                / n;
        }

        let visited: std::collections::HashSet<_> = cells
            .iter()
            .flat_map(|c| c.visited_biomes.iter().copied())
            .collect();
        self.biomes_visited = visited.len();
    }

    /// Format stats as a one-line summary
    pub fn summary(&self) -> String {
        format!(
            "Day:{:4} | Pop:{:4}/{:<4} | Deaths:{:3} | Energy:{:.1} | Genes:{:.2} | Steps:{:.1} | Biomes:{}",
            self.day,
            self.population,
            self.total_cells,
            self.deaths,
            self.energy_mean,
            self.genes_mean,
            self.steps_mean,
            self.biomes_visited,
        )
    }
}

/// Historical statistics tracker
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StatsHistory {
    /// All recorded stats snapshots
    pub snapshots: Vec<Stats>,
    /// Recording interval in days
    pub interval: u32,
}

impl StatsHistory {
    pub fn new(interval: u32) -> Self {
        Self {
            snapshots: Vec::new(),
            interval,
        }
    }

    /// Record a stats snapshot
    pub fn record(&mut self, stats: Stats) {
        self.snapshots.push(stats);
    }

    /// Get population over time
    pub fn population_series(&self) -> Vec<(u32, usize)> {
        self.snapshots
            .iter()
            .map(|s| (s.day, s.population))
            .collect()
    }

    /// Get mean energy over time
    pub fn energy_series(&self) -> Vec<(u32, f64)> {
        self.snapshots
            .iter()
            .map(|s| (s.day, s.energy_mean))
            .collect()
    }

    /// Save history to a JSON file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)
    }

    /// Load history from a JSON file
    pub fn load(path: &str) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genetics::{Dna, Genotype};
    use std::sync::Arc;

    fn cell(id: u64, energy: u32) -> Cell {
        Cell::with_dna(
            id,
            Arc::new(Genotype::animal()),
            Dna::from_bases("TTTATTGCATTT"),
            energy,
        )
    }

    #[test]
    fn test_stats_update() {
        let mut dead = cell(3, 0);
        dead.is_alive = false;
        let cells = vec![cell(1, 4), cell(2, 8), dead];

        let mut stats = Stats::new();
        stats.update(&cells);

        assert_eq!(stats.population, 2);
        assert_eq!(stats.total_cells, 3);
        assert_eq!(stats.energy_mean, 6.0);
        assert_eq!(stats.genes_mean, 1.0); // everyone carries OX42
    }

    #[test]
    fn test_stats_empty_population() {
        let mut stats = Stats::new();
        stats.update(&[]);
        assert_eq!(stats.population, 0);
        assert_eq!(stats.energy_mean, 0.0);
    }

    #[test]
    fn test_stats_history() {
        let mut history = StatsHistory::new(1);

        for day in 1..=5 {
            let mut stats = Stats::new();
            stats.day = day;
            stats.population = 10 - day as usize;
            history.record(stats);
        }

        let series = history.population_series();
        assert_eq!(series.len(), 5);
        assert_eq!(series[0], (1, 9));
        assert_eq!(series[4], (5, 5));
    }

    #[test]
    fn test_history_save_load() {
        let mut history = StatsHistory::new(1);
        let mut stats = Stats::new();
        stats.day = 3;
        stats.population = 7;
        history.record(stats);

        let path = "/tmp/protocell_test_stats_history.json";
        history.save(path).expect("save stats history");
        let loaded = StatsHistory::load(path).expect("load stats history");
        assert_eq!(loaded.snapshots.len(), 1);
        assert_eq!(loaded.snapshots[0].day, 3);
        std::fs::remove_file(path).ok();
    }
}
