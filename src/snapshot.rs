//! Read-only population snapshots for the rendering collaborator.
//!
//! The engine hands these out at the end of each day; renderers must not
//! (and cannot) mutate engine state through them. Rendering itself is an
//! external concern, so the bundled [`JsonRenderer`] writes only what a
//! drawing tool needs: positions, trajectories, colors, alive flags.

use crate::cell::Cell;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Read-only view of one cell.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub id: u64,
    pub position: (f64, f64),
    pub trajectory: Vec<(f64, f64)>,
    pub color: [u8; 3],
    pub energy: u32,
    pub is_alive: bool,
    pub visited_biomes: Vec<u32>,
    pub genes: Vec<String>,
}

impl CellSnapshot {
    pub fn of(cell: &Cell) -> Self {
        Self {
            id: cell.id,
            position: cell.position,
            trajectory: cell.position_history.clone(),
            color: cell.color,
            energy: cell.energy,
            is_alive: cell.is_alive,
            visited_biomes: cell.visited_biomes.clone(),
            genes: cell
                .acquired_gene_names()
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Read-only view of the world at the end of a day.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub day: u32,
    pub half_extent: f64,
    pub cells: Vec<CellSnapshot>,
}

/// Boundary contract with the rendering collaborator.
///
/// `render_day` is called once per day with the full population snapshot;
/// `finalize` fires when the last configured day has run, so cumulative
/// artifacts (an animation, say) can be assembled. Renderer failures must
/// not change simulation outcomes, so the trait is infallible; impls log
/// and carry on.
pub trait Renderer {
    fn render_day(&mut self, snapshot: &WorldSnapshot);
    fn finalize(&mut self);
}

/// Renderer that drops everything on the floor.
#[derive(Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render_day(&mut self, _snapshot: &WorldSnapshot) {}
    fn finalize(&mut self) {}
}

/// Writes one JSON snapshot per day into an output directory, plus a final
/// manifest listing the days rendered.
pub struct JsonRenderer {
    out_dir: PathBuf,
    days_written: Vec<u32>,
}

impl JsonRenderer {
    pub fn new<P: Into<PathBuf>>(out_dir: P) -> Self {
        Self {
            out_dir: out_dir.into(),
            days_written: Vec::new(),
        }
    }
}

impl Renderer for JsonRenderer {
    fn render_day(&mut self, snapshot: &WorldSnapshot) {
        let path = self.out_dir.join(format!("day_{:04}.json", snapshot.day));
        match serde_json::to_string(snapshot) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    log::warn!("failed to write snapshot {:?}: {}", path, e);
                } else {
                    self.days_written.push(snapshot.day);
                }
            }
            Err(e) => log::warn!("failed to serialize snapshot for day {}: {}", snapshot.day, e),
        }
    }

    fn finalize(&mut self) {
        let path = self.out_dir.join("days.json");
        match serde_json::to_string(&self.days_written) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    log::warn!("failed to write manifest {:?}: {}", path, e);
                }
            }
            Err(e) => log::warn!("failed to serialize manifest: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genetics::{Dna, Genotype};
    use std::sync::Arc;

    #[test]
    fn test_cell_snapshot_captures_state() {
        let mut cell = Cell::with_dna(
            7,
            Arc::new(Genotype::animal()),
            Dna::from_bases("TTTATTGCATTT"),
            5,
        );
        cell.position = (2.0, -1.0);
        cell.position_history.push((1.0, 0.0));
        cell.position_history.push((2.0, -1.0));

        let snapshot = CellSnapshot::of(&cell);
        assert_eq!(snapshot.id, 7);
        assert_eq!(snapshot.position, (2.0, -1.0));
        assert_eq!(snapshot.trajectory.len(), 2);
        assert_eq!(snapshot.genes, vec!["OX42".to_string()]);
        assert!(snapshot.is_alive);
    }

    #[test]
    fn test_json_renderer_writes_files() {
        let dir = std::env::temp_dir().join("protocell_renderer_test");
        std::fs::create_dir_all(&dir).unwrap();

        let snapshot = WorldSnapshot {
            day: 2,
            half_extent: 10.0,
            cells: Vec::new(),
        };
        let mut renderer = JsonRenderer::new(&dir);
        renderer.render_day(&snapshot);
        renderer.finalize();

        assert!(dir.join("day_0002.json").exists());
        assert!(dir.join("days.json").exists());
        std::fs::remove_dir_all(&dir).ok();
    }
}
