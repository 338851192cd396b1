//! Biome grid: unit-square regions pre-stocked with resources.

use crate::resource::{Medium, Resource};
use rand::Rng;
use std::sync::Arc;

/// Unique biome identifier within a grid.
pub type BiomeId = u32;

/// A unit-square region of the world, stocked with a fixed subset of the
/// global resource catalog at world-build time.
#[derive(Clone, Debug)]
pub struct Biome {
    pub id: BiomeId,
    pub corner_low: (f64, f64),
    pub corner_high: (f64, f64),
    pub resources: Vec<Arc<Resource>>,
}

impl Biome {
    /// Half-open containment `[low, high)` on both axes, so every point of
    /// the unit lattice belongs to exactly one biome. Only the world's
    /// outer square is open.
    #[inline]
    pub fn contains(&self, point: (f64, f64)) -> bool {
        point.0 >= self.corner_low.0
            && point.0 < self.corner_high.0
            && point.1 >= self.corner_low.1
            && point.1 < self.corner_high.1
    }

    /// Resources of this biome coming from the given medium.
    pub fn resources_from(&self, medium: Medium) -> Vec<Arc<Resource>> {
        self.resources
            .iter()
            .filter(|r| r.medium == medium)
            .cloned()
            .collect()
    }
}

/// The bounded world partitioned into unit squares.
///
/// The world is a square of half-extent `half_extent` centered on the
/// origin; its interior is open on both axes.
#[derive(Clone, Debug)]
pub struct BiomeGrid {
    half_extent: f64,
    biomes: Vec<Biome>,
}

impl BiomeGrid {
    /// Build the grid, stocking each biome with an independent random
    /// subset of the catalog (each entry kept with `stock_chance`).
    pub fn generate<R: Rng>(
        half_extent: f64,
        catalog: &[Arc<Resource>],
        stock_chance: f64,
        rng: &mut R,
    ) -> Self {
        let extent = half_extent.floor() as i64;
        let mut biomes = Vec::new();
        let mut id: BiomeId = 0;

        for y in -extent..extent {
            for x in -extent..extent {
                let resources = catalog
                    .iter()
                    .filter(|_| rng.gen::<f64>() < stock_chance)
                    .cloned()
                    .collect();
                biomes.push(Biome {
                    id,
                    corner_low: (x as f64, y as f64),
                    corner_high: ((x + 1) as f64, (y + 1) as f64),
                    resources,
                });
                id += 1;
            }
        }

        Self {
            half_extent,
            biomes,
        }
    }

    /// World half-extent.
    #[inline]
    pub fn half_extent(&self) -> f64 {
        self.half_extent
    }

    /// Whether a point lies strictly inside the world square.
    #[inline]
    pub fn in_bounds(&self, point: (f64, f64)) -> bool {
        point.0 > -self.half_extent
            && point.0 < self.half_extent
            && point.1 > -self.half_extent
            && point.1 < self.half_extent
    }

    /// Resolve a point to its containing biome.
    ///
    /// Linear scan, first hit wins. `None` happens only at the world edge
    /// or in gaps; callers treat it as "no usable resources this tick",
    /// never as an error.
    pub fn resolve(&self, point: (f64, f64)) -> Option<&Biome> {
        self.biomes.iter().find(|b| b.contains(point))
    }

    pub fn get(&self, id: BiomeId) -> Option<&Biome> {
        self.biomes.get(id as usize)
    }

    pub fn len(&self) -> usize {
        self.biomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.biomes.is_empty()
    }
}
