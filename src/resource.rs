//! Environmental resource catalogs.
//!
//! A [`Resource`] is anything a cell can turn into energy: an atmospheric
//! gas or a biomass nutrient. Catalog entries are immutable after
//! construction and shared by reference between the biomes stocked with
//! them.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Which medium a resource comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Medium {
    /// Gaseous resources, extracted by breathing.
    Air,
    /// Solid nutrients, extracted by eating.
    Biomass,
}

impl std::fmt::Display for Medium {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Medium::Air => write!(f, "air"),
            Medium::Biomass => write!(f, "biomass"),
        }
    }
}

/// A consumable environmental resource.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Resource name, matched case-insensitively against gene targets.
    pub name: String,
    /// Relative abundance in its medium (informational).
    pub percentage: f64,
    /// Energy units restored per extraction.
    pub energy_yield: u32,
    /// Provenance medium.
    pub medium: Medium,
}

impl Resource {
    pub fn new(name: &str, percentage: f64, energy_yield: u32, medium: Medium) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            percentage,
            energy_yield,
            medium,
        })
    }
}

/// The atmospheric composition of the world.
pub fn atmosphere() -> Vec<Arc<Resource>> {
    vec![
        Resource::new("Nitrogen", 78.0, 8, Medium::Air),
        Resource::new("Oxygen", 21.0, 2, Medium::Air),
        Resource::new("Argon", 1.0, 1, Medium::Air),
        Resource::new("Carbon dioxide", 0.04, 8, Medium::Air),
    ]
}

/// The biomass composition of the world.
pub fn biomass() -> Vec<Arc<Resource>> {
    vec![
        Resource::new("Carbon", 0.7, 4, Medium::Biomass),
        Resource::new("Nitrogen", 0.3, 2, Medium::Biomass),
    ]
}

/// Combined catalog used to stock biomes.
pub fn full_catalog() -> Vec<Arc<Resource>> {
    let mut catalog = atmosphere();
    catalog.extend(biomass());
    catalog
}
