//! Genetics module - gene definitions, genotypes, and the DNA model.

pub mod dna;

pub use dna::{recompute_acquired, Acquisition, Dna, ProtectedRegion, NUCLEOTIDES};

use crate::resource::Medium;
use serde::{Deserialize, Serialize};

/// Immutable gene definition.
///
/// A gene maps a DNA subsequence to a resource-processing capability. The
/// definition never changes; whether a cell currently holds the gene is
/// per-cell state recomputed from its DNA (see [`recompute_acquired`]).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Gene {
    /// Gene identity.
    pub name: String,
    /// Name of the resource this gene unlocks (matched case-insensitively).
    pub target_resource: String,
    /// Medium the target resource is usually found in.
    pub medium: Medium,
    /// The DNA sequence whose presence grants the gene.
    pub sequence: String,
    /// Beneficial genes get mutation protection while acquired.
    pub beneficial: bool,
}

impl Gene {
    pub fn new(
        name: &str,
        target_resource: &str,
        medium: Medium,
        sequence: &str,
        beneficial: bool,
    ) -> Self {
        Self {
            name: name.to_string(),
            target_resource: target_resource.to_string(),
            medium,
            sequence: sequence.to_string(),
            beneficial,
        }
    }
}

/// A species-level gene pool, fixed at cell construction and shared
/// read-only by every cell of the species.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Genotype {
    pub name: String,
    pub genes: Vec<Gene>,
}

impl Genotype {
    /// The animal-cell genotype: gas processing from the atmosphere plus
    /// nutrient processing from the biomass. Genes are only present at
    /// birth if the random DNA happens to contain their sequence.
    pub fn animal() -> Self {
        Self {
            name: "animal".to_string(),
            genes: vec![
                Gene::new("NAR1", "nitrogen", Medium::Air, "AATCGA", true),
                Gene::new("OX42", "oxygen", Medium::Air, "ATTGCA", true),
                Gene::new("ARgo12", "argon", Medium::Air, "AATCGACC", true),
                Gene::new("CD0CD", "carbon dioxide", Medium::Air, "AATCGAAAC", true),
                Gene::new("CHL24", "chlorine", Medium::Biomass, "AATCGACTG", true),
                Gene::new("CarBas3", "carbon", Medium::Biomass, "ATTATTGAC", true),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}
