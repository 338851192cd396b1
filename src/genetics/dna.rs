//! DNA storage, mutation, and gene acquisition.
//!
//! DNA is a long byte string over the ATCG alphabet, owned exclusively by
//! one cell. Its length is fixed for the cell's lifetime; mutation swaps
//! single bases in place. Gene acquisition is a pure function of the
//! current DNA: a gene is held exactly while its sequence occurs as a
//! contiguous substring.

use crate::genetics::Gene;
use rand::Rng;

/// The four-base alphabet.
pub const NUCLEOTIDES: [u8; 4] = *b"ATCG";

/// An index range `[start, end)` into DNA where an acquired beneficial
/// gene's sequence lives. Positions inside are mutated at the (lower)
/// in-gene rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProtectedRegion {
    pub start: usize,
    pub end: usize,
}

impl ProtectedRegion {
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }
}

/// Result of a full acquisition recompute.
#[derive(Clone, Debug, Default)]
pub struct Acquisition {
    /// `acquired[i]` is true iff gene `i` of the pool is currently held.
    pub acquired: Vec<bool>,
    /// First-occurrence ranges of the beneficial acquired genes.
    pub protected: Vec<ProtectedRegion>,
}

impl Acquisition {
    pub fn acquired_count(&self) -> usize {
        self.acquired.iter().filter(|&&a| a).count()
    }
}

/// A cell's genetic sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dna {
    bases: Vec<u8>,
}

impl Dna {
    /// Generate random DNA of the given length.
    pub fn random<R: Rng>(len: usize, rng: &mut R) -> Self {
        let bases = (0..len)
            .map(|_| NUCLEOTIDES[rng.gen_range(0..NUCLEOTIDES.len())])
            .collect();
        Self { bases }
    }

    /// Build DNA from an explicit base string. Panics on non-ATCG input;
    /// intended for tests and fixtures.
    pub fn from_bases(bases: &str) -> Self {
        assert!(
            bases.bytes().all(|b| NUCLEOTIDES.contains(&b)),
            "DNA may only contain A, T, C, G"
        );
        Self {
            bases: bases.as_bytes().to_vec(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bases
    }

    /// Index of the first occurrence of `sequence`, naive scan. Pool sizes
    /// are a handful of short sequences, so this stays linear in practice.
    pub fn find(&self, sequence: &[u8]) -> Option<usize> {
        if sequence.is_empty() || sequence.len() > self.bases.len() {
            return None;
        }
        self.bases
            .windows(sequence.len())
            .position(|window| window == sequence)
    }

    #[inline]
    pub fn contains(&self, sequence: &[u8]) -> bool {
        self.find(sequence).is_some()
    }

    /// Mutate every position independently, in place.
    ///
    /// Each position draws one uniform sample: inside a protected region
    /// the position mutates when the sample is at most `in_gene_rate`,
    /// elsewhere when it is at most `general_rate`. A triggered mutation
    /// always substitutes a *different* base, and is visible to later
    /// positions in the same pass. Returns the number of substitutions.
    pub fn mutate<R: Rng>(
        &mut self,
        protected: &[ProtectedRegion],
        general_rate: f64,
        in_gene_rate: f64,
        rng: &mut R,
    ) -> u64 {
        let mut substitutions = 0u64;
        for index in 0..self.bases.len() {
            let rate = if protected.iter().any(|r| r.contains(index)) {
                in_gene_rate
            } else {
                general_rate
            };
            if rng.gen::<f64>() <= rate {
                self.bases[index] = substitute(self.bases[index], rng);
                substitutions += 1;
            }
        }
        substitutions
    }
}

/// Pick a uniformly random base different from `old`.
fn substitute<R: Rng>(old: u8, rng: &mut R) -> u8 {
    let candidates: Vec<u8> = NUCLEOTIDES.iter().copied().filter(|&b| b != old).collect();
    candidates[rng.gen_range(0..candidates.len())]
}

/// Recompute the acquired-gene set and protected regions from DNA.
///
/// A gene is acquired exactly when its sequence occurs in the DNA;
/// overlapping gene sequences are evaluated independently. For every
/// beneficial acquired gene the first match's range becomes a protected
/// region. Pure: no state outside the return value is touched, and
/// re-running on the same DNA yields the same result.
pub fn recompute_acquired(dna: &Dna, pool: &[Gene]) -> Acquisition {
    let mut acquired = vec![false; pool.len()];
    let mut protected = Vec::new();

    for (index, gene) in pool.iter().enumerate() {
        let sequence = gene.sequence.as_bytes();
        if let Some(start) = dna.find(sequence) {
            acquired[index] = true;
            if gene.beneficial {
                protected.push(ProtectedRegion {
                    start,
                    end: start + sequence.len(),
                });
            }
        }
    }

    Acquisition {
        acquired,
        protected,
    }
}
