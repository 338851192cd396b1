//! Structured engine events.
//!
//! Every cell operation reports what happened as data instead of logging
//! narratively from inside the engine. The orchestrator turns events into
//! `log` records; dropping them entirely changes no simulation outcome.

use crate::biome::BiomeId;
use crate::resource::Medium;

/// Observable outcome of a cell operation.
#[derive(Clone, Debug, PartialEq)]
pub enum CellEvent {
    /// A gene's sequence appeared in the DNA.
    GeneAcquired {
        gene: String,
        target: String,
        medium: Medium,
    },
    /// A previously held gene's sequence mutated away.
    GeneLost { gene: String },
    /// A usable resource was processed. `gained` is zero once energy is
    /// saturated, but the resource still counts as processed.
    ResourceConsumed {
        resource: String,
        medium: Medium,
        gained: u32,
        saturated: bool,
    },
    /// One day's random walk finished.
    Moved {
        from: (f64, f64),
        to: (f64, f64),
        distance: f64,
        steps: u32,
        /// The attempt ceiling fired before the step budget was spent.
        stalled: bool,
    },
    /// A new biome was entered during movement.
    BiomeEntered { biome: BiomeId },
    /// Energy ran out at end of day.
    Died { day: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_compare_by_value() {
        let a = CellEvent::GeneLost {
            gene: "OX42".to_string(),
        };
        let b = CellEvent::GeneLost {
            gene: "OX42".to_string(),
        };
        assert_eq!(a, b);
    }
}
