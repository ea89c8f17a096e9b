//! Simulation configuration.

use crate::character::Perk;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of runs to play
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random); run `i` uses `seed + i`
    pub seed: Option<u64>,

    /// Intent cap per run before the run counts as stalled
    pub max_intents_per_run: u32,

    /// Heal when HP drops below this fraction of max HP
    pub heal_below: f64,

    /// Whether the auto-player uses power attacks
    pub use_power: bool,

    /// Perk taken at the level-up offer
    pub perk: Perk,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            max_intents_per_run: 500,
            heal_below: 0.35,
            use_power: false,
            perk: Perk::KeenEye,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Small seeded batch for smoke testing
    pub fn quick(num_runs: u32, seed: u64) -> Self {
        Self {
            num_runs,
            seed: Some(seed),
            verbosity: 0,
            ..Default::default()
        }
    }

    /// Power attacks, late heals
    pub fn aggressive() -> Self {
        Self {
            heal_below: 0.25,
            use_power: true,
            perk: Perk::KeenEye,
            ..Default::default()
        }
    }

    /// Early heals, healing perk
    pub fn cautious() -> Self {
        Self {
            heal_below: 0.5,
            use_power: false,
            perk: Perk::Mending,
            ..Default::default()
        }
    }
}
