use crate::core::constants::{PERK_CRIT_CHANCE, PERK_HEAL_BONUS};
use serde::{Deserialize, Serialize};

/// One-time modifiers offered at the level-up transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Perk {
    /// +10% critical hit chance.
    KeenEye,
    /// +20% to every heal.
    Mending,
}

impl Perk {
    pub fn name(self) -> &'static str {
        match self {
            Perk::KeenEye => "+10% crit",
            Perk::Mending => "+20% healing",
        }
    }

    /// (crit chance delta, heal bonus delta)
    pub fn modifiers(self) -> (f64, f64) {
        match self {
            Perk::KeenEye => (PERK_CRIT_CHANCE, 0.0),
            Perk::Mending => (0.0, PERK_HEAL_BONUS),
        }
    }
}
