use crate::core::constants::{LIFE_RING_STATS, SHIELD_STATS, SWORD_STATS};
use serde::{Deserialize, Serialize};

/// Stat deltas granted while an item is equipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemBonuses {
    pub attack: u32,
    pub defense: u32,
    pub max_hp: u32,
}

/// Items sold by the merchant. The hero holds at most one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Sword,
    Shield,
    LifeRing,
}

impl ItemKind {
    pub const ALL: [ItemKind; 3] = [ItemKind::Sword, ItemKind::Shield, ItemKind::LifeRing];

    fn stats(self) -> (u32, u32, u32, u32) {
        match self {
            ItemKind::Sword => SWORD_STATS,
            ItemKind::Shield => SHIELD_STATS,
            ItemKind::LifeRing => LIFE_RING_STATS,
        }
    }

    pub fn bonuses(self) -> ItemBonuses {
        let (attack, defense, max_hp, _) = self.stats();
        ItemBonuses {
            attack,
            defense,
            max_hp,
        }
    }

    /// Merchant price in gold.
    pub fn price(self) -> u32 {
        self.stats().3
    }

    pub fn name(self) -> &'static str {
        match self {
            ItemKind::Sword => "Sword",
            ItemKind::Shield => "Shield",
            ItemKind::LifeRing => "Ring of Life",
        }
    }

    /// Display name including the stat line, e.g. "Sword (+4 Attack)".
    pub fn label(self) -> String {
        let b = self.bonuses();
        let stat = if b.attack > 0 {
            format!("+{} Attack", b.attack)
        } else if b.defense > 0 {
            format!("+{} Defense", b.defense)
        } else {
            format!("+{} HP", b.max_hp)
        };
        format!("{} ({})", self.name(), stat)
    }
}
