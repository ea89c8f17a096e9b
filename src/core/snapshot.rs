//! Read-only views handed to front ends.

use crate::campaign::{Branch, CampaignMap, Outcome, Scene};
use crate::character::{Hero, ItemKind, Perk};
use crate::combat::{BossKind, Encounter, Enemy};
use serde::{Deserialize, Serialize};

/// Display view of one enemy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitView {
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub alive: bool,
}

impl From<&Enemy> for UnitView {
    fn from(enemy: &Enemy) -> Self {
        Self {
            name: enemy.name.clone(),
            hp: enemy.hp,
            max_hp: enemy.max_hp,
            attack: enemy.attack,
            defense: enemy.defense,
            alive: enemy.hp > 0,
        }
    }
}

/// Everything a renderer needs, detached from the live session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub scene: Scene,
    pub hero: Hero,
    /// Enemies of the current (or just finished) fight, in acting order.
    pub enemies: Vec<UnitView>,
    pub encounter: Option<Encounter>,
    pub round: u32,
    pub turn_locked: bool,
    pub selected_target: Option<usize>,
    pub hover_target: Option<usize>,
    pub map: Option<CampaignMap>,
    pub wins: u32,
    pub start_ts: i64,
    pub perk_pending: bool,
}

impl Snapshot {
    pub fn living_enemies(&self) -> usize {
        self.enemies.iter().filter(|e| e.alive).count()
    }
}

/// End-of-run report shown on the summary screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub outcome: Outcome,
    pub elapsed_secs: u64,
    pub branch: Option<Branch>,
    pub boss: Option<BossKind>,
    pub level: u32,
    pub xp: u32,
    pub gold: u32,
    pub perks: Vec<Perk>,
    pub item: Option<ItemKind>,
}

impl RunSummary {
    /// Elapsed time as `m:ss`.
    pub fn elapsed_display(&self) -> String {
        format!("{}:{:02}", self.elapsed_secs / 60, self.elapsed_secs % 60)
    }
}
