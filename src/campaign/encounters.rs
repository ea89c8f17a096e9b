//! Builds enemy rosters, bosses and the branch map.

use super::types::{BranchOption, CampaignMap, EventKind, MidNodeKind};
use crate::combat::{BossKind, Encounter, Enemy};
use crate::core::constants::{AMBUSH_ROSTER, OPENING_ROSTER};
use crate::core::rng::RandomOracle;

fn roster(stats: &[(&str, u32, u32, u32)]) -> Vec<Enemy> {
    stats
        .iter()
        .map(|&(name, max_hp, attack, defense)| Enemy::new(name, max_hp, attack, defense))
        .collect()
}

/// Enemies for an encounter, in their fixed acting order.
pub fn enemies_for(encounter: Encounter) -> Vec<Enemy> {
    match encounter {
        Encounter::Opening => roster(&OPENING_ROSTER),
        Encounter::Ambush => roster(&AMBUSH_ROSTER),
        Encounter::Boss(kind) => vec![Enemy::boss(kind)],
    }
}

/// Rolls the two-path map: each mid-node independently, one boss per path.
pub fn build_map(rng: &mut impl RandomOracle) -> CampaignMap {
    let mid_a = MidNodeKind::ALL[rng.pick(MidNodeKind::ALL.len())];
    let mid_b = MidNodeKind::ALL[rng.pick(MidNodeKind::ALL.len())];
    let boss_a = BossKind::ALL[rng.pick(BossKind::ALL.len())];

    CampaignMap::new(
        BranchOption {
            mid_node: mid_a,
            boss: boss_a,
        },
        BranchOption {
            mid_node: mid_b,
            boss: boss_a.other(),
        },
    )
}

/// Rolls which event an Event node presents.
pub fn roll_event(rng: &mut impl RandomOracle) -> EventKind {
    EventKind::ALL[rng.pick(EventKind::ALL.len())]
}
