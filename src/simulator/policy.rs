//! Auto-play policy: picks the next intent from the current game state.

use super::config::SimConfig;
use crate::campaign::{Branch, EventKind, MidNodeKind, NodeChoice, Scene};
use crate::character::{Hero, ItemKind, Perk};
use crate::combat::{CombatSession, HeroAction};
use crate::core::constants::SHRINE_DONATION;
use crate::core::{Game, Intent, RandomOracle};

/// Mid-node preference, best first.
const NODE_PREFERENCE: [MidNodeKind; 4] = [
    MidNodeKind::Camp,
    MidNodeKind::Merchant,
    MidNodeKind::Event,
    MidNodeKind::Combat,
];

/// Merchant preference, best first.
const ITEM_PREFERENCE: [ItemKind; 3] = [ItemKind::Sword, ItemKind::LifeRing, ItemKind::Shield];

/// HP fraction under which the camp rests instead of training.
const CAMP_REST_BELOW: f64 = 0.6;

#[derive(Debug, Clone)]
pub struct AutoPolicy {
    pub heal_below: f64,
    pub use_power: bool,
    pub perk: Perk,
}

impl AutoPolicy {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            heal_below: config.heal_below,
            use_power: config.use_power,
            perk: config.perk,
        }
    }

    /// The next intent, or `None` once the run is over.
    pub fn decide<R: RandomOracle>(&self, game: &Game<R>) -> Option<Intent> {
        if game.perk_pending() {
            return Some(Intent::ChoosePerk(self.perk));
        }
        let hero = game.hero();

        match game.scene() {
            Scene::Menu | Scene::Summary(_) => None,
            Scene::Combat => game.session().map(|s| self.combat_intent(hero, s)),
            Scene::BranchChoice => {
                let map = game.map()?;
                let rank = |kind: MidNodeKind| NODE_PREFERENCE.iter().position(|k| *k == kind);
                let branch = if rank(map.option_b.mid_node) < rank(map.option_a.mid_node) {
                    Branch::B
                } else {
                    Branch::A
                };
                Some(Intent::ChooseBranch(branch))
            }
            Scene::Event(kind) => Some(Intent::NodeChoice(event_choice(hero, kind))),
            Scene::Camp => {
                let choice = if (hero.hp as f64) < hero.max_hp as f64 * CAMP_REST_BELOW {
                    NodeChoice::CampRest
                } else {
                    NodeChoice::CampTrain
                };
                Some(Intent::NodeChoice(choice))
            }
            Scene::Merchant => {
                if hero.item.is_some() {
                    return Some(Intent::LeaveMerchant);
                }
                let affordable = ITEM_PREFERENCE
                    .iter()
                    .copied()
                    .find(|item| item.price() <= hero.gold);
                Some(affordable.map_or(Intent::LeaveMerchant, Intent::Purchase))
            }
        }
    }

    fn combat_intent(&self, hero: &Hero, session: &CombatSession) -> Intent {
        if (hero.hp as f64) < hero.max_hp as f64 * self.heal_below {
            return Intent::Hero(HeroAction::Heal);
        }

        let weakest = session
            .living_enemies()
            .min_by_key(|(_, enemy)| enemy.hp)
            .map(|(index, _)| index);
        let Some(index) = session.living_target().or(weakest) else {
            return Intent::Hero(HeroAction::Heal);
        };
        if session.living_target() != Some(index) {
            return Intent::SelectTarget(index);
        }

        let enemy = &session.enemies[index];
        let plain_hit = hero.attack.saturating_sub(enemy.defense);
        if self.use_power && enemy.hp > plain_hit {
            Intent::Hero(HeroAction::Power)
        } else {
            Intent::Hero(HeroAction::Attack)
        }
    }
}

fn event_choice(hero: &Hero, kind: EventKind) -> NodeChoice {
    match kind {
        EventKind::Chest => NodeChoice::OpenChest,
        EventKind::Shrine if hero.gold >= SHRINE_DONATION && hero.missing_hp() > 0 => {
            NodeChoice::Donate
        }
        EventKind::Shrine => NodeChoice::LeaveShrine,
        EventKind::Potion if hero.missing_hp() > 0 => NodeChoice::DrinkPotion,
        EventKind::Potion => NodeChoice::SkipPotion,
    }
}
