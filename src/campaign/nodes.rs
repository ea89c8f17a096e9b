//! Outcomes of the non-combat mid-nodes: events, camp and merchant.

use super::types::NodeChoice;
use crate::character::{Combatant, Hero, ItemKind};
use crate::core::constants::*;
use crate::core::error::Rejection;
use crate::core::events::{Action, EventRecord, NarrationLog};
use crate::core::rng::RandomOracle;

/// Trap and poison damage: 10% of max HP rounded up, at least 1.
pub fn trap_damage(max_hp: u32) -> u32 {
    ((max_hp as f64 * TRAP_DAMAGE_FRACTION).ceil() as u32).max(1)
}

/// A fraction of missing HP rounded down, at least 1 when anything is missing.
pub fn missing_hp_heal(missing: u32, fraction: f64) -> u32 {
    let heal = (missing as f64 * fraction).floor() as u32;
    if heal < 1 && missing > 0 {
        1
    } else {
        heal
    }
}

/// Potion heal before heal-bonus scaling: 20% of max HP rounded up.
pub fn potion_heal(max_hp: u32) -> u32 {
    (max_hp as f64 * POTION_HEAL_FRACTION).ceil() as u32
}

fn heal_hero(hero: &mut Hero, raw: u32, log: &mut NarrationLog) {
    let healed = hero.heal(raw);
    log.push(EventRecord::new(&hero.name, Action::Heal).amount(healed));
}

fn hurt_hero(hero: &mut Hero, amount: u32, source: &str, log: &mut NarrationLog) {
    hero.take_damage(amount);
    log.push(
        EventRecord::new(&hero.name, Action::TrapDamage)
            .target(source)
            .amount(amount),
    );
    if !hero.is_alive() {
        log.push(EventRecord::new(&hero.name, Action::Defeated));
    }
}

/// Applies an Event or Camp choice to the hero.
///
/// Only a Shrine donation without enough gold is rejected; every other
/// choice succeeds and ends its node.
pub fn resolve_node_choice(
    hero: &mut Hero,
    choice: NodeChoice,
    rng: &mut impl RandomOracle,
    log: &mut NarrationLog,
) -> Result<(), Rejection> {
    if choice == NodeChoice::Donate && hero.gold < SHRINE_DONATION {
        return Err(Rejection::InsufficientGold {
            needed: SHRINE_DONATION,
            have: hero.gold,
        });
    }

    log.push(EventRecord::new(&hero.name, Action::NodeChoice(choice)));

    match choice {
        NodeChoice::OpenChest => {
            if rng.chance(CHEST_GOLD_CHANCE) {
                hero.gold += CHEST_GOLD;
                log.push(EventRecord::new(&hero.name, Action::GoldFound).amount(CHEST_GOLD));
            } else {
                hurt_hero(hero, trap_damage(hero.max_hp), "a chest trap", log);
            }
        }
        NodeChoice::DrinkPotion => {
            if rng.chance(POTION_HEAL_CHANCE) {
                heal_hero(hero, potion_heal(hero.max_hp), log);
            } else {
                hurt_hero(hero, trap_damage(hero.max_hp), "poison", log);
            }
        }
        NodeChoice::Donate => {
            hero.spend_gold(SHRINE_DONATION);
            log.push(
                EventRecord::new(&hero.name, Action::GoldSpent)
                    .target("the shrine")
                    .amount(SHRINE_DONATION),
            );
            let raw = missing_hp_heal(hero.missing_hp(), SHRINE_HEAL_FRACTION);
            heal_hero(hero, raw, log);
        }
        NodeChoice::CampRest => {
            let raw = missing_hp_heal(hero.missing_hp(), CAMP_HEAL_FRACTION);
            heal_hero(hero, raw, log);
        }
        NodeChoice::CampTrain => {
            hero.attack += CAMP_ATTACK_BONUS;
            log.push(
                EventRecord::new(&hero.name, Action::AttackTrained).amount(CAMP_ATTACK_BONUS),
            );
        }
        NodeChoice::SkipChest | NodeChoice::LeaveShrine | NodeChoice::SkipPotion => {}
    }

    Ok(())
}

/// Buys and equips a merchant item, replacing whatever was equipped.
pub fn purchase(hero: &mut Hero, item: ItemKind, log: &mut NarrationLog) -> Result<(), Rejection> {
    let price = item.price();
    if !hero.spend_gold(price) {
        return Err(Rejection::InsufficientGold {
            needed: price,
            have: hero.gold,
        });
    }
    hero.equip_item(item);
    log.push(EventRecord::new(&hero.name, Action::ItemPurchased(item)).amount(price));
    log.push(EventRecord::new(&hero.name, Action::ItemEquipped(item)));
    Ok(())
}
