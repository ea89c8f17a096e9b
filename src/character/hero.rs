use super::{Combatant, ItemKind, Perk};
use crate::core::constants::*;
use serde::{Deserialize, Serialize};

/// The player character.
///
/// `attack`, `defense` and `max_hp` already include the equipped item's
/// bonuses; [`Hero::equip_item`] keeps them consistent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub name: String,
    pub max_hp: u32,
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub gold: u32,
    pub xp: u32,
    pub level: u32,
    pub crit_chance: f64,
    pub crit_multiplier: f64,
    pub heal_bonus: f64,
    pub perks: Vec<Perk>,
    pub item: Option<ItemKind>,
    /// Rounds of weakness left; 0 means not weakened.
    pub weakness_turns: u32,
}

impl Hero {
    /// Fresh hero at baseline stats.
    pub fn new() -> Self {
        Self {
            name: HERO_NAME.to_string(),
            max_hp: HERO_BASE_HP,
            hp: HERO_BASE_HP,
            attack: HERO_BASE_ATTACK,
            defense: HERO_BASE_DEFENSE,
            gold: 0,
            xp: 0,
            level: 1,
            crit_chance: 0.0,
            crit_multiplier: HERO_CRIT_MULTIPLIER,
            heal_bonus: 0.0,
            perks: Vec::new(),
            item: None,
            weakness_turns: 0,
        }
    }

    pub fn is_weakened(&self) -> bool {
        self.weakness_turns > 0
    }

    pub fn missing_hp(&self) -> u32 {
        self.max_hp.saturating_sub(self.hp)
    }

    /// Swaps the equipped item, fully reverting the previous item's bonuses
    /// first. Removing a HP item clamps `hp` into the smaller range; gaining
    /// one raises `max_hp` only. Returns the item that was replaced.
    pub fn equip_item(&mut self, item: ItemKind) -> Option<ItemKind> {
        let previous = self.unequip();

        let bonuses = item.bonuses();
        self.attack += bonuses.attack;
        self.defense += bonuses.defense;
        self.max_hp += bonuses.max_hp;
        self.hp = self.hp.min(self.max_hp);
        self.item = Some(item);

        previous
    }

    /// Removes the equipped item and its bonuses.
    pub fn unequip(&mut self) -> Option<ItemKind> {
        let previous = self.item.take()?;
        let bonuses = previous.bonuses();
        self.attack = self.attack.saturating_sub(bonuses.attack);
        self.defense = self.defense.saturating_sub(bonuses.defense);
        if bonuses.max_hp > 0 {
            self.max_hp = self.max_hp.saturating_sub(bonuses.max_hp);
            self.hp = self.hp.min(self.max_hp);
        }
        Some(previous)
    }

    /// Applies a perk's modifier and moves the hero to level 2.
    ///
    /// Precondition: the caller fires the level-up transition at most once
    /// per run. A perk the hero already owns is ignored so `perks` never
    /// holds duplicates; returns whether the perk was applied.
    pub fn grant_perk(&mut self, perk: Perk) -> bool {
        if self.perks.contains(&perk) {
            return false;
        }
        let (crit, heal) = perk.modifiers();
        self.crit_chance += crit;
        self.heal_bonus += heal;
        self.perks.push(perk);
        self.level = MAX_LEVEL;
        true
    }

    /// Scales a heal amount by the heal bonus, rounding up.
    pub fn apply_heal_bonus(&self, amount: u32) -> u32 {
        if self.heal_bonus > 0.0 {
            (amount as f64 * (1.0 + self.heal_bonus)).ceil() as u32
        } else {
            amount
        }
    }

    /// Heals by `raw` scaled with the heal bonus, capped at `max_hp`.
    ///
    /// No-op for a destroyed hero. Returns the HP actually restored.
    pub fn heal(&mut self, raw: u32) -> u32 {
        if !self.is_alive() {
            return 0;
        }
        let amount = self.apply_heal_bonus(raw);
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp - before
    }

    /// Deducts gold if the hero can afford it.
    pub fn spend_gold(&mut self, amount: u32) -> bool {
        if self.gold < amount {
            return false;
        }
        self.gold -= amount;
        true
    }

    /// Adds combat rewards.
    pub fn gain_rewards(&mut self, xp: u32, gold: u32) {
        self.xp = self.xp.saturating_add(xp);
        self.gold = self.gold.saturating_add(gold);
    }

    /// True when the single level-up transition is due.
    pub fn level_up_due(&self) -> bool {
        self.level == 1 && self.xp >= LEVEL_UP_XP
    }
}

impl Default for Hero {
    fn default() -> Self {
        Self::new()
    }
}

impl Combatant for Hero {
    fn name(&self) -> &str {
        &self.name
    }

    fn hp(&self) -> u32 {
        self.hp
    }

    fn max_hp(&self) -> u32 {
        self.max_hp
    }

    fn attack(&self) -> u32 {
        self.attack
    }

    fn defense(&self) -> u32 {
        self.defense
    }

    fn take_damage(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_sub(amount);
        before - self.hp
    }
}
