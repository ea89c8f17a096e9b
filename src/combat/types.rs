use crate::character::Combatant;
use crate::core::constants::{GOBLIN_SHAMAN_STATS, ORC_WARLORD_STATS};
use crate::core::error::Rejection;
use serde::{Deserialize, Serialize};

/// Boss behavior variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BossKind {
    OrcWarlord,
    GoblinShaman,
}

impl BossKind {
    pub const ALL: [BossKind; 2] = [BossKind::OrcWarlord, BossKind::GoblinShaman];

    pub fn name(self) -> &'static str {
        self.stats().0
    }

    /// (name, max_hp, attack, defense)
    pub fn stats(self) -> (&'static str, u32, u32, u32) {
        match self {
            BossKind::OrcWarlord => ORC_WARLORD_STATS,
            BossKind::GoblinShaman => GOBLIN_SHAMAN_STATS,
        }
    }

    pub fn other(self) -> BossKind {
        match self {
            BossKind::OrcWarlord => BossKind::GoblinShaman,
            BossKind::GoblinShaman => BossKind::OrcWarlord,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub name: String,
    pub max_hp: u32,
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    /// Behavior variant when this enemy is a boss.
    #[serde(default)]
    pub boss: Option<BossKind>,
}

impl Enemy {
    pub fn new(name: impl Into<String>, max_hp: u32, attack: u32, defense: u32) -> Self {
        Self {
            name: name.into(),
            max_hp,
            hp: max_hp,
            attack,
            defense,
            boss: None,
        }
    }

    pub fn boss(kind: BossKind) -> Self {
        let (name, max_hp, attack, defense) = kind.stats();
        Self {
            boss: Some(kind),
            ..Self::new(name, max_hp, attack, defense)
        }
    }
}

impl Combatant for Enemy {
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

/// Which fight a session is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Encounter {
    /// The run's first fight.
    Opening,
    /// The mid-node skirmish.
    Ambush,
    Boss(BossKind),
}

impl Encounter {
    pub fn name(self) -> &'static str {
        match self {
            Encounter::Opening => "Orc Skirmish",
            Encounter::Ambush => "Goblin Ambush",
            Encounter::Boss(kind) => kind.name(),
        }
    }

    pub fn is_boss(self) -> bool {
        matches!(self, Encounter::Boss(_))
    }
}

/// Hero intents available during combat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeroAction {
    Attack,
    Power,
    Heal,
}

impl HeroAction {
    pub fn needs_target(self) -> bool {
        !matches!(self, HeroAction::Heal)
    }
}

/// State of one fight. Enemy order is fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatSession {
    pub encounter: Encounter,
    pub round: u32,
    pub enemies: Vec<Enemy>,
    pub selected_target: Option<usize>,
    pub hover_target: Option<usize>,
    /// Set while a round resolves; hero intents are rejected meanwhile.
    pub turn_locked: bool,
}

impl CombatSession {
    pub fn new(encounter: Encounter, enemies: Vec<Enemy>) -> Self {
        Self {
            encounter,
            round: 1,
            enemies,
            selected_target: None,
            hover_target: None,
            turn_locked: false,
        }
    }

    pub fn is_boss(&self) -> bool {
        self.encounter.is_boss()
    }

    pub fn any_enemy_alive(&self) -> bool {
        self.enemies.iter().any(|e| e.is_alive())
    }

    pub fn living_enemies(&self) -> impl Iterator<Item = (usize, &Enemy)> {
        self.enemies.iter().enumerate().filter(|(_, e)| e.is_alive())
    }

    fn is_living(&self, index: usize) -> bool {
        self.enemies.get(index).is_some_and(|e| e.is_alive())
    }

    /// The selected target if it is still alive.
    pub fn living_target(&self) -> Option<usize> {
        self.selected_target.filter(|i| self.is_living(*i))
    }

    /// Selects a target; only a living enemy may be selected.
    pub fn select_target(&mut self, index: usize) -> Result<&Enemy, Rejection> {
        if !self.is_living(index) {
            return Err(Rejection::InvalidTarget(index));
        }
        self.selected_target = Some(index);
        Ok(&self.enemies[index])
    }

    /// Tracks the pointer; indices outside the roster clear the hover.
    pub fn set_hover(&mut self, index: Option<usize>) {
        self.hover_target = index.filter(|i| *i < self.enemies.len());
    }
}
