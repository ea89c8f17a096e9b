//! Balance numbers for the encounter loop.
//!
//! Every probability, multiplier, price and roster stat lives here so the
//! engine, the simulator and the tests agree on one set of values.

// Hero baseline
pub const HERO_NAME: &str = "Hero";
pub const HERO_BASE_HP: u32 = 100;
pub const HERO_BASE_ATTACK: u32 = 20;
pub const HERO_BASE_DEFENSE: u32 = 5;
pub const HERO_CRIT_MULTIPLIER: f64 = 1.5;

// Leveling
pub const MAX_LEVEL: u32 = 2;
pub const LEVEL_UP_XP: u32 = 50;
pub const PERK_CRIT_CHANCE: f64 = 0.10;
pub const PERK_HEAL_BONUS: f64 = 0.20;

// Damage roll
pub const DAMAGE_VARIANCE_MIN: i32 = -2;
pub const DAMAGE_VARIANCE_MAX: i32 = 2;
pub const WEAKNESS_MULTIPLIER: f64 = 0.8;
pub const WEAKNESS_DURATION_ROUNDS: u32 = 2;

// Attack profiles: (multiplier, miss chance)
pub const HERO_ATTACK_PROFILE: (f64, f64) = (1.0, 0.0);
pub const HERO_POWER_PROFILE: (f64, f64) = (1.8, 0.35);
pub const ENEMY_ATTACK_PROFILE: (f64, f64) = (1.0, 0.05);
pub const HEAVY_STRIKE_PROFILE: (f64, f64) = (1.5, 0.0);

// Boss behavior
pub const HEAVY_STRIKE_CHANCE: f64 = 0.10;
pub const HEX_ROUND_INTERVAL: u32 = 3;
pub const HEX_CHANCE: f64 = 0.5;

// Hero heal action: max(round(max_hp * fraction), floor)
pub const HEAL_ACTION_FRACTION: f64 = 0.25;
pub const HEAL_ACTION_MIN: u32 = 8;

// Rewards: (xp, gold)
pub const NORMAL_REWARD: (u32, u32) = (20, 15);
pub const BOSS_REWARD: (u32, u32) = (60, 50);

// Event nodes
pub const CHEST_GOLD_CHANCE: f64 = 0.70;
pub const CHEST_GOLD: u32 = 20;
pub const POTION_HEAL_CHANCE: f64 = 0.75;
pub const POTION_HEAL_FRACTION: f64 = 0.20;
pub const TRAP_DAMAGE_FRACTION: f64 = 0.10;
pub const SHRINE_DONATION: u32 = 10;
pub const SHRINE_HEAL_FRACTION: f64 = 0.25;

// Camp node
pub const CAMP_HEAL_FRACTION: f64 = 0.4;
pub const CAMP_ATTACK_BONUS: u32 = 1;

// Merchant items: (attack, defense, max_hp, price)
pub const SWORD_STATS: (u32, u32, u32, u32) = (4, 0, 0, 30);
pub const SHIELD_STATS: (u32, u32, u32, u32) = (0, 3, 0, 30);
pub const LIFE_RING_STATS: (u32, u32, u32, u32) = (0, 0, 20, 40);

// Rosters: (name, max_hp, attack, defense)
pub const OPENING_ROSTER: [(&str, u32, u32, u32); 2] =
    [("Orc Raider", 30, 10, 2), ("Orc Warrior", 60, 15, 4)];
pub const AMBUSH_ROSTER: [(&str, u32, u32, u32); 2] =
    [("Goblin Fighter", 35, 12, 3), ("Goblin Bandit", 40, 14, 2)];
pub const ORC_WARLORD_STATS: (&str, u32, u32, u32) = ("Orc Warlord", 120, 18, 6);
pub const GOBLIN_SHAMAN_STATS: (&str, u32, u32, u32) = ("Goblin Shaman", 100, 16, 4);
