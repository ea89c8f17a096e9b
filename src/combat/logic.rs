use super::types::{BossKind, CombatSession, Encounter, Enemy, HeroAction};
use crate::character::{Combatant, Hero};
use crate::core::constants::*;
use crate::core::error::Rejection;
use crate::core::events::{Action, EventRecord, NarrationLog};
use crate::core::rng::RandomOracle;

/// Base multiplier and miss chance of one kind of attack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackProfile {
    pub multiplier: f64,
    pub miss_chance: f64,
}

impl AttackProfile {
    pub const HERO_ATTACK: Self = Self::from_pair(HERO_ATTACK_PROFILE);
    pub const HERO_POWER: Self = Self::from_pair(HERO_POWER_PROFILE);
    pub const ENEMY_DEFAULT: Self = Self::from_pair(ENEMY_ATTACK_PROFILE);
    pub const HEAVY_STRIKE: Self = Self::from_pair(HEAVY_STRIKE_PROFILE);

    const fn from_pair(pair: (f64, f64)) -> Self {
        Self {
            multiplier: pair.0,
            miss_chance: pair.1,
        }
    }
}

/// Attacker-side modifiers. Only the hero has any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrikerMods {
    pub weakened: bool,
    pub crit_chance: f64,
    pub crit_multiplier: f64,
}

impl StrikerMods {
    pub const NONE: Self = Self {
        weakened: false,
        crit_chance: 0.0,
        crit_multiplier: 1.0,
    };

    pub fn hero(hero: &Hero) -> Self {
        Self {
            weakened: hero.is_weakened(),
            crit_chance: hero.crit_chance,
            crit_multiplier: hero.crit_multiplier,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttackOutcome {
    pub damage: u32,
    pub critical: bool,
    pub missed: bool,
}

impl AttackOutcome {
    const MISS: Self = Self {
        damage: 0,
        critical: false,
        missed: true,
    };
}

/// Damage roll after the miss check.
///
/// `floor((attack + variance) * effective) - defense`, floored at zero, where
/// `effective` is the base multiplier, times 0.8 while weakened, times the
/// crit multiplier on a crit. Draws the crit roll (only when crit chance is
/// positive) before the variance roll.
pub fn roll_damage(
    attack: u32,
    defense: u32,
    multiplier: f64,
    mods: &StrikerMods,
    rng: &mut impl RandomOracle,
) -> (u32, bool) {
    let mut effective = multiplier;
    if mods.weakened {
        effective *= WEAKNESS_MULTIPLIER;
    }

    let mut critical = false;
    if mods.crit_chance > 0.0 && rng.chance(mods.crit_chance) {
        effective *= mods.crit_multiplier;
        critical = true;
    }

    let variance = rng.range_inclusive(DAMAGE_VARIANCE_MIN, DAMAGE_VARIANCE_MAX);
    let raw = ((attack as i64 + variance as i64) as f64 * effective).floor() as i64;
    let damage = (raw - defense as i64).max(0) as u32;

    (damage, critical)
}

/// One attack: miss check, damage roll, HP loss.
///
/// A miss deals exactly zero and skips the damage roll entirely. Dead
/// attackers or defenders produce a miss without consuming randomness.
pub fn resolve_attack<A, D>(
    attacker: &A,
    mods: &StrikerMods,
    defender: &mut D,
    profile: AttackProfile,
    rng: &mut impl RandomOracle,
) -> AttackOutcome
where
    A: Combatant + ?Sized,
    D: Combatant + ?Sized,
{
    if !attacker.is_alive() || !defender.is_alive() {
        return AttackOutcome::MISS;
    }
    if rng.chance(profile.miss_chance) {
        return AttackOutcome::MISS;
    }

    let (damage, critical) = roll_damage(
        attacker.attack(),
        defender.defense(),
        profile.multiplier,
        mods,
        rng,
    );
    defender.take_damage(damage);

    AttackOutcome {
        damage,
        critical,
        missed: false,
    }
}

/// Heal action amount before heal-bonus scaling.
pub fn heal_action_amount(max_hp: u32) -> u32 {
    let scaled = (max_hp as f64 * HEAL_ACTION_FRACTION).round() as u32;
    scaled.max(HEAL_ACTION_MIN)
}

/// (xp, gold) for clearing an encounter.
pub fn combat_reward(encounter: Encounter) -> (u32, u32) {
    if encounter.is_boss() {
        BOSS_REWARD
    } else {
        NORMAL_REWARD
    }
}

/// What an enemy does on its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyMove {
    Strike,
    HeavyStrike,
    /// Default attack that weakens the hero if they survive it.
    Hex,
}

impl EnemyMove {
    pub fn profile(self) -> AttackProfile {
        match self {
            EnemyMove::Strike | EnemyMove::Hex => AttackProfile::ENEMY_DEFAULT,
            EnemyMove::HeavyStrike => AttackProfile::HEAVY_STRIKE,
        }
    }

    fn action(self) -> Action {
        match self {
            EnemyMove::HeavyStrike => Action::HeavyStrike,
            EnemyMove::Strike | EnemyMove::Hex => Action::Attack,
        }
    }
}

/// Boss AI. Regular enemies always strike.
pub fn choose_enemy_move(enemy: &Enemy, round: u32, rng: &mut impl RandomOracle) -> EnemyMove {
    match enemy.boss {
        Some(BossKind::OrcWarlord) => {
            if rng.chance(HEAVY_STRIKE_CHANCE) {
                EnemyMove::HeavyStrike
            } else {
                EnemyMove::Strike
            }
        }
        Some(BossKind::GoblinShaman) if round % HEX_ROUND_INTERVAL == 0 => {
            if rng.chance(HEX_CHANCE) {
                EnemyMove::Hex
            } else {
                EnemyMove::Strike
            }
        }
        Some(BossKind::GoblinShaman) | None => EnemyMove::Strike,
    }
}

fn narrate_attack(
    log: &mut NarrationLog,
    actor: &str,
    action: Action,
    target: &str,
    outcome: AttackOutcome,
) {
    log.push(
        EventRecord::new(actor, action)
            .target(target)
            .amount(outcome.damage)
            .critical(outcome.critical)
            .missed(outcome.missed),
    );
}

/// Every living enemy acts once, in roster order, while the hero lives.
/// Closes the round: weakness ticks down, the round counter advances.
pub fn run_enemy_phase(
    session: &mut CombatSession,
    hero: &mut Hero,
    weakened_at_round_start: bool,
    rng: &mut impl RandomOracle,
    log: &mut NarrationLog,
) {
    let round = session.round;

    for enemy in session.enemies.iter().filter(|e| e.is_alive()) {
        if !hero.is_alive() {
            break;
        }

        let enemy_move = choose_enemy_move(enemy, round, rng);
        tracing::debug!(enemy = %enemy.name, round, ?enemy_move, "enemy turn");
        if enemy_move == EnemyMove::Hex {
            log.push(EventRecord::new(&enemy.name, Action::Hex).target(&hero.name));
        }

        let outcome = resolve_attack(
            enemy,
            &StrikerMods::NONE,
            hero,
            enemy_move.profile(),
            rng,
        );
        narrate_attack(log, &enemy.name, enemy_move.action(), &hero.name, outcome);

        if !hero.is_alive() {
            log.push(EventRecord::new(&hero.name, Action::Defeated));
        } else if enemy_move == EnemyMove::Hex {
            hero.weakness_turns = WEAKNESS_DURATION_ROUNDS;
            log.push(
                EventRecord::new(&enemy.name, Action::WeaknessApplied)
                    .target(&hero.name)
                    .amount(WEAKNESS_DURATION_ROUNDS),
            );
        }
    }

    if weakened_at_round_start && hero.weakness_turns > 0 {
        hero.weakness_turns -= 1;
        if hero.weakness_turns == 0 {
            log.push(EventRecord::new(&hero.name, Action::WeaknessExpired));
        }
    }

    log.push(EventRecord::new(&hero.name, Action::RoundEnded).amount(round));
    session.round += 1;
}

/// How a resolved round left the fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Continue,
    Victory,
    Defeat,
}

/// End-of-combat check: defeat wins ties.
pub fn check_combat_end(session: &CombatSession, hero: &Hero) -> Option<RoundOutcome> {
    if !hero.is_alive() {
        Some(RoundOutcome::Defeat)
    } else if !session.any_enemy_alive() {
        Some(RoundOutcome::Victory)
    } else {
        None
    }
}

/// Resolves one hero intent and, if the fight goes on, the enemy phase.
///
/// Rejected intents leave every field untouched.
pub fn resolve_round(
    session: &mut CombatSession,
    hero: &mut Hero,
    action: HeroAction,
    rng: &mut impl RandomOracle,
    log: &mut NarrationLog,
) -> Result<RoundOutcome, Rejection> {
    if session.turn_locked {
        return Err(Rejection::TurnLocked);
    }
    if !hero.is_alive() {
        return Err(Rejection::HeroDown);
    }
    let target = if action.needs_target() {
        Some(session.living_target().ok_or(Rejection::NoTarget)?)
    } else {
        None
    };

    session.turn_locked = true;
    let weakened_at_round_start = hero.is_weakened();
    tracing::debug!(?action, round = session.round, "hero turn");

    match (action, target) {
        (HeroAction::Attack | HeroAction::Power, Some(index)) => {
            let (profile, narrated) = if action == HeroAction::Power {
                (AttackProfile::HERO_POWER, Action::PowerAttack)
            } else {
                (AttackProfile::HERO_ATTACK, Action::Attack)
            };
            let mods = StrikerMods::hero(hero);
            let enemy = &mut session.enemies[index];
            let outcome = resolve_attack(&*hero, &mods, enemy, profile, rng);
            narrate_attack(log, &hero.name, narrated, &enemy.name, outcome);
            if !enemy.is_alive() {
                log.push(EventRecord::new(&enemy.name, Action::Defeated));
            }
        }
        _ => {
            let healed = hero.heal(heal_action_amount(hero.max_hp));
            log.push(EventRecord::new(&hero.name, Action::Heal).amount(healed));
        }
    }

    let outcome = match check_combat_end(session, hero) {
        Some(end) => end,
        None => {
            run_enemy_phase(session, hero, weakened_at_round_start, rng, log);
            check_combat_end(session, hero).unwrap_or(RoundOutcome::Continue)
        }
    };

    session.turn_locked = false;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::ScriptedOracle;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn session_with(enemies: Vec<Enemy>) -> CombatSession {
        let mut session = CombatSession::new(Encounter::Opening, enemies);
        session.select_target(0).unwrap();
        session
    }

    #[test]
    fn test_hero_attack_pinned_variance() {
        // 20 attack, variance 0, no crit, defense 3 -> 17
        let hero = Hero::new();
        let mut enemy = Enemy::new("Dummy", 100, 0, 3);
        let mut rng = ScriptedOracle::neutral();
        let outcome = resolve_attack(
            &hero,
            &StrikerMods::hero(&hero),
            &mut enemy,
            AttackProfile::HERO_ATTACK,
            &mut rng,
        );
        assert_eq!(outcome.damage, 17);
        assert!(!outcome.missed);
        assert!(!outcome.critical);
        assert_eq!(enemy.hp, 83);
    }

    #[test]
    fn test_miss_deals_zero_without_damage_roll() {
        let hero = Hero::new();
        let mut enemy = Enemy::new("Dummy", 100, 0, 0);
        // 0.1 < 0.35 power miss chance; the int queue must stay untouched
        let mut rng = ScriptedOracle::constant(0.1, 0).with_ints([2]);
        let outcome = resolve_attack(
            &hero,
            &StrikerMods::hero(&hero),
            &mut enemy,
            AttackProfile::HERO_POWER,
            &mut rng,
        );
        assert!(outcome.missed);
        assert_eq!(outcome.damage, 0);
        assert_eq!(enemy.hp, 100);
        assert_eq!(rng.range_inclusive(-2, 2), 2);
    }

    #[test]
    fn test_zero_damage_hit_is_not_a_miss() {
        let weakling = Enemy::new("Rat", 10, 3, 0);
        let mut hero = Hero::new();
        let mut rng = ScriptedOracle::neutral();
        let outcome = resolve_attack(
            &weakling,
            &StrikerMods::NONE,
            &mut hero,
            AttackProfile::ENEMY_DEFAULT,
            &mut rng,
        );
        assert!(!outcome.missed);
        assert_eq!(outcome.damage, 0);
    }

    #[test]
    fn test_power_attack_multiplier() {
        // floor(20 * 1.8) - 0 = 36
        let (damage, _) = roll_damage(
            20,
            0,
            1.8,
            &StrikerMods::NONE,
            &mut ScriptedOracle::neutral(),
        );
        assert_eq!(damage, 36);
    }

    #[test]
    fn test_weakness_scales_by_point_eight() {
        let mods = StrikerMods {
            weakened: true,
            ..StrikerMods::NONE
        };
        for variance in -2..=2 {
            let mut rng = ScriptedOracle::constant(0.999, variance);
            let (weak, _) = roll_damage(20, 0, 1.0, &mods, &mut rng);
            let expected = ((20 + variance) as f64 * 0.8).floor() as u32;
            assert_eq!(weak, expected);
        }
    }

    #[test]
    fn test_weakened_damage_bounds_over_many_rolls() {
        let mods = StrikerMods {
            weakened: true,
            ..StrikerMods::NONE
        };
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        for _ in 0..500 {
            let (damage, critical) = roll_damage(20, 3, 1.0, &mods, &mut rng);
            assert!(!critical);
            // floor(18 * 0.8) - 3 = 11 .. floor(22 * 0.8) - 3 = 14
            assert!((11..=14).contains(&damage), "damage {damage}");
        }
    }

    #[test]
    fn test_crit_applies_multiplier() {
        let mods = StrikerMods {
            weakened: false,
            crit_chance: 0.10,
            crit_multiplier: 1.5,
        };
        // crit roll 0.05 < 0.10
        let mut rng = ScriptedOracle::constant(0.999, 0).with_units([0.05]);
        let (damage, critical) = roll_damage(20, 0, 1.0, &mods, &mut rng);
        assert!(critical);
        assert_eq!(damage, 30);
    }

    #[test]
    fn test_no_crit_roll_without_crit_chance() {
        let mut rng = ScriptedOracle::constant(0.999, 0).with_units([0.0]);
        let (_, critical) = roll_damage(20, 0, 1.0, &StrikerMods::NONE, &mut rng);
        assert!(!critical);
        assert_eq!(rng.pending_units(), 1);
    }

    #[test]
    fn test_heal_action_amount() {
        assert_eq!(heal_action_amount(100), 25);
        assert_eq!(heal_action_amount(120), 30);
        assert_eq!(heal_action_amount(20), 8);
        assert_eq!(heal_action_amount(30), 8);
        // 0.25 * 34 = 8.5 rounds half up
        assert_eq!(heal_action_amount(34), 9);
    }

    #[test]
    fn test_rewards() {
        assert_eq!(combat_reward(Encounter::Opening), (20, 15));
        assert_eq!(combat_reward(Encounter::Ambush), (20, 15));
        assert_eq!(combat_reward(Encounter::Boss(BossKind::OrcWarlord)), (60, 50));
    }

    #[test]
    fn test_warlord_heavy_strike_forced() {
        let warlord = Enemy::boss(BossKind::OrcWarlord);
        let mut rng = ScriptedOracle::constant(0.999, 0).with_units([0.05]);
        let chosen = choose_enemy_move(&warlord, 1, &mut rng);
        assert_eq!(chosen, EnemyMove::HeavyStrike);
        assert_eq!(chosen.profile().multiplier, 1.5);
        assert_eq!(chosen.profile().miss_chance, 0.0);

        let mut rng = ScriptedOracle::constant(0.5, 0);
        assert_eq!(choose_enemy_move(&warlord, 1, &mut rng), EnemyMove::Strike);
    }

    #[test]
    fn test_heavy_strike_never_misses() {
        // miss roll 0.0 would miss a default attack but not a heavy strike
        let warlord = Enemy::boss(BossKind::OrcWarlord);
        let mut hero = Hero::new();
        let mut rng = ScriptedOracle::constant(0.0, 0);
        let outcome = resolve_attack(
            &warlord,
            &StrikerMods::NONE,
            &mut hero,
            AttackProfile::HEAVY_STRIKE,
            &mut rng,
        );
        assert!(!outcome.missed);
        // floor(18 * 1.5) - 5 = 22
        assert_eq!(outcome.damage, 22);
    }

    #[test]
    fn test_shaman_hex_only_on_third_rounds() {
        let shaman = Enemy::boss(BossKind::GoblinShaman);
        for round in 1..=12 {
            let mut rng = ScriptedOracle::constant(0.0, 0);
            let chosen = choose_enemy_move(&shaman, round, &mut rng);
            if round % 3 == 0 {
                assert_eq!(chosen, EnemyMove::Hex, "round {round}");
            } else {
                assert_eq!(chosen, EnemyMove::Strike, "round {round}");
            }
        }
    }

    #[test]
    fn test_round_requires_target() {
        let mut session = CombatSession::new(
            Encounter::Opening,
            vec![Enemy::new("Orc Raider", 30, 10, 2)],
        );
        let mut hero = Hero::new();
        let mut log = NarrationLog::new();
        let before = (session.clone(), hero.clone());

        let result = resolve_round(
            &mut session,
            &mut hero,
            HeroAction::Attack,
            &mut ScriptedOracle::neutral(),
            &mut log,
        );
        assert_eq!(result, Err(Rejection::NoTarget));
        assert_eq!((session, hero), before);
        assert!(log.is_empty());
    }

    #[test]
    fn test_round_rejected_while_locked() {
        let mut session = session_with(vec![Enemy::new("Orc Raider", 30, 10, 2)]);
        session.turn_locked = true;
        let mut hero = Hero::new();
        let result = resolve_round(
            &mut session,
            &mut hero,
            HeroAction::Heal,
            &mut ScriptedOracle::neutral(),
            &mut NarrationLog::new(),
        );
        assert_eq!(result, Err(Rejection::TurnLocked));
        assert_eq!(session.round, 1);
    }

    #[test]
    fn test_full_round_advances_and_unlocks() {
        let mut session = session_with(vec![
            Enemy::new("Orc Raider", 30, 10, 2),
            Enemy::new("Orc Warrior", 60, 15, 4),
        ]);
        let mut hero = Hero::new();
        let mut log = NarrationLog::new();
        let outcome = resolve_round(
            &mut session,
            &mut hero,
            HeroAction::Attack,
            &mut ScriptedOracle::neutral(),
            &mut log,
        )
        .unwrap();

        assert_eq!(outcome, RoundOutcome::Continue);
        assert_eq!(session.enemies[0].hp, 12); // 30 - 18
        assert_eq!(hero.hp, 100 - 5 - 10); // raider 10-5, warrior 15-5
        assert_eq!(session.round, 2);
        assert!(!session.turn_locked);
    }

    #[test]
    fn test_killing_last_enemy_skips_enemy_phase() {
        let mut session = session_with(vec![Enemy::new("Orc Raider", 10, 10, 0)]);
        let mut hero = Hero::new();
        let outcome = resolve_round(
            &mut session,
            &mut hero,
            HeroAction::Attack,
            &mut ScriptedOracle::neutral(),
            &mut NarrationLog::new(),
        )
        .unwrap();
        assert_eq!(outcome, RoundOutcome::Victory);
        assert_eq!(hero.hp, 100);
        assert_eq!(session.round, 1);
    }

    #[test]
    fn test_dead_enemies_do_not_act() {
        let mut session = session_with(vec![
            Enemy::new("Orc Raider", 30, 10, 2),
            Enemy::new("Orc Warrior", 60, 15, 4),
        ]);
        session.enemies[1].hp = 0;
        let mut hero = Hero::new();
        resolve_round(
            &mut session,
            &mut hero,
            HeroAction::Heal,
            &mut ScriptedOracle::neutral(),
            &mut NarrationLog::new(),
        )
        .unwrap();
        assert_eq!(hero.hp, 95);
    }

    #[test]
    fn test_enemy_phase_stops_when_hero_falls() {
        let mut session = session_with(vec![
            Enemy::new("Brute", 50, 45, 0),
            Enemy::new("Brute", 50, 45, 0),
        ]);
        let mut hero = Hero::new();
        hero.hp = 10;
        let mut log = NarrationLog::new();
        let outcome = resolve_round(
            &mut session,
            &mut hero,
            HeroAction::Heal,
            &mut ScriptedOracle::neutral(),
            &mut log,
        )
        .unwrap();
        assert_eq!(outcome, RoundOutcome::Defeat);
        assert_eq!(hero.hp, 0);
        let enemy_attacks = log
            .entries()
            .iter()
            .filter(|r| r.action == Action::Attack)
            .count();
        assert_eq!(enemy_attacks, 1);
    }

    #[test]
    fn test_missed_hex_still_weakens() {
        let mut session = CombatSession::new(
            Encounter::Boss(BossKind::GoblinShaman),
            vec![Enemy::boss(BossKind::GoblinShaman)],
        );
        session.select_target(0).unwrap();
        session.round = 3;
        let mut hero = Hero::new();
        let mut log = NarrationLog::new();

        // hero hits, hex roll 0.1 < 0.5, hex miss roll 0.01 < 0.05
        let mut rng = ScriptedOracle::constant(0.999, 0).with_units([0.999, 0.1, 0.01]);
        resolve_round(&mut session, &mut hero, HeroAction::Attack, &mut rng, &mut log).unwrap();

        assert_eq!(hero.hp, 100);
        assert_eq!(hero.weakness_turns, 2);
        assert!(log
            .entries()
            .iter()
            .any(|r| r.action == Action::Attack && r.missed));
        assert!(log
            .entries()
            .iter()
            .any(|r| r.action == Action::WeaknessApplied));
    }

    #[test]
    fn test_hex_weakens_and_counts_down() {
        let mut session = CombatSession::new(
            Encounter::Boss(BossKind::GoblinShaman),
            vec![Enemy::boss(BossKind::GoblinShaman)],
        );
        session.select_target(0).unwrap();
        session.round = 3;
        let mut hero = Hero::new();
        let mut log = NarrationLog::new();

        // hex roll 0.1 < 0.5, then the attack's miss roll 0.999
        let mut rng = ScriptedOracle::constant(0.999, 0).with_units([0.999, 0.1]);
        resolve_round(&mut session, &mut hero, HeroAction::Attack, &mut rng, &mut log).unwrap();

        // applied this round, so no decrement yet
        assert_eq!(hero.weakness_turns, 2);
        assert!(log
            .entries()
            .iter()
            .any(|r| r.action == Action::WeaknessApplied));

        resolve_round(&mut session, &mut hero, HeroAction::Heal, &mut rng, &mut log).unwrap();
        assert_eq!(hero.weakness_turns, 1);
        resolve_round(&mut session, &mut hero, HeroAction::Heal, &mut rng, &mut log).unwrap();
        assert_eq!(hero.weakness_turns, 0);
        assert_eq!(
            log.entries()
                .iter()
                .filter(|r| r.action == Action::WeaknessExpired)
                .count(),
            1
        );
    }
}
