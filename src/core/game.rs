//! The game session: owns every piece of run state and accepts intents.
//!
//! Front ends never mutate state directly. They call one intent at a time,
//! then read [`Game::snapshot`] and the narration log. An intent that is not
//! valid in the current scene is rejected with a [`Rejection`], appended to the
//! log as a warning, and changes nothing else.

use super::error::Rejection;
use super::events::{Action, EventRecord, NarrationLog};
use super::rng::RandomOracle;
use super::snapshot::{RunSummary, Snapshot, UnitView};
use crate::campaign::{
    build_map, enemies_for, nodes, roll_event, Branch, CampaignMap, MidNodeKind, NodeChoice,
    Outcome, Scene,
};
use crate::character::{Combatant, Hero, ItemKind, Perk};
use crate::combat::{combat_reward, resolve_round, CombatSession, Encounter, HeroAction, RoundOutcome};

pub struct Game<R: RandomOracle> {
    rng: R,
    scene: Scene,
    hero: Hero,
    /// Current fight, kept after the run ends so the summary can show it.
    session: Option<CombatSession>,
    map: Option<CampaignMap>,
    wins: u32,
    start_ts: i64,
    perk_offered: bool,
    perk_pending: bool,
    log: NarrationLog,
}

impl<R: RandomOracle> Game<R> {
    /// A session sitting at the menu; call [`Game::start_new_run`] to play.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            scene: Scene::Menu,
            hero: Hero::new(),
            session: None,
            map: None,
            wins: 0,
            start_ts: 0,
            perk_offered: false,
            perk_pending: false,
            log: NarrationLog::new(),
        }
    }

    // ── Accessors ──────────────────────────────────────────────────

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn hero(&self) -> &Hero {
        &self.hero
    }

    pub fn session(&self) -> Option<&CombatSession> {
        self.session.as_ref()
    }

    pub fn map(&self) -> Option<&CampaignMap> {
        self.map.as_ref()
    }

    pub fn log(&self) -> &NarrationLog {
        &self.log
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn start_ts(&self) -> i64 {
        self.start_ts
    }

    pub fn perk_pending(&self) -> bool {
        self.perk_pending
    }

    pub fn snapshot(&self) -> Snapshot {
        let session = self.session.as_ref();
        Snapshot {
            scene: self.scene,
            hero: self.hero.clone(),
            enemies: session
                .map(|s| s.enemies.iter().map(UnitView::from).collect())
                .unwrap_or_default(),
            encounter: session.map(|s| s.encounter),
            round: session.map_or(0, |s| s.round),
            turn_locked: session.is_some_and(|s| s.turn_locked),
            selected_target: session.and_then(|s| s.selected_target),
            hover_target: session.and_then(|s| s.hover_target),
            map: self.map.clone(),
            wins: self.wins,
            start_ts: self.start_ts,
            perk_pending: self.perk_pending,
        }
    }

    /// End-of-run report; `None` until the run reaches its summary.
    pub fn summary(&self, now: i64) -> Option<RunSummary> {
        let Scene::Summary(outcome) = self.scene else {
            return None;
        };
        let chosen = self.map.as_ref().and_then(CampaignMap::chosen);
        Some(RunSummary {
            outcome,
            elapsed_secs: now.saturating_sub(self.start_ts).max(0) as u64,
            branch: self.map.as_ref().and_then(CampaignMap::branch),
            boss: chosen.map(|option| option.boss),
            level: self.hero.level,
            xp: self.hero.xp,
            gold: self.hero.gold,
            perks: self.hero.perks.clone(),
            item: self.hero.item,
        })
    }

    // ── Intents ────────────────────────────────────────────────────

    /// Resets hero, map, session, win counter and log, then opens the first
    /// fight. Accepted from any scene.
    pub fn start_new_run(&mut self, now: i64) {
        self.hero = Hero::new();
        self.session = None;
        self.map = None;
        self.wins = 0;
        self.start_ts = now;
        self.perk_offered = false;
        self.perk_pending = false;
        self.log.reset();

        tracing::info!(start_ts = now, "run started");
        self.log
            .push(EventRecord::new(&self.hero.name, Action::RunStarted));
        self.start_combat(Encounter::Opening);
    }

    /// Selects a living enemy as the target for attack intents.
    pub fn select_target(&mut self, index: usize) -> Result<(), Rejection> {
        let result = self.try_select_target(index);
        self.checked(result)
    }

    /// Tracks which enemy the pointer is over. Ignored outside combat.
    pub fn set_hover(&mut self, index: Option<usize>) {
        if self.scene != Scene::Combat {
            return;
        }
        if let Some(session) = self.session.as_mut() {
            session.set_hover(index);
        }
    }

    /// Resolves a hero action and, if the fight goes on, the enemy phase.
    pub fn perform_hero_action(&mut self, action: HeroAction) -> Result<RoundOutcome, Rejection> {
        let result = self.try_hero_action(action);
        self.checked(result)
    }

    /// Commits a branch of the map and enters its mid-node.
    pub fn choose_branch(&mut self, branch: Branch) -> Result<(), Rejection> {
        let result = self.try_choose_branch(branch);
        self.checked(result)
    }

    /// Resolves an Event or Camp choice; the node then leads to its boss.
    pub fn choose_mid_node_outcome(&mut self, choice: NodeChoice) -> Result<(), Rejection> {
        let result = self.try_node_choice(choice);
        self.checked(result)
    }

    /// Buys an item from the merchant. The merchant stays open.
    pub fn purchase(&mut self, item: ItemKind) -> Result<(), Rejection> {
        let result = self.try_purchase(item);
        self.checked(result)
    }

    /// Leaves the merchant for the boss fight.
    pub fn continue_from_merchant(&mut self) -> Result<(), Rejection> {
        let result = self.require_scene(Scene::Merchant);
        self.checked(result)?;
        self.advance_to_boss();
        Ok(())
    }

    /// Takes the pending level-up perk.
    pub fn choose_perk(&mut self, perk: Perk) -> Result<(), Rejection> {
        if !self.perk_pending {
            return self.checked(Err(Rejection::NoPerkPending));
        }
        self.perk_pending = false;
        self.hero.grant_perk(perk);
        tracing::debug!(?perk, "perk chosen");
        self.log
            .push(EventRecord::new(&self.hero.name, Action::PerkGained(perk)));
        Ok(())
    }

    // ── Intent bodies ──────────────────────────────────────────────

    fn try_select_target(&mut self, index: usize) -> Result<(), Rejection> {
        let session = self.combat_session()?;
        let name = session.select_target(index)?.name.clone();
        self.log.push(
            EventRecord::new(&self.hero.name, Action::TargetSelected).target(name),
        );
        Ok(())
    }

    fn try_hero_action(&mut self, action: HeroAction) -> Result<RoundOutcome, Rejection> {
        self.require_run()?;
        let session = match (self.scene, self.session.as_mut()) {
            (Scene::Combat, Some(session)) => session,
            _ => return Err(Rejection::NotInCombat),
        };
        let outcome = resolve_round(session, &mut self.hero, action, &mut self.rng, &mut self.log)?;

        match outcome {
            RoundOutcome::Continue => {}
            RoundOutcome::Victory => self.on_combat_victory(),
            RoundOutcome::Defeat => self.end_run(Outcome::Defeat),
        }
        Ok(outcome)
    }

    fn try_choose_branch(&mut self, branch: Branch) -> Result<(), Rejection> {
        self.require_scene(Scene::BranchChoice)?;
        let map = self.map.as_mut().ok_or(Rejection::WrongScene)?;
        if !map.commit(branch) {
            return Err(Rejection::WrongScene);
        }
        let option = map.option(branch);

        tracing::debug!(%branch, ?option, "branch committed");
        self.log
            .push(EventRecord::new(&self.hero.name, Action::BranchChosen(branch)));
        self.enter_mid_node(option.mid_node);
        Ok(())
    }

    fn try_node_choice(&mut self, choice: NodeChoice) -> Result<(), Rejection> {
        self.require_run()?;
        if !self.scene.accepts(choice) {
            return Err(Rejection::WrongScene);
        }
        nodes::resolve_node_choice(&mut self.hero, choice, &mut self.rng, &mut self.log)?;

        if self.hero.is_alive() {
            self.advance_to_boss();
        } else {
            self.end_run(Outcome::Defeat);
        }
        Ok(())
    }

    fn try_purchase(&mut self, item: ItemKind) -> Result<(), Rejection> {
        self.require_scene(Scene::Merchant)?;
        nodes::purchase(&mut self.hero, item, &mut self.log)?;
        tracing::debug!(?item, gold = self.hero.gold, "item purchased");
        Ok(())
    }

    // ── Transitions ────────────────────────────────────────────────

    fn start_combat(&mut self, encounter: Encounter) {
        tracing::debug!(?encounter, "combat started");
        self.session = Some(CombatSession::new(encounter, enemies_for(encounter)));
        self.scene = Scene::Combat;
        self.log.push(
            EventRecord::new(&self.hero.name, Action::CombatStarted).target(encounter.name()),
        );
    }

    fn on_combat_victory(&mut self) {
        let Some(encounter) = self.session.as_ref().map(|s| s.encounter) else {
            return;
        };

        let (xp, gold) = combat_reward(encounter);
        self.hero.gain_rewards(xp, gold);
        self.log
            .push(EventRecord::new(&self.hero.name, Action::Reward { xp, gold }));

        if !self.perk_offered && self.hero.level_up_due() {
            self.perk_offered = true;
            self.perk_pending = true;
            tracing::debug!(xp = self.hero.xp, "level-up perk offered");
            self.log
                .push(EventRecord::new(&self.hero.name, Action::LevelUp));
        }

        if encounter.is_boss() {
            self.wins += 1;
            self.end_run(Outcome::Victory);
        } else {
            self.advance_to_boss();
        }
    }

    /// Boss of the committed branch, or the branch choice when no branch
    /// has been committed yet.
    fn advance_to_boss(&mut self) {
        match self.map.as_ref().and_then(CampaignMap::chosen) {
            Some(option) => self.start_combat(Encounter::Boss(option.boss)),
            None => self.open_branch_choice(),
        }
    }

    fn open_branch_choice(&mut self) {
        if self.map.is_none() {
            let map = build_map(&mut self.rng);
            tracing::debug!(?map, "map built");
            self.map = Some(map);
        }
        self.session = None;
        self.scene = Scene::BranchChoice;
    }

    fn enter_mid_node(&mut self, kind: MidNodeKind) {
        self.log
            .push(EventRecord::new(&self.hero.name, Action::NodeEntered(kind)));
        self.session = None;
        match kind {
            MidNodeKind::Event => {
                let event = roll_event(&mut self.rng);
                self.log
                    .push(EventRecord::new(&self.hero.name, Action::EventFound(event)));
                self.scene = Scene::Event(event);
            }
            MidNodeKind::Camp => self.scene = Scene::Camp,
            MidNodeKind::Merchant => self.scene = Scene::Merchant,
            MidNodeKind::Combat => self.start_combat(Encounter::Ambush),
        }
    }

    fn end_run(&mut self, outcome: Outcome) {
        tracing::info!(%outcome, wins = self.wins, level = self.hero.level, "run ended");
        self.scene = Scene::Summary(outcome);
        self.log
            .push(EventRecord::new(&self.hero.name, Action::RunEnded(outcome)));
    }

    // ── Guards ─────────────────────────────────────────────────────

    fn require_run(&self) -> Result<(), Rejection> {
        if self.scene == Scene::Menu {
            Err(Rejection::NoActiveRun)
        } else {
            Ok(())
        }
    }

    fn require_scene(&self, scene: Scene) -> Result<(), Rejection> {
        self.require_run()?;
        if self.scene == scene {
            Ok(())
        } else {
            Err(Rejection::WrongScene)
        }
    }

    fn combat_session(&mut self) -> Result<&mut CombatSession, Rejection> {
        self.require_run()?;
        match (self.scene, self.session.as_mut()) {
            (Scene::Combat, Some(session)) => Ok(session),
            _ => Err(Rejection::NotInCombat),
        }
    }

    /// Mirrors a rejection into the narration log.
    fn checked<T>(&mut self, result: Result<T, Rejection>) -> Result<T, Rejection> {
        if let Err(rejection) = &result {
            tracing::debug!(%rejection, scene = self.scene.tag(), "intent rejected");
            self.log.warn(&self.hero.name, *rejection);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::{BranchOption, EventKind};
    use crate::combat::BossKind;
    use crate::core::rng::ScriptedOracle;

    fn started(rng: ScriptedOracle) -> Game<ScriptedOracle> {
        let mut game = Game::new(rng);
        game.start_new_run(1_000);
        game
    }

    /// Kills every enemy of the current fight outright.
    fn clear_enemies(game: &mut Game<ScriptedOracle>) {
        if let Some(session) = game.session.as_mut() {
            for enemy in &mut session.enemies {
                enemy.hp = 1;
            }
        }
        game.select_target(0).unwrap();
        loop {
            let target = game.session().and_then(|s| s.living_target());
            if target.is_none() {
                let next = game
                    .session()
                    .and_then(|s| s.living_enemies().next().map(|(i, _)| i));
                match next {
                    Some(i) => game.select_target(i).unwrap(),
                    None => break,
                }
            }
            if game.perform_hero_action(HeroAction::Attack).unwrap() != RoundOutcome::Continue {
                break;
            }
        }
    }

    fn fixed_map(mid_a: MidNodeKind, boss_a: BossKind) -> CampaignMap {
        CampaignMap::new(
            BranchOption {
                mid_node: mid_a,
                boss: boss_a,
            },
            BranchOption {
                mid_node: MidNodeKind::Camp,
                boss: boss_a.other(),
            },
        )
    }

    #[test]
    fn test_new_game_sits_at_menu() {
        let mut game = Game::new(ScriptedOracle::neutral());
        assert_eq!(game.scene(), Scene::Menu);
        assert_eq!(
            game.perform_hero_action(HeroAction::Heal),
            Err(Rejection::NoActiveRun)
        );
        assert_eq!(game.choose_branch(Branch::A), Err(Rejection::NoActiveRun));
        assert!(game.log().last().is_some_and(EventRecord::is_warning));
    }

    #[test]
    fn test_start_new_run_opens_combat() {
        let game = started(ScriptedOracle::neutral());
        assert_eq!(game.scene(), Scene::Combat);
        let snapshot = game.snapshot();
        assert_eq!(snapshot.enemies.len(), 2);
        assert_eq!(snapshot.round, 1);
        assert_eq!(snapshot.selected_target, None);
        assert_eq!(snapshot.encounter, Some(Encounter::Opening));
        assert_eq!(snapshot.start_ts, 1_000);
    }

    #[test]
    fn test_attack_without_target_is_rejected() {
        let mut game = started(ScriptedOracle::neutral());
        let before = game.snapshot();
        assert_eq!(
            game.perform_hero_action(HeroAction::Attack),
            Err(Rejection::NoTarget)
        );
        let after = game.snapshot();
        assert_eq!(before, after);
        assert_eq!(
            game.log().last().map(|r| r.action),
            Some(Action::Warning(Rejection::NoTarget))
        );
    }

    #[test]
    fn test_select_dead_target_rejected() {
        let mut game = started(ScriptedOracle::neutral());
        game.session.as_mut().unwrap().enemies[0].hp = 0;
        assert_eq!(game.select_target(0), Err(Rejection::InvalidTarget(0)));
        assert_eq!(game.select_target(7), Err(Rejection::InvalidTarget(7)));
        assert!(game.select_target(1).is_ok());
        assert_eq!(game.snapshot().selected_target, Some(1));
    }

    #[test]
    fn test_hover_ignored_outside_combat() {
        let mut game = started(ScriptedOracle::neutral());
        game.set_hover(Some(1));
        assert_eq!(game.snapshot().hover_target, Some(1));
        let logged = game.log().len();

        game.scene = Scene::BranchChoice;
        game.set_hover(Some(0));
        assert_eq!(game.snapshot().hover_target, Some(1));
        assert_eq!(game.log().len(), logged);
    }

    #[test]
    fn test_opening_victory_builds_map() {
        // picks: mid A = Camp, mid B = Merchant, boss A = Goblin Shaman
        let mut game = started(ScriptedOracle::neutral().with_picks([1, 2, 1]));
        clear_enemies(&mut game);

        assert_eq!(game.scene(), Scene::BranchChoice);
        assert_eq!(game.hero().xp, 20);
        assert_eq!(game.hero().gold, 15);
        let map = game.map().unwrap();
        assert_eq!(map.option_a.mid_node, MidNodeKind::Camp);
        assert_eq!(map.option_b.mid_node, MidNodeKind::Merchant);
        assert_eq!(map.option_a.boss, BossKind::GoblinShaman);
        assert_eq!(map.option_b.boss, BossKind::OrcWarlord);
        assert!(!game.perk_pending());
    }

    #[test]
    fn test_level_up_offered_on_first_threshold_crossing() {
        let mut game = started(ScriptedOracle::neutral().with_picks([1, 2, 1]));
        game.hero.xp = 40;
        clear_enemies(&mut game);

        assert!(game.perk_pending());
        assert_eq!(
            game.log()
                .entries()
                .iter()
                .filter(|r| r.action == Action::LevelUp)
                .count(),
            1
        );
    }

    #[test]
    fn test_level_up_never_offered_twice() {
        let mut game = started(ScriptedOracle::neutral().with_picks([1, 2, 1]));
        game.perk_offered = true;
        game.hero.xp = 60;
        assert_eq!(game.hero().level, 1);
        clear_enemies(&mut game);

        assert_eq!(game.scene(), Scene::BranchChoice);
        assert!(!game.perk_pending());
        assert!(!game
            .log()
            .entries()
            .iter()
            .any(|r| r.action == Action::LevelUp));
        assert_eq!(game.choose_perk(Perk::Mending), Err(Rejection::NoPerkPending));
    }

    #[test]
    fn test_branch_commit_is_final() {
        let mut game = started(ScriptedOracle::neutral());
        game.map = Some(fixed_map(MidNodeKind::Merchant, BossKind::OrcWarlord));
        game.scene = Scene::BranchChoice;

        game.choose_branch(Branch::A).unwrap();
        assert_eq!(game.scene(), Scene::Merchant);
        assert_eq!(game.choose_branch(Branch::B), Err(Rejection::WrongScene));
        assert_eq!(game.map().unwrap().branch(), Some(Branch::A));
    }

    #[test]
    fn test_event_node_rolls_kind() {
        let mut game = started(ScriptedOracle::neutral().with_picks([1]));
        game.map = Some(fixed_map(MidNodeKind::Event, BossKind::OrcWarlord));
        game.scene = Scene::BranchChoice;

        game.choose_branch(Branch::A).unwrap();
        assert_eq!(game.scene(), Scene::Event(EventKind::Shrine));
        assert_eq!(
            game.choose_mid_node_outcome(NodeChoice::OpenChest),
            Err(Rejection::WrongScene)
        );
        game.choose_mid_node_outcome(NodeChoice::LeaveShrine).unwrap();
        assert_eq!(game.scene(), Scene::Combat);
        assert_eq!(
            game.snapshot().encounter,
            Some(Encounter::Boss(BossKind::OrcWarlord))
        );
    }

    #[test]
    fn test_shrine_without_gold_keeps_node_open() {
        let mut game = started(ScriptedOracle::neutral().with_picks([1]));
        game.map = Some(fixed_map(MidNodeKind::Event, BossKind::OrcWarlord));
        game.scene = Scene::BranchChoice;
        game.choose_branch(Branch::A).unwrap();

        assert!(matches!(
            game.choose_mid_node_outcome(NodeChoice::Donate),
            Err(Rejection::InsufficientGold { .. })
        ));
        assert_eq!(game.scene(), Scene::Event(EventKind::Shrine));
    }

    #[test]
    fn test_ambush_node_leads_to_boss() {
        let mut game = started(ScriptedOracle::neutral());
        game.map = Some(fixed_map(MidNodeKind::Combat, BossKind::GoblinShaman));
        game.scene = Scene::BranchChoice;
        game.choose_branch(Branch::A).unwrap();
        assert_eq!(game.snapshot().encounter, Some(Encounter::Ambush));

        clear_enemies(&mut game);
        assert_eq!(
            game.snapshot().encounter,
            Some(Encounter::Boss(BossKind::GoblinShaman))
        );
        assert_eq!(game.snapshot().selected_target, None);
    }

    #[test]
    fn test_boss_victory_ends_run() {
        let mut game = started(ScriptedOracle::neutral());
        game.map = Some(fixed_map(MidNodeKind::Camp, BossKind::OrcWarlord));
        game.scene = Scene::BranchChoice;
        game.choose_branch(Branch::A).unwrap();
        game.choose_mid_node_outcome(NodeChoice::CampTrain).unwrap();
        assert_eq!(game.hero().attack, 21);

        clear_enemies(&mut game);
        assert_eq!(game.scene(), Scene::Summary(Outcome::Victory));
        assert_eq!(game.wins(), 1);
        assert_eq!(game.hero().xp, 60);
        assert!(game.perk_pending());

        let summary = game.summary(1_090).unwrap();
        assert_eq!(summary.outcome, Outcome::Victory);
        assert_eq!(summary.elapsed_secs, 90);
        assert_eq!(summary.branch, Some(Branch::A));
        assert_eq!(summary.boss, Some(BossKind::OrcWarlord));
    }

    #[test]
    fn test_defeat_goes_to_summary() {
        let mut game = started(ScriptedOracle::neutral());
        game.hero.hp = 1;
        game.select_target(1).unwrap();
        let outcome = game.perform_hero_action(HeroAction::Attack).unwrap();
        assert_eq!(outcome, RoundOutcome::Defeat);
        assert_eq!(game.scene(), Scene::Summary(Outcome::Defeat));
        assert_eq!(
            game.perform_hero_action(HeroAction::Heal),
            Err(Rejection::NotInCombat)
        );
    }

    #[test]
    fn test_trap_death_ends_run() {
        // the neutral oracle fails the 70% chest roll
        let mut game = started(ScriptedOracle::neutral());
        game.scene = Scene::Event(EventKind::Chest);
        game.hero.hp = 5;
        game.choose_mid_node_outcome(NodeChoice::OpenChest).unwrap();
        assert_eq!(game.hero().hp, 0);
        assert_eq!(game.scene(), Scene::Summary(Outcome::Defeat));
    }

    #[test]
    fn test_perk_only_when_pending() {
        let mut game = started(ScriptedOracle::neutral());
        assert_eq!(game.choose_perk(Perk::KeenEye), Err(Rejection::NoPerkPending));

        game.perk_pending = true;
        game.choose_perk(Perk::KeenEye).unwrap();
        assert_eq!(game.hero().level, 2);
        assert!((game.hero().crit_chance - 0.10).abs() < 1e-9);
        assert_eq!(game.choose_perk(Perk::Mending), Err(Rejection::NoPerkPending));
        assert_eq!(game.hero().perks, vec![Perk::KeenEye]);
    }

    #[test]
    fn test_merchant_flow() {
        let mut game = started(ScriptedOracle::neutral());
        game.map = Some(fixed_map(MidNodeKind::Merchant, BossKind::OrcWarlord));
        game.scene = Scene::BranchChoice;
        game.hero.gold = 60;
        game.choose_branch(Branch::A).unwrap();

        game.purchase(ItemKind::Sword).unwrap();
        game.purchase(ItemKind::Shield).unwrap();
        assert_eq!(game.hero().gold, 0);
        assert_eq!((game.hero().attack, game.hero().defense), (20, 8));
        assert!(matches!(
            game.purchase(ItemKind::LifeRing),
            Err(Rejection::InsufficientGold { needed: 40, have: 0 })
        ));
        assert_eq!(game.scene(), Scene::Merchant);

        game.continue_from_merchant().unwrap();
        assert_eq!(game.scene(), Scene::Combat);
        assert_eq!(game.continue_from_merchant(), Err(Rejection::WrongScene));
    }

    #[test]
    fn test_new_run_resets_everything() {
        let mut game = started(ScriptedOracle::neutral());
        game.hero.gold = 99;
        game.wins = 3;
        game.perk_offered = true;
        game.map = Some(fixed_map(MidNodeKind::Camp, BossKind::OrcWarlord));
        game.scene = Scene::Summary(Outcome::Victory);

        game.start_new_run(2_000);
        assert_eq!(game.hero(), &Hero::new());
        assert_eq!(game.wins(), 0);
        assert!(game.map().is_none());
        assert!(!game.perk_offered);
        assert_eq!(game.start_ts(), 2_000);
        assert_eq!(game.log().entries()[0].action, Action::RunStarted);
        assert_eq!(game.scene(), Scene::Combat);
    }
}
