//! Main simulation runner driving the real `Game` through the auto-play policy.

use super::config::SimConfig;
use super::policy::AutoPolicy;
use super::report::{RunStats, SimReport, Stage};
use crate::campaign::{CampaignMap, Scene};
use crate::combat::Encounter;
use crate::core::{Action, Game, RandomOracle};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let policy = AutoPolicy::from_config(config);
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let stats = simulate_single_run(config, &policy, Game::new(rng));
        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - {:?} at {:?}, {} rounds, level {}, {} gold",
                run_idx + 1,
                config.num_runs,
                stats.outcome,
                stats.stage,
                stats.rounds,
                stats.final_level,
                stats.final_gold
            );
        }
        all_runs.push(stats);
    }

    SimReport::from_runs(all_runs)
}

/// Plays one run from the opening fight to its summary (or the intent cap).
pub fn simulate_single_run<R: RandomOracle>(
    config: &SimConfig,
    policy: &AutoPolicy,
    mut game: Game<R>,
) -> RunStats {
    game.start_new_run(0);
    let mut intents = 0;

    while intents < config.max_intents_per_run {
        let Some(intent) = policy.decide(&game) else {
            break;
        };
        if let Err(rejection) = game.apply(intent) {
            tracing::warn!(?intent, %rejection, "auto-play intent rejected");
            break;
        }
        intents += 1;
    }

    collect_stats(&game, intents)
}

fn collect_stats<R: RandomOracle>(game: &Game<R>, intents: u32) -> RunStats {
    let outcome = match game.scene() {
        Scene::Summary(outcome) => Some(outcome),
        _ => None,
    };
    let stage = match game.session().map(|s| s.encounter) {
        Some(Encounter::Opening) => Stage::Opening,
        Some(Encounter::Boss(_)) => Stage::Boss,
        Some(Encounter::Ambush) | None => Stage::MidNode,
    };
    let chosen = game.map().and_then(CampaignMap::chosen);
    let hero = game.hero();

    RunStats {
        outcome,
        stage,
        rounds: game
            .log()
            .entries()
            .iter()
            .filter(|r| r.action == Action::RoundEnded)
            .count() as u32,
        intents,
        final_gold: hero.gold,
        final_level: hero.level,
        perk: hero.perks.first().copied(),
        item: hero.item,
        mid_node: chosen.map(|option| option.mid_node),
        boss: chosen.map(|option| option.boss),
    }
}
