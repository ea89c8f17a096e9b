//! Simulation report generation.

use crate::campaign::{MidNodeKind, Outcome};
use crate::character::{ItemKind, Perk};
use crate::combat::BossKind;
use serde::Serialize;

/// Where a run was when it ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stage {
    Opening,
    MidNode,
    Boss,
}

/// Result of one simulated run.
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    /// None when the run hit the intent cap.
    pub outcome: Option<Outcome>,
    pub stage: Stage,
    pub rounds: u32,
    pub intents: u32,
    pub final_gold: u32,
    pub final_level: u32,
    pub perk: Option<Perk>,
    pub item: Option<ItemKind>,
    pub mid_node: Option<MidNodeKind>,
    pub boss: Option<BossKind>,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub victories: u32,
    pub defeats: u32,
    pub stalled: u32,
    pub victory_rate: f64,

    // Defeats by stage
    pub defeats_opening: u32,
    pub defeats_mid_node: u32,
    pub defeats_boss: u32,

    pub avg_rounds: f64,
    pub avg_final_gold: f64,
    pub level_ups: u32,
    pub keen_eye_picks: u32,
    pub mending_picks: u32,

    // Boss win rates among runs that reached each boss
    pub warlord_fights: u32,
    pub warlord_wins: u32,
    pub shaman_fights: u32,
    pub shaman_wins: u32,

    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

fn pct(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;
        let count = |f: &dyn Fn(&RunStats) -> bool| runs.iter().filter(|r| f(*r)).count() as u32;

        let victories = count(&|r| r.outcome == Some(Outcome::Victory));
        let defeats = count(&|r| r.outcome == Some(Outcome::Defeat));
        let stalled = count(&|r| r.outcome.is_none());
        let defeated_at =
            |stage: Stage| count(&|r| r.outcome == Some(Outcome::Defeat) && r.stage == stage);
        let boss_fights = |kind: BossKind| count(&|r| r.stage == Stage::Boss && r.boss == Some(kind));
        let boss_wins = |kind: BossKind| {
            count(&|r| r.outcome == Some(Outcome::Victory) && r.boss == Some(kind))
        };

        let avg = |f: &dyn Fn(&RunStats) -> u32| {
            runs.iter().map(|r| f(r) as f64).sum::<f64>() / num_runs.max(1) as f64
        };

        Self {
            num_runs,
            victories,
            defeats,
            stalled,
            victory_rate: pct(victories, num_runs),
            defeats_opening: defeated_at(Stage::Opening),
            defeats_mid_node: defeated_at(Stage::MidNode),
            defeats_boss: defeated_at(Stage::Boss),
            avg_rounds: avg(&|r| r.rounds),
            avg_final_gold: avg(&|r| r.final_gold),
            level_ups: count(&|r| r.final_level > 1),
            keen_eye_picks: count(&|r| r.perk == Some(Perk::KeenEye)),
            mending_picks: count(&|r| r.perk == Some(Perk::Mending)),
            warlord_fights: boss_fights(BossKind::OrcWarlord),
            warlord_wins: boss_wins(BossKind::OrcWarlord),
            shaman_fights: boss_fights(BossKind::GoblinShaman),
            shaman_wins: boss_wins(BossKind::GoblinShaman),
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} victories, {} defeats, {} stalled\n\n",
            self.num_runs, self.victories, self.defeats, self.stalled
        ));

        report.push_str("── OUTCOMES ─────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Victory Rate:        {:.1}%\n", self.victory_rate));
        report.push_str(&format!("  Avg Rounds:          {:.1}\n", self.avg_rounds));
        report.push_str(&format!("  Avg Final Gold:      {:.1}\n\n", self.avg_final_gold));

        report.push_str("── DEFEATS BY STAGE ─────────────────────────────────────────────\n");
        for (label, defeats) in [
            ("Opening", self.defeats_opening),
            ("Mid-node", self.defeats_mid_node),
            ("Boss", self.defeats_boss),
        ] {
            let share = pct(defeats, self.num_runs);
            let bar = "█".repeat((share / 5.0) as usize);
            report.push_str(&format!("  {label:<9} {defeats:>6} {share:>5.1}% {bar}\n"));
        }
        report.push('\n');

        report.push_str("── BOSSES ───────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Orc Warlord:   {:>5} fights, {:>5.1}% won\n",
            self.warlord_fights,
            pct(self.warlord_wins, self.warlord_fights)
        ));
        report.push_str(&format!(
            "  Goblin Shaman: {:>5} fights, {:>5.1}% won\n\n",
            self.shaman_fights,
            pct(self.shaman_wins, self.shaman_fights)
        ));

        report.push_str("── PROGRESSION ──────────────────────────────────────────────────\n");
        report.push_str(&format!("  Level-ups:           {}\n", self.level_ups));
        report.push_str(&format!("  Perk +10% crit:      {}\n", self.keen_eye_picks));
        report.push_str(&format!("  Perk +20% healing:   {}\n", self.mending_picks));

        if self.stalled > 0 {
            report.push_str("\n  ⚠️  Some runs hit the intent cap - policy stuck?\n");
        }
        if self.num_runs > 0 && self.victory_rate < 20.0 {
            report.push_str("  ⚠️  Victory rate very low - enemies overtuned?\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// One-line summary for `--quiet`.
    pub fn to_summary_line(&self) -> String {
        format!(
            "runs={} victories={} defeats={} stalled={} victory_rate={:.1}% avg_rounds={:.1}",
            self.num_runs,
            self.victories,
            self.defeats,
            self.stalled,
            self.victory_rate,
            self.avg_rounds
        )
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
