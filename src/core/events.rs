//! Narration records emitted by every state-changing operation.
//!
//! The log is append-only for the lifetime of a run and exists for display;
//! the engine never reads it back.

use super::error::Rejection;
use crate::campaign::{Branch, EventKind, MidNodeKind, NodeChoice, Outcome};
use crate::character::{ItemKind, Perk};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What happened in a record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Action {
    RunStarted,
    CombatStarted,
    TargetSelected,
    Attack,
    PowerAttack,
    HeavyStrike,
    Hex,
    WeaknessApplied,
    WeaknessExpired,
    Heal,
    Defeated,
    RoundEnded,
    Reward { xp: u32, gold: u32 },
    LevelUp,
    PerkGained(Perk),
    BranchChosen(Branch),
    NodeEntered(MidNodeKind),
    EventFound(EventKind),
    NodeChoice(NodeChoice),
    GoldFound,
    TrapDamage,
    GoldSpent,
    AttackTrained,
    ItemPurchased(ItemKind),
    ItemEquipped(ItemKind),
    RunEnded(Outcome),
    Warning(Rejection),
}

/// One discrete narration entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub actor: String,
    pub action: Action,
    pub target: Option<String>,
    pub amount: u32,
    pub critical: bool,
    pub missed: bool,
}

impl EventRecord {
    pub fn new(actor: impl Into<String>, action: Action) -> Self {
        Self {
            actor: actor.into(),
            action,
            target: None,
            amount: 0,
            critical: false,
            missed: false,
        }
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn amount(mut self, amount: u32) -> Self {
        self.amount = amount;
        self
    }

    pub fn critical(mut self, critical: bool) -> Self {
        self.critical = critical;
        self
    }

    pub fn missed(mut self, missed: bool) -> Self {
        self.missed = missed;
        self
    }

    pub fn is_warning(&self) -> bool {
        matches!(self.action, Action::Warning(_))
    }
}

impl fmt::Display for EventRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let actor = &self.actor;
        let target = self.target.as_deref().unwrap_or("");
        let amount = self.amount;
        match self.action {
            Action::RunStarted => write!(f, "A new run begins."),
            Action::CombatStarted => write!(f, "Combat: {target}"),
            Action::TargetSelected => write!(f, "Target selected: {target}"),
            Action::Attack | Action::PowerAttack | Action::HeavyStrike => {
                let verb = match self.action {
                    Action::PowerAttack => "power-strikes",
                    Action::HeavyStrike => "uses Heavy Strike on",
                    _ => "attacks",
                };
                if self.missed {
                    write!(f, "{actor} {verb} {target}, but misses.")
                } else if amount == 0 {
                    write!(f, "{actor} {verb} {target}, but deals no damage.")
                } else if self.critical {
                    write!(f, "{actor} {verb} {target} for {amount} damage. CRIT!")
                } else {
                    write!(f, "{actor} {verb} {target} for {amount} damage.")
                }
            }
            Action::Hex => write!(f, "{actor} casts the Evil Eye!"),
            Action::WeaknessApplied => {
                write!(f, "{target} is weakened: -20% attack for {amount} rounds.")
            }
            Action::WeaknessExpired => write!(f, "{actor} is no longer weakened."),
            Action::Heal => write!(f, "{actor} heals for {amount} HP."),
            Action::Defeated => write!(f, "{actor} is defeated!"),
            Action::RoundEnded => write!(f, "End of round {amount}."),
            Action::Reward { xp, gold } => write!(f, "Reward: +{xp} XP, +{gold} gold."),
            Action::LevelUp => write!(f, "{actor} levels up! Choose a perk."),
            Action::PerkGained(perk) => write!(f, "Perk gained: {}.", perk.name()),
            Action::BranchChosen(branch) => write!(f, "Path chosen: {branch}"),
            Action::NodeEntered(kind) => write!(f, "Next stop: {}.", kind.name()),
            Action::EventFound(kind) => write!(f, "Event: {}.", kind.name()),
            Action::NodeChoice(choice) => write!(f, "{actor} chooses: {}.", choice.label()),
            Action::GoldFound => write!(f, "{actor} finds {amount} gold."),
            Action::TrapDamage => write!(f, "{actor} takes {amount} damage from {target}."),
            Action::GoldSpent => write!(f, "{actor} spends {amount} gold at {target}."),
            Action::AttackTrained => write!(f, "{actor} trains: +{amount} attack."),
            Action::ItemPurchased(item) => {
                write!(f, "Bought {} for {amount} gold.", item.label())
            }
            Action::ItemEquipped(item) => write!(f, "Equipped {}.", item.label()),
            Action::RunEnded(outcome) => write!(f, "{outcome}!"),
            Action::Warning(rejection) => write!(f, "Warning: {rejection}."),
        }
    }
}

/// Append-only narration for the current run.
#[derive(Debug, Clone, Default)]
pub struct NarrationLog {
    entries: Vec<EventRecord>,
}

impl NarrationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: EventRecord) {
        tracing::trace!(?record, "narration");
        self.entries.push(record);
    }

    /// Records a rejected intent as a warning.
    pub fn warn(&mut self, actor: &str, rejection: Rejection) {
        self.push(EventRecord::new(actor, Action::Warning(rejection)));
    }

    pub fn entries(&self) -> &[EventRecord] {
        &self.entries
    }

    /// Records appended after `cursor` (a previous `len()`).
    pub fn since(&self, cursor: usize) -> &[EventRecord] {
        self.entries.get(cursor..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&EventRecord> {
        self.entries.last()
    }

    /// Starts a fresh log; only a new run may do this.
    pub(crate) fn reset(&mut self) {
        self.entries.clear();
    }
}
