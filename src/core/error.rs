//! Typed rejections for intents that fail their preconditions.
//!
//! A rejection never mutates game state; the engine mirrors it into the
//! narration log as a warning record and hands it back to the caller.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum Rejection {
    #[error("no run in progress")]
    NoActiveRun,

    #[error("not in combat")]
    NotInCombat,

    #[error("a round is still resolving")]
    TurnLocked,

    #[error("the hero has fallen")]
    HeroDown,

    #[error("select a target first")]
    NoTarget,

    #[error("no living enemy at position {0}")]
    InvalidTarget(usize),

    #[error("that choice is not available here")]
    WrongScene,

    #[error("not enough gold: need {needed}, have {have}")]
    InsufficientGold { needed: u32, have: u32 },

    #[error("no perk choice is pending")]
    NoPerkPending,
}
