//! Warpath - turn-based combat and branching campaign engine.
//!
//! The library holds every game rule and is driven through [`core::Game`].
//! The terminal front end and the balance simulator are thin binaries on top.

pub mod build_info;
pub mod campaign;
pub mod character;
pub mod combat;
pub mod core;
pub mod simulator;

pub use campaign::{Branch, NodeChoice, Outcome, Scene};
pub use character::{Hero, ItemKind, Perk};
pub use combat::{HeroAction, RoundOutcome};
pub use crate::core::{Game, RandomOracle, Rejection, Snapshot};
