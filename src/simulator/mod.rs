//! Headless balance simulator.
//!
//! Plays many runs with a fixed auto-play policy through the same `Game`
//! intents the terminal front end uses, then aggregates victory rate,
//! defeats per stage, rounds, gold, level-ups and perk picks.

mod config;
mod policy;
mod report;
mod runner;

pub use config::SimConfig;
pub use policy::AutoPolicy;
pub use report::{RunStats, SimReport, Stage};
pub use runner::{run_simulation, simulate_single_run};
