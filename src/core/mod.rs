//! Engine core: balance constants, randomness, narration and the game session.

pub mod constants;
pub mod error;
pub mod events;
pub mod game;
pub mod intent;
pub mod rng;
pub mod snapshot;

pub use error::Rejection;
pub use events::{Action, EventRecord, NarrationLog};
pub use game::Game;
pub use intent::Intent;
pub use rng::{RandomOracle, ScriptedOracle};
pub use snapshot::{RunSummary, Snapshot, UnitView};
