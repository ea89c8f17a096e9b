//! Combat sessions, damage math, boss behavior and round resolution.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
