//! Hero attributes, equipment and perks.

pub mod hero;
pub mod items;
pub mod perks;

pub use hero::*;
pub use items::*;
pub use perks::*;

/// Shared surface of every unit that can attack or be attacked.
pub trait Combatant {
    fn name(&self) -> &str;
    fn hp(&self) -> u32;
    fn max_hp(&self) -> u32;
    fn attack(&self) -> u32;
    fn defense(&self) -> u32;

    /// Applies damage, clamping at zero. Returns the HP actually lost.
    fn take_damage(&mut self, amount: u32) -> u32;

    fn is_alive(&self) -> bool {
        self.hp() > 0
    }
}
