//! Player intents as data, for front ends that route input generically.

use super::error::Rejection;
use super::game::Game;
use super::rng::RandomOracle;
use crate::campaign::{Branch, NodeChoice};
use crate::character::{ItemKind, Perk};
use crate::combat::HeroAction;

/// One intent a front end can issue. Starting a new run is separate since it
/// needs the caller's clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    ChoosePerk(Perk),
    SelectTarget(usize),
    Hero(HeroAction),
    ChooseBranch(Branch),
    NodeChoice(NodeChoice),
    Purchase(ItemKind),
    LeaveMerchant,
}

impl<R: RandomOracle> Game<R> {
    /// Dispatches an intent to its entry point.
    pub fn apply(&mut self, intent: Intent) -> Result<(), Rejection> {
        match intent {
            Intent::ChoosePerk(perk) => self.choose_perk(perk),
            Intent::SelectTarget(index) => self.select_target(index),
            Intent::Hero(action) => self.perform_hero_action(action).map(|_| ()),
            Intent::ChooseBranch(branch) => self.choose_branch(branch),
            Intent::NodeChoice(choice) => self.choose_mid_node_outcome(choice),
            Intent::Purchase(item) => self.purchase(item),
            Intent::LeaveMerchant => self.continue_from_merchant(),
        }
    }
}
