use crate::combat::BossKind;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Branch {
    A,
    B,
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Branch::A => write!(f, "A"),
            Branch::B => write!(f, "B"),
        }
    }
}

/// The encounter between branch choice and boss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MidNodeKind {
    Event,
    Camp,
    Merchant,
    Combat,
}

impl MidNodeKind {
    pub const ALL: [MidNodeKind; 4] = [
        MidNodeKind::Event,
        MidNodeKind::Camp,
        MidNodeKind::Merchant,
        MidNodeKind::Combat,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MidNodeKind::Event => "Event",
            MidNodeKind::Camp => "Camp",
            MidNodeKind::Merchant => "Merchant",
            MidNodeKind::Combat => "Combat",
        }
    }
}

/// Random events an Event node can roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Chest,
    Shrine,
    Potion,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [EventKind::Chest, EventKind::Shrine, EventKind::Potion];

    pub fn name(self) -> &'static str {
        match self {
            EventKind::Chest => "Chest",
            EventKind::Shrine => "Shrine",
            EventKind::Potion => "Potion",
        }
    }
}

/// What one path of the map leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchOption {
    pub mid_node: MidNodeKind,
    pub boss: BossKind,
}

/// The two-path map offered after the opening combat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignMap {
    pub option_a: BranchOption,
    pub option_b: BranchOption,
    branch: Option<Branch>,
}

impl CampaignMap {
    pub fn new(option_a: BranchOption, option_b: BranchOption) -> Self {
        Self {
            option_a,
            option_b,
            branch: None,
        }
    }

    pub fn option(&self, branch: Branch) -> BranchOption {
        match branch {
            Branch::A => self.option_a,
            Branch::B => self.option_b,
        }
    }

    /// The committed branch, if any.
    pub fn branch(&self) -> Option<Branch> {
        self.branch
    }

    /// Commits a branch. Returns false (and changes nothing) if one is
    /// already committed.
    pub fn commit(&mut self, branch: Branch) -> bool {
        if self.branch.is_some() {
            return false;
        }
        self.branch = Some(branch);
        true
    }

    pub fn chosen(&self) -> Option<BranchOption> {
        self.branch.map(|b| self.option(b))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Victory,
    Defeat,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Victory => write!(f, "Victory"),
            Outcome::Defeat => write!(f, "Defeat"),
        }
    }
}

/// Two-way choices offered by Event and Camp nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeChoice {
    OpenChest,
    SkipChest,
    Donate,
    LeaveShrine,
    DrinkPotion,
    SkipPotion,
    CampRest,
    CampTrain,
}

impl NodeChoice {
    pub const CHEST: [NodeChoice; 2] = [NodeChoice::OpenChest, NodeChoice::SkipChest];
    pub const SHRINE: [NodeChoice; 2] = [NodeChoice::Donate, NodeChoice::LeaveShrine];
    pub const POTION: [NodeChoice; 2] = [NodeChoice::DrinkPotion, NodeChoice::SkipPotion];
    pub const CAMP: [NodeChoice; 2] = [NodeChoice::CampRest, NodeChoice::CampTrain];

    pub fn label(self) -> &'static str {
        match self {
            NodeChoice::OpenChest => "open the chest",
            NodeChoice::SkipChest => "walk past the chest",
            NodeChoice::Donate => "donate 10 gold",
            NodeChoice::LeaveShrine => "leave the shrine",
            NodeChoice::DrinkPotion => "drink the potion",
            NodeChoice::SkipPotion => "leave the potion",
            NodeChoice::CampRest => "rest",
            NodeChoice::CampTrain => "train (+1 attack)",
        }
    }
}

/// Where the campaign currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scene {
    /// Before the first run.
    Menu,
    Combat,
    BranchChoice,
    Event(EventKind),
    Camp,
    Merchant,
    Summary(Outcome),
}

impl Scene {
    /// Node choices this scene accepts.
    pub fn node_choices(self) -> &'static [NodeChoice] {
        match self {
            Scene::Event(EventKind::Chest) => &NodeChoice::CHEST,
            Scene::Event(EventKind::Shrine) => &NodeChoice::SHRINE,
            Scene::Event(EventKind::Potion) => &NodeChoice::POTION,
            Scene::Camp => &NodeChoice::CAMP,
            _ => &[],
        }
    }

    pub fn accepts(self, choice: NodeChoice) -> bool {
        self.node_choices().contains(&choice)
    }

    pub fn tag(self) -> &'static str {
        match self {
            Scene::Menu => "menu",
            Scene::Combat => "combat",
            Scene::BranchChoice => "branch-choice",
            Scene::Event(_) => "event",
            Scene::Camp => "camp",
            Scene::Merchant => "merchant",
            Scene::Summary(_) => "summary",
        }
    }
}
