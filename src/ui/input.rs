//! Key bindings: maps a key press to a front-end command for the current scene.

use crossterm::event::KeyCode;
use warpath::campaign::{Branch, Scene};
use warpath::character::{ItemKind, Perk};
use warpath::combat::HeroAction;
use warpath::core::{Intent, Snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    NewRun,
    Hover(Option<usize>),
    Intent(Intent),
}

fn digit(key: KeyCode) -> Option<usize> {
    match key {
        KeyCode::Char(c @ '1'..='9') => c.to_digit(10).map(|d| d as usize - 1),
        _ => None,
    }
}

/// Next hover index when stepping through the roster with the arrow keys.
fn step_hover(snapshot: &Snapshot, forward: bool) -> Option<usize> {
    let len = snapshot.enemies.len();
    if len == 0 {
        return None;
    }
    let next = match (snapshot.hover_target, forward) {
        (None, _) => 0,
        (Some(i), true) => (i + 1) % len,
        (Some(i), false) => (i + len - 1) % len,
    };
    Some(next)
}

pub fn command_for_key(snapshot: &Snapshot, key: KeyCode) -> Option<Command> {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => return Some(Command::Quit),
        KeyCode::Char('n') => return Some(Command::NewRun),
        KeyCode::Char('k') if snapshot.perk_pending => {
            return Some(Command::Intent(Intent::ChoosePerk(Perk::KeenEye)))
        }
        KeyCode::Char('m') if snapshot.perk_pending => {
            return Some(Command::Intent(Intent::ChoosePerk(Perk::Mending)))
        }
        _ => {}
    }

    let intent = match snapshot.scene {
        Scene::Menu | Scene::Summary(_) => return None,
        Scene::Combat => match key {
            KeyCode::Char('a') => Intent::Hero(HeroAction::Attack),
            KeyCode::Char('p') => Intent::Hero(HeroAction::Power),
            KeyCode::Char('h') => Intent::Hero(HeroAction::Heal),
            KeyCode::Left | KeyCode::Up => {
                return Some(Command::Hover(step_hover(snapshot, false)))
            }
            KeyCode::Right | KeyCode::Down | KeyCode::Tab => {
                return Some(Command::Hover(step_hover(snapshot, true)))
            }
            KeyCode::Enter => Intent::SelectTarget(snapshot.hover_target?),
            other => Intent::SelectTarget(digit(other)?),
        },
        Scene::BranchChoice => match key {
            KeyCode::Char('a') | KeyCode::Char('1') => Intent::ChooseBranch(Branch::A),
            KeyCode::Char('b') | KeyCode::Char('2') => Intent::ChooseBranch(Branch::B),
            _ => return None,
        },
        Scene::Event(_) | Scene::Camp => {
            let choice = snapshot.scene.node_choices().get(digit(key)?)?;
            Intent::NodeChoice(*choice)
        }
        Scene::Merchant => match key {
            KeyCode::Char('c') | KeyCode::Enter => Intent::LeaveMerchant,
            other => Intent::Purchase(*ItemKind::ALL.get(digit(other)?)?),
        },
    };
    Some(Command::Intent(intent))
}
