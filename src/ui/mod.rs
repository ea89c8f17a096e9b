//! Terminal rendering. Reads snapshots and the narration log only.

pub mod hero_panel;
pub mod input;
pub mod log_panel;
pub mod scene_panel;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use warpath::campaign::Scene;
use warpath::core::{EventRecord, RunSummary, Snapshot};

/// Everything one frame draws.
pub struct View<'a> {
    pub snapshot: &'a Snapshot,
    pub log: &'a [EventRecord],
    pub summary: Option<&'a RunSummary>,
}

/// Draws the whole screen: hero and scene on the left, narration on the right.
pub fn draw_ui(frame: &mut Frame, view: &View) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(3)])
        .split(frame.size());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[0]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(6)])
        .split(columns[0]);

    hero_panel::draw_hero_panel(frame, left[0], view.snapshot);
    scene_panel::draw_scene_panel(frame, left[1], view);
    log_panel::draw_log_panel(frame, columns[1], view.log);
    draw_footer(frame, rows[1], view.snapshot);
}

fn key(label: &'static str) -> Span<'static> {
    Span::styled(
        label,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
}

fn draw_footer(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let mut spans = match snapshot.scene {
        Scene::Menu | Scene::Summary(_) => vec![key("N"), Span::raw(" = New run | ")],
        Scene::Combat => vec![
            key("1-9/←→/Enter"),
            Span::raw(" = Target | "),
            key("A"),
            Span::raw("ttack "),
            key("P"),
            Span::raw("ower "),
            key("H"),
            Span::raw("eal | "),
        ],
        Scene::BranchChoice => vec![key("A/B"), Span::raw(" = Choose path | ")],
        Scene::Event(_) | Scene::Camp => vec![key("1/2"), Span::raw(" = Choose | ")],
        Scene::Merchant => vec![
            key("1-3"),
            Span::raw(" = Buy | "),
            key("C"),
            Span::raw(" = Continue | "),
        ],
    };
    if snapshot.perk_pending {
        spans.extend([
            key("K"),
            Span::raw(" = +10% crit "),
            key("M"),
            Span::raw(" = +20% healing | "),
        ]);
    }
    spans.extend([
        Span::styled("Q", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Span::raw(" = Quit"),
    ]);

    let footer = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Help"))
        .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
