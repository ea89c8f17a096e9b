use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};
use warpath::core::constants::LEVEL_UP_XP;
use warpath::core::Snapshot;

/// Color for a health ratio.
pub fn hp_color(hp: u32, max_hp: u32) -> Color {
    let ratio = hp as f64 / max_hp.max(1) as f64;
    if ratio > 0.6 {
        Color::Green
    } else if ratio > 0.3 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Draws the hero's stat block with an HP gauge.
pub fn draw_hero_panel(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let hero = &snapshot.hero;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} - Level {} ", hero.name, hero.level));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(hp_color(hero.hp, hero.max_hp)))
        .ratio(hero.hp as f64 / hero.max_hp.max(1) as f64)
        .label(format!("HP {}/{}", hero.hp, hero.max_hp));
    frame.render_widget(gauge, chunks[0]);

    let xp_text = if hero.level == 1 {
        format!("{}/{} XP", hero.xp, LEVEL_UP_XP)
    } else {
        format!("{} XP", hero.xp)
    };
    let mut lines = vec![
        Line::from(vec![
            Span::styled("ATK ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("{}   ", hero.attack)),
            Span::styled("DEF ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("{}   ", hero.defense)),
            Span::styled("Gold ", Style::default().fg(Color::Yellow)),
            Span::raw(format!("{}", hero.gold)),
        ]),
        Line::from(Span::styled(xp_text, Style::default().fg(Color::Cyan))),
        Line::from(format!(
            "Item: {}",
            hero.item.map_or("none".to_string(), |item| item.label())
        )),
        Line::from(format!(
            "Perks: {}",
            if hero.perks.is_empty() {
                "none".to_string()
            } else {
                hero.perks
                    .iter()
                    .map(|p| p.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        )),
    ];
    if hero.weakness_turns > 0 {
        lines.push(Line::from(Span::styled(
            format!("Weakened ({} rounds)", hero.weakness_turns),
            Style::default().fg(Color::Magenta),
        )));
    }
    if snapshot.perk_pending {
        lines.push(Line::from(Span::styled(
            "Level up! Choose a perk: [K] +10% crit  [M] +20% healing",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )));
    }

    frame.render_widget(Paragraph::new(lines), chunks[1]);
}
