use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use warpath::core::{Action, EventRecord};

fn record_style(record: &EventRecord) -> Style {
    match record.action {
        Action::Warning(_) => Style::default().fg(Color::Red),
        Action::Defeated | Action::RunEnded(_) => Style::default().add_modifier(Modifier::BOLD),
        Action::Heal | Action::GoldFound | Action::Reward { .. } => {
            Style::default().fg(Color::Green)
        }
        Action::CombatStarted | Action::BranchChosen(_) | Action::NodeEntered(_) => {
            Style::default().fg(Color::Cyan)
        }
        _ if record.critical => Style::default().fg(Color::Yellow),
        _ => Style::default(),
    }
}

/// Draws the newest narration records that fit, oldest at the top.
pub fn draw_log_panel(frame: &mut Frame, area: Rect, log: &[EventRecord]) {
    let visible = area.height.saturating_sub(2) as usize;
    let start = log.len().saturating_sub(visible);
    let lines: Vec<Line> = log[start..]
        .iter()
        .map(|record| Line::styled(record.to_string(), record_style(record)))
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Log "))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
