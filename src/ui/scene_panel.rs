use super::hero_panel::hp_color;
use super::View;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use warpath::campaign::{Branch, BranchOption, Outcome, Scene};
use warpath::character::ItemKind;
use warpath::core::{RunSummary, Snapshot};

/// Draws whatever the current scene needs: enemies, map options or choices.
pub fn draw_scene_panel(frame: &mut Frame, area: Rect, view: &View) {
    let snapshot = view.snapshot;
    let (title, lines) = match snapshot.scene {
        Scene::Menu => (
            " Warpath ".to_string(),
            vec![
                Line::from(""),
                Line::from("  Fight through an orc skirmish, pick a path,"),
                Line::from("  survive what lies on it and defeat its boss."),
                Line::from(""),
                Line::from("  Press [N] to start a run."),
            ],
        ),
        Scene::Combat => (combat_title(snapshot), enemy_lines(snapshot)),
        Scene::BranchChoice => (" Choose your path ".to_string(), branch_lines(snapshot)),
        Scene::Event(kind) => (
            format!(" Event: {} ", kind.name()),
            choice_lines(snapshot.scene),
        ),
        Scene::Camp => (" Camp ".to_string(), choice_lines(snapshot.scene)),
        Scene::Merchant => (" Merchant ".to_string(), merchant_lines(snapshot)),
        Scene::Summary(outcome) => (format!(" {outcome} "), summary_lines(outcome, snapshot.wins, view.summary)),
    };

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn combat_title(snapshot: &Snapshot) -> String {
    let name = snapshot.encounter.map_or("Combat", |e| e.name());
    format!(" {name} - Round {} ", snapshot.round)
}

fn enemy_lines(snapshot: &Snapshot) -> Vec<Line<'static>> {
    snapshot
        .enemies
        .iter()
        .enumerate()
        .map(|(index, enemy)| {
            let marker = if snapshot.selected_target == Some(index) {
                "▶ "
            } else if snapshot.hover_target == Some(index) {
                "› "
            } else {
                "  "
            };
            let style = if !enemy.alive {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else if snapshot.hover_target == Some(index) {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::raw(format!("{marker}[{}] ", index + 1)),
                Span::styled(format!("{:<16}", enemy.name), style),
                Span::styled(
                    format!("{:>3}/{:<3} HP", enemy.hp, enemy.max_hp),
                    Style::default().fg(hp_color(enemy.hp, enemy.max_hp)),
                ),
                Span::raw(format!("  ATK {} DEF {}", enemy.attack, enemy.defense)),
            ])
        })
        .collect()
}

fn option_line(branch: Branch, option: BranchOption) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  [{branch}] "),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("{} → {}", option.mid_node.name(), option.boss.name())),
    ])
}

fn branch_lines(snapshot: &Snapshot) -> Vec<Line<'static>> {
    let Some(map) = &snapshot.map else {
        return Vec::new();
    };
    vec![
        Line::from(""),
        option_line(Branch::A, map.option_a),
        option_line(Branch::B, map.option_b),
    ]
}

fn choice_lines(scene: Scene) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from("")];
    lines.extend(
        scene
            .node_choices()
            .iter()
            .enumerate()
            .map(|(i, choice)| Line::from(format!("  [{}] {}", i + 1, choice.label()))),
    );
    lines
}

fn merchant_lines(snapshot: &Snapshot) -> Vec<Line<'static>> {
    let gold = snapshot.hero.gold;
    let mut lines = vec![Line::from(format!("  You have {gold} gold.")), Line::from("")];
    lines.extend(ItemKind::ALL.iter().enumerate().map(|(i, item)| {
        let style = if item.price() <= gold {
            Style::default()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let equipped = if snapshot.hero.item == Some(*item) {
            " (equipped)"
        } else {
            ""
        };
        Line::styled(
            format!("  [{}] {} - {}g{equipped}", i + 1, item.label(), item.price()),
            style,
        )
    }));
    lines.push(Line::from(""));
    lines.push(Line::from("  [C] Continue to the boss"));
    lines
}

fn summary_lines(outcome: Outcome, wins: u32, summary: Option<&RunSummary>) -> Vec<Line<'static>> {
    let color = match outcome {
        Outcome::Victory => Color::Green,
        Outcome::Defeat => Color::Red,
    };
    let mut lines = vec![Line::styled(
        format!("  {outcome}!"),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )];
    if let Some(summary) = summary {
        lines.push(Line::from(format!("  Time: {}", summary.elapsed_display())));
        if let (Some(branch), Some(boss)) = (summary.branch, summary.boss) {
            lines.push(Line::from(format!("  Path {branch}, boss {}", boss.name())));
        }
        lines.push(Line::from(format!(
            "  Level {}  XP {}  Gold {}",
            summary.level, summary.xp, summary.gold
        )));
        if let Some(item) = summary.item {
            lines.push(Line::from(format!("  Item: {}", item.label())));
        }
        if !summary.perks.is_empty() {
            let perks: Vec<&str> = summary.perks.iter().map(|p| p.name()).collect();
            lines.push(Line::from(format!("  Perks: {}", perks.join(", "))));
        }
    }
    lines.push(Line::from(format!("  Wins: {wins}")));
    lines.push(Line::from(""));
    lines.push(Line::from("  Press [N] for a new run."));
    lines
}
