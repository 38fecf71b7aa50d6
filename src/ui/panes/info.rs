//! Sort information pane: settings, progress counters and the color legend

use crate::engine::Controller;
use crate::sequence::BarColor;
use crate::sorts::Algorithm;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

/// Lines needed to show everything in the pane, borders included
pub const INFO_PANE_HEIGHT: u16 = 20;

fn field<'a>(label: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            format!("{:<12}", label),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
        Span::styled(value, Style::default().fg(DEFAULT_THEME.fg)),
    ])
}

/// Render the info pane
pub fn render_info_pane(
    frame: &mut Frame,
    area: Rect,
    controller: &Controller,
    selected: Algorithm,
) {
    let block = Block::default()
        .title(" Sort ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal))
        .padding(Padding::new(1, 1, 0, 0));

    let stats = controller.stats();
    let state = if controller.algorithm().is_none() {
        if stats.completed {
            ("finished", DEFAULT_THEME.success)
        } else {
            ("idle", DEFAULT_THEME.comment)
        }
    } else if controller.is_paused() {
        ("paused", DEFAULT_THEME.secondary)
    } else {
        ("running", DEFAULT_THEME.primary)
    };

    let algorithm = stats.algorithm.unwrap_or(selected);
    let mut lines = vec![
        Line::from(Span::styled(
            algorithm.name(),
            Style::default()
                .fg(DEFAULT_THEME.border_focused)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(format!("{:<12}", "state"), Style::default().fg(DEFAULT_THEME.comment)),
            Span::styled(
                state.0,
                Style::default().fg(state.1).add_modifier(Modifier::BOLD),
            ),
        ]),
        field("order", controller.order().as_str().to_string()),
        field("elements", controller.count().to_string()),
        field("arrangement", controller.arrangement().as_str().to_string()),
        field("delay", format!("{} ms", controller.delay())),
        Line::default(),
        field("steps", stats.steps.to_string()),
        field("comparisons", stats.comparisons.to_string()),
        field("swaps", stats.swaps.to_string()),
    ];
    if algorithm == Algorithm::Merge {
        lines.push(field("placements", stats.placements.to_string()));
    }
    if let Some(step) = controller.last_step() {
        lines.push(field("last", step.describe()));
    }

    lines.push(Line::default());
    let legend: Vec<Span> = BarColor::ALL
        .iter()
        .flat_map(|&color| {
            [
                Span::styled("█ ", Style::default().fg(DEFAULT_THEME.bar(color))),
                Span::styled(
                    format!("{} ", color.label()),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
            ]
        })
        .collect();
    // Three legend entries per line
    for chunk in legend.chunks(6) {
        lines.push(Line::from(chunk.to_vec()));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
