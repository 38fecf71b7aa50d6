//! Changes pane: the most recent presenter updates

use crate::sequence::{Change, EventLog};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

fn describe(change: &Change) -> String {
    match change {
        Change::Rebuilt { len } => format!("layout: {} bars", len),
        Change::Element {
            slot,
            position,
            width,
            extent,
            color,
        } => format!(
            "[{:>3}] {:<8} x={} w={} h={}",
            slot,
            color.label(),
            position,
            width,
            extent
        ),
    }
}

/// Render the change log, newest at the bottom.
///
/// `scroll_offset` counts lines back from the newest entry.
pub fn render_changes_pane(frame: &mut Frame, area: Rect, log: &EventLog, scroll_offset: &mut usize) {
    let block = Block::default()
        .title(format!(" Changes ({}) ", log.total()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1
    let changes = log.recent(visible_height + *scroll_offset);

    if changes.is_empty() {
        let paragraph = Paragraph::new("(no changes)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    // Clamp so the oldest retained change can reach the top but no further
    let max_scroll = changes.len().saturating_sub(visible_height);
    *scroll_offset = (*scroll_offset).min(max_scroll);
    let end = changes.len() - *scroll_offset;
    let start = end.saturating_sub(visible_height);

    let items: Vec<ListItem> = changes[start..end]
        .iter()
        .map(|change| {
            ListItem::new(describe(change)).style(Style::default().fg(DEFAULT_THEME.fg))
        })
        .collect();

    let list = List::new(items).block(block.padding(Padding::new(1, 0, 0, 0)));
    frame.render_widget(list, area);
}
