//! Centered input popup for the size and delay prompts

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph},
    Frame,
};

const POPUP_WIDTH: u16 = 44;
const POPUP_HEIGHT: u16 = 6;

/// A `width` x `height` rectangle centered in `area`, clipped to it
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(width),
            Constraint::Fill(1),
        ])
        .split(rows[1])[1]
}

/// Render an input popup over `area`
pub fn render_prompt(frame: &mut Frame, area: Rect, title: &str, hint: &str, input: &str) {
    let popup = centered(area, POPUP_WIDTH, POPUP_HEIGHT);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(DEFAULT_THEME.secondary)
                .add_modifier(Modifier::BOLD),
        )
        .padding(Padding::new(1, 1, 0, 0));

    let lines = vec![
        Line::from(Span::styled(hint, Style::default().fg(DEFAULT_THEME.comment))),
        Line::default(),
        Line::from(vec![
            Span::styled("> ", Style::default().fg(DEFAULT_THEME.secondary)),
            Span::styled(input, Style::default().fg(DEFAULT_THEME.fg)),
            Span::styled("█", Style::default().fg(DEFAULT_THEME.secondary)),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left);
    frame.render_widget(paragraph, popup);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup() {
        let popup = centered(Rect::new(0, 0, 100, 30), 40, 6);
        assert_eq!(popup, Rect::new(30, 12, 40, 6));
    }

    #[test]
    fn test_centered_popup_clipped() {
        let popup = centered(Rect::new(0, 0, 20, 4), 40, 6);
        assert_eq!(popup.width, 20);
        assert_eq!(popup.height, 4);
    }
}
