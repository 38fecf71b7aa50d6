//! Bar chart pane: the sequence drawn with eighth-block characters

use crate::sequence::{Element, Extent, Sequence};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Vertical display units per terminal row
pub const EIGHTHS_PER_ROW: u32 = 8;

const PARTIAL_BLOCKS: [char; 7] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇'];

/// Display extent the sequence should be laid out in for a pane of `area`
pub fn bars_extent(area: Rect) -> Extent {
    let inner = bars_block("").inner(area);
    Extent::new(
        inner.width as u32,
        inner.height as u32 * EIGHTHS_PER_ROW,
    )
}

fn bars_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(DEFAULT_THEME.border_focused)
                .add_modifier(Modifier::BOLD),
        )
}

/// Character for a bar of `extent` eighths in the row whose bottom edge sits
/// `floor` eighths above the baseline
fn cell_glyph(extent: u32, floor: u32) -> char {
    match extent.saturating_sub(floor) {
        0 => ' ',
        filled if filled >= EIGHTHS_PER_ROW => '█',
        filled => PARTIAL_BLOCKS[filled as usize - 1],
    }
}

/// Columns of a bar actually painted; wide bars keep a one-column gap
fn painted_width(element: &Element) -> u32 {
    if element.width >= 3 {
        element.width - 1
    } else {
        element.width
    }
}

/// Render the sequence as vertical bars
pub fn render_bars_pane(frame: &mut Frame, area: Rect, sequence: &Sequence, title: &str) {
    let block = bars_block(title);
    let inner = block.inner(area);
    let rows = inner.height as u32;
    let columns = inner.width as u32;

    // Bars are drawn in visual order, which is position order
    let mut elements: Vec<&Element> = sequence.elements().iter().collect();
    elements.sort_by_key(|e| e.position);

    let lines: Vec<Line> = (0..rows)
        .map(|row| {
            let floor = (rows - 1 - row) * EIGHTHS_PER_ROW;
            let mut spans = Vec::with_capacity(elements.len() * 2);
            let mut cursor = 0;
            for element in &elements {
                if element.position >= columns {
                    break;
                }
                if element.position > cursor {
                    spans.push(Span::raw(" ".repeat((element.position - cursor) as usize)));
                }
                let painted = painted_width(element).min(columns - element.position);
                let glyph = cell_glyph(element.extent, floor);
                spans.push(Span::styled(
                    glyph.to_string().repeat(painted as usize),
                    Style::default().fg(DEFAULT_THEME.bar(element.color)),
                ));
                cursor = element.position + painted;
            }
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_glyph() {
        assert_eq!(cell_glyph(0, 0), ' ');
        assert_eq!(cell_glyph(3, 0), '▃');
        assert_eq!(cell_glyph(8, 0), '█');
        assert_eq!(cell_glyph(20, 8), '█');
        assert_eq!(cell_glyph(20, 16), '▄');
        assert_eq!(cell_glyph(20, 24), ' ');
    }

    #[test]
    fn test_bars_extent_excludes_borders() {
        let extent = bars_extent(Rect::new(0, 0, 42, 12));
        assert_eq!(extent, Extent::new(40, 10 * EIGHTHS_PER_ROW));
    }
}
