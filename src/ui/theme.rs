use crate::sequence::BarColor;
use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub bar_normal: Color,
    pub bar_active: Color,
    pub bar_compare: Color,
    pub bar_sorted: Color,
    pub bar_merging: Color,
    pub bar_pivot: Color,
}

impl Theme {
    /// Cell color for a bar in the given state
    pub fn bar(&self, color: BarColor) -> Color {
        match color {
            BarColor::Normal => self.bar_normal,
            BarColor::Active => self.bar_active,
            BarColor::Compare => self.bar_compare,
            BarColor::ConfirmedSorted => self.bar_sorted,
            BarColor::Merging => self.bar_merging,
            BarColor::Pivot => self.bar_pivot,
        }
    }
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),
    bar_normal: Color::Rgb(205, 214, 244),
    bar_active: Color::Rgb(243, 139, 168),  // Red
    bar_compare: Color::Rgb(137, 180, 250), // Blue
    bar_sorted: Color::Rgb(166, 227, 161),  // Green
    bar_merging: Color::Rgb(250, 179, 135), // Orange
    bar_pivot: Color::Rgb(245, 194, 231),   // Pink
};
