//! Footer component renderer.
//!
//! Renders the keybinding hints for the focused region, centered and dimmed.

use crate::ui::helpers::{position_cursor, truncate, width_of};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the footer help bar at `row`.
///
/// Hints wider than the pane are truncated so they never wrap into the next line.
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) {
    let help_text = truncate(&footer.keybindings, cols);
    let text_len = width_of(&help_text);
    let padding = (cols.saturating_sub(text_len)) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(padding));
    print!("{help_text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + text_len)));
    print!("{}", Theme::reset());
}
