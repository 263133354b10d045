//! Search bar component renderer.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ Search: the matr█            │
//! └──────────────────────────────┘
//! ```

use crate::ui::helpers::{position_cursor, tail, width_of};
use crate::ui::layout::Rect;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

const PROMPT: &str = " Search: ";

/// Renders the search box into `area` (three rows).
///
/// The frame uses the accent color while the input has focus. A long query scrolls so
/// its end, where typing happens, stays visible.
pub fn render_search_bar(area: &Rect, search: &SearchBarInfo, theme: &Theme) {
    let inner_width = area.width.saturating_sub(2);
    let frame = if search.is_focused {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };

    position_cursor(area.row, area.col);
    print!("{}", Theme::fg(frame));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let cursor = if search.is_focused { "█" } else { "" };
    let room = inner_width.saturating_sub(width_of(PROMPT) + width_of(cursor));
    let visible = tail(&search.query, room);
    let text_len = width_of(PROMPT) + width_of(&visible) + width_of(cursor);

    position_cursor(area.row + 1, area.col);
    print!("{}", Theme::fg(frame));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{PROMPT}");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{visible}{cursor}");
    print!("{}", " ".repeat(inner_width.saturating_sub(text_len)));
    print!("{}", Theme::fg(frame));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(area.row + 2, area.col);
    print!("{}", Theme::fg(frame));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());
}
