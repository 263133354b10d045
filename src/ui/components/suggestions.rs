//! Suggestions dropdown renderer.
//!
//! Drawn after the panels so it overlays them, directly under the search box and within
//! its width. Each entry is the title, matches highlighted, followed by the year dimmed.

use crate::ui::helpers::{
    position_cursor, render_highlighted_text, truncate, truncate_highlighted, width_of,
};
use crate::ui::layout::Rect;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DropdownView, MessageKind};

/// Renders the dropdown into `area`, one line per entry (or one status line).
pub fn render_dropdown(area: &Rect, dropdown: &DropdownView, theme: &Theme) {
    let inner = area.width.saturating_sub(4);

    if let Some(message) = &dropdown.message {
        if area.height == 0 {
            return;
        }
        let color = match message.kind {
            MessageKind::Info => &theme.colors.text_dim,
            MessageKind::Error => &theme.colors.error_fg,
        };
        let text = truncate(&message.text, inner);
        render_frame_line(area, area.row, theme, &Theme::fg(color), |base| {
            print!("{base}{text}");
            width_of(&text)
        });
        return;
    }

    for (offset, entry) in dropdown.entries.iter().take(area.height).enumerate() {
        let base = if entry.is_active {
            format!(
                "{}{}",
                Theme::fg(&theme.colors.selection_fg),
                Theme::bg(&theme.colors.selection_bg)
            )
        } else {
            Theme::fg(&theme.colors.text_normal)
        };
        let year = if entry.year.is_empty() {
            String::new()
        } else {
            format!(" ({})", entry.year)
        };
        let year = truncate(&year, inner / 2);
        let room = inner.saturating_sub(width_of(&year));
        let (title, ranges) = truncate_highlighted(&entry.title, &entry.highlight_ranges, room);
        let dim = if entry.is_active {
            String::new()
        } else {
            Theme::fg(&theme.colors.text_dim)
        };
        render_frame_line(area, area.row + offset, theme, &base, |base| {
            print!("{base}");
            render_highlighted_text(&title, &ranges, theme, base);
            print!("{dim}{year}{base}");
            width_of(&title) + width_of(&year)
        });
    }
}

fn render_frame_line(
    area: &Rect,
    row: usize,
    theme: &Theme,
    base: &str,
    body: impl FnOnce(&str) -> usize,
) {
    let inner = area.width.saturating_sub(4);

    position_cursor(row, area.col);
    print!("{}│{} ", Theme::fg(&theme.colors.search_bar_border), Theme::reset());
    let written = body(base);
    print!("{}", " ".repeat(inner.saturating_sub(written)));
    print!(" {}", Theme::reset());
    print!("{}│{}", Theme::fg(&theme.colors.search_bar_border), Theme::reset());
}
