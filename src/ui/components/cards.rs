//! Card panel renderer for the results and favorites lists.
//!
//! ```text
//! ─ Favorites (2) ──────────────────────────
//!
//!  ★ The Matrix (1999)   [Remove from favorites]
//!    Rank: 1 | Keanu Reeves | poster: m.media-amazon.com
//!    View on IMDb: https://www.imdb.com/title/tt0133093
//!  ┄┄┄┄┄┄┄┄┄┄┄┄┄┄ drop here ┄┄┄┄┄┄┄┄┄┄┄┄┄┄
//!  ★ Heat (1995)         [Remove from favorites]
//!    Rank: Not ranked | poster: placeholder
//!    View on IMDb: https://www.imdb.com/title/tt0113277
//! ```
//!
//! Card rows come from [`card_top`], the same geometry mouse hit-testing uses, and the
//! toggle button is right-aligned to the panel edge on the card's title row.

use super::empty::render_panel_message;
use crate::ui::helpers::{hyperlink, position_cursor, truncate, width_of};
use crate::ui::layout::{button_width, card_capacity, card_top, Rect};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CardView, PanelView};

const FAVORITE_MARKER: &str = "★ ";
const DROP_LABEL: &str = " drop here ";
const LINK_LABEL: &str = "View on IMDb: ";

/// Renders a panel: title row, then either its message or its cards.
pub fn render_panel(area: &Rect, panel: &PanelView, theme: &Theme) {
    if area.height == 0 || area.width == 0 {
        return;
    }

    render_title(area, panel, theme);
    for row in area.row + 1..area.bottom() {
        clear_row(area, row);
    }

    if let Some(message) = &panel.message {
        render_panel_message(area, message, theme);
        return;
    }

    let capacity = card_capacity(area);
    for (slot, card) in panel.cards.iter().take(capacity).enumerate() {
        render_card(area, slot, card, theme);
    }

    if let Some(slot) = panel.placeholder.filter(|slot| *slot <= capacity) {
        render_placeholder(area, slot, theme);
    }
}

fn render_title(area: &Rect, panel: &PanelView, theme: &Theme) {
    let color = if panel.is_focused {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };
    let title = truncate(&panel.title, area.width.saturating_sub(2));

    position_cursor(area.row, area.col);
    print!("{}", Theme::fg(color));
    print!("─");
    if panel.is_focused {
        print!("{}", Theme::bold());
    }
    print!("{title}");
    print!("{}", Theme::reset());
    print!("{}", Theme::fg(color));
    print!(
        "{}",
        "─".repeat(area.width.saturating_sub(1 + width_of(&title)))
    );
    print!("{}", Theme::reset());
}

fn clear_row(area: &Rect, row: usize) {
    position_cursor(row, area.col);
    print!("{}", " ".repeat(area.width));
}

fn render_card(area: &Rect, slot: usize, card: &CardView, theme: &Theme) {
    let top = card_top(area, slot);
    let button = format!("[{}]", card.button);
    let button_len = button_width(&card.button);

    let base = if card.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else if card.is_dragged {
        format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim))
    } else {
        Theme::fg(&theme.colors.text_normal)
    };

    let marker = if card.is_favorite { FAVORITE_MARKER } else { "  " };
    let heading_room = area
        .width
        .saturating_sub(1 + width_of(marker) + button_len + 1);
    let heading = truncate(&card.heading, heading_room);

    position_cursor(top + 1, area.col);
    print!("{base} ");
    if card.is_favorite && !card.is_selected {
        print!("{}{marker}{base}", Theme::fg(&theme.colors.favorite_fg));
    } else {
        print!("{marker}");
    }
    print!("{}", Theme::bold());
    print!("{heading}");
    print!("{}{base}", Theme::reset());
    print!(
        "{}",
        " ".repeat(area.width.saturating_sub(1 + width_of(marker) + width_of(&heading) + button_len))
    );
    if card.is_favorite && !card.is_selected {
        print!("{}", Theme::fg(&theme.colors.favorite_fg));
    }
    print!("{button}");
    print!("{}", Theme::reset());

    let details = truncate(&card.details, area.width.saturating_sub(3));
    position_cursor(top + 2, area.col);
    print!("{base}   ");
    if !card.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{details}");
    print!("{}", " ".repeat(area.width.saturating_sub(3 + width_of(&details))));
    print!("{}", Theme::reset());

    render_link(area, top + 3, card, &base, theme);
}

/// The "View on IMDb" row; the whole visible text is the link.
fn render_link(area: &Rect, row: usize, card: &CardView, base: &str, theme: &Theme) {
    position_cursor(row, area.col);
    print!("{base}   ");

    let Some(url) = card.imdb_url.as_deref() else {
        print!("{}", " ".repeat(area.width.saturating_sub(3)));
        print!("{}", Theme::reset());
        return;
    };

    let text = truncate(&format!("{LINK_LABEL}{url}"), area.width.saturating_sub(3));
    if !card.is_selected {
        print!("{}", Theme::fg(&theme.colors.search_bar_border));
    }
    print!("{}", hyperlink(url, &text));
    print!("{}", " ".repeat(area.width.saturating_sub(3 + width_of(&text))));
    print!("{}", Theme::reset());
}

/// Draws the drop placeholder in the gap row above visible slot `slot`.
fn render_placeholder(area: &Rect, slot: usize, theme: &Theme) {
    let row = card_top(area, slot);
    if row >= area.bottom() {
        return;
    }

    let inner = area.width.saturating_sub(2);
    let label_len = width_of(DROP_LABEL);
    let left = inner.saturating_sub(label_len) / 2;
    let right = inner.saturating_sub(left + label_len);

    position_cursor(row, area.col + 1);
    print!("{}", Theme::fg(&theme.colors.placeholder_fg));
    if inner > label_len {
        print!("{}{DROP_LABEL}{}", "┄".repeat(left), "┄".repeat(right));
    } else {
        print!("{}", "┄".repeat(inner));
    }
    print!("{}", Theme::reset());
}
