//! Message renderers: the full-pane failure screen and in-panel status lines.

use crate::ui::helpers::{position_cursor, truncate, width_of};
use crate::ui::layout::Rect;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{EmptyState, MessageKind, StatusMessage};

/// Renders a centered two-line message starting at row 6.
///
/// Used when the plugin could not start; the message uses `error_fg`, the subtitle
/// `text_dim` with dim styling.
///
/// ```text
/// [5 blank lines]
/// [left padding] MESSAGE [right padding]
/// [left padding] subtitle [right padding]
/// ```
pub fn render_empty_state(empty: &EmptyState, theme: &Theme, cols: usize) {
    let message = truncate(&empty.message, cols);
    let msg_len = width_of(&message);
    let msg_padding = (cols.saturating_sub(msg_len)) / 2;

    position_cursor(6, 1);
    print!("{}", Theme::fg(&theme.colors.error_fg));
    print!("{}", " ".repeat(msg_padding));
    print!("{message}");
    print!("{}", " ".repeat(cols.saturating_sub(msg_padding + msg_len)));
    print!("{}", Theme::reset());

    let subtitle = truncate(&empty.subtitle, cols);
    let sub_len = width_of(&subtitle);
    let sub_padding = (cols.saturating_sub(sub_len)) / 2;

    position_cursor(7, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(sub_padding));
    print!("{subtitle}");
    print!("{}", " ".repeat(cols.saturating_sub(sub_padding + sub_len)));
    print!("{}", Theme::reset());
}

/// Renders a status line inside a panel, two rows below its title.
pub fn render_panel_message(area: &Rect, message: &StatusMessage, theme: &Theme) {
    let row = area.row + 2;
    if row >= area.bottom() {
        return;
    }

    let color = match message.kind {
        MessageKind::Info => &theme.colors.empty_state_fg,
        MessageKind::Error => &theme.colors.error_fg,
    };
    let text = truncate(&message.text, area.width.saturating_sub(2));

    position_cursor(row, area.col + 1);
    print!("{}", Theme::fg(color));
    print!("{text}");
    print!("{}", Theme::reset());
}
