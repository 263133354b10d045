//! View model types representing renderable UI state.
//!
//! View models are computed from `AppState` via `compute_viewmodel()` and consumed by the
//! renderer. They contain no business logic, only display-ready data: card text is already
//! formatted, toggle labels already derived from favorites membership, and highlight ranges
//! already computed.

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub search_bar: SearchBarInfo,
    pub results: PanelView,
    pub favorites: PanelView,

    /// Suggestions dropdown, when open.
    pub dropdown: Option<DropdownView>,

    pub footer: FooterInfo,
}

/// One of the two card panels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    /// Title row text, e.g. `" Favorites (3) "`.
    pub title: String,

    /// Cards in the visible window, top to bottom.
    pub cards: Vec<CardView>,

    /// Visible slot before which the drop placeholder is drawn.
    pub placeholder: Option<usize>,

    /// Shown instead of cards (empty, loading, or error state).
    pub message: Option<StatusMessage>,

    pub is_focused: bool,
}

/// A movie card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: String,

    /// Title and year, e.g. `"The Matrix (1999)"`.
    pub heading: String,

    /// Rank, actors, and poster source on one line.
    pub details: String,

    /// IMDb title page, drawn as a "View on IMDb" link row. Absent when the record has no
    /// detail URL.
    pub imdb_url: Option<String>,

    /// Toggle button text: "Add to favorites" or "Remove from favorites".
    pub button: String,

    pub is_selected: bool,
    pub is_favorite: bool,

    /// The card currently being dragged; drawn dimmed.
    pub is_dragged: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: MessageKind,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Info,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Error,
        }
    }
}

/// Suggestions dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownView {
    pub entries: Vec<SuggestionItem>,

    /// Loading, empty, or error text shown instead of entries.
    pub message: Option<StatusMessage>,
}

impl DropdownView {
    /// Lines the dropdown occupies.
    #[must_use]
    pub fn line_count(&self) -> usize {
        if self.message.is_some() {
            1
        } else {
            self.entries.len()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionItem {
    pub title: String,

    /// Release year shown after the title; empty when unknown.
    pub year: String,

    /// Character ranges matching the query, `(start, end)` with exclusive end.
    pub highlight_ranges: Vec<(usize, usize)>,

    pub is_active: bool,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text for the focused region.
    pub keybindings: String,
}

/// Search bar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
    pub is_focused: bool,
}

/// Full-pane message shown instead of the UI when the plugin could not start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}
