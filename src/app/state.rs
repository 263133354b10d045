//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the central state container for the plugin. It owns
//! the favorites store and holds all transient UI state: the query, the latest search
//! outcome, selections, focus, typeahead, and any drag in progress.
//!
//! # View Model Computation
//!
//! `compute_viewmodel` transforms state into a renderable [`UIViewModel`]. Toggle labels are
//! derived from favorites membership for every card at this point, so all renderings of
//! the same movie (duplicate results, the favorites panel) always agree.
//!
//! # Example
//!
//! ```rust
//! use moviedeck::app::AppState;
//! use moviedeck::favorites::FavoritesStore;
//! use moviedeck::search::SearchService;
//! use moviedeck::storage::MemoryStorage;
//! use moviedeck::Theme;
//!
//! let store = FavoritesStore::open(Box::new(MemoryStorage::new()));
//! let state = AppState::new(store, SearchService::default(), Theme::default());
//! let viewmodel = state.compute_viewmodel();
//! assert_eq!(viewmodel.favorites.message.unwrap().text, "No favorites added yet.");
//! ```

use super::drag::DragState;
use super::modes::Focus;
use super::typeahead::{highlight_ranges, SuggestionState, Typeahead};
use crate::domain::{MovieRecord, PosterSource};
use crate::favorites::FavoritesStore;
use crate::search::{RequestTracker, SearchService};
use crate::ui::layout::{card_capacity, visible_window, Layout, Rect};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    CardView, DropdownView, FooterInfo, HeaderInfo, PanelView, SearchBarInfo, StatusMessage,
    SuggestionItem, UIViewModel,
};
use std::ops::Range;

pub const ADD_LABEL: &str = "Add to favorites";
pub const REMOVE_LABEL: &str = "Remove from favorites";

/// Outcome of the latest full search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultsState {
    /// Nothing searched yet.
    #[default]
    Initial,
    /// A search was submitted with a blank query.
    NeedsQuery,
    Searching,
    Loaded(Vec<MovieRecord>),
    /// Failure reason, shown inline.
    Failed(String),
}

impl ResultsState {
    #[must_use]
    pub fn movies(&self) -> &[MovieRecord] {
        match self {
            Self::Loaded(movies) => movies,
            _ => &[],
        }
    }

    fn message(&self) -> Option<StatusMessage> {
        match self {
            Self::Initial => None,
            Self::NeedsQuery => Some(StatusMessage::info("Please enter a search term.")),
            Self::Searching => Some(StatusMessage::info("Searching...")),
            Self::Loaded(movies) if movies.is_empty() => {
                Some(StatusMessage::info("No results found."))
            }
            Self::Loaded(_) => None,
            Self::Failed(reason) => Some(StatusMessage::error(format!(
                "Error: Failed to search movies: {reason}"
            ))),
        }
    }
}

/// Central application state container.
///
/// Mutated by the event handler in response to host events; view models are computed
/// on demand from it.
#[derive(Debug)]
pub struct AppState {
    /// Color scheme for UI rendering.
    pub theme: Theme,

    pub service: SearchService,

    /// The favorites list and the storage handle behind it.
    pub favorites: FavoritesStore,

    /// Last-request-wins bookkeeping for searches and suggestion lookups.
    pub requests: RequestTracker,

    pub typeahead: Typeahead,
    pub drag: DragState,
    pub focus: Focus,

    /// Text in the search input.
    pub query: String,

    pub results: ResultsState,

    /// Zero-based selection within the results. Wraps during navigation.
    pub results_selected: usize,

    /// Zero-based selection within the favorites. Wraps during navigation.
    pub favorites_selected: usize,

    /// Pane size as `(rows, cols)`, updated by the shim before each render.
    pub viewport: (usize, usize),
}

impl AppState {
    #[must_use]
    pub fn new(favorites: FavoritesStore, service: SearchService, theme: Theme) -> Self {
        Self {
            theme,
            service,
            favorites,
            requests: RequestTracker::default(),
            typeahead: Typeahead::default(),
            drag: DragState::default(),
            focus: Focus::default(),
            query: String::new(),
            results: ResultsState::default(),
            results_selected: 0,
            favorites_selected: 0,
            viewport: (24, 80),
        }
    }

    pub fn set_viewport(&mut self, rows: usize, cols: usize) {
        self.viewport = (rows, cols);
    }

    /// Geometry for the current viewport.
    #[must_use]
    pub fn layout(&self) -> Layout {
        Layout::compute(self.viewport.0, self.viewport.1)
    }

    /// Toggle label for a movie, from current favorites membership.
    #[must_use]
    pub fn toggle_label(&self, id: &str) -> &'static str {
        if self.favorites.contains(id) {
            REMOVE_LABEL
        } else {
            ADD_LABEL
        }
    }

    /// Indices of the results currently on screen.
    #[must_use]
    pub fn results_window(&self) -> Range<usize> {
        visible_window(
            self.results.movies().len(),
            self.results_selected,
            card_capacity(&self.layout().results),
        )
    }

    /// Indices of the favorites currently on screen.
    #[must_use]
    pub fn favorites_window(&self) -> Range<usize> {
        visible_window(
            self.favorites.len(),
            self.favorites_selected,
            card_capacity(&self.layout().favorites),
        )
    }

    /// Moves the selection in the focused list down by one, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        let (len, selected) = match self.focus {
            Focus::Results => (self.results.movies().len(), &mut self.results_selected),
            Focus::Favorites => (self.favorites.len(), &mut self.favorites_selected),
            Focus::SearchInput => return,
        };
        if len > 0 {
            *selected = (*selected + 1) % len;
        }
    }

    /// Moves the selection in the focused list up by one, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        let (len, selected) = match self.focus {
            Focus::Results => (self.results.movies().len(), &mut self.results_selected),
            Focus::Favorites => (self.favorites.len(), &mut self.favorites_selected),
            Focus::SearchInput => return,
        };
        if len > 0 {
            *selected = if *selected == 0 { len - 1 } else { *selected - 1 };
        }
    }

    /// The selected movie in the focused list, if any.
    #[must_use]
    pub fn selected_movie(&self) -> Option<&MovieRecord> {
        match self.focus {
            Focus::Results => self.results.movies().get(self.results_selected),
            Focus::Favorites => self.favorites.list().get(self.favorites_selected),
            Focus::SearchInput => None,
        }
    }

    /// Keeps both selections within their lists after the lists change.
    pub fn clamp_selection(&mut self) {
        self.results_selected = self
            .results_selected
            .min(self.results.movies().len().saturating_sub(1));
        self.favorites_selected = self
            .favorites_selected
            .min(self.favorites.len().saturating_sub(1));
    }

    /// Screen area of the suggestions dropdown, when open.
    #[must_use]
    pub fn dropdown_area(&self) -> Option<Rect> {
        self.compute_dropdown()
            .map(|dropdown| self.layout().dropdown(dropdown.line_count()))
    }

    /// Computes a renderable view model for the current viewport.
    #[must_use]
    pub fn compute_viewmodel(&self) -> UIViewModel {
        UIViewModel {
            header: HeaderInfo {
                title: " MovieDeck ".to_string(),
            },
            search_bar: SearchBarInfo {
                query: self.query.clone(),
                is_focused: self.focus == Focus::SearchInput,
            },
            results: self.compute_results_panel(),
            favorites: self.compute_favorites_panel(),
            dropdown: self.compute_dropdown(),
            footer: self.compute_footer(),
        }
    }

    fn compute_results_panel(&self) -> PanelView {
        let movies = self.results.movies();
        let window = self.results_window();
        let focused = self.focus == Focus::Results;

        PanelView {
            title: format!(" Results ({}) ", movies.len()),
            cards: movies[window.clone()]
                .iter()
                .enumerate()
                .map(|(offset, movie)| {
                    let index = window.start + offset;
                    self.compute_card(movie, focused && index == self.results_selected, false)
                })
                .collect(),
            placeholder: None,
            message: self.results.message(),
            is_focused: focused,
        }
    }

    fn compute_favorites_panel(&self) -> PanelView {
        let favorites = self.favorites.list();
        let window = self.favorites_window();
        let focused = self.focus == Focus::Favorites;
        let dragged = self.drag.dragged_index();

        let placeholder = self
            .drag
            .placeholder()
            .filter(|slot| *slot >= window.start && *slot <= window.end)
            .map(|slot| slot - window.start);

        PanelView {
            title: format!(" Favorites ({}) ", favorites.len()),
            cards: favorites[window.clone()]
                .iter()
                .enumerate()
                .map(|(offset, movie)| {
                    let index = window.start + offset;
                    self.compute_card(
                        movie,
                        focused && index == self.favorites_selected,
                        dragged == Some(index),
                    )
                })
                .collect(),
            placeholder,
            message: favorites
                .is_empty()
                .then(|| StatusMessage::info("No favorites added yet.")),
            is_focused: focused,
        }
    }

    fn compute_card(&self, movie: &MovieRecord, is_selected: bool, is_dragged: bool) -> CardView {
        let is_favorite = self.favorites.contains(&movie.id);

        let mut details = vec![format!("Rank: {}", movie.display_rank())];
        if let Some(actors) = movie.actors.as_deref().filter(|a| !a.is_empty()) {
            details.push(actors.to_string());
        }
        details.push(PosterSource::resolve(&movie.poster_image).label());

        CardView {
            id: movie.id.clone(),
            heading: format!("{} ({})", movie.title, movie.display_year()),
            details: details.join(" | "),
            imdb_url: Some(movie.imdb_url.trim())
                .filter(|url| !url.is_empty())
                .map(String::from),
            button: self.toggle_label(&movie.id).to_string(),
            is_selected,
            is_favorite,
            is_dragged,
        }
    }

    fn compute_dropdown(&self) -> Option<DropdownView> {
        let message = match &self.typeahead.state {
            SuggestionState::Hidden => return None,
            SuggestionState::Loading => Some(StatusMessage::info("Searching...")),
            SuggestionState::Empty => Some(StatusMessage::info("No results found")),
            SuggestionState::Failed => Some(StatusMessage::error("Error fetching suggestions")),
            SuggestionState::Ready(_) => None,
        };

        let entries = self
            .typeahead
            .suggestions()
            .iter()
            .enumerate()
            .map(|(idx, movie)| SuggestionItem {
                title: movie.title.clone(),
                year: movie.year.clone(),
                highlight_ranges: highlight_ranges(&movie.title, &self.typeahead.query),
                is_active: self.typeahead.active == Some(idx),
            })
            .collect();

        Some(DropdownView { entries, message })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.focus {
            Focus::SearchInput if self.typeahead.is_visible() => {
                "Up/Down: choose suggestion  Enter: select  Esc: close suggestions  Tab: results"
            }
            Focus::SearchInput => "Type to search  Enter: search  Tab: results  Ctrl+n/p: navigate",
            Focus::Results => {
                "j/k: navigate  Enter/f: toggle favorite  Tab: favorites  /: search  q: quit"
            }
            Focus::Favorites => {
                "j/k: navigate  J/K: move  Enter/f: remove  drag to reorder  Tab: search  q: quit"
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn state() -> AppState {
        let store = FavoritesStore::open(Box::new(MemoryStorage::new()));
        AppState::new(store, SearchService::default(), Theme::default())
    }

    fn movie(id: &str, title: &str) -> MovieRecord {
        MovieRecord::new(id, title)
    }

    #[test]
    fn results_messages_follow_state() {
        let mut state = state();
        assert!(state.compute_viewmodel().results.message.is_none());

        state.results = ResultsState::NeedsQuery;
        assert_eq!(
            state.compute_viewmodel().results.message.unwrap().text,
            "Please enter a search term."
        );

        state.results = ResultsState::Loaded(vec![]);
        assert_eq!(state.compute_viewmodel().results.message.unwrap().text, "No results found.");

        state.results = ResultsState::Failed("HTTP error! status: 500".to_string());
        assert_eq!(
            state.compute_viewmodel().results.message.unwrap().text,
            "Error: Failed to search movies: HTTP error! status: 500"
        );
    }

    #[test]
    fn labels_follow_membership_for_duplicates() {
        let mut state = state();
        state.results = ResultsState::Loaded(vec![
            movie("tt1", "Heat"),
            movie("tt2", "Ronin"),
            movie("tt1", "Heat"),
        ]);
        state.favorites.add(movie("tt1", "Heat")).unwrap();

        let vm = state.compute_viewmodel();
        let labels: Vec<&str> = vm.results.cards.iter().map(|c| c.button.as_str()).collect();
        assert_eq!(labels, vec![REMOVE_LABEL, ADD_LABEL, REMOVE_LABEL]);
        assert_eq!(vm.favorites.cards[0].button, REMOVE_LABEL);
    }

    #[test]
    fn selection_wraps_in_focused_list() {
        let mut state = state();
        state.results = ResultsState::Loaded(vec![movie("a", "A"), movie("b", "B")]);
        state.focus = Focus::Results;

        state.move_selection_up();
        assert_eq!(state.results_selected, 1);
        state.move_selection_down();
        assert_eq!(state.results_selected, 0);
        assert_eq!(state.selected_movie().map(|m| m.id.as_str()), Some("a"));
    }

    #[test]
    fn card_details_include_poster_source() {
        let mut state = state();
        let mut matrix = movie("tt0133093", "The Matrix").with_year("1999");
        matrix.actors = Some("Keanu Reeves".to_string());
        state.results = ResultsState::Loaded(vec![matrix]);

        let card = &state.compute_viewmodel().results.cards[0];
        assert_eq!(card.heading, "The Matrix (1999)");
        assert_eq!(card.details, "Rank: Not ranked | Keanu Reeves | poster: placeholder");
        assert_eq!(
            card.imdb_url.as_deref(),
            Some("https://www.imdb.com/title/tt0133093")
        );
    }

    #[test]
    fn blank_detail_url_has_no_link() {
        let mut state = state();
        let mut heat = movie("tt0113277", "Heat");
        heat.imdb_url = "  ".to_string();
        state.favorites.add(heat).unwrap();

        assert!(state.compute_viewmodel().favorites.cards[0].imdb_url.is_none());
    }

    #[test]
    fn suggestions_carry_year() {
        let mut state = state();
        state.typeahead.show_loading("mat");
        state.typeahead.show_results(vec![
            movie("tt0133093", "The Matrix").with_year("1999"),
            movie("tt9", "Matilda"),
        ]);

        let dropdown = state.compute_viewmodel().dropdown.unwrap();
        assert_eq!(dropdown.entries[0].year, "1999");
        assert_eq!(dropdown.entries[0].highlight_ranges, vec![(4, 7)]);
        assert_eq!(dropdown.entries[1].year, "");
    }
}
