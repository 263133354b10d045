//! Typeahead suggestions for the search input.
//!
//! Edits to the query are debounced: each edit arms a one-second timer and only the last
//! edit in the window issues a lookup. The host's timers carry no identity, so
//! [`Debouncer`] counts outstanding timers and fires once the last one elapses.

use crate::domain::MovieRecord;

/// Queries shorter than this (after trimming) never produce suggestions.
pub const MIN_QUERY_CHARS: usize = 3;

/// Quiet period after the last edit before a lookup is issued.
pub const DEBOUNCE_SECS: f64 = 1.0;

pub const MAX_SUGGESTIONS: usize = 7;

/// Whether `query` is long enough to look up.
#[must_use]
pub fn is_suggestible(query: &str) -> bool {
    query.trim().chars().count() >= MIN_QUERY_CHARS
}

/// Single-slot debounce over anonymous host timers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Debouncer {
    outstanding: usize,
    pending: Option<String>,
}

impl Debouncer {
    /// Records an edit. The caller must start one timer per call.
    pub fn arm(&mut self, query: impl Into<String>) {
        self.outstanding += 1;
        self.pending = Some(query.into());
    }

    /// Drops the pending query. Timers already started still run out harmlessly.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Handles one elapsed timer. Returns the query to look up once the last armed timer
    /// has elapsed.
    pub fn on_timer(&mut self) -> Option<String> {
        self.outstanding = self.outstanding.saturating_sub(1);
        if self.outstanding == 0 {
            self.pending.take()
        } else {
            None
        }
    }
}

/// Case-insensitive character ranges of every non-overlapping occurrence of `query` in
/// `text`.
///
/// Ranges are `(start, end)` character indices with exclusive end, the form the renderer
/// highlights.
///
/// ```
/// use moviedeck::app::typeahead::highlight_ranges;
///
/// assert_eq!(highlight_ranges("The Matrix Reloaded", "matrix"), vec![(4, 10)]);
/// assert_eq!(highlight_ranges("Aliens vs ALIEN", "alien"), vec![(0, 5), (10, 15)]);
/// ```
#[must_use]
pub fn highlight_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    let needle: Vec<char> = query.trim().chars().map(fold).collect();
    if needle.is_empty() {
        return Vec::new();
    }

    let haystack: Vec<char> = text.chars().map(fold).collect();
    let mut ranges = Vec::new();
    let mut start = 0;

    while start + needle.len() <= haystack.len() {
        if haystack[start..start + needle.len()] == needle[..] {
            ranges.push((start, start + needle.len()));
            start += needle.len();
        } else {
            start += 1;
        }
    }

    ranges
}

/// Per-character lowercase that keeps indices aligned with the original text.
fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// What the dropdown is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionState {
    Hidden,
    Loading,
    Ready(Vec<MovieRecord>),
    Empty,
    Failed,
}

/// Dropdown state: current suggestions, the active entry, and the debounce slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Typeahead {
    pub debouncer: Debouncer,
    pub state: SuggestionState,
    pub active: Option<usize>,

    /// Query the current suggestions were fetched for; drives highlighting.
    pub query: String,
}

impl Default for Typeahead {
    fn default() -> Self {
        Self {
            debouncer: Debouncer::default(),
            state: SuggestionState::Hidden,
            active: None,
            query: String::new(),
        }
    }
}

impl Typeahead {
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.state != SuggestionState::Hidden
    }

    /// Hides the dropdown and forgets any pending lookup.
    pub fn dismiss(&mut self) {
        self.debouncer.cancel();
        self.state = SuggestionState::Hidden;
        self.active = None;
    }

    pub fn show_loading(&mut self, query: &str) {
        self.query = query.to_string();
        self.state = SuggestionState::Loading;
        self.active = None;
    }

    /// Shows up to [`MAX_SUGGESTIONS`] results, or the empty state.
    pub fn show_results(&mut self, mut movies: Vec<MovieRecord>) {
        movies.truncate(MAX_SUGGESTIONS);
        self.active = None;
        self.state = if movies.is_empty() {
            SuggestionState::Empty
        } else {
            SuggestionState::Ready(movies)
        };
    }

    pub fn show_error(&mut self) {
        self.active = None;
        self.state = SuggestionState::Failed;
    }

    #[must_use]
    pub fn suggestions(&self) -> &[MovieRecord] {
        match &self.state {
            SuggestionState::Ready(movies) => movies,
            _ => &[],
        }
    }

    #[must_use]
    pub fn active_suggestion(&self) -> Option<&MovieRecord> {
        self.active.and_then(|idx| self.suggestions().get(idx))
    }

    /// Moves the active entry by one with wraparound and returns it.
    ///
    /// From no active entry, `Down` lands on the first and `Up` on the last.
    pub fn navigate(&mut self, down: bool) -> Option<&MovieRecord> {
        let len = self.suggestions().len();
        if len == 0 {
            return None;
        }

        self.active = Some(match (self.active, down) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(idx), true) => (idx + 1) % len,
            (Some(0), false) => len - 1,
            (Some(idx), false) => idx - 1,
        });
        self.active_suggestion()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movies(n: usize) -> Vec<MovieRecord> {
        (0..n)
            .map(|i| MovieRecord::new(format!("tt{i}"), format!("Movie {i}")))
            .collect()
    }

    #[test]
    fn last_edit_in_window_wins() {
        let mut debouncer = Debouncer::default();
        debouncer.arm("mat");
        debouncer.arm("matr");

        assert_eq!(debouncer.on_timer(), None);
        assert_eq!(debouncer.on_timer().as_deref(), Some("matr"));
        assert_eq!(debouncer.on_timer(), None);
    }

    #[test]
    fn cancelled_debounce_never_fires() {
        let mut debouncer = Debouncer::default();
        debouncer.arm("mat");
        debouncer.cancel();
        assert_eq!(debouncer.on_timer(), None);
    }

    #[test]
    fn suggestible_counts_trimmed_chars() {
        assert!(!is_suggestible("  ma  "));
        assert!(is_suggestible("été"));
        assert!(is_suggestible(" mat"));
    }

    #[test]
    fn highlight_handles_case_and_repeats() {
        assert_eq!(highlight_ranges("aaaa", "aa"), vec![(0, 2), (2, 4)]);
        assert_eq!(highlight_ranges("Ça va", "ÇA"), vec![(0, 2)]);
        assert!(highlight_ranges("Heat", "").is_empty());
        assert!(highlight_ranges("Heat", "cold").is_empty());
    }

    #[test]
    fn results_are_capped() {
        let mut typeahead = Typeahead::default();
        typeahead.show_results(movies(12));
        assert_eq!(typeahead.suggestions().len(), MAX_SUGGESTIONS);

        typeahead.show_results(Vec::new());
        assert_eq!(typeahead.state, SuggestionState::Empty);
    }

    #[test]
    fn navigation_wraps_both_ways() {
        let mut typeahead = Typeahead::default();
        typeahead.show_results(movies(3));

        assert_eq!(typeahead.navigate(false).map(|m| m.id.as_str()), Some("tt2"));
        assert_eq!(typeahead.navigate(true).map(|m| m.id.as_str()), Some("tt0"));
        assert_eq!(typeahead.navigate(false).map(|m| m.id.as_str()), Some("tt2"));
    }
}
