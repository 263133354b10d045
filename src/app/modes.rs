//! Focus state for keyboard input.
//!
//! The pane has three focusable regions. Focus decides how keys are interpreted: in the
//! search input, letters are typed; in the lists, they are commands.
//!
//! # Example
//!
//! ```rust
//! use moviedeck::app::Focus;
//!
//! assert_eq!(Focus::SearchInput.next(), Focus::Results);
//! assert_eq!(Focus::SearchInput.prev(), Focus::Favorites);
//! ```

/// Region receiving keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The query field. Characters edit the query; `Up`/`Down` walk suggestions.
    #[default]
    SearchInput,

    /// Search results. `j`/`k` move, `Enter`/`f`/`Space` toggle the favorite.
    Results,

    /// Favorites. As results, plus `J`/`K` to move the selected favorite.
    Favorites,
}

impl Focus {
    /// Next region in `Tab` order, wrapping.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::SearchInput => Self::Results,
            Self::Results => Self::Favorites,
            Self::Favorites => Self::SearchInput,
        }
    }

    /// Previous region in `Tab` order, wrapping.
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::SearchInput => Self::Favorites,
            Self::Results => Self::SearchInput,
            Self::Favorites => Self::Results,
        }
    }

    #[must_use]
    pub const fn is_list(self) -> bool {
        !matches!(self, Self::SearchInput)
    }
}
