//! MovieDeck: a Zellij plugin for searching movies and keeping a favorites list.
//!
//! - Movie lookup against a remote search endpoint through the host's web requests
//! - A persisted, ordered favorites list, unique by movie id
//! - Reordering favorites by mouse drag or with `J`/`K`
//! - Debounced typeahead suggestions with match highlighting

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, typeahead, drag-reorder          │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Favorites     │   │ Search        │
//! │ (ui/)         │   │ (favorites/)  │   │ (search/)     │
//! │ - Layout      │   │ - Ordered,    │   │ - Request URL │
//! │ - Components  │   │   unique list │   │ - Parsing     │
//! │ - Theming     │   │ - Persistence │   │ - Sequencing  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                             │
//! ┌─────────────────────────────────────────────────────┐
//! │  Storage (storage/)  ·  Domain (domain/)            │
//! │  - Key-value store   ·  - MovieRecord, errors       │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/moviedeck.wasm" {
//!         api_url "https://imdb.iamidiotareyoutoo.com/search"
//!         data_dir "~/.local/share/zellij/moviedeck"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use moviedeck::{handle_event, initialize, Action, Config, Event};
//!
//! let dir = tempfile::tempdir()?;
//! let config = Config {
//!     data_dir: dir.path().to_path_buf(),
//!     ..Config::default()
//! };
//! let mut state = initialize(&config)?;
//!
//! for c in "matrix".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! let (_, actions) = handle_event(&mut state, &Event::Submit)?;
//! assert!(matches!(&actions[0], Action::WebRequest { url, .. } if url.ends_with("?q=matrix")));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod favorites;
pub mod infrastructure;
pub mod search;
pub mod storage;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, Focus};
pub use domain::{MovieDeckError, MovieRecord, PosterSource, Result};
pub use ui::Theme;

use favorites::FavoritesStore;
use search::{SearchService, DEFAULT_API_URL};
use std::collections::BTreeMap;
use std::path::PathBuf;
use storage::{FileStorage, MemoryStorage, Storage};

/// Plugin configuration parsed from Zellij's configuration map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the lookup endpoint. Must be `http` or `https`.
    pub api_url: String,

    /// Directory for the favorites store and the trace file. `~` maps to `/host`.
    pub data_dir: PathBuf,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            data_dir: infrastructure::get_data_dir(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Keys: `api_url`, `data_dir`, `theme`, `theme_file`, `trace_level`. Blank values
    /// count as absent.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use moviedeck::Config;
    ///
    /// let map = BTreeMap::from([
    ///     ("api_url".to_string(), "http://localhost:8080/search".to_string()),
    ///     ("data_dir".to_string(), "~/movies".to_string()),
    /// ]);
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.api_url, "http://localhost:8080/search");
    /// assert_eq!(config.data_dir.to_str(), Some("/host/movies"));
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };
        let defaults = Self::default();

        Self {
            api_url: get("api_url").unwrap_or(defaults.api_url),
            data_dir: get("data_dir")
                .map(|dir| PathBuf::from(infrastructure::expand_tilde(&dir)))
                .unwrap_or(defaults.data_dir),
            theme_name: get("theme"),
            theme_file: get("theme_file").map(|f| infrastructure::expand_tilde(&f)),
            trace_level: get("trace_level"),
        }
    }

    /// Checks the settings that would make the plugin unusable.
    ///
    /// # Errors
    ///
    /// Returns [`MovieDeckError::Config`] if `api_url` is not an `http(s)` URL with a host.
    pub fn validate(&self) -> Result<()> {
        let rest = self
            .api_url
            .strip_prefix("https://")
            .or_else(|| self.api_url.strip_prefix("http://"))
            .ok_or_else(|| {
                MovieDeckError::Config(format!("api_url must be http(s): {}", self.api_url))
            })?;

        if rest.split(['/', '?']).next().is_some_and(str::is_empty) {
            return Err(MovieDeckError::Config(format!(
                "api_url has no host: {}",
                self.api_url
            )));
        }
        Ok(())
    }
}

/// Builds the application state: theme, search service, and the favorites store.
///
/// The store lives in `config.data_dir`. If that directory cannot be used, favorites are
/// kept in memory for the session and a warning is logged.
///
/// # Errors
///
/// Returns [`MovieDeckError::Config`] if the configuration is invalid; the shim then
/// shows the failure screen instead of the UI.
pub fn initialize(config: &Config) -> Result<AppState> {
    let _span = tracing::debug_span!("initialize").entered();
    config.validate()?;

    let theme = Theme::resolve(config.theme_name.as_deref(), config.theme_file.as_deref());

    let storage: Box<dyn Storage> = match FileStorage::open(&config.data_dir) {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            tracing::warn!(
                data_dir = %config.data_dir.display(),
                error = %e,
                "data directory unavailable, favorites will not persist"
            );
            Box::new(MemoryStorage::new())
        }
    };
    let favorites = FavoritesStore::open(storage);

    tracing::debug!(
        api_url = %config.api_url,
        theme = %theme.name,
        favorites = favorites.len(),
        "plugin initialized"
    );
    Ok(AppState::new(
        favorites,
        SearchService::new(config.api_url.clone()),
        theme,
    ))
}
