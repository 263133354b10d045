//! Plugin startup progress.
//!
//! ```text
//! Pending(config) ──settle──▶ Ready(state)
//!        │
//!        └────────settle (init error) / invalid config──▶ Failed(theme)
//! ```
//!
//! The application state is built only once the permission prompt has settled, so the
//! data directory under `/host` is reachable when the favorites store opens.

use crate::app::AppState;
use crate::ui::Theme;
use crate::{initialize, Config};

#[derive(Debug)]
pub enum Phase {
    /// Loaded; waiting for the permission prompt to settle.
    Pending(Config),
    Ready(AppState),
    /// Startup failed; the failure screen is drawn in this theme.
    Failed(Theme),
}

impl Phase {
    /// Starts in `Pending`, or straight in `Failed` if the configuration is unusable.
    #[must_use]
    pub fn new(config: Config) -> Self {
        match config.validate() {
            Ok(()) => Self::Pending(config),
            Err(e) => {
                tracing::error!(error = %e, "invalid configuration");
                Self::Failed(failure_theme(&config))
            }
        }
    }

    /// Builds the application state if still pending.
    ///
    /// Returns whether the phase changed, in which case the pane must be redrawn.
    pub fn settle(&mut self) -> bool {
        let Self::Pending(config) = &*self else {
            return false;
        };

        *self = match initialize(config) {
            Ok(app) => Self::Ready(app),
            Err(e) => {
                tracing::error!(error = %e, "plugin failed to start");
                Self::Failed(failure_theme(config))
            }
        };
        true
    }

    pub fn app_mut(&mut self) -> Option<&mut AppState> {
        match self {
            Self::Ready(app) => Some(app),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

fn failure_theme(config: &Config) -> Theme {
    Theme::resolve(config.theme_name.as_deref(), config.theme_file.as_deref())
}
