//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event. The plugin
//! shim executes them in order against the Zellij host API: HTTP requests go through
//! `web_request`, timers through `set_timeout`, and closing through `hide_self`.
//!
//! # Example
//!
//! ```rust
//! use moviedeck::Action;
//!
//! let actions = vec![
//!     Action::SetTimeout { seconds: 1.0 },
//!     Action::CloseFocus,
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use std::collections::BTreeMap;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Issues an HTTP `GET`.
    ///
    /// The response arrives later as a web response event carrying `context` back
    /// unchanged, which is how responses are matched to requests.
    WebRequest {
        url: String,
        context: BTreeMap<String, String>,
    },

    /// Starts a one-shot host timer; a timer event follows after `seconds`.
    SetTimeout { seconds: f64 },
}
