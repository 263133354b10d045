//! User interface rendering layer with component-based architecture.
//!
//! Transforms view models into ANSI-styled output through composable components.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//!                                                 ↑
//!                      Layout (also used by mouse hit-testing)
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`layout`]: Pane geometry shared by rendering and hit-testing
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (highlighting, truncation)
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod layout;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use layout::{CardHit, Layout, Rect};
pub use renderer::{render, render_failure};
pub use theme::Theme;
pub use viewmodel::{
    CardView, DropdownView, EmptyState, FooterInfo, HeaderInfo, PanelView, SearchBarInfo,
    StatusMessage, SuggestionItem, UIViewModel,
};
