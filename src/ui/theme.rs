//! Theme management and ANSI escape sequence generation.
//!
//! Color schemes come from the built-in Catppuccin palettes or a custom TOML file. Colors
//! are hex strings turned into 24-bit ANSI escapes at render time.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: Dark theme with warm tones (default)
//! - `catppuccin-latte`: Light theme with soft pastels
//! - `catppuccin-frappe`: Cool dark theme
//! - `catppuccin-macchiato`: Warm dark theme
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! favorite_fg = "#f9e2af"
//! error_fg = "#f38ba8"
//! placeholder_fg = "#cba6f7"
//! ```
//!
//! # Example
//!
//! ```rust
//! use moviedeck::Theme;
//!
//! let theme = Theme::from_name("catppuccin-latte").unwrap();
//! print!("{}Favorites{}", Theme::fg(&theme.colors.favorite_fg), Theme::reset());
//! ```

use crate::domain::error::{MovieDeckError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_THEME: &str = "catppuccin-mocha";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings (e.g. `"#cdd6f4"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Selected card and active suggestion.
    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, card details, unfocused chrome.
    pub text_dim: String,

    pub border: String,

    /// Search box frame, and the frame of the focused panel.
    pub search_bar_border: String,

    /// Query matches in suggestion titles.
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    /// Panel messages ("No favorites added yet.", "Searching...").
    pub empty_state_fg: String,

    /// Favorite marker and "Remove from favorites" buttons.
    pub favorite_fg: String,

    /// Search and suggestion errors, the failure screen.
    pub error_fg: String,

    /// Drop placeholder while dragging.
    pub placeholder_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name. `None` for unknown names.
    ///
    /// ```rust
    /// use moviedeck::Theme;
    ///
    /// assert_eq!(Theme::from_name("catppuccin-frappe").unwrap().name, "catppuccin-frappe");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            "catppuccin-frappe" => include_str!("../../themes/catppuccin-frappe.toml"),
            "catppuccin-macchiato" => include_str!("../../themes/catppuccin-macchiato.toml"),
            _ => return None,
        };

        match toml::from_str(toml_str) {
            Ok(theme) => Some(theme),
            Err(e) => {
                tracing::warn!(theme = %name, error = %e, "built-in theme failed to parse");
                None
            }
        }
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`MovieDeckError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            MovieDeckError::Theme(format!("failed to read {}: {e}", path.display()))
        })?;

        toml::from_str(&contents)
            .map_err(|e| MovieDeckError::Theme(format!("failed to parse {}: {e}", path.display())))
    }

    /// Picks the configured theme: the file if given, else the name, else the default.
    /// Anything that fails to load falls back to the default with a warning.
    #[must_use]
    pub fn resolve(name: Option<&str>, file: Option<&str>) -> Self {
        if let Some(file) = file {
            match Self::from_file(file) {
                Ok(theme) => return theme,
                Err(e) => tracing::warn!(error = %e, "failed to load theme file, using default"),
            }
        } else if let Some(name) = name {
            if let Some(theme) = Self::from_name(name) {
                return theme;
            }
            tracing::warn!(theme = %name, "unknown theme, using default");
        }
        Self::default()
    }

    /// Hex color to RGB; white on malformed input.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// ANSI 24-bit foreground escape for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background escape for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn underline() -> &'static str {
        "\u{001b}[4m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(|| Self {
            name: DEFAULT_THEME.to_string(),
            colors: ThemeColors {
                header_fg: "#cdd6f4".to_string(),
                header_bg: None,
                selection_fg: "#1e1e2e".to_string(),
                selection_bg: "#f5c2e7".to_string(),
                text_normal: "#cdd6f4".to_string(),
                text_dim: "#6c7086".to_string(),
                border: "#45475a".to_string(),
                search_bar_border: "#f5c2e7".to_string(),
                match_highlight_fg: "#1e1e2e".to_string(),
                match_highlight_bg: "#f9e2af".to_string(),
                empty_state_fg: "#89b4fa".to_string(),
                favorite_fg: "#f9e2af".to_string(),
                error_fg: "#f38ba8".to_string(),
                placeholder_fg: "#cba6f7".to_string(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn all_builtin_themes_parse() {
        for name in [
            "catppuccin-mocha",
            "catppuccin-latte",
            "catppuccin-frappe",
            "catppuccin-macchiato",
        ] {
            assert_eq!(Theme::from_name(name).map(|t| t.name), Some(name.to_string()));
        }
    }

    #[test]
    fn hex_parsing_falls_back_to_white() {
        assert_eq!(Theme::fg("#f38ba8"), "\u{001b}[38;2;243;139;168m");
        assert_eq!(Theme::bg("zz"), "\u{001b}[48;2;255;255;255m");
    }

    #[test]
    fn custom_theme_file_wins_over_name() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let custom = Theme {
            name: "custom".to_string(),
            ..Theme::default()
        };
        file.write_all(toml::to_string(&custom).unwrap().as_bytes())
            .unwrap();

        let path = file.path().to_string_lossy().to_string();
        let theme = Theme::resolve(Some("catppuccin-latte"), Some(&path));
        assert_eq!(theme.name, "custom");
    }

    #[test]
    fn unreadable_file_uses_default() {
        let theme = Theme::resolve(None, Some("/nonexistent/theme.toml"));
        assert_eq!(theme.name, DEFAULT_THEME);
    }
}
