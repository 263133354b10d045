//! Path utilities for the Zellij sandbox, where the host filesystem is mounted under
//! `/host`.

use std::path::PathBuf;

/// Default directory for the favorites store and the trace file.
///
/// Resolves to `/host/.local/share/zellij/moviedeck`. `/host` points to the cwd of the
/// last focused terminal (usually the home directory), so on the host this is typically
/// `~/.local/share/zellij/moviedeck`.
///
/// ```
/// use moviedeck::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/moviedeck"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("moviedeck")
}

/// Expands tilde paths to their `/host` equivalents.
///
/// ```
/// use moviedeck::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}
