//! Well-known file locations.

use std::path::PathBuf;

/// Application name used for the per-user configuration directory.
pub const APP_NAME: &str = "gitbot";

/// Per-user configuration directory, e.g. `~/.config/gitbot` on Linux.
///
/// Returns `None` when no home directory can be determined.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}
