//! Centralized path management for nodepm
//! This module provides a single source of truth for all application paths

use std::path::{Path, PathBuf};

/// Name of the hidden per-project directory holding the project choice
pub const PROJECT_CONFIG_DIR: &str = ".nodepm";

/// File name used for both the project and the global persisted choice
pub const CHOICE_FILE_NAME: &str = "package-manager.json";

/// Get the nodepm directory under the user config directory.
///
/// Returns `None` when the platform has no notion of a config directory
/// (e.g. `HOME` unset). Unlike the write paths, this never creates anything.
pub fn nodepm_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("nodepm"))
}

/// Location of the project-scoped persisted choice for `project_dir`
pub fn project_choice_path(project_dir: &Path) -> PathBuf {
    project_dir.join(PROJECT_CONFIG_DIR).join(CHOICE_FILE_NAME)
}

/// Location of the global persisted choice inside `config_dir`
pub fn global_choice_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CHOICE_FILE_NAME)
}
