//! Persisted package manager choices, project-scoped and global.

use super::manager::PackageManager;
use crate::common::{fsutil, paths};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// JSON record written by the "set" operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedChoice {
    pub package_manager: PackageManager,
    pub set_at: DateTime<Utc>,
}

#[derive(thiserror::Error, Debug)]
pub enum SelectionError {
    #[error("unknown package manager: {0} (expected one of npm, pnpm, yarn, bun)")]
    UnknownPackageManager(String),

    #[error("unable to determine user config directory")]
    NoConfigDir,

    #[error("failed to serialize package manager choice: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {}: {error:#}", path.display())]
    Write { path: PathBuf, error: anyhow::Error },
}

/// Reads and writes persisted choices.
///
/// The global location is injected; `None` means the platform has no config
/// directory, in which case the global tier never yields a signal.
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    global_dir: Option<PathBuf>,
}

impl SelectionStore {
    pub fn new(global_dir: Option<PathBuf>) -> Self {
        Self { global_dir }
    }

    /// Store rooted at the user's nodepm config directory
    pub fn system() -> Self {
        Self::new(paths::nodepm_config_dir())
    }

    pub fn global_path(&self) -> Option<PathBuf> {
        self.global_dir.as_deref().map(paths::global_choice_path)
    }

    /// Project-scoped choice for `project_dir`, if present and valid
    pub fn project_choice(&self, project_dir: &Path) -> Option<PackageManager> {
        read_choice(&paths::project_choice_path(project_dir))
    }

    /// User-global choice, if present and valid
    pub fn global_choice(&self) -> Option<PackageManager> {
        read_choice(&self.global_path()?)
    }

    pub fn set_project_package_manager(
        &self,
        name: &str,
        project_dir: &Path,
    ) -> Result<PersistedChoice, SelectionError> {
        write_choice(name, &paths::project_choice_path(project_dir))
    }

    pub fn set_preferred_package_manager(
        &self,
        name: &str,
    ) -> Result<PersistedChoice, SelectionError> {
        let path = self.global_path().ok_or(SelectionError::NoConfigDir)?;
        write_choice(name, &path)
    }
}

/// Read a persisted choice. Missing files, invalid JSON and unknown names are `None`.
///
/// Only `packageManager` is inspected, so a record with a damaged `setAt` is
/// still honored.
pub fn read_choice(path: &Path) -> Option<PackageManager> {
    let contents = fsutil::read_to_string_opt(path)?;
    let value: serde_json::Value = serde_json::from_str(&contents).ok()?;
    let name = value.get("packageManager")?.as_str()?;
    PackageManager::from_name(name)
}

fn write_choice(name: &str, path: &Path) -> Result<PersistedChoice, SelectionError> {
    let package_manager = PackageManager::from_name(name)
        .ok_or_else(|| SelectionError::UnknownPackageManager(name.to_string()))?;

    let choice = PersistedChoice {
        package_manager,
        set_at: Utc::now(),
    };

    let contents = serde_json::to_string_pretty(&choice)?;
    fsutil::write_string(path, &contents).map_err(|error| SelectionError::Write {
        path: path.to_path_buf(),
        error,
    })?;

    Ok(choice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_project_round_trip() {
        let project = tempdir().unwrap();
        let store = SelectionStore::new(None);

        let choice = store
            .set_project_package_manager("pnpm", project.path())
            .unwrap();
        assert_eq!(choice.package_manager, PackageManager::Pnpm);

        let path = paths::project_choice_path(project.path());
        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["packageManager"], "pnpm");
        assert!(raw["setAt"].is_string());

        let parsed: PersistedChoice = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed, choice);

        assert_eq!(
            store.project_choice(project.path()),
            Some(PackageManager::Pnpm)
        );
    }

    #[test]
    fn test_global_round_trip_creates_dir() {
        let config = tempdir().unwrap();
        let global_dir = config.path().join("nested").join("nodepm");
        let store = SelectionStore::new(Some(global_dir.clone()));

        store.set_preferred_package_manager("bun").unwrap();

        assert!(global_dir.join(paths::CHOICE_FILE_NAME).is_file());
        assert_eq!(store.global_choice(), Some(PackageManager::Bun));
    }

    #[test]
    fn test_unknown_name_rejected_without_writing() {
        let project = tempdir().unwrap();
        let store = SelectionStore::new(Some(project.path().join("global")));

        let err = store
            .set_project_package_manager("deno", project.path())
            .unwrap_err();
        assert!(matches!(err, SelectionError::UnknownPackageManager(ref n) if n == "deno"));
        assert!(err.to_string().contains("unknown package manager"));
        assert!(!paths::project_choice_path(project.path()).exists());

        let err = store.set_preferred_package_manager("NPM").unwrap_err();
        assert!(matches!(err, SelectionError::UnknownPackageManager(_)));
        assert_eq!(store.global_path().map(|p| p.exists()), Some(false));
    }

    #[test]
    fn test_no_config_dir() {
        let store = SelectionStore::new(None);
        assert_eq!(store.global_choice(), None);
        assert!(matches!(
            store.set_preferred_package_manager("npm"),
            Err(SelectionError::NoConfigDir)
        ));
    }

    #[test]
    fn test_overwrite_last_writer_wins() {
        let project = tempdir().unwrap();
        let store = SelectionStore::default();

        store.set_project_package_manager("yarn", project.path()).unwrap();
        store.set_project_package_manager("npm", project.path()).unwrap();

        assert_eq!(store.project_choice(project.path()), Some(PackageManager::Npm));
    }

    #[test]
    fn test_read_choice_corruption_absorbed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("choice.json");

        assert_eq!(read_choice(&path), None);

        for contents in [
            "not json at all",
            "",
            r#"{"packageManager": "deno"}"#,
            r#"{"packageManager": 3}"#,
            r#"{"setAt": "2024-01-01T00:00:00Z"}"#,
            r#"["pnpm"]"#,
        ] {
            fs::write(&path, contents).unwrap();
            assert_eq!(read_choice(&path), None, "contents: {contents}");
        }

        fs::write(&path, r#"{"packageManager": "yarn", "setAt": 12}"#).unwrap();
        assert_eq!(read_choice(&path), Some(PackageManager::Yarn));
    }
}
