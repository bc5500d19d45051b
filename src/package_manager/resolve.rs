//! Priority chain deciding which package manager governs a project.

use super::command::{self, CommandError};
use super::detect;
use super::env::{EnvProvider, PACKAGE_MANAGER_ENV, SystemEnv};
use super::manager::{Descriptor, PackageManager};
use super::store::SelectionStore;
use crate::common::paths;
use crate::ui::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Where a resolved package manager came from. Diagnostic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Source {
    #[serde(rename = "environment")]
    Environment,
    #[serde(rename = "project-config")]
    ProjectConfig,
    #[serde(rename = "package.json")]
    PackageJson,
    #[serde(rename = "lock-file")]
    LockFile,
    #[serde(rename = "global-preference")]
    GlobalPreference,
    #[serde(rename = "default")]
    Default,
}

impl Source {
    pub fn as_str(self) -> &'static str {
        match self {
            Source::Environment => "environment",
            Source::ProjectConfig => "project-config",
            Source::PackageJson => "package.json",
            Source::LockFile => "lock-file",
            Source::GlobalPreference => "global-preference",
            Source::Default => "default",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSelection {
    pub package_manager: PackageManager,
    pub source: Source,
}

impl ResolvedSelection {
    pub fn name(&self) -> &'static str {
        self.package_manager.name()
    }

    pub fn config(&self) -> &'static Descriptor {
        self.package_manager.descriptor()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Project to inspect; the current directory when unset
    pub project_dir: Option<PathBuf>,
    /// Skip resolution and use this manager
    pub package_manager: Option<PackageManager>,
}

impl ResolveOptions {
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: Some(dir.into()),
            package_manager: None,
        }
    }
}

/// Resolves the active package manager. Nothing is cached; every call re-reads
/// the environment and the disk.
pub struct Resolver<E: EnvProvider = SystemEnv> {
    env: E,
    store: SelectionStore,
}

impl Resolver<SystemEnv> {
    /// Resolver over the real environment and the user config directory
    pub fn system() -> Self {
        Self::new(SystemEnv, SelectionStore::system())
    }
}

impl<E: EnvProvider> Resolver<E> {
    pub fn new(env: E, store: SelectionStore) -> Self {
        Self { env, store }
    }

    pub fn store(&self) -> &SelectionStore {
        &self.store
    }

    /// Walk the tiers in order and return the first valid hit. Never fails.
    pub fn get_package_manager(&self, options: &ResolveOptions) -> ResolvedSelection {
        let dir = project_dir(options);
        let hit = |package_manager: PackageManager, source: Source| ResolvedSelection {
            package_manager,
            source,
        };

        if let Some(pm) = self.from_environment() {
            return hit(pm, Source::Environment);
        }
        if let Some(pm) = self.from_project_config(&dir) {
            return hit(pm, Source::ProjectConfig);
        }
        if let Some(pm) = detect::detect_from_package_json(&dir) {
            return hit(pm, Source::PackageJson);
        }
        if let Some(pm) = detect::detect_from_lock_file(&dir) {
            return hit(pm, Source::LockFile);
        }
        if let Some(pm) = self.from_global_preference() {
            return hit(pm, Source::GlobalPreference);
        }
        hit(PackageManager::Npm, Source::Default)
    }

    /// Render a run command, resolving the manager unless one is pre-supplied.
    pub fn get_run_command(
        &self,
        script: &str,
        options: &ResolveOptions,
    ) -> Result<String, CommandError> {
        command::validate_identifier(script, "script name")?;
        command::run_command(self.active(options), script)
    }

    /// Render an exec command, resolving the manager unless one is pre-supplied.
    pub fn get_exec_command(
        &self,
        binary: &str,
        args: Option<&str>,
        options: &ResolveOptions,
    ) -> Result<String, CommandError> {
        command::validate_identifier(binary, "binary name")?;
        command::exec_command(self.active(options), binary, args)
    }

    fn active(&self, options: &ResolveOptions) -> PackageManager {
        options
            .package_manager
            .unwrap_or_else(|| self.get_package_manager(options).package_manager)
    }

    fn from_environment(&self) -> Option<PackageManager> {
        let value = self.env.var(PACKAGE_MANAGER_ENV)?;
        let pm = PackageManager::from_name(&value);
        if pm.is_none() && is_debug_enabled() {
            emit(
                Level::Debug,
                "resolve.environment.unknown",
                &format!("Ignoring {PACKAGE_MANAGER_ENV}={value:?}: not a known package manager"),
                None,
            );
        }
        pm
    }

    fn from_project_config(&self, dir: &Path) -> Option<PackageManager> {
        let pm = self.store.project_choice(dir);
        if pm.is_none() {
            report_invalid_choice("resolve.project_config.invalid", &paths::project_choice_path(dir));
        }
        pm
    }

    fn from_global_preference(&self) -> Option<PackageManager> {
        let pm = self.store.global_choice();
        if pm.is_none() {
            if let Some(path) = self.store.global_path() {
                report_invalid_choice("resolve.global_preference.invalid", &path);
            }
        }
        pm
    }
}

fn project_dir(options: &ResolveOptions) -> PathBuf {
    options
        .project_dir
        .clone()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// A choice file that exists but yielded nothing is worth a debug line.
fn report_invalid_choice(code: &str, path: &Path) {
    if is_debug_enabled() && path.exists() {
        emit(
            Level::Debug,
            code,
            &format!("Ignoring {}: no valid packageManager entry", path.display()),
            None,
        );
    }
}

/// Human-readable summary of the current choice and how to change it.
pub fn selection_prompt(resolved: &ResolvedSelection, available: &[PackageManager]) -> String {
    let installed = if available.is_empty() {
        "none found on PATH".to_string()
    } else {
        available
            .iter()
            .map(|pm| pm.name())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut out = String::new();
    out.push_str(&format!(
        "Current package manager: {} (from {})\n",
        resolved.name(),
        resolved.source
    ));
    out.push_str(&format!("Installed: {installed}\n"));
    out.push_str("\nTo choose a package manager:\n");
    out.push_str(&format!(
        "  per project:  nodepm set <name>            (writes {}/{})\n",
        paths::PROJECT_CONFIG_DIR,
        paths::CHOICE_FILE_NAME
    ));
    out.push_str("  globally:     nodepm set <name> --global\n");
    out.push_str(&format!("  this shell:   export {PACKAGE_MANAGER_ENV}=<name>\n"));
    out.push_str("\nSupported: npm, pnpm, yarn, bun\n");
    out
}
