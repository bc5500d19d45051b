//! JavaScript package manager resolution and command synthesis.
//!
//! This module decides which of npm, pnpm, yarn or bun governs a project and
//! renders shell-safe command strings in that manager's grammar. It never runs
//! the commands it builds.
//!
//! # Architecture
//!
//! - [`PackageManager`]: closed enum with a static `Descriptor` per manager
//! - [`detect`]: lock-file and `package.json` probes
//! - [`Resolver`]: priority chain producing a [`ResolvedSelection`]
//! - [`command`]: run/exec rendering with input validation
//! - [`command_pattern`]: regex sources recognizing any manager's form of an action
//! - [`SelectionStore`]: persisted project and global choices
//!
//! # Priority
//!
//! Resolution takes the first valid signal in this order:
//! 1. `NODEPM_PACKAGE_MANAGER` environment variable
//! 2. Project choice in `.nodepm/package-manager.json`
//! 3. `packageManager` field of `package.json`
//! 4. Lock files (pnpm, bun, yarn, npm)
//! 5. Global choice in the user config directory
//! 6. npm
//!
//! # Example
//!
//! ```ignore
//! use crate::package_manager::{ResolveOptions, Resolver};
//!
//! let resolver = Resolver::system();
//! let options = ResolveOptions::in_dir("./my-app");
//! let install = resolver.get_run_command("install", &options)?;
//! ```

pub mod command;
pub mod detect;
mod env;
mod manager;
mod pattern;
mod resolve;
mod store;

pub use detect::{detect_from_lock_file, detect_from_package_json};
pub use env::PACKAGE_MANAGER_ENV;
pub use manager::{DETECTION_PRIORITY, PackageManager, available_package_managers};
pub use pattern::command_pattern;
pub use resolve::{ResolveOptions, ResolvedSelection, Resolver, Source, selection_prompt};
pub use store::SelectionStore;
