//! Package manager enum and the static descriptor table.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A supported JavaScript package manager - SINGLE SOURCE OF TRUTH for manager names.
///
/// The set is closed: every other part of the crate treats a name that does not
/// map to one of these variants as "no signal".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    /// npm - ships with Node.js
    Npm,
    /// pnpm - content-addressed store
    Pnpm,
    /// Yarn (Berry and Classic share the same command grammar here)
    Yarn,
    /// Bun - runtime with a bundled package manager
    Bun,
}

/// Fixed command-syntax table for one package manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descriptor {
    pub name: &'static str,
    pub lock_file: &'static str,
    pub install_cmd: &'static str,
    /// Prefix for custom scripts, the script name is appended
    pub run_cmd: &'static str,
    /// Prefix for ad-hoc binaries, the binary name is appended
    pub exec_cmd: &'static str,
    pub test_cmd: &'static str,
    pub build_cmd: &'static str,
    pub dev_cmd: &'static str,
}

const NPM: Descriptor = Descriptor {
    name: "npm",
    lock_file: "package-lock.json",
    install_cmd: "npm install",
    run_cmd: "npm run",
    exec_cmd: "npx",
    test_cmd: "npm test",
    build_cmd: "npm run build",
    dev_cmd: "npm run dev",
};

const PNPM: Descriptor = Descriptor {
    name: "pnpm",
    lock_file: "pnpm-lock.yaml",
    install_cmd: "pnpm install",
    run_cmd: "pnpm",
    exec_cmd: "pnpm dlx",
    test_cmd: "pnpm test",
    build_cmd: "pnpm build",
    dev_cmd: "pnpm dev",
};

const YARN: Descriptor = Descriptor {
    name: "yarn",
    lock_file: "yarn.lock",
    install_cmd: "yarn",
    run_cmd: "yarn",
    exec_cmd: "yarn dlx",
    test_cmd: "yarn test",
    build_cmd: "yarn build",
    dev_cmd: "yarn dev",
};

const BUN: Descriptor = Descriptor {
    name: "bun",
    lock_file: "bun.lockb",
    install_cmd: "bun install",
    run_cmd: "bun run",
    exec_cmd: "bunx",
    test_cmd: "bun test",
    build_cmd: "bun run build",
    dev_cmd: "bun run dev",
};

/// Tie-break order when several lock files exist in the same directory.
///
/// pnpm wins over npm because a stray `package-lock.json` next to a
/// `pnpm-lock.yaml` is far more common than the reverse; npm is the weakest
/// signal and comes last.
pub const DETECTION_PRIORITY: [PackageManager; 4] = [
    PackageManager::Pnpm,
    PackageManager::Bun,
    PackageManager::Yarn,
    PackageManager::Npm,
];

impl PackageManager {
    /// Every manager in registry order.
    pub const ALL: [PackageManager; 4] = [Self::Npm, Self::Pnpm, Self::Yarn, Self::Bun];

    pub fn descriptor(&self) -> &'static Descriptor {
        match self {
            Self::Npm => &NPM,
            Self::Pnpm => &PNPM,
            Self::Yarn => &YARN,
            Self::Bun => &BUN,
        }
    }

    pub fn name(&self) -> &'static str {
        self.descriptor().name
    }

    pub fn lock_file(&self) -> &'static str {
        self.descriptor().lock_file
    }

    /// Registry lookup. Unknown names yield `None`, never an error.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|pm| pm.name() == name)
    }

    /// Check whether the manager's executable is on `PATH`.
    pub fn is_available(&self) -> bool {
        which::which(self.name()).is_ok()
    }
}

impl std::fmt::Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown package manager: {0} (expected one of npm, pnpm, yarn, bun)")]
pub struct UnknownPackageManager(pub String);

impl FromStr for PackageManager {
    type Err = UnknownPackageManager;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownPackageManager(s.to_string()))
    }
}

/// Managers whose executable is installed, in registry order.
pub fn available_package_managers() -> Vec<PackageManager> {
    PackageManager::ALL
        .into_iter()
        .filter(PackageManager::is_available)
        .collect()
}
