//! Read-only probes that infer the package manager from files in a project.

use super::manager::{DETECTION_PRIORITY, PackageManager};
use crate::common::fsutil;
use std::path::Path;

/// Return the first manager, in detection priority order, whose lock file exists in `dir`.
pub fn detect_from_lock_file(dir: &Path) -> Option<PackageManager> {
    DETECTION_PRIORITY
        .into_iter()
        .find(|pm| dir.join(pm.lock_file()).is_file())
}

/// Inspect the `packageManager` field of `dir/package.json`.
///
/// Unreadable files, invalid JSON, a non-string field and unknown names are
/// all "no signal".
pub fn detect_from_package_json(dir: &Path) -> Option<PackageManager> {
    let contents = fsutil::read_to_string_opt(&dir.join("package.json"))?;
    let manifest: serde_json::Value = serde_json::from_str(&contents).ok()?;
    let field = manifest.get("packageManager")?.as_str()?;
    parse_package_manager_field(field)
}

/// Parse `<name>[@<version-spec>]`.
///
/// Only the segment before the first `@` is meaningful. A bare known name is
/// accepted; anything else that fails the registry lookup is rejected.
pub fn parse_package_manager_field(value: &str) -> Option<PackageManager> {
    let name = match value.split_once('@') {
        Some((name, _version)) => name,
        None => value,
    };
    PackageManager::from_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_package_json(dir: &Path, contents: &str) {
        fs::write(dir.join("package.json"), contents).unwrap();
    }

    #[test]
    fn test_lock_file_none() {
        let dir = tempdir().unwrap();
        assert_eq!(detect_from_lock_file(dir.path()), None);
    }

    #[test]
    fn test_each_lock_file() {
        for pm in PackageManager::ALL {
            let dir = tempdir().unwrap();
            fs::write(dir.path().join(pm.lock_file()), "").unwrap();
            assert_eq!(detect_from_lock_file(dir.path()), Some(pm));
        }
    }

    #[test]
    fn test_pnpm_beats_npm() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("pnpm-lock.yaml"), "").unwrap();
        fs::write(dir.path().join("package-lock.json"), "{}").unwrap();
        assert_eq!(detect_from_lock_file(dir.path()), Some(PackageManager::Pnpm));
    }

    #[test]
    fn test_yarn_beats_npm() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("yarn.lock"), "").unwrap();
        fs::write(dir.path().join("package-lock.json"), "{}").unwrap();
        assert_eq!(detect_from_lock_file(dir.path()), Some(PackageManager::Yarn));
    }

    #[test]
    fn test_lock_file_directory_is_ignored() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("yarn.lock")).unwrap();
        assert_eq!(detect_from_lock_file(dir.path()), None);
    }

    #[test]
    fn test_package_json_versioned() {
        let dir = tempdir().unwrap();
        write_package_json(dir.path(), r#"{"packageManager": "yarn@4.0.0"}"#);
        assert_eq!(detect_from_package_json(dir.path()), Some(PackageManager::Yarn));
    }

    #[test]
    fn test_package_json_caret() {
        let dir = tempdir().unwrap();
        write_package_json(dir.path(), r#"{"packageManager": "yarn@^4.0.0"}"#);
        assert_eq!(detect_from_package_json(dir.path()), Some(PackageManager::Yarn));
    }

    #[test]
    fn test_package_json_no_at_separator() {
        let dir = tempdir().unwrap();
        write_package_json(dir.path(), r#"{"packageManager": "pnpm+8.6.0"}"#);
        assert_eq!(detect_from_package_json(dir.path()), None);
    }

    #[test]
    fn test_package_json_bare_name() {
        let dir = tempdir().unwrap();
        write_package_json(dir.path(), r#"{"packageManager": "bun"}"#);
        assert_eq!(detect_from_package_json(dir.path()), Some(PackageManager::Bun));
    }

    #[test]
    fn test_package_json_unknown_name() {
        let dir = tempdir().unwrap();
        write_package_json(dir.path(), r#"{"packageManager": "deno@1.0.0"}"#);
        assert_eq!(detect_from_package_json(dir.path()), None);
    }

    #[test]
    fn test_package_json_wrong_types() {
        for value in [r#"["yarn"]"#, "42", r#"{"name": "yarn"}"#, "null", "true"] {
            let dir = tempdir().unwrap();
            write_package_json(dir.path(), &format!(r#"{{"packageManager": {value}}}"#));
            assert_eq!(detect_from_package_json(dir.path()), None, "value: {value}");
        }
    }

    #[test]
    fn test_package_json_invalid_or_missing() {
        let dir = tempdir().unwrap();
        assert_eq!(detect_from_package_json(dir.path()), None);

        write_package_json(dir.path(), "{ not json");
        assert_eq!(detect_from_package_json(dir.path()), None);

        write_package_json(dir.path(), r#"{"name": "app"}"#);
        assert_eq!(detect_from_package_json(dir.path()), None);

        write_package_json(dir.path(), r#""yarn@4.0.0""#);
        assert_eq!(detect_from_package_json(dir.path()), None);
    }

    #[test]
    fn test_parse_field() {
        assert_eq!(parse_package_manager_field("pnpm@8.6.0"), Some(PackageManager::Pnpm));
        assert_eq!(
            parse_package_manager_field("npm@10.2.0+sha256.abc"),
            Some(PackageManager::Npm)
        );
        assert_eq!(parse_package_manager_field("@yarn"), None);
        assert_eq!(parse_package_manager_field(""), None);
    }
}
