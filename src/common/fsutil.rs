use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Read a file as text, returning `None` on any failure (missing, unreadable, not UTF-8).
pub fn read_to_string_opt(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok()
}

/// Write text to `path`, creating missing parent directories first.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory at {}", parent.display()))?;
    }

    fs::write(path, contents).with_context(|| format!("writing file to {}", path.display()))?;
    Ok(())
}
