use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Scratch project plus an isolated home so global choices never touch the real user config.
pub struct TestEnvironment {
    temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        fs::create_dir_all(temp_dir.path().join("home").join(".config"))?;
        fs::create_dir_all(temp_dir.path().join("project"))?;
        Ok(Self { temp_dir })
    }

    /// Fake home directory handed to the binary
    pub fn home(&self) -> PathBuf {
        self.temp_dir.path().join("home")
    }

    pub fn config_home(&self) -> PathBuf {
        self.home().join(".config")
    }

    /// Project directory the binary runs in
    pub fn project(&self) -> PathBuf {
        self.temp_dir.path().join("project")
    }

    /// Write a file relative to the project directory
    pub fn write_project_file(&self, name: &str, contents: &str) -> Result<()> {
        let path = self.project().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn remove_project_file(&self, name: &str) -> Result<()> {
        fs::remove_file(self.project().join(name))?;
        Ok(())
    }

    pub fn project_choice_path(&self) -> PathBuf {
        self.project().join(".nodepm").join("package-manager.json")
    }
}
