// File: ./src/context.rs
/*! Filesystem context for the engine binary.

The engine itself never touches disk. Only the binary needs to know where
its configuration file and log file live, and it asks an `AppContext` for
those locations:

- `StandardContext`: OS-specific directories from `directories::ProjectDirs`,
  or everything under an explicit root passed with `--root`.
- `TestContext`: a throwaway temporary directory, removed on drop.
*/

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

pub trait AppContext: Send + Sync + std::fmt::Debug {
    fn get_config_dir(&self) -> Result<PathBuf>;
    fn get_data_dir(&self) -> Result<PathBuf>;

    fn get_config_file_path(&self) -> Result<PathBuf> {
        Ok(self.get_config_dir()?.join("config.toml"))
    }

    fn get_log_file_path(&self) -> Option<PathBuf> {
        self.get_data_dir().ok().map(|p| p.join("calengine.log"))
    }
}

fn ensure_dir(path: PathBuf) -> Result<PathBuf> {
    if !path.exists() {
        std::fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create directory: {:?}", path))?;
    }
    Ok(path)
}

#[derive(Clone, Debug, Default)]
pub struct StandardContext {
    override_root: Option<PathBuf>,
}

impl StandardContext {
    /// With `Some(root)`, config and data land in `root/config` and `root/data`.
    pub fn new(override_root: Option<PathBuf>) -> Self {
        Self { override_root }
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("org", "calengine", "calengine")
            .ok_or_else(|| anyhow::anyhow!("No home directory"))
    }
}

impl AppContext for StandardContext {
    fn get_config_dir(&self) -> Result<PathBuf> {
        match &self.override_root {
            Some(root) => ensure_dir(root.join("config")),
            None => ensure_dir(Self::project_dirs()?.config_dir().to_path_buf()),
        }
    }

    fn get_data_dir(&self) -> Result<PathBuf> {
        match &self.override_root {
            Some(root) => ensure_dir(root.join("data")),
            None => ensure_dir(Self::project_dirs()?.data_dir().to_path_buf()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct TestContext {
    pub root: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let root = std::env::temp_dir().join(format!("calengine_test_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&root).expect("failed to create TestContext temp dir");
        Self { root }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AppContext for TestContext {
    fn get_config_dir(&self) -> Result<PathBuf> {
        ensure_dir(self.root.join("config"))
    }

    fn get_data_dir(&self) -> Result<PathBuf> {
        ensure_dir(self.root.join("data"))
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}
