//! Temporary configuration files
//!
//! Writes config documents into a per-test directory so loaders can be
//! exercised against real files without touching the user's config dir.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory for config files, removed on drop
pub struct ConfigFileGuard {
  temp_dir: TempDir,
}

impl Default for ConfigFileGuard {
  fn default() -> Self {
    Self::new()
  }
}

impl ConfigFileGuard {
  pub fn new() -> Self {
    Self {
      temp_dir: TempDir::new().expect("Failed to create temporary directory"),
    }
  }

  /// Write `content` to `name` inside the directory and return its path
  pub fn write(&self, name: &str, content: &str) -> PathBuf {
    let path = self.temp_dir.path().join(name);
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).expect("Failed to create config directory");
    }
    fs::write(&path, content).expect("Failed to write config file");
    path
  }

  /// Path of a file in the directory, whether or not it exists
  pub fn path(&self, name: &str) -> PathBuf {
    self.temp_dir.path().join(name)
  }

  pub fn dir(&self) -> &Path {
    self.temp_dir.path()
  }
}
