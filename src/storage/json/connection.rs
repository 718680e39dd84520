//! Base-directory handling for the JSON file store.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use log::info;

/// JsonConnection manages the data directory the per-key JSON and settings
/// files live in.
#[derive(Clone)]
pub struct JsonConnection {
    base_directory: PathBuf,
}

impl JsonConnection {
    /// Create a connection rooted at an explicit directory, creating it if
    /// needed.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();
        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .with_context(|| format!("creating data directory {}", base_path.display()))?;
            info!("created data directory {}", base_path.display());
        }
        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a connection in the platform's per-user data directory.
    pub fn new_default() -> Result<Self> {
        let data_dir = dirs::data_dir().ok_or_else(|| anyhow!("could not determine the user data directory"))?;
        Self::new(data_dir.join("MoneyHS"))
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Path of one storage key's file.
    pub fn key_path(&self, key: &str) -> PathBuf {
        self.base_directory.join(key)
    }

    /// Atomic write: temp file in the same directory, then rename over the
    /// target, so a crash mid-write never leaves a truncated blob behind.
    pub(crate) fn write_atomic(&self, path: &Path, contents: &str) -> Result<()> {
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, contents)
            .with_context(|| format!("writing {}", temp_path.display()))?;
        fs::rename(&temp_path, path)
            .with_context(|| format!("replacing {}", path.display()))?;
        Ok(())
    }
}
