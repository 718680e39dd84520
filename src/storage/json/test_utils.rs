//! Test infrastructure for the JSON store: a temporary data directory with
//! RAII cleanup, so test data is removed even when a test panics.

use anyhow::Result;
use tempfile::TempDir;

use super::connection::JsonConnection;

pub struct TestEnvironment {
    pub connection: JsonConnection,
    /// Base directory path for manual inspection if needed.
    pub base_path: std::path::PathBuf,
    _temp_dir: TempDir, // keep alive until drop
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let connection = JsonConnection::new(temp_dir.path())?;
        Ok(Self {
            connection,
            base_path: temp_dir.path().to_path_buf(),
            _temp_dir: temp_dir,
        })
    }
}
