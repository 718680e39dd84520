//! Settings repository: theme name and language code, each a plain string
//! in its own file so one corrupt field never takes the others down.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;

use super::connection::JsonConnection;
use crate::storage::traits::SettingsStorage;

const THEME_KEY: &str = "theme";
const LANGUAGE_KEY: &str = "language";

#[derive(Clone)]
pub struct SettingsRepository {
    connection: JsonConnection,
}

impl SettingsRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    fn read_string(&self, path: &Path) -> Result<Option<String>> {
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let value = raw.trim();
        if value.is_empty() {
            return Ok(None);
        }
        Ok(Some(value.to_string()))
    }
}

impl SettingsStorage for SettingsRepository {
    fn theme(&self) -> Result<Option<String>> {
        self.read_string(&self.connection.key_path(THEME_KEY))
    }

    fn set_theme(&self, name: &str) -> Result<()> {
        let path = self.connection.key_path(THEME_KEY);
        self.connection.write_atomic(&path, name)?;
        debug!("saved theme setting {name:?}");
        Ok(())
    }

    fn language(&self) -> Result<Option<String>> {
        self.read_string(&self.connection.key_path(LANGUAGE_KEY))
    }

    fn set_language(&self, code: &str) -> Result<()> {
        let path = self.connection.key_path(LANGUAGE_KEY);
        self.connection.write_atomic(&path, code)?;
        debug!("saved language setting {code:?}");
        Ok(())
    }
}
