//! Ledger blob repository: the full `LedgerState` as one JSON document
//! under the fixed `moneyhs_data` key.

use std::fs;

use anyhow::{Context, Result};
use log::{debug, info};

use super::connection::JsonConnection;
use crate::domain::models::LedgerState;
use crate::storage::traits::LedgerStorage;

const LEDGER_KEY: &str = "moneyhs_data.json";

#[derive(Clone)]
pub struct LedgerRepository {
    connection: JsonConnection,
}

impl LedgerRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

impl LedgerStorage for LedgerRepository {
    fn load_ledger(&self) -> Result<Option<LedgerState>> {
        let path = self.connection.key_path(LEDGER_KEY);
        if !path.exists() {
            debug!("no ledger blob at {}", path.display());
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let state: LedgerState = serde_json::from_str(&raw)
            .with_context(|| format!("parsing ledger blob {}", path.display()))?;
        debug!("loaded ledger blob from {}", path.display());
        Ok(Some(state))
    }

    fn save_ledger(&self, state: &LedgerState) -> Result<()> {
        let path = self.connection.key_path(LEDGER_KEY);
        let raw = serde_json::to_string(state).context("serializing ledger state")?;
        self.connection.write_atomic(&path, &raw)?;
        debug!(
            "saved ledger blob ({} incomes, {} expenses)",
            state.incomes.len(),
            state.expenses.len()
        );
        Ok(())
    }

    fn clear_ledger(&self) -> Result<()> {
        let path = self.connection.key_path(LEDGER_KEY);
        if path.exists() {
            fs::remove_file(&path).with_context(|| format!("removing {}", path.display()))?;
            info!("cleared ledger blob at {}", path.display());
        }
        Ok(())
    }
}
