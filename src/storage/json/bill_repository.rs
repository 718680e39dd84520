//! Split-bill repository: the bill list as one JSON document under the
//! `split_bill_data` key, independent of the ledger blob.

use std::fs;

use anyhow::{Context, Result};
use log::{debug, info};

use super::connection::JsonConnection;
use crate::domain::models::Bill;
use crate::storage::traits::BillStorage;

const BILLS_KEY: &str = "split_bill_data.json";

#[derive(Clone)]
pub struct BillRepository {
    connection: JsonConnection,
}

impl BillRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

impl BillStorage for BillRepository {
    fn load_bills(&self) -> Result<Option<Vec<Bill>>> {
        let path = self.connection.key_path(BILLS_KEY);
        if !path.exists() {
            debug!("no bill blob at {}", path.display());
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let bills: Vec<Bill> = serde_json::from_str(&raw)
            .with_context(|| format!("parsing bill blob {}", path.display()))?;
        debug!("loaded {} bills from {}", bills.len(), path.display());
        Ok(Some(bills))
    }

    fn save_bills(&self, bills: &[Bill]) -> Result<()> {
        let path = self.connection.key_path(BILLS_KEY);
        let raw = serde_json::to_string(bills).context("serializing bill list")?;
        self.connection.write_atomic(&path, &raw)?;
        debug!("saved {} bills", bills.len());
        Ok(())
    }

    fn clear_bills(&self) -> Result<()> {
        let path = self.connection.key_path(BILLS_KEY);
        if path.exists() {
            fs::remove_file(&path).with_context(|| format!("removing {}", path.display()))?;
            info!("cleared bill blob at {}", path.display());
        }
        Ok(())
    }
}
