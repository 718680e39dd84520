//! # Storage Traits
//!
//! Storage abstraction for the domain layer. Each trait covers one
//! independently-persisted blob, so backends can be swapped (JSON files,
//! a key-value store, in-memory fakes in tests) without touching the
//! services.
//!
//! The access pattern is strictly load-once-at-startup, then
//! write-after-every-committed-transition, sequential per store; the two
//! data stores (ledger, bills) have no ordering relationship to each other.
//! All operations are synchronous.

use anyhow::Result;

use crate::domain::models::{Bill, LedgerState};

/// Persistence of the main ledger blob under its fixed key.
pub trait LedgerStorage: Send + Sync {
    /// Load the saved ledger state. `Ok(None)` when nothing has been saved
    /// yet; an error when the blob exists but cannot be read or parsed.
    fn load_ledger(&self) -> Result<Option<LedgerState>>;

    /// Serialize and write the full ledger state.
    fn save_ledger(&self, state: &LedgerState) -> Result<()>;

    /// Delete the saved blob.
    fn clear_ledger(&self) -> Result<()>;
}

/// Persistence of the split-bill list (history plus the trailing open
/// bill) under its own key, independent of the ledger's cycle.
pub trait BillStorage: Send + Sync {
    fn load_bills(&self) -> Result<Option<Vec<Bill>>>;

    fn save_bills(&self, bills: &[Bill]) -> Result<()>;

    fn clear_bills(&self) -> Result<()>;
}

/// Individual settings fields, each stored as a plain string under its own
/// key. The theme value is the raw name token, not a resolved palette.
pub trait SettingsStorage: Send + Sync {
    fn theme(&self) -> Result<Option<String>>;

    fn set_theme(&self, name: &str) -> Result<()>;

    fn language(&self) -> Result<Option<String>>;

    fn set_language(&self, code: &str) -> Result<()>;
}
