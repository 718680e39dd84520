//! # JSON Storage Module
//!
//! File-based implementation of the storage traits: one JSON document per
//! key under a single data directory, plus plain-string files for the
//! individual settings fields.
//!
//! ## File layout
//!
//! ```text
//! data/
//! ├── moneyhs_data.json      full ledger state
//! ├── split_bill_data.json   bill history + trailing open bill
//! ├── theme                  theme name token, plain string
//! └── language               language code, plain string
//! ```
//!
//! All writes are atomic (temp file, then rename). A missing file reads as
//! "nothing saved yet"; a present-but-corrupt file is an error the caller
//! reports, after which the in-memory state simply stays at defaults.

pub mod bill_repository;
pub mod connection;
pub mod ledger_repository;
pub mod settings_repository;

#[cfg(test)]
pub mod test_utils;

pub use bill_repository::BillRepository;
pub use connection::JsonConnection;
pub use ledger_repository::LedgerRepository;
pub use settings_repository::SettingsRepository;
