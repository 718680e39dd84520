//! Storage layer: abstraction traits plus the JSON file implementation.

pub mod json;
pub mod traits;

pub use traits::{BillStorage, LedgerStorage, SettingsStorage};
