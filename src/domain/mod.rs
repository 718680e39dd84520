//! Domain layer: models, the ledger state machine, bill splitting,
//! aggregation, and the reminder boundary.

pub mod error;
pub mod ledger_service;
pub mod models;
pub mod reminder_service;
pub mod split_bill_service;
pub mod statistics;

pub use error::{DomainError, DomainResult};
pub use ledger_service::{reduce, LedgerAction, LedgerService};
pub use reminder_service::{NotificationScheduler, ReminderService};
pub use split_bill_service::SplitBillService;
