//! Domain models for the tracker.

pub mod bill;
pub mod entry;
pub mod ledger;
pub mod theme;

pub use bill::{Bill, Person};
pub use entry::{
    parse_amount, sum_amounts, ExpenseEntry, IncomeEntry, LedgerEntry, CATEGORY_OTHER,
    KNOWN_CATEGORIES,
};
pub use ledger::{LedgerState, StateOverlay};
pub use theme::Theme;
