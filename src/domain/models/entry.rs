//! Ledger entry models: incomes, expenses and the expense category set.

use log::warn;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The fixed expense categories offered by the entry screens. Entries may
/// carry free-text categories; anything outside this set folds into the
/// catch-all bucket during aggregation.
pub const KNOWN_CATEGORIES: [&str; 4] = ["Ăn uống", "Giải trí", "Du lịch", "Khác"];

/// Catch-all category bucket.
pub const CATEGORY_OTHER: &str = "Khác";

fn new_entry_id() -> String {
    Uuid::new_v4().to_string()
}

/// One recorded income line.
///
/// The amount is kept as a decimal string exactly as entered and persisted;
/// input screens validate it is a positive finite number before it reaches
/// the store. The date is an RFC 3339 timestamp string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeEntry {
    /// Stable generated identifier. Blobs written by older app versions
    /// have no ids, so one is generated on hydration.
    #[serde(default = "new_entry_id")]
    pub id: String,
    pub amount: String,
    pub date: String,
    #[serde(default)]
    pub description: String,
}

impl IncomeEntry {
    pub fn new(
        amount: impl Into<String>,
        date: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: new_entry_id(),
            amount: amount.into(),
            date: date.into(),
            description: description.into(),
        }
    }
}

/// One recorded expense line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseEntry {
    #[serde(default = "new_entry_id")]
    pub id: String,
    pub category: String,
    pub amount: String,
    pub date: String,
    #[serde(default)]
    pub description: String,
}

impl ExpenseEntry {
    pub fn new(
        category: impl Into<String>,
        amount: impl Into<String>,
        date: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: new_entry_id(),
            category: category.into(),
            amount: amount.into(),
            date: date.into(),
            description: description.into(),
        }
    }
}

/// Common view over income and expense entries for totals and grouping.
pub trait LedgerEntry {
    fn amount(&self) -> &str;
    fn date(&self) -> &str;
}

impl LedgerEntry for IncomeEntry {
    fn amount(&self) -> &str {
        &self.amount
    }
    fn date(&self) -> &str {
        &self.date
    }
}

impl LedgerEntry for ExpenseEntry {
    fn amount(&self) -> &str {
        &self.amount
    }
    fn date(&self) -> &str {
        &self.date
    }
}

/// Parse a decimal-as-string amount. `None` for non-numeric or non-finite
/// values.
pub fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Sum the amounts of a slice of entries. An unparseable amount contributes
/// zero rather than poisoning the total.
pub fn sum_amounts<E: LedgerEntry>(entries: &[E]) -> f64 {
    entries
        .iter()
        .map(|entry| {
            parse_amount(entry.amount()).unwrap_or_else(|| {
                warn!("skipping unparseable amount {:?} in total", entry.amount());
                0.0
            })
        })
        .sum()
}
