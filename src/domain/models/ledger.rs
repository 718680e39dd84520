//! The canonical ledger state owned by `LedgerService`.

use serde::{Deserialize, Serialize};

use super::entry::{ExpenseEntry, IncomeEntry};
use super::theme::Theme;

fn default_language() -> String {
    "vi".to_string()
}

/// Full tracker state: the transactional data (entries and running totals)
/// plus the user-environment settings carried alongside it.
///
/// Invariants maintained by every transition:
/// - `total_income` equals the sum of `incomes[*].amount`
/// - `total_expense` equals the sum of `expenses[*].amount`
/// - `has_password == password.is_some()`
///
/// Wire names are camelCase for compatibility with blobs written by earlier
/// versions of the app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LedgerState {
    pub incomes: Vec<IncomeEntry>,
    pub expenses: Vec<ExpenseEntry>,
    pub total_income: f64,
    pub total_expense: f64,
    pub theme: Theme,
    pub language: String,
    pub has_password: bool,
    pub password: Option<String>,
    /// Daily reminder slot as an "HH:MM" string; scheduling itself is an
    /// external collaborator's job.
    pub daily_notification_time: Option<String>,
}

impl Default for LedgerState {
    fn default() -> Self {
        Self {
            incomes: Vec::new(),
            expenses: Vec::new(),
            total_income: 0.0,
            total_expense: 0.0,
            theme: Theme::default(),
            language: default_language(),
            has_password: false,
            password: None,
            daily_notification_time: None,
        }
    }
}

/// Partial settings merged into the state at startup (`InitState`). The
/// double `Option` on the nullable fields distinguishes "not part of this
/// merge" from "explicitly cleared".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateOverlay {
    pub theme: Option<Theme>,
    pub language: Option<String>,
    pub password: Option<Option<String>>,
    pub daily_notification_time: Option<Option<String>>,
}
