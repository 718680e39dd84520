//! Split-bill models: participants and group bills.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One participant of a group bill. `expenses` accumulates everything they
/// personally paid; it is only ever adjusted through
/// `SplitBillService::record_expense`, which keeps the bill total in
/// lockstep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub expenses: f64,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            expenses: 0.0,
        }
    }
}

/// A group bill. While open (`is_completed == false`) the invariant
/// `total_amount == Σ people[*].expenses` holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Bill {
    pub id: String,
    /// RFC 3339 creation timestamp.
    pub date: String,
    pub people: Vec<Person>,
    pub total_amount: f64,
    pub is_completed: bool,
    pub description: String,
}

impl Bill {
    /// A fresh open bill stamped with the current time.
    pub fn new_open() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date: Utc::now().to_rfc3339(),
            people: Vec::new(),
            total_amount: 0.0,
            is_completed: false,
            description: String::new(),
        }
    }
}

impl Default for Bill {
    fn default() -> Self {
        Self::new_open()
    }
}
