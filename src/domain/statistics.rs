//! Aggregation over ledger and bill snapshots.
//!
//! Everything here is a pure function of the data passed in; the services
//! own the state, this module only derives views of it for the stats and
//! split screens.

use std::collections::HashMap;

use chrono::DateTime;
use log::warn;

use crate::domain::models::{
    parse_amount, Bill, ExpenseEntry, LedgerEntry, LedgerState, CATEGORY_OTHER, KNOWN_CATEGORIES,
};

/// Current balance. May be negative; the sign only drives presentation.
pub fn balance(state: &LedgerState) -> f64 {
    state.total_income - state.total_expense
}

/// Bucketing granularity for [`group_by_date`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateGranularity {
    /// dd/mm/yyyy buckets.
    Day,
    /// mm/yyyy buckets.
    Month,
}

impl DateGranularity {
    fn pattern(self) -> &'static str {
        match self {
            DateGranularity::Day => "%d/%m/%Y",
            DateGranularity::Month => "%m/%Y",
        }
    }
}

/// Bucket entries by formatted date key, preserving each entry's relative
/// order within its bucket. Entries with unparseable dates are skipped.
pub fn group_by_date<E: LedgerEntry>(
    entries: &[E],
    granularity: DateGranularity,
) -> HashMap<String, Vec<&E>> {
    let mut buckets: HashMap<String, Vec<&E>> = HashMap::new();
    for entry in entries {
        let parsed = match DateTime::parse_from_rfc3339(entry.date()) {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!("skipping entry with unparseable date {:?}", entry.date());
                continue;
            }
        };
        let key = parsed.format(granularity.pattern()).to_string();
        buckets.entry(key).or_default().push(entry);
    }
    buckets
}

/// Sum amounts per calendar month number (0–11), year ignored. Entries with
/// an unparseable date or amount are discarded, contributing nothing.
pub fn group_by_month_index<E: LedgerEntry>(entries: &[E]) -> HashMap<u32, f64> {
    use chrono::Datelike;

    let mut grouped: HashMap<u32, f64> = HashMap::new();
    for entry in entries {
        let Ok(parsed) = DateTime::parse_from_rfc3339(entry.date()) else {
            continue;
        };
        let Some(amount) = parse_amount(entry.amount()) else {
            continue;
        };
        *grouped.entry(parsed.month0()).or_insert(0.0) += amount;
    }
    grouped
}

/// A 12-slot series (January through December) with zeros for months that
/// have no entries. This is the shape the monthly bar chart consumes.
pub fn monthly_series<E: LedgerEntry>(entries: &[E]) -> [f64; 12] {
    let grouped = group_by_month_index(entries);
    let mut series = [0.0; 12];
    for (month, total) in grouped {
        series[month as usize] = total;
    }
    series
}

/// Chart label for a month slot: `T1`..`T12`.
pub fn month_label(month_index: u32) -> String {
    format!("T{}", month_index + 1)
}

/// Sum expense amounts per category. Categories outside the known set fold
/// into the catch-all bucket; unparseable amounts are discarded.
pub fn aggregate_by_category(expenses: &[ExpenseEntry]) -> HashMap<String, f64> {
    let mut grouped: HashMap<String, f64> = HashMap::new();
    for expense in expenses {
        let Some(amount) = parse_amount(&expense.amount) else {
            continue;
        };
        let category = if KNOWN_CATEGORIES.contains(&expense.category.as_str()) {
            expense.category.clone()
        } else {
            CATEGORY_OTHER.to_string()
        };
        *grouped.entry(category).or_insert(0.0) += amount;
    }
    grouped
}

/// What one participant owes (positive) or is owed (negative) to equalize
/// the group's spending.
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    pub person_id: String,
    pub name: String,
    /// What this person paid in total.
    pub paid: f64,
    /// `average_share - paid`; the settlement is zero-sum over the bill.
    pub to_pay: f64,
}

/// Even-split settlement for a bill. Empty for a bill with no people.
pub fn compute_settlement(bill: &Bill) -> Vec<Settlement> {
    let count = bill.people.len();
    if count == 0 {
        return Vec::new();
    }
    let average_share = bill.total_amount / count as f64;
    bill.people
        .iter()
        .map(|person| Settlement {
            person_id: person.id.clone(),
            name: person.name.clone(),
            paid: person.expenses,
            to_pay: average_share - person.expenses,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{IncomeEntry, Person};

    fn income(amount: &str, date: &str) -> IncomeEntry {
        IncomeEntry::new(amount, date, "Chi tiêu")
    }

    fn expense(category: &str, amount: &str, date: &str) -> ExpenseEntry {
        ExpenseEntry::new(category, amount, date, "Chi tiêu")
    }

    fn bill_with(people: Vec<(&str, f64)>) -> Bill {
        let mut bill = Bill::new_open();
        for (name, paid) in people {
            let mut person = Person::new(name);
            person.expenses = paid;
            bill.total_amount += paid;
            bill.people.push(person);
        }
        bill
    }

    #[test]
    fn balance_is_income_minus_expense() {
        let state = LedgerState {
            total_income: 1000000.0,
            total_expense: 300000.0,
            ..LedgerState::default()
        };
        assert_eq!(balance(&state), 700000.0);
    }

    #[test]
    fn balance_can_go_negative() {
        let state = LedgerState {
            total_income: 100.0,
            total_expense: 250.0,
            ..LedgerState::default()
        };
        assert_eq!(balance(&state), -150.0);
    }

    #[test]
    fn day_and_month_buckets_are_distinct() {
        let entries = vec![
            income("10", "2024-03-01T08:00:00Z"),
            income("20", "2024-03-15T08:00:00Z"),
            income("30", "2024-04-01T08:00:00Z"),
        ];
        let by_day = group_by_date(&entries, DateGranularity::Day);
        assert_eq!(by_day.len(), 3);
        assert_eq!(by_day["01/03/2024"].len(), 1);

        let by_month = group_by_date(&entries, DateGranularity::Month);
        assert_eq!(by_month.len(), 2);
        assert_eq!(by_month["03/2024"].len(), 2);
        assert_eq!(by_month["04/2024"].len(), 1);
    }

    #[test]
    fn group_by_date_preserves_order_within_bucket() {
        let entries = vec![
            income("1", "2024-03-01T08:00:00Z"),
            income("2", "2024-03-01T09:00:00Z"),
            income("3", "2024-03-01T10:00:00Z"),
        ];
        let by_day = group_by_date(&entries, DateGranularity::Day);
        let bucket = &by_day["01/03/2024"];
        let amounts: Vec<&str> = bucket.iter().map(|e| e.amount.as_str()).collect();
        assert_eq!(amounts, vec!["1", "2", "3"]);
    }

    #[test]
    fn group_by_date_skips_unparseable_dates() {
        let entries = vec![income("1", "not-a-date"), income("2", "2024-03-01T08:00:00Z")];
        let by_day = group_by_date(&entries, DateGranularity::Day);
        assert_eq!(by_day.len(), 1);
    }

    #[test]
    fn month_index_grouping_discards_bad_rows() {
        let entries = vec![
            income("100", "2024-01-10T00:00:00Z"),
            income("garbage", "2024-01-11T00:00:00Z"),
            income("50", "bad-date"),
            income("200", "2023-01-20T00:00:00Z"), // same month, other year
        ];
        let grouped = group_by_month_index(&entries);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[&0], 300.0);
    }

    #[test]
    fn monthly_series_zero_fills_empty_months() {
        let entries = vec![income("100", "2024-02-10T00:00:00Z")];
        let series = monthly_series(&entries);
        assert_eq!(series[1], 100.0);
        assert_eq!(series.iter().sum::<f64>(), 100.0);
        assert_eq!(month_label(1), "T2");
        assert_eq!(month_label(11), "T12");
    }

    #[test]
    fn unknown_categories_fold_into_other() {
        let expenses = vec![
            expense("Ăn uống", "100", "2024-01-01T00:00:00Z"),
            expense("Xăng xe", "40", "2024-01-02T00:00:00Z"),
            expense("Khác", "10", "2024-01-03T00:00:00Z"),
        ];
        let grouped = aggregate_by_category(&expenses);
        assert_eq!(grouped["Ăn uống"], 100.0);
        assert_eq!(grouped[CATEGORY_OTHER], 50.0);
        assert_eq!(grouped.len(), 2);
    }

    #[test]
    fn settlement_is_zero_sum() {
        let bill = bill_with(vec![("An", 100000.0), ("Binh", 50000.0), ("Chi", 0.0)]);
        let settlements = compute_settlement(&bill);
        let sum: f64 = settlements.iter().map(|s| s.to_pay).sum();
        assert!(sum.abs() < 1e-9);
    }

    #[test]
    fn settlement_of_empty_bill_is_empty() {
        let bill = Bill::new_open();
        assert!(compute_settlement(&bill).is_empty());
    }

    #[test]
    fn settlement_splits_an_and_binh_scenario() {
        let bill = bill_with(vec![("An", 100000.0), ("Binh", 50000.0)]);
        assert_eq!(bill.total_amount, 150000.0);

        let settlements = compute_settlement(&bill);
        assert_eq!(settlements.len(), 2);
        assert_eq!(settlements[0].name, "An");
        assert_eq!(settlements[0].to_pay, -25000.0);
        assert_eq!(settlements[1].name, "Binh");
        assert_eq!(settlements[1].to_pay, 25000.0);
    }
}
