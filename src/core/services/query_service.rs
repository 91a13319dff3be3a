//! Stateless date-range queries over the expense sequence.

use std::collections::BTreeMap;

use crate::errors::Result;
use crate::ledger::{DateRange, Expense};

/// Filtering, totals, and per-category aggregation.
///
/// Every operation parses every record's date, so a malformed date anywhere
/// in the sequence fails the whole call rather than skipping the record.
pub struct QueryService;

impl QueryService {
    /// Records whose date falls inside `range`, in insertion order.
    pub fn filter<'a>(expenses: &'a [Expense], range: &DateRange) -> Result<Vec<&'a Expense>> {
        let mut matched = Vec::new();
        for expense in expenses {
            if range.contains(expense.date()?) {
                matched.push(expense);
            }
        }
        tracing::debug!(matched = matched.len(), scanned = expenses.len(), "Filtered expenses");
        Ok(matched)
    }

    /// Sum of amounts inside `range`; `0.0` when nothing matches.
    pub fn total(expenses: &[Expense], range: &DateRange) -> Result<f64> {
        let mut total = 0.0;
        for expense in expenses {
            if range.contains(expense.date()?) {
                total += expense.amount;
            }
        }
        Ok(total)
    }

    /// Per-category sums inside `range`. Categories with no matching record
    /// are absent from the map.
    pub fn report(expenses: &[Expense], range: &DateRange) -> Result<BTreeMap<String, f64>> {
        let mut totals: BTreeMap<String, f64> = BTreeMap::new();
        for expense in expenses {
            if range.contains(expense.date()?) {
                *totals.entry(expense.category.clone()).or_insert(0.0) += expense.amount;
            }
        }
        Ok(totals)
    }
}
