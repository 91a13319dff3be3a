use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{ExpenseError, Result};

/// Canonical textual form for expense dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single recorded expense.
///
/// The date is stored as text in its canonical `YYYY-MM-DD` form and parsed
/// lazily: a malformed value surfaces as [`ExpenseError::InvalidDate`] from
/// whichever operation first needs the calendar date, never at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub date: String,
}

impl Expense {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            category: category.into(),
            date: format_date(date),
        }
    }

    /// Parses the stored date text into a calendar date.
    pub fn date(&self) -> Result<NaiveDate> {
        parse_date(&self.date)
    }
}

/// Renders a calendar date in the canonical `YYYY-MM-DD` form.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses canonical `YYYY-MM-DD` text into a calendar date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|source| ExpenseError::InvalidDate {
        value: value.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_formats_date_canonically() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        let expense = Expense::new("Coffee", 3.5, "Food", date);
        assert_eq!(expense.date, "2025-03-07");
        assert_eq!(expense.date().unwrap(), date);
    }

    #[test]
    fn malformed_date_is_a_hard_error() {
        let expense = Expense {
            description: "Broken".into(),
            amount: 1.0,
            category: "Misc".into(),
            date: "03/07/2025".into(),
        };
        let err = expense.date().expect_err("slash-formatted date must fail");
        assert!(
            matches!(err, ExpenseError::InvalidDate { ref value, .. } if value == "03/07/2025"),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn serde_round_trip_preserves_fields() {
        let expense = Expense::new(
            "Groceries",
            42.17,
            "Food",
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        );
        let json = serde_json::to_string(&expense).unwrap();
        let back: Expense = serde_json::from_str(&json).unwrap();
        assert_eq!(back, expense);
    }
}
