use std::collections::BTreeMap;
use std::path::Path;

use chrono::{Local, NaiveDate};

use crate::core::services::{Forecast, ForecastService, QueryService};
use crate::errors::Result;
use crate::ledger::{DateRange, Expense, Ledger};
use crate::storage::StorageBackend;

/// Facade that coordinates the loaded ledger, persistence, and queries.
///
/// The ledger is loaded once at construction and held in memory for the
/// process lifetime; every mutation is flushed to the store before the
/// call returns.
pub struct LedgerManager {
    ledger: Ledger,
    storage: Box<dyn StorageBackend>,
}

impl LedgerManager {
    /// Loads the ledger from `storage` (an absent file yields an empty one).
    pub fn open(storage: Box<dyn StorageBackend>) -> Result<Self> {
        let ledger = storage.load()?;
        Ok(Self { ledger, storage })
    }

    /// Appends one expense and persists the full sequence. A missing `date`
    /// defaults to the current local date.
    pub fn add_expense(
        &mut self,
        description: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        date: Option<NaiveDate>,
    ) -> Result<&Expense> {
        let date = date.unwrap_or_else(|| Local::now().date_naive());
        let expense = Expense::new(description, amount, category, date);
        tracing::info!(
            description = %expense.description,
            amount = expense.amount,
            category = %expense.category,
            date = %expense.date,
            "Adding expense"
        );
        let idx = self.ledger.add_expense(expense);
        self.storage.save(&self.ledger)?;
        Ok(&self.ledger.expenses[idx])
    }

    /// Records inside `range`, in insertion order.
    pub fn expenses_between(&self, range: &DateRange) -> Result<Vec<&Expense>> {
        QueryService::filter(&self.ledger.expenses, range)
    }

    /// Sum of amounts inside `range`.
    pub fn total_between(&self, range: &DateRange) -> Result<f64> {
        QueryService::total(&self.ledger.expenses, range)
    }

    /// Per-category sums inside `range`.
    pub fn category_report(&self, range: &DateRange) -> Result<BTreeMap<String, f64>> {
        QueryService::report(&self.ledger.expenses, range)
    }

    /// Forecast for tomorrow, with "today" read once from the local clock.
    /// Prediction always runs over everything on file.
    pub fn predict_next(&self) -> Result<Forecast> {
        self.predict_next_as_of(Local::now().date_naive())
    }

    /// Deterministic forecast form: the reference date is supplied by the
    /// caller instead of the wall clock.
    pub fn predict_next_as_of(&self, today: NaiveDate) -> Result<Forecast> {
        ForecastService::predict_next(&self.ledger.expenses, today)
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.ledger.expenses
    }

    pub fn expense_count(&self) -> usize {
        self.ledger.expense_count()
    }

    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }

    pub fn store_location(&self) -> &Path {
        self.storage.location()
    }
}
