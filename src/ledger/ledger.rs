use serde::{Deserialize, Serialize};

use super::expense::Expense;

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// The persisted expense ledger: an ordered, append-only record sequence
/// plus the on-disk schema version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default = "Ledger::schema_version_default")]
    pub schema_version: u8,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            expenses: Vec::new(),
        }
    }

    /// Wraps records loaded from a pre-versioning file.
    pub fn from_expenses(expenses: Vec<Expense>) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            expenses,
        }
    }

    /// Appends one expense, returning its position in the sequence.
    pub fn add_expense(&mut self, expense: Expense) -> usize {
        self.expenses.push(expense);
        self.expenses.len() - 1
    }

    pub fn expense_count(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}
