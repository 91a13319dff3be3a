//! Ledger domain models, persistence-friendly types, and helpers.

pub mod date_range;
pub mod expense;
#[allow(clippy::module_inception)]
pub mod ledger;

pub use date_range::DateRange;
pub use expense::Expense;
pub use ledger::{Ledger, CURRENT_SCHEMA_VERSION};
