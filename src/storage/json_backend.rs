use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{default_store_file, ensure_dir},
    errors::{ExpenseError, Result},
    ledger::{Expense, Ledger, CURRENT_SCHEMA_VERSION},
};

use super::StorageBackend;

const TMP_SUFFIX: &str = "tmp";

/// JSON file backend for the expense ledger.
///
/// The durable form is pretty-printed JSON with a top-level
/// `schema_version` and the ordered `expenses` array. Files written by the
/// pre-versioning tooling (a bare JSON array of expense objects) still load
/// and are rewritten in the versioned form on the next save.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backend rooted at the default store location
    /// (`$EXPENSE_CORE_HOME/expenses.json`, else `~/.expense_core/expenses.json`).
    pub fn new_default() -> Self {
        Self::new(default_store_file())
    }
}

impl StorageBackend for JsonStorage {
    fn load(&self) -> Result<Ledger> {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "Store file absent; starting empty ledger");
            return Ok(Ledger::new());
        }
        let data = fs::read_to_string(&self.path)?;
        let ledger = parse_ledger(&data)?;
        if ledger.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(ExpenseError::Schema {
                found: ledger.schema_version,
                supported: CURRENT_SCHEMA_VERSION,
            });
        }
        tracing::info!(
            path = %self.path.display(),
            expenses = ledger.expense_count(),
            "Loaded ledger"
        );
        Ok(ledger)
    }

    fn save(&self, ledger: &Ledger) -> Result<()> {
        let json = serde_json::to_string_pretty(ledger)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::info!(
            path = %self.path.display(),
            expenses = ledger.expense_count(),
            "Saved ledger"
        );
        Ok(())
    }

    fn location(&self) -> &Path {
        &self.path
    }
}

fn parse_ledger(data: &str) -> Result<Ledger> {
    match serde_json::from_str::<Ledger>(data) {
        Ok(ledger) => Ok(ledger),
        Err(err) => {
            // Pre-versioning files hold a bare array of expense objects.
            if let Ok(expenses) = serde_json::from_str::<Vec<Expense>>(data) {
                return Ok(Ledger::from_expenses(expenses));
            }
            Err(err.into())
        }
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn storage_with_temp_dir() -> (JsonStorage, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let storage = JsonStorage::new(temp.path().join("expenses.json"));
        (storage, temp)
    }

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.add_expense(Expense::new(
            "Lunch",
            12.5,
            "Food",
            NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        ));
        ledger
    }

    #[test]
    fn save_and_load_roundtrip() {
        let (storage, _guard) = storage_with_temp_dir();
        let ledger = sample_ledger();
        storage.save(&ledger).expect("save ledger");
        let loaded = storage.load().expect("load ledger");
        assert_eq!(loaded.expenses, ledger.expenses);
        assert_eq!(loaded.schema_version, CURRENT_SCHEMA_VERSION);
    }

    #[test]
    fn missing_file_yields_empty_ledger() {
        let (storage, _guard) = storage_with_temp_dir();
        let loaded = storage.load().expect("absent file is not an error");
        assert!(loaded.is_empty());
    }

    #[test]
    fn corrupt_file_propagates_error() {
        let (storage, _guard) = storage_with_temp_dir();
        fs::write(storage.location(), "{not json").unwrap();
        assert!(storage.load().is_err());
    }

    #[test]
    fn bare_array_file_loads_as_current_schema() {
        let (storage, _guard) = storage_with_temp_dir();
        fs::write(
            storage.location(),
            r#"[{"description": "Bus", "amount": 2.75, "category": "Transit", "date": "2025-04-02"}]"#,
        )
        .unwrap();
        let loaded = storage.load().expect("legacy array must load");
        assert_eq!(loaded.expense_count(), 1);
        assert_eq!(loaded.schema_version, CURRENT_SCHEMA_VERSION);
    }

    #[test]
    fn newer_schema_version_is_rejected() {
        let (storage, _guard) = storage_with_temp_dir();
        fs::write(
            storage.location(),
            r#"{"schema_version": 99, "expenses": []}"#,
        )
        .unwrap();
        let err = storage.load().expect_err("newer schema must fail");
        assert!(
            matches!(err, ExpenseError::Schema { found: 99, .. }),
            "unexpected error: {err:?}"
        );
    }
}
