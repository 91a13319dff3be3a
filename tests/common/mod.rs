use std::path::PathBuf;
use std::sync::Mutex;

use expense_core::{core::LedgerManager, storage::JsonStorage};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Reserves an isolated directory for one test and keeps it alive.
pub fn test_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

/// Storage backend rooted in an isolated directory.
#[allow(dead_code)]
pub fn temp_storage() -> JsonStorage {
    JsonStorage::new(test_dir().join("expenses.json"))
}

/// Facade over an empty, isolated store.
#[allow(dead_code)]
pub fn temp_manager() -> LedgerManager {
    LedgerManager::open(Box::new(temp_storage())).expect("open ledger over empty store")
}
