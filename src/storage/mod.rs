pub mod json_backend;

use std::path::Path;

use crate::{errors::Result, ledger::Ledger};

/// Abstraction over persistence backends capable of storing the ledger.
///
/// `load` on an absent location yields an empty ledger; any other failure
/// propagates to the caller. `save` replaces the full record sequence
/// atomically from the caller's point of view.
pub trait StorageBackend: Send + Sync {
    fn load(&self) -> Result<Ledger>;
    fn save(&self, ledger: &Ledger) -> Result<()>;
    fn location(&self) -> &Path;
}

pub use json_backend::JsonStorage;
