pub mod csv;
pub mod memory;
pub mod migrations;
pub mod sqlite;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::Lead;

pub use self::csv::CsvLeadStore;
pub use self::memory::MemoryLeadStore;
pub use self::sqlite::SqliteLeadStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("csv error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("migration failed: {0}")]
    Migration(String),
}

/// Whole-collection persistence for leads. Implementations read and write
/// everything at once; there is no per-row update.
pub trait LeadStore: Send + Sync {
    /// All leads in stored order. A missing backing file is an empty list.
    fn load(&self) -> Result<Vec<Lead>, StoreError>;

    /// Overwrite the backing store with `leads`.
    fn replace_all(&self, leads: &[Lead]) -> Result<(), StoreError>;

    /// Like `replace_all`, but an empty collection is never written, so the
    /// last lead cannot be deleted through this path.
    fn save(&self, leads: &[Lead]) -> Result<(), StoreError> {
        if leads.is_empty() {
            tracing::debug!("empty lead collection, skipping save");
            return Ok(());
        }
        self.replace_all(leads)
    }
}

impl<T: LeadStore + ?Sized> LeadStore for Arc<T> {
    fn load(&self) -> Result<Vec<Lead>, StoreError> {
        (**self).load()
    }

    fn replace_all(&self, leads: &[Lead]) -> Result<(), StoreError> {
        (**self).replace_all(leads)
    }
}

pub fn open_store(config: &AppConfig) -> anyhow::Result<Box<dyn LeadStore>> {
    match config.lead_store.as_str() {
        "sqlite" => {
            tracing::info!("using sqlite lead store ({})", config.database_url);
            Ok(Box::new(SqliteLeadStore::open(&config.database_url)?))
        }
        "csv" => {
            tracing::info!("using csv lead store ({})", config.leads_csv);
            Ok(Box::new(CsvLeadStore::new(&config.leads_csv)))
        }
        other => anyhow::bail!("unknown LEAD_STORE backend: {other}"),
    }
}
