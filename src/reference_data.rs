//! # Reference Data Module
//!
//! Load-once cache for the reference nutrition table.
//!
//! The table is loaded from its source on first use and shared read-only for
//! the rest of the process. Callers own the cache and inject it where needed.
//! A failed load is not cached: the caller gets an empty table and the next
//! call retries.

use crate::engine_errors::EngineError;
use crate::nutrition_model::ReferenceTable;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tracing::{error, info};

/// Somewhere a reference table can be loaded from
pub trait ReferenceSource {
    fn load(&self) -> Result<ReferenceTable, EngineError>;
}

/// Reference table stored as a JSON file
#[derive(Debug, Clone)]
pub struct FileReferenceSource {
    path: PathBuf,
}

impl FileReferenceSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReferenceSource for FileReferenceSource {
    fn load(&self) -> Result<ReferenceTable, EngineError> {
        let json = fs::read_to_string(&self.path).map_err(|e| {
            EngineError::ReferenceData(format!(
                "Failed to read reference data {}: {}",
                self.path.display(),
                e
            ))
        })?;
        ReferenceTable::from_json_str(&json)
    }
}

/// An already-built table, mostly useful for tests and embedding
impl ReferenceSource for ReferenceTable {
    fn load(&self) -> Result<ReferenceTable, EngineError> {
        Ok(self.clone())
    }
}

/// Process-wide, read-only reference table cache
#[derive(Debug)]
pub struct ReferenceDataCache<S = FileReferenceSource> {
    source: S,
    table: OnceLock<Arc<ReferenceTable>>,
}

impl ReferenceDataCache<FileReferenceSource> {
    /// Cache backed by a JSON file
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(FileReferenceSource::new(path))
    }
}

impl<S: ReferenceSource> ReferenceDataCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            table: OnceLock::new(),
        }
    }

    /// Whether a table has been loaded and cached
    pub fn is_loaded(&self) -> bool {
        self.table.get().is_some()
    }

    /// Get the table, loading it on first use
    ///
    /// Never fails: if loading fails the error is logged and an empty table is returned.
    pub fn get(&self) -> Arc<ReferenceTable> {
        match self.try_get() {
            Ok(table) => table,
            Err(e) => {
                error!("Error loading nutrition reference data: {}", e);
                Arc::new(ReferenceTable::default())
            }
        }
    }

    /// Get the table, loading it on first use and reporting load failures
    pub fn try_get(&self) -> Result<Arc<ReferenceTable>, EngineError> {
        if let Some(table) = self.table.get() {
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(self.source.load()?);
        info!("Loaded {} reference ingredients", table.len());

        // Another thread may have won the race; keep whichever was stored first
        match self.table.set(Arc::clone(&table)) {
            Ok(()) => Ok(table),
            Err(_) => Ok(self.table.get().map(Arc::clone).unwrap_or(table)),
        }
    }
}
