//! # Sales Repository
//!
//! Loads and saves the sales log (`sales.json`), a JSON array of sale
//! records, oldest first.

use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::debug;

use wireline_core::SalesLog;

use crate::error::{StoreError, StoreResult};
use crate::paths::DataDir;

/// File-backed handle to the sales log.
///
/// ## Usage
/// ```rust,no_run
/// use wireline_store::{DataDir, SalesRepository};
///
/// let data_dir = DataDir::resolve(None)?;
/// let repo = SalesRepository::new(&data_dir);
///
/// let log = repo.load()?;
/// println!("{} sales on file", log.len());
/// # Ok::<(), wireline_store::StoreError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SalesRepository {
    path: PathBuf,
}

impl SalesRepository {
    /// Creates a repository over the data directory's sales document.
    pub fn new(data_dir: &DataDir) -> Self {
        SalesRepository {
            path: data_dir.sales_path(),
        }
    }

    /// Loads the sales log.
    ///
    /// A missing file yields an empty log; any other read failure or a
    /// malformed document is an error.
    pub fn load(&self) -> StoreResult<SalesLog> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no sales file yet, starting empty");
                return Ok(SalesLog::new());
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        let log: SalesLog = serde_json::from_slice(&bytes).map_err(|e| StoreError::Malformed {
            path: self.path.clone(),
            source: e,
        })?;

        debug!(path = %self.path.display(), records = log.len(), "sales log loaded");
        Ok(log)
    }

    /// Saves the sales log, rewriting the whole document.
    pub fn save(&self, log: &SalesLog) -> StoreResult<()> {
        let json = serde_json::to_vec_pretty(log).map_err(|e| StoreError::Serialize {
            path: self.path.clone(),
            source: e,
        })?;

        std::fs::write(&self.path, json).map_err(|e| StoreError::io(&self.path, e))?;
        debug!(path = %self.path.display(), records = log.len(), "sales log saved");
        Ok(())
    }

    /// Load-modify-save cycle. The closure's result is returned after a
    /// successful save; if the closure fails, nothing is written.
    pub fn update<F, T, E>(&self, f: F) -> StoreResult<Result<T, E>>
    where
        F: FnOnce(&mut SalesLog) -> Result<T, E>,
    {
        let mut log = self.load()?;
        match f(&mut log) {
            Ok(value) => {
                self.save(&log)?;
                Ok(Ok(value))
            }
            Err(e) => Ok(Err(e)),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use wireline_core::{
        CoreError, LineItem, PaymentMethod, ProductRef, SaleKind, SaleRecord, StoreLocation,
    };

    fn record(employee: &str) -> SaleRecord {
        SaleRecord::from_items(
            format!("id-{employee}"),
            employee.to_string(),
            StoreLocation::PennSquare,
            Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap(),
            SaleKind::PhoneSale,
            vec![LineItem {
                product: ProductRef::Catalog("Widget".to_string()),
                quantity: 2,
                unit_cost_cents: 500,
                unit_price_cents: 800,
            }],
            PaymentMethod::Cash,
        )
    }

    fn repo_in(dir: &tempfile::TempDir) -> SalesRepository {
        SalesRepository::new(&DataDir::at(dir.path()).unwrap())
    }

    #[test]
    fn test_load_missing_file_is_empty_log() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = repo_in(&tmp);

        let log = repo.load().unwrap();
        assert!(log.is_empty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = repo_in(&tmp);

        let mut log = SalesLog::new();
        log.push(record("pat"));
        log.push(record("sam"));
        repo.save(&log).unwrap();

        let loaded = repo.load().unwrap();
        assert_eq!(loaded, log);
        assert_eq!(loaded.get(1).unwrap().employee, "sam");
    }

    #[test]
    fn test_malformed_file_is_typed_error() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = repo_in(&tmp);

        std::fs::write(tmp.path().join("sales.json"), b"{ not json").unwrap();
        let err = repo.load().unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
    }

    #[test]
    fn test_update_persists_on_success() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = repo_in(&tmp);

        repo.update(|log| {
            log.push(record("pat"));
            Ok::<(), CoreError>(())
        })
        .unwrap()
        .unwrap();

        assert_eq!(repo.load().unwrap().len(), 1);
    }

    #[test]
    fn test_update_skips_save_on_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = repo_in(&tmp);

        let result = repo
            .update(|log| {
                log.push(record("pat"));
                log.delete(99).map(|_| ())
            })
            .unwrap();

        assert!(result.is_err());
        // the push inside the failed closure never reached disk
        assert!(repo.load().unwrap().is_empty());
    }
}
