//! # Inventory Repository
//!
//! Loads and saves the inventory document (`inventory.json`): a mapping
//! from store location to a mapping from product name to its stock entry.
//!
//! ## Schema Tolerance
//! The current format stores each product as a nested object:
//!
//! ```json
//! { "1 E Penn Sq": { "Widget": { "quantity": 10, "unit_cost_cents": 500 } } }
//! ```
//!
//! Earlier deployments wrote a bare integer quantity per product:
//!
//! ```json
//! { "1 E Penn Sq": { "Widget": 10 } }
//! ```
//!
//! Reads accept both (a bare quantity gets a zero unit cost); writes always
//! produce the nested form.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::debug;

use wireline_core::{Inventory, StockEntry, StoreLocation};

use crate::error::{StoreError, StoreResult};
use crate::paths::DataDir;

/// One product's value as found on disk, either format.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawStock {
    Nested(StockEntry),
    Bare(i64),
}

impl From<RawStock> for StockEntry {
    fn from(raw: RawStock) -> StockEntry {
        match raw {
            RawStock::Nested(entry) => entry,
            RawStock::Bare(quantity) => StockEntry {
                quantity,
                unit_cost_cents: 0,
            },
        }
    }
}

type RawInventory = BTreeMap<StoreLocation, BTreeMap<String, RawStock>>;

/// File-backed handle to the inventory document.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    path: PathBuf,
}

impl InventoryRepository {
    /// Creates a repository over the data directory's inventory document.
    pub fn new(data_dir: &DataDir) -> Self {
        InventoryRepository {
            path: data_dir.inventory_path(),
        }
    }

    /// Loads the inventory.
    ///
    /// A missing file yields an empty catalog for every store; any other
    /// read failure or a malformed document is an error.
    pub fn load(&self) -> StoreResult<Inventory> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no inventory file yet, starting empty");
                return Ok(Inventory::new());
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        let raw: RawInventory =
            serde_json::from_slice(&bytes).map_err(|e| StoreError::Malformed {
                path: self.path.clone(),
                source: e,
            })?;

        let stores = raw
            .into_iter()
            .map(|(loc, catalog)| {
                let catalog = catalog
                    .into_iter()
                    .map(|(name, stock)| (name, StockEntry::from(stock)))
                    .collect();
                (loc, catalog)
            })
            .collect();

        let inventory = Inventory::from_parts(stores);
        debug!(
            path = %self.path.display(),
            products = inventory.product_count(),
            "inventory loaded"
        );
        Ok(inventory)
    }

    /// Saves the inventory, rewriting the whole document in nested form.
    pub fn save(&self, inventory: &Inventory) -> StoreResult<()> {
        let json = serde_json::to_vec_pretty(inventory).map_err(|e| StoreError::Serialize {
            path: self.path.clone(),
            source: e,
        })?;

        std::fs::write(&self.path, json).map_err(|e| StoreError::io(&self.path, e))?;
        debug!(
            path = %self.path.display(),
            products = inventory.product_count(),
            "inventory saved"
        );
        Ok(())
    }

    /// Load-modify-save cycle. The closure's result is returned after a
    /// successful save; if the closure fails, nothing is written.
    pub fn update<F, T, E>(&self, f: F) -> StoreResult<Result<T, E>>
    where
        F: FnOnce(&mut Inventory) -> Result<T, E>,
    {
        let mut inventory = self.load()?;
        match f(&mut inventory) {
            Ok(value) => {
                self.save(&inventory)?;
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
    use wireline_core::{CoreError, Money};

    const STORE: StoreLocation = StoreLocation::PennSquare;

    fn repo_in(dir: &tempfile::TempDir) -> InventoryRepository {
        InventoryRepository::new(&DataDir::at(dir.path()).unwrap())
    }

    #[test]
    fn test_load_missing_file_is_empty_inventory() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = repo_in(&tmp);

        let inv = repo.load().unwrap();
        assert!(inv.is_empty());
        // every store location is present even when empty
        for loc in StoreLocation::ALL {
            assert_eq!(inv.products(loc).count(), 0);
        }
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = repo_in(&tmp);

        let mut inv = Inventory::new();
        inv.increment_or_create(STORE, "Widget", 10, Money::from_cents(500))
            .unwrap();
        repo.save(&inv).unwrap();

        let loaded = repo.load().unwrap();
        assert_eq!(loaded, inv);
        assert_eq!(loaded.quantity(STORE, "Widget"), 10);
    }

    #[test]
    fn test_load_accepts_legacy_bare_quantities() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = repo_in(&tmp);

        std::fs::write(
            tmp.path().join("inventory.json"),
            br#"{ "1 E Penn Sq": { "Widget": 10, "Gadget": 3 } }"#,
        )
        .unwrap();

        let inv = repo.load().unwrap();
        assert_eq!(inv.quantity(STORE, "Widget"), 10);
        let entry = inv.entry(STORE, "Gadget").unwrap();
        assert_eq!(entry.quantity, 3);
        assert_eq!(entry.unit_cost_cents, 0);
    }

    #[test]
    fn test_load_accepts_mixed_forms() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = repo_in(&tmp);

        std::fs::write(
            tmp.path().join("inventory.json"),
            br#"{ "1 E Penn Sq": {
                "Widget": 10,
                "Gadget": { "quantity": 3, "unit_cost_cents": 250 }
            } }"#,
        )
        .unwrap();

        let inv = repo.load().unwrap();
        assert_eq!(inv.quantity(STORE, "Widget"), 10);
        assert_eq!(inv.entry(STORE, "Gadget").unwrap().unit_cost_cents, 250);
    }

    #[test]
    fn test_saved_form_is_nested() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = repo_in(&tmp);

        std::fs::write(
            tmp.path().join("inventory.json"),
            br#"{ "1 E Penn Sq": { "Widget": 10 } }"#,
        )
        .unwrap();

        let inv = repo.load().unwrap();
        repo.save(&inv).unwrap();

        let text = std::fs::read_to_string(tmp.path().join("inventory.json")).unwrap();
        assert!(text.contains("\"quantity\": 10"));
        assert!(text.contains("\"unit_cost_cents\": 0"));
    }

    #[test]
    fn test_malformed_file_is_typed_error() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = repo_in(&tmp);

        std::fs::write(tmp.path().join("inventory.json"), b"[1, 2, 3]").unwrap();
        let err = repo.load().unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
    }

    #[test]
    fn test_update_persists_on_success() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = repo_in(&tmp);

        repo.update(|inv| inv.increment_or_create(STORE, "Widget", 5, Money::from_cents(500)))
            .unwrap()
            .unwrap();

        assert_eq!(repo.load().unwrap().quantity(STORE, "Widget"), 5);
    }

    #[test]
    fn test_update_skips_save_on_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = repo_in(&tmp);

        let result: Result<i64, CoreError> =
            repo.update(|inv| inv.decrement(STORE, "Widget", 1)).unwrap();

        assert!(result.is_err());
        assert!(!tmp.path().join("inventory.json").exists());
    }
}
