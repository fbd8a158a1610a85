//! # Catalog & Inventory Store
//!
//! Per-store product catalog and stock levels.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Operator Action            Operation              State Change     │
//! │  ───────────────            ─────────              ────────────     │
//! │                                                                     │
//! │  Restock / new product ──► increment_or_create ──► qty += n,        │
//! │                                                    cost overwritten │
//! │  Record sale ────────────► decrement ────────────► qty -= n         │
//! │                                                    (never below 0)  │
//! │  Rename product ─────────► rename ───────────────► key moves,       │
//! │                                                    entry preserved  │
//! │  Remove product ─────────► delete ───────────────► entry removed    │
//! │  Admin reset ────────────► clear ────────────────► all stores empty │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The inventory is an explicit repository value passed by reference into
//! each operation. Persistence is wireline-store's concern.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{StockEntry, StoreLocation};
use crate::MAX_ITEM_QUANTITY;

/// Product catalog and stock levels for every store location.
///
/// ## Invariants
/// - Product names are unique within a store (they are the map key)
/// - Quantities never go negative
/// - Every store location has an entry, even when its catalog is empty
///
/// BTreeMaps keep stores and products in a stable order so listings and the
/// persisted JSON are deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    stores: BTreeMap<StoreLocation, BTreeMap<String, StockEntry>>,
}

impl Default for Inventory {
    /// An empty catalog for every store location.
    fn default() -> Self {
        Inventory {
            stores: StoreLocation::ALL
                .into_iter()
                .map(|loc| (loc, BTreeMap::new()))
                .collect(),
        }
    }
}

impl Inventory {
    /// Creates an inventory with an empty catalog at every store.
    pub fn new() -> Self {
        Inventory::default()
    }

    /// Builds an inventory from per-store catalogs, filling in an empty
    /// catalog for any store the input omits. Used by the persistence layer
    /// when decoding documents written before every store had an entry.
    pub fn from_parts(stores: BTreeMap<StoreLocation, BTreeMap<String, StockEntry>>) -> Self {
        let mut inv = Inventory { stores };
        for loc in StoreLocation::ALL {
            inv.stores.entry(loc).or_default();
        }
        inv
    }

    /// Returns the quantity on hand, or 0 if the product is unknown at the
    /// store.
    pub fn quantity(&self, store: StoreLocation, product: &str) -> i64 {
        self.entry(store, product).map_or(0, |e| e.quantity)
    }

    /// Looks up a product's stock entry.
    pub fn entry(&self, store: StoreLocation, product: &str) -> Option<&StockEntry> {
        self.stores.get(&store).and_then(|c| c.get(product))
    }

    /// Removes `qty` units from stock and returns the remaining quantity.
    ///
    /// ## Errors
    /// - `InvalidQuantity` if `qty` is not positive
    /// - `UnknownProduct` if the product is not in the store's catalog
    /// - `InsufficientStock` if `qty` exceeds what is on hand
    ///
    /// The quantity never goes negative; a decrement to exactly zero keeps
    /// the catalog entry at quantity 0. Per-line quantity caps are the
    /// recorder's concern; one sale may legitimately total more than a
    /// single line allows.
    pub fn decrement(&mut self, store: StoreLocation, product: &str, qty: i64) -> CoreResult<i64> {
        if qty <= 0 {
            return Err(CoreError::InvalidQuantity { quantity: qty });
        }

        let entry = self
            .stores
            .get_mut(&store)
            .and_then(|c| c.get_mut(product))
            .ok_or_else(|| CoreError::UnknownProduct {
                store,
                product: product.to_string(),
            })?;

        if entry.quantity < qty {
            return Err(CoreError::InsufficientStock {
                product: product.to_string(),
                available: entry.quantity,
                requested: qty,
            });
        }

        entry.quantity -= qty;
        Ok(entry.quantity)
    }

    /// Adds `qty` units to an existing product or creates it.
    ///
    /// If the product exists, its unit cost is overwritten with the supplied
    /// value (last-write-wins; no historical cost tracking, since recorded
    /// sales keep the cost on their own line items). Returns the new
    /// quantity.
    ///
    /// ## Errors
    /// - `InvalidQuantity` if `qty` is not in 1..=999
    pub fn increment_or_create(
        &mut self,
        store: StoreLocation,
        product: &str,
        qty: i64,
        unit_cost: Money,
    ) -> CoreResult<i64> {
        if !(1..=MAX_ITEM_QUANTITY).contains(&qty) {
            return Err(CoreError::InvalidQuantity { quantity: qty });
        }

        let entry = self
            .stores
            .entry(store)
            .or_default()
            .entry(product.to_string())
            .or_insert(StockEntry {
                quantity: 0,
                unit_cost_cents: 0,
            });

        entry.quantity += qty;
        entry.unit_cost_cents = unit_cost.cents();
        Ok(entry.quantity)
    }

    /// Renames a product, preserving its quantity and cost under the new key.
    ///
    /// Renaming to the same name is a no-op.
    ///
    /// ## Errors
    /// - `UnknownProduct` if `old` is not in the store's catalog
    /// - `DuplicateProduct` if `new` names a different existing product
    pub fn rename(&mut self, store: StoreLocation, old: &str, new: &str) -> CoreResult<()> {
        if old == new {
            return Ok(());
        }

        let catalog = self
            .stores
            .get_mut(&store)
            .ok_or_else(|| CoreError::UnknownProduct {
                store,
                product: old.to_string(),
            })?;

        if !catalog.contains_key(old) {
            return Err(CoreError::UnknownProduct {
                store,
                product: old.to_string(),
            });
        }

        if catalog.contains_key(new) {
            return Err(CoreError::DuplicateProduct {
                store,
                product: new.to_string(),
            });
        }

        // contains_key checks above make this remove infallible
        if let Some(entry) = catalog.remove(old) {
            catalog.insert(new.to_string(), entry);
        }
        Ok(())
    }

    /// Removes a product from the store's catalog and returns its last entry.
    ///
    /// ## Errors
    /// - `UnknownProduct` if the product is not in the store's catalog
    pub fn delete(&mut self, store: StoreLocation, product: &str) -> CoreResult<StockEntry> {
        self.stores
            .get_mut(&store)
            .and_then(|c| c.remove(product))
            .ok_or_else(|| CoreError::UnknownProduct {
                store,
                product: product.to_string(),
            })
    }

    /// Iterates the store's catalog in name order.
    pub fn products(
        &self,
        store: StoreLocation,
    ) -> impl Iterator<Item = (&str, &StockEntry)> + '_ {
        self.stores
            .get(&store)
            .into_iter()
            .flat_map(|c| c.iter().map(|(name, entry)| (name.as_str(), entry)))
    }

    /// Number of distinct products across all stores.
    pub fn product_count(&self) -> usize {
        self.stores.values().map(BTreeMap::len).sum()
    }

    /// True when no store has any product.
    pub fn is_empty(&self) -> bool {
        self.product_count() == 0
    }

    /// Resets every store's catalog back to empty (admin operation).
    pub fn clear(&mut self) {
        *self = Inventory::default();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
