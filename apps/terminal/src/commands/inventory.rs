//! # Inventory Commands
//!
//! Catalog maintenance: listing, restocking, renames and deletions.
//! Mirrors the store's back-office workflow; sale-driven stock changes go
//! through the sale command instead.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use wireline_core::validation::{validate_price_cents, validate_product_name};
use wireline_core::{Money, StockEntry, StoreLocation};

use crate::error::ApiError;
use crate::state::AppState;

/// One catalog row in a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRow {
    pub name: String,
    pub quantity: i64,
    pub unit_cost_cents: i64,
}

/// Lists the store's catalog in name order.
pub fn list(state: &AppState, store: StoreLocation) -> Result<Vec<ProductRow>, ApiError> {
    let inventory = state.inventory.load()?;

    Ok(inventory
        .products(store)
        .map(|(name, entry)| ProductRow {
            name: name.to_string(),
            quantity: entry.quantity,
            unit_cost_cents: entry.unit_cost_cents,
        })
        .collect())
}

/// Restock request: add units of a product, creating it if new.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestockRequest {
    pub store: StoreLocation,
    pub product: String,
    pub quantity: i64,
    pub unit_cost_cents: i64,
}

/// Adds stock, overwriting the catalog unit cost with the supplied value.
/// Returns the product's new quantity.
pub fn restock(state: &AppState, req: RestockRequest) -> Result<i64, ApiError> {
    debug!(store = %req.store, product = %req.product, qty = req.quantity, "restock");

    validate_product_name(&req.product).map_err(wireline_core::CoreError::from)?;
    validate_price_cents(req.unit_cost_cents).map_err(wireline_core::CoreError::from)?;

    let product = req.product.trim();
    let new_quantity = state
        .inventory
        .update(|inv| {
            inv.increment_or_create(
                req.store,
                product,
                req.quantity,
                Money::from_cents(req.unit_cost_cents),
            )
        })?
        .map_err(ApiError::from)?;

    info!(store = %req.store, product = %product, new_quantity, "stock updated");
    Ok(new_quantity)
}

/// Renames a product, keeping its quantity and cost.
pub fn rename(
    state: &AppState,
    store: StoreLocation,
    from: &str,
    to: &str,
) -> Result<(), ApiError> {
    validate_product_name(to).map_err(wireline_core::CoreError::from)?;

    let to = to.trim();
    state
        .inventory
        .update(|inv| inv.rename(store, from, to))?
        .map_err(ApiError::from)?;

    info!(store = %store, from = %from, to = %to, "product renamed");
    Ok(())
}

/// Removes a product from the catalog and returns its last entry.
pub fn delete(
    state: &AppState,
    store: StoreLocation,
    product: &str,
) -> Result<StockEntry, ApiError> {
    let entry = state
        .inventory
        .update(|inv| inv.delete(store, product))?
        .map_err(ApiError::from)?;

    info!(store = %store, product = %product, "product deleted");
    Ok(entry)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    const STORE: StoreLocation = StoreLocation::PennSquare;

    fn request(product: &str, qty: i64, cost: i64) -> RestockRequest {
        RestockRequest {
            store: STORE,
            product: product.to_string(),
            quantity: qty,
            unit_cost_cents: cost,
        }
    }

    #[test]
    fn test_restock_creates_then_accumulates() {
        let tmp = tempfile::tempdir().unwrap();
        let state = AppState::at(tmp.path()).unwrap();

        assert_eq!(restock(&state, request("Widget", 10, 500)).unwrap(), 10);
        assert_eq!(restock(&state, request("Widget", 5, 450)).unwrap(), 15);

        let rows = list(&state, STORE).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].quantity, 15);
        assert_eq!(rows[0].unit_cost_cents, 450);
    }

    #[test]
    fn test_restock_rejects_blank_name() {
        let tmp = tempfile::tempdir().unwrap();
        let state = AppState::at(tmp.path()).unwrap();

        let err = restock(&state, request("  ", 10, 500)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_rename_and_delete() {
        let tmp = tempfile::tempdir().unwrap();
        let state = AppState::at(tmp.path()).unwrap();
        restock(&state, request("Widget", 10, 500)).unwrap();

        rename(&state, STORE, "Widget", "Widget Pro").unwrap();
        let rows = list(&state, STORE).unwrap();
        assert_eq!(rows[0].name, "Widget Pro");
        assert_eq!(rows[0].quantity, 10);

        let entry = delete(&state, STORE, "Widget Pro").unwrap();
        assert_eq!(entry.quantity, 10);
        assert!(list(&state, STORE).unwrap().is_empty());
    }

    #[test]
    fn test_delete_unknown_product() {
        let tmp = tempfile::tempdir().unwrap();
        let state = AppState::at(tmp.path()).unwrap();

        let err = delete(&state, STORE, "Widget").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_list_is_per_store() {
        let tmp = tempfile::tempdir().unwrap();
        let state = AppState::at(tmp.path()).unwrap();
        restock(&state, request("Widget", 10, 500)).unwrap();

        assert!(list(&state, StoreLocation::GermantownUpper)
            .unwrap()
            .is_empty());
    }
}
