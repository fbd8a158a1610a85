//! # Admin Commands
//!
//! The destructive flows behind the admin menu: listing records by index,
//! deleting one, overwriting one, and the full resets.
//!
//! Deleting or editing a sale does NOT restore or re-deduct stock; the
//! inventory keeps whatever the original sale left behind. This matches
//! current store practice and is a documented gap, not an oversight to
//! patch here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use wireline_core::report::reset as reset_data;
use wireline_core::validation::{
    validate_employee_name, validate_price_cents, validate_product_name, validate_quantity,
};
use wireline_core::{
    CoreError, LineItem, PaymentMethod, ResetKind, SaleRecord, StoreLocation,
};

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Listing
// =============================================================================

/// A sale record paired with its absolute position in the log.
///
/// The index is what delete/edit commands address, so it stays absolute
/// even when the listing is filtered to one day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexedSale {
    pub index: usize,
    pub record: SaleRecord,
}

/// Lists sale records with their log indexes, optionally only today's
/// (UTC), which is the admin edit screen's default view.
pub fn list_sales(state: &AppState, today_only: bool) -> Result<Vec<IndexedSale>, ApiError> {
    let log = state.sales.load()?;
    let today = Utc::now().date_naive();

    Ok(log
        .records()
        .iter()
        .enumerate()
        .filter(|(_, r)| !today_only || r.recorded_at.date_naive() == today)
        .map(|(index, record)| IndexedSale {
            index,
            record: record.clone(),
        })
        .collect())
}

// =============================================================================
// Delete / Edit
// =============================================================================

/// Deletes the record at `index` and returns it.
pub fn delete_sale(state: &AppState, index: usize) -> Result<SaleRecord, ApiError> {
    let removed = state
        .sales
        .update(|log| log.delete(index))?
        .map_err(ApiError::from)?;

    warn!(index, sale_id = %removed.id, "sale record deleted; stock not re-credited");
    Ok(removed)
}

/// A full overwrite of one sale record.
///
/// Aggregates are recomputed from `items`; the record keeps its original
/// UUID and classification. Omitting `recorded_at` keeps the original
/// timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditSaleRequest {
    pub index: usize,
    pub employee: String,
    pub store: StoreLocation,
    pub payment: PaymentMethod,
    pub items: Vec<LineItem>,
    pub recorded_at: Option<DateTime<Utc>>,
}

/// Overwrites the record at the given index.
pub fn edit_sale(state: &AppState, req: EditSaleRequest) -> Result<SaleRecord, ApiError> {
    validate_employee_name(&req.employee).map_err(CoreError::from)?;
    if req.items.is_empty() {
        return Err(CoreError::EmptySale.into());
    }
    for item in &req.items {
        validate_product_name(item.product.name()).map_err(CoreError::from)?;
        validate_quantity(item.quantity).map_err(CoreError::from)?;
        validate_price_cents(item.unit_cost_cents).map_err(CoreError::from)?;
        validate_price_cents(item.unit_price_cents).map_err(CoreError::from)?;
    }

    let updated = state
        .sales
        .update(|log| {
            let existing = log.get(req.index).ok_or(CoreError::NotFound {
                index: req.index,
            })?;

            let replacement = SaleRecord::from_items(
                existing.id.clone(),
                req.employee.trim().to_string(),
                req.store,
                req.recorded_at.unwrap_or(existing.recorded_at),
                existing.kind,
                req.items.clone(),
                req.payment,
            );
            log.replace(req.index, replacement)?;

            // replace() recomputed the aggregates; read back what was stored
            log.get(req.index).cloned().ok_or(CoreError::NotFound {
                index: req.index,
            })
        })?
        .map_err(ApiError::from)?;

    info!(index = req.index, sale_id = %updated.id, "sale record overwritten");
    Ok(updated)
}

// =============================================================================
// Reset
// =============================================================================

/// Clears all sale records or all inventory, per `kind`.
pub fn reset(state: &AppState, kind: ResetKind) -> Result<(), ApiError> {
    let mut log = state.sales.load()?;
    let mut inventory = state.inventory.load()?;

    reset_data(kind, &mut log, &mut inventory);

    match kind {
        ResetKind::Sales => state.sales.save(&log)?,
        ResetKind::Inventory => state.inventory.save(&inventory)?,
    }

    warn!(?kind, "data reset");
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::sale::{record, RecordSaleRequest};
    use crate::error::ErrorCode;
    use wireline_core::{Money, ProductRef, SaleKind};

    const STORE: StoreLocation = StoreLocation::PennSquare;

    fn widget(qty: i64, cost: i64, price: i64) -> LineItem {
        LineItem {
            product: ProductRef::Catalog("Widget".to_string()),
            quantity: qty,
            unit_cost_cents: cost,
            unit_price_cents: price,
        }
    }

    fn seeded_state(tmp: &tempfile::TempDir) -> AppState {
        let state = AppState::at(tmp.path()).unwrap();
        state
            .inventory
            .update(|inv| inv.increment_or_create(STORE, "Widget", 10, Money::from_cents(500)))
            .unwrap()
            .unwrap();
        record(
            &state,
            RecordSaleRequest {
                employee: "pat".to_string(),
                store: STORE,
                payment: PaymentMethod::Cash,
                items: vec![widget(3, 500, 800)],
            },
        )
        .unwrap();
        state
    }

    #[test]
    fn test_list_sales_carries_absolute_indexes() {
        let tmp = tempfile::tempdir().unwrap();
        let state = seeded_state(&tmp);

        let rows = list_sales(&state, false).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].index, 0);
        assert_eq!(rows[0].record.employee, "pat");

        // records just written are today's
        assert_eq!(list_sales(&state, true).unwrap().len(), 1);
    }

    #[test]
    fn test_delete_sale_does_not_restock() {
        let tmp = tempfile::tempdir().unwrap();
        let state = seeded_state(&tmp);

        let removed = delete_sale(&state, 0).unwrap();
        assert_eq!(removed.employee, "pat");
        assert!(state.sales.load().unwrap().is_empty());

        // the 3 sold units stay sold
        assert_eq!(state.inventory.load().unwrap().quantity(STORE, "Widget"), 7);
    }

    #[test]
    fn test_delete_sale_bad_index() {
        let tmp = tempfile::tempdir().unwrap();
        let state = seeded_state(&tmp);

        let err = delete_sale(&state, 9).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(state.sales.load().unwrap().len(), 1);
    }

    #[test]
    fn test_edit_sale_recomputes_and_keeps_identity() {
        let tmp = tempfile::tempdir().unwrap();
        let state = seeded_state(&tmp);
        let original = state.sales.load().unwrap().get(0).unwrap().clone();

        let updated = edit_sale(
            &state,
            EditSaleRequest {
                index: 0,
                employee: "sam".to_string(),
                store: STORE,
                payment: PaymentMethod::Card,
                items: vec![widget(2, 400, 900)],
                recorded_at: None,
            },
        )
        .unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.kind, SaleKind::PhoneSale);
        assert_eq!(updated.recorded_at, original.recorded_at);
        assert_eq!(updated.employee, "sam");
        assert_eq!(updated.cost_cents, 800);
        assert_eq!(updated.revenue_cents, 1800);
        assert_eq!(updated.margin_cents, 1000);

        // inventory untouched by the edit
        assert_eq!(state.inventory.load().unwrap().quantity(STORE, "Widget"), 7);
    }

    #[test]
    fn test_edit_sale_rejects_empty_items() {
        let tmp = tempfile::tempdir().unwrap();
        let state = seeded_state(&tmp);

        let err = edit_sale(
            &state,
            EditSaleRequest {
                index: 0,
                employee: "sam".to_string(),
                store: STORE,
                payment: PaymentMethod::Card,
                items: vec![],
                recorded_at: None,
            },
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_reset_sales_keeps_inventory() {
        let tmp = tempfile::tempdir().unwrap();
        let state = seeded_state(&tmp);

        reset(&state, ResetKind::Sales).unwrap();
        assert!(state.sales.load().unwrap().is_empty());
        assert_eq!(state.inventory.load().unwrap().quantity(STORE, "Widget"), 7);
    }

    #[test]
    fn test_reset_inventory_keeps_sales() {
        let tmp = tempfile::tempdir().unwrap();
        let state = seeded_state(&tmp);

        reset(&state, ResetKind::Inventory).unwrap();
        assert!(state.inventory.load().unwrap().is_empty());
        assert_eq!(state.sales.load().unwrap().len(), 1);
    }
}
