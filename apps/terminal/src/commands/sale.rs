//! # Sale Commands

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use wireline_core::validation::{
    validate_employee_name, validate_price_cents, validate_product_name,
};
use wireline_core::{record_sale, LineItem, PaymentMethod, SaleDraft, SaleKind, StoreLocation};

use crate::error::ApiError;
use crate::state::AppState;

/// A proposed sale as parsed from the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSaleRequest {
    pub employee: String,
    pub store: StoreLocation,
    pub payment: PaymentMethod,
    pub items: Vec<LineItem>,
}

/// What the operator sees after a sale is recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSaleResponse {
    pub sale_id: String,
    pub kind: SaleKind,
    pub item_count: usize,
    pub cost_cents: i64,
    pub revenue_cents: i64,
    pub margin_cents: i64,
}

/// Records a sale: validates the request, decrements stock for
/// catalog-backed items, and appends to the sales log.
///
/// The inventory and sales documents are saved only after the core
/// operation succeeds, so a rejected sale leaves both files untouched.
pub fn record(state: &AppState, req: RecordSaleRequest) -> Result<RecordSaleResponse, ApiError> {
    debug!(employee = %req.employee, store = %req.store, items = req.items.len(), "record sale");

    validate_employee_name(&req.employee).map_err(wireline_core::CoreError::from)?;
    for item in &req.items {
        validate_product_name(item.product.name()).map_err(wireline_core::CoreError::from)?;
        validate_price_cents(item.unit_cost_cents).map_err(wireline_core::CoreError::from)?;
        validate_price_cents(item.unit_price_cents).map_err(wireline_core::CoreError::from)?;
    }

    let mut inventory = state.inventory.load()?;
    let mut log = state.sales.load()?;

    let draft = SaleDraft {
        employee: req.employee.trim().to_string(),
        store: req.store,
        payment: req.payment,
        items: req.items,
    };

    let record = record_sale(&mut inventory, &mut log, draft, Utc::now())?;

    state.inventory.save(&inventory)?;
    state.sales.save(&log)?;

    info!(
        sale_id = %record.id,
        revenue = record.revenue_cents,
        margin = record.margin_cents,
        "sale recorded"
    );

    Ok(RecordSaleResponse {
        sale_id: record.id,
        kind: record.kind,
        item_count: record.items.len(),
        cost_cents: record.cost_cents,
        revenue_cents: record.revenue_cents,
        margin_cents: record.margin_cents,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
