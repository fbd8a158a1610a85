//! # Sale Recorder
//!
//! Turns a validated sale draft into stock decrements plus an appended
//! sale record, all-or-nothing.
//!
//! ## Recording Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  SaleDraft { employee, store, payment, items }                      │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  1. Validate: non-empty, quantities in range, item count            │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  2. Check: per catalog product, sum requested units across all      │
//! │     lines and compare against stock  ──── any shortfall ──► reject, │
//! │       │                                   nothing changed           │
//! │       ▼                                                             │
//! │  3. Apply: decrement stock, compute cost/revenue/margin, append     │
//! │     SaleRecord with fresh UUID and the supplied timestamp           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The check phase runs to completion before any stock is touched, so a
//! rejected sale leaves inventory and the sales log exactly as they were.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::inventory::Inventory;
use crate::report::SalesLog;
use crate::types::{LineItem, PaymentMethod, SaleKind, SaleRecord, StoreLocation};
use crate::validation::validate_item_count;
use crate::MAX_ITEM_QUANTITY;

// =============================================================================
// Sale Draft
// =============================================================================

/// A proposed sale, built by the front end and not yet committed.
///
/// Line items carry the unit cost and sold price the operator entered;
/// the recorder computes every aggregate itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleDraft {
    /// Employee ringing the sale.
    pub employee: String,

    /// Store the sale happens at.
    pub store: StoreLocation,

    /// How the customer pays.
    pub payment: PaymentMethod,

    /// Ordered proposed line items.
    pub items: Vec<LineItem>,
}

// =============================================================================
// Recording
// =============================================================================

/// Records a sale: validates the draft against inventory, decrements stock
/// for catalog-backed items, and appends a record to the log.
///
/// Free-text items (bill payments) never touch inventory. The returned
/// record is a copy of what was appended.
///
/// ## Errors
/// - `EmptySale` for a draft with no line items
/// - `InvalidQuantity` for any non-positive (or out-of-range) quantity
/// - `UnknownProduct` / `InsufficientStock` naming the offending product
///
/// On any error, inventory and the log are left unchanged (all-or-nothing).
pub fn record_sale(
    inventory: &mut Inventory,
    log: &mut SalesLog,
    draft: SaleDraft,
    recorded_at: DateTime<Utc>,
) -> CoreResult<SaleRecord> {
    if draft.items.is_empty() {
        return Err(CoreError::EmptySale);
    }
    validate_item_count(draft.items.len())?;

    for item in &draft.items {
        if !(1..=MAX_ITEM_QUANTITY).contains(&item.quantity) {
            return Err(CoreError::InvalidQuantity {
                quantity: item.quantity,
            });
        }
    }

    // Check phase: total the requested units per catalog product first, so
    // two lines naming the same product cannot pass individually and then
    // oversell on apply.
    let mut required: BTreeMap<&str, i64> = BTreeMap::new();
    for item in draft.items.iter().filter(|i| i.product.is_catalog()) {
        *required.entry(item.product.name()).or_insert(0) += item.quantity;
    }

    for (&product, &qty) in &required {
        let entry = inventory.entry(draft.store, product).ok_or_else(|| {
            CoreError::UnknownProduct {
                store: draft.store,
                product: product.to_string(),
            }
        })?;
        if entry.quantity < qty {
            return Err(CoreError::InsufficientStock {
                product: product.to_string(),
                available: entry.quantity,
                requested: qty,
            });
        }
    }

    // Apply phase: the check above guarantees these decrements succeed.
    for (&product, &qty) in &required {
        inventory.decrement(draft.store, product, qty)?;
    }

    let kind = SaleKind::classify(&draft.items);
    let record = SaleRecord::from_items(
        Uuid::new_v4().to_string(),
        draft.employee,
        draft.store,
        recorded_at,
        kind,
        draft.items,
        draft.payment,
    );

    log.push(record.clone());
    Ok(record)
}

// =============================================================================
// Unit Tests
// =============================================================================
