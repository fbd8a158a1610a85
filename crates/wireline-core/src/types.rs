//! # Domain Types
//!
//! Core domain types used throughout Wireline POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  ┌───────────────┐   ┌───────────────┐   ┌───────────────┐          │
//! │  │ StoreLocation │   │  SaleRecord   │   │   LineItem    │          │
//! │  │ ───────────── │   │ ───────────── │   │ ───────────── │          │
//! │  │ PennSquare    │   │ id (UUID)     │   │ product       │          │
//! │  │ Germantown…   │   │ employee      │   │ quantity      │          │
//! │  └───────────────┘   │ cost/revenue  │   │ unit cost     │          │
//! │                      │ margin        │   │ unit price    │          │
//! │  ┌───────────────┐   └───────────────┘   └───────────────┘          │
//! │  │ PaymentMethod │   ┌───────────────┐   ┌───────────────┐          │
//! │  │ Cash | Card   │   │   SaleKind    │   │  StockEntry   │          │
//! │  └───────────────┘   │ PhoneSale     │   │ quantity      │          │
//! │                      │ BillPayment   │   │ unit cost     │          │
//! │                      │ Mixed         │   └───────────────┘          │
//! │                      └───────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! A sale record has an immutable UUID `id` plus its human-visible position
//! in the log, which admin commands address records by.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Store Location
// =============================================================================

/// One of the chain's store locations.
///
/// The set is fixed; every product and sale record is partitioned by it.
/// Serialized as the street-address label so the persisted documents stay
/// readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StoreLocation {
    #[serde(rename = "1 E Penn Sq")]
    PennSquare,
    #[serde(rename = "5600 Germantown Ave")]
    GermantownUpper,
    #[serde(rename = "2644 Germantown Ave")]
    GermantownLower,
}

impl StoreLocation {
    /// All store locations, in display order.
    pub const ALL: [StoreLocation; 3] = [
        StoreLocation::PennSquare,
        StoreLocation::GermantownUpper,
        StoreLocation::GermantownLower,
    ];

    /// The street-address label shown to operators and used in the
    /// persisted documents.
    pub const fn label(&self) -> &'static str {
        match self {
            StoreLocation::PennSquare => "1 E Penn Sq",
            StoreLocation::GermantownUpper => "5600 Germantown Ave",
            StoreLocation::GermantownLower => "2644 Germantown Ave",
        }
    }
}

impl fmt::Display for StoreLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parses a store from its label, case-insensitively.
impl FromStr for StoreLocation {
    type Err = UnknownStoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        StoreLocation::ALL
            .into_iter()
            .find(|loc| loc.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownStoreError(s.to_string()))
    }
}

/// Error returned when a store label does not match any location.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown store location: {0}")]
pub struct UnknownStoreError(pub String);

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card payment on the external terminal.
    Card,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Cash => f.write_str("Cash"),
            PaymentMethod::Card => f.write_str("Card"),
        }
    }
}

// =============================================================================
// Sale Kind
// =============================================================================

/// Classification of a sale, derived from its line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleKind {
    /// Every line item is catalog-backed.
    PhoneSale,
    /// Every line item is free text (bill payments, custom charges).
    BillPayment,
    /// A mix of catalog-backed and free-text items.
    Mixed,
}

impl SaleKind {
    /// Classifies a non-empty set of line items.
    pub fn classify(items: &[LineItem]) -> SaleKind {
        let catalog = items.iter().filter(|i| i.product.is_catalog()).count();
        if catalog == items.len() {
            SaleKind::PhoneSale
        } else if catalog == 0 {
            SaleKind::BillPayment
        } else {
            SaleKind::Mixed
        }
    }
}

impl fmt::Display for SaleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaleKind::PhoneSale => f.write_str("Phone Sale"),
            SaleKind::BillPayment => f.write_str("Bill Payment"),
            SaleKind::Mixed => f.write_str("Mixed"),
        }
    }
}

// =============================================================================
// Product Reference
// =============================================================================

/// What a line item points at.
///
/// Catalog-backed items deduct stock when the sale is recorded; free-text
/// items (bill payments, one-off charges) never touch inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "name")]
pub enum ProductRef {
    /// A product in the store's catalog, referenced by name.
    Catalog(String),
    /// Free-text description with no inventory behind it.
    Custom(String),
}

impl ProductRef {
    /// The product name or free-text description.
    pub fn name(&self) -> &str {
        match self {
            ProductRef::Catalog(name) | ProductRef::Custom(name) => name,
        }
    }

    /// Whether this reference deducts stock when sold.
    pub const fn is_catalog(&self) -> bool {
        matches!(self, ProductRef::Catalog(_))
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One line of a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Catalog product or free-text description.
    pub product: ProductRef,

    /// Units sold.
    pub quantity: i64,

    /// Unit cost in cents at time of sale (frozen; catalog cost changes
    /// later do not rewrite history).
    pub unit_cost_cents: i64,

    /// Unit sold price in cents at time of sale (frozen).
    pub unit_price_cents: i64,
}

impl LineItem {
    /// Returns the unit cost as Money.
    #[inline]
    pub fn unit_cost(&self) -> Money {
        Money::from_cents(self.unit_cost_cents)
    }

    /// Returns the unit sold price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Line cost: unit cost × quantity.
    pub fn line_cost(&self) -> Money {
        self.unit_cost().multiply_quantity(self.quantity)
    }

    /// Line revenue: unit sold price × quantity.
    pub fn line_revenue(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Sale Record
// =============================================================================

/// A recorded sale.
///
/// Invariant: `cost_cents` and `revenue_cents` equal the sums over `items`
/// of unit × quantity at time of save, and `margin_cents` is always
/// `revenue_cents - cost_cents`. [`SaleRecord::from_items`] is the only way
/// the aggregates are produced, so the invariant cannot drift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRecord {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Employee who rang the sale.
    pub employee: String,

    /// Store the sale happened at.
    pub store: StoreLocation,

    /// When the sale was recorded.
    pub recorded_at: DateTime<Utc>,

    /// Phone sale, bill payment, or mixed.
    pub kind: SaleKind,

    /// Ordered line items.
    pub items: Vec<LineItem>,

    /// Aggregate cost in cents: Σ unit_cost × quantity.
    pub cost_cents: i64,

    /// Aggregate revenue in cents: Σ unit_price × quantity.
    pub revenue_cents: i64,

    /// Margin in cents: revenue − cost.
    pub margin_cents: i64,

    /// How the customer paid.
    pub payment: PaymentMethod,
}

impl SaleRecord {
    /// Builds a record with aggregates computed from the line items.
    ///
    /// Caller-supplied aggregates are deliberately not accepted anywhere;
    /// this constructor recomputes them so the margin invariant holds for
    /// every stored record.
    #[allow(clippy::too_many_arguments)]
    pub fn from_items(
        id: String,
        employee: String,
        store: StoreLocation,
        recorded_at: DateTime<Utc>,
        kind: SaleKind,
        items: Vec<LineItem>,
        payment: PaymentMethod,
    ) -> SaleRecord {
        let cost: Money = items.iter().map(LineItem::line_cost).sum();
        let revenue: Money = items.iter().map(LineItem::line_revenue).sum();

        SaleRecord {
            id,
            employee,
            store,
            recorded_at,
            kind,
            items,
            cost_cents: cost.cents(),
            revenue_cents: revenue.cents(),
            margin_cents: (revenue - cost).cents(),
            payment,
        }
    }

    /// Returns the aggregate cost as Money.
    #[inline]
    pub fn cost(&self) -> Money {
        Money::from_cents(self.cost_cents)
    }

    /// Returns the aggregate revenue as Money.
    #[inline]
    pub fn revenue(&self) -> Money {
        Money::from_cents(self.revenue_cents)
    }

    /// Returns the margin as Money.
    #[inline]
    pub fn margin(&self) -> Money {
        Money::from_cents(self.margin_cents)
    }
}

// =============================================================================
// Stock Entry
// =============================================================================

/// A product's state in one store's catalog.
///
/// The product name is the key (unique within a store); the entry carries
/// what remains and what a unit costs. Catalog cost is last-write-wins with
/// no history; recorded sales keep the cost on their own line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockEntry {
    /// Units on hand. Never negative.
    pub quantity: i64,

    /// Current unit cost in cents.
    pub unit_cost_cents: i64,
}

impl StockEntry {
    /// Returns the unit cost as Money.
    #[inline]
    pub fn unit_cost(&self) -> Money {
        Money::from_cents(self.unit_cost_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_location_labels() {
        assert_eq!(StoreLocation::PennSquare.to_string(), "1 E Penn Sq");
        assert_eq!(
            StoreLocation::GermantownUpper.to_string(),
            "5600 Germantown Ave"
        );
    }

    #[test]
    fn test_store_location_parse() {
        assert_eq!(
            "1 E Penn Sq".parse::<StoreLocation>().unwrap(),
            StoreLocation::PennSquare
        );
        assert_eq!(
            "2644 germantown ave".parse::<StoreLocation>().unwrap(),
            StoreLocation::GermantownLower
        );
        assert!("12 Nowhere St".parse::<StoreLocation>().is_err());
    }

    #[test]
    fn test_store_location_serde_label() {
        let json = serde_json::to_string(&StoreLocation::PennSquare).unwrap();
        assert_eq!(json, "\"1 E Penn Sq\"");

        let back: StoreLocation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, StoreLocation::PennSquare);
    }

    #[test]
    fn test_sale_kind_classify() {
        let catalog = LineItem {
            product: ProductRef::Catalog("Widget".to_string()),
            quantity: 1,
            unit_cost_cents: 100,
            unit_price_cents: 200,
        };
        let custom = LineItem {
            product: ProductRef::Custom("Bill Payment".to_string()),
            quantity: 1,
            unit_cost_cents: 0,
            unit_price_cents: 500,
        };

        assert_eq!(
            SaleKind::classify(&[catalog.clone()]),
            SaleKind::PhoneSale
        );
        assert_eq!(
            SaleKind::classify(&[custom.clone()]),
            SaleKind::BillPayment
        );
        assert_eq!(SaleKind::classify(&[catalog, custom]), SaleKind::Mixed);
    }

    #[test]
    fn test_line_item_totals() {
        let item = LineItem {
            product: ProductRef::Catalog("Widget".to_string()),
            quantity: 3,
            unit_cost_cents: 500,
            unit_price_cents: 800,
        };
        assert_eq!(item.line_cost().cents(), 1500);
        assert_eq!(item.line_revenue().cents(), 2400);
    }

    #[test]
    fn test_sale_record_from_items_margin_invariant() {
        let items = vec![
            LineItem {
                product: ProductRef::Catalog("Widget".to_string()),
                quantity: 3,
                unit_cost_cents: 500,
                unit_price_cents: 800,
            },
            LineItem {
                product: ProductRef::Custom("Activation fee".to_string()),
                quantity: 1,
                unit_cost_cents: 0,
                unit_price_cents: 1000,
            },
        ];

        let record = SaleRecord::from_items(
            "id".to_string(),
            "pat".to_string(),
            StoreLocation::PennSquare,
            Utc::now(),
            SaleKind::classify(&items),
            items,
            PaymentMethod::Cash,
        );

        assert_eq!(record.cost_cents, 1500);
        assert_eq!(record.revenue_cents, 3400);
        assert_eq!(record.margin_cents, record.revenue_cents - record.cost_cents);
        assert_eq!(record.kind, SaleKind::Mixed);
    }
}
