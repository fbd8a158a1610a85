//! # wireline-core: Pure Business Logic for Wireline POS
//!
//! This crate is the heart of Wireline. It contains all business logic as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  apps/terminal (CLI commands, clap DTOs)                            │
//! │        │                                                            │
//! │        ▼                                                            │
//! │  ★ wireline-core (THIS CRATE) ★                                     │
//! │                                                                     │
//! │   ┌───────────┐ ┌───────────┐ ┌───────────┐ ┌────────────┐         │
//! │   │ inventory │ │ recorder  │ │  report   │ │ types/money│         │
//! │   │ stock ops │ │ sale flow │ │ totals    │ │ validation │         │
//! │   └───────────┘ └───────────┘ └───────────┘ └────────────┘         │
//! │                                                                     │
//! │   NO FILES • NO CLOCK • NO TERMINAL • PURE FUNCTIONS                │
//! │        │                                                            │
//! │        ▼                                                            │
//! │  wireline-store (sales.json / inventory.json)                       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (StoreLocation, SaleRecord, LineItem, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//! - [`inventory`] - Catalog and per-store stock levels
//! - [`recorder`] - Sale recording against inventory
//! - [`report`] - Totals aggregation, filters and admin edits
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: same input = same output; callers supply timestamps
//! 2. **Integer money**: all monetary values are cents (i64)
//! 3. **Explicit repositories**: [`inventory::Inventory`] and
//!    [`report::SalesLog`] are passed by reference into every operation,
//!    never held as ambient globals
//! 4. **Explicit errors**: all errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod inventory;
pub mod money;
pub mod recorder;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use inventory::Inventory;
pub use money::Money;
pub use recorder::{record_sale, SaleDraft};
pub use report::{totals, ResetKind, SalesLog, Totals};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items allowed in a single sale.
///
/// Prevents runaway drafts and keeps transaction sizes reasonable.
pub const MAX_SALE_ITEMS: usize = 100;

/// Maximum quantity of a single line item.
///
/// Guards against typos (1000 entered instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;
