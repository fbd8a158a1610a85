//! # Repositories
//!
//! One repository per persisted document:
//!
//! - [`sales::SalesRepository`] for the sale record log (`sales.json`)
//! - [`inventory::InventoryRepository`] for the per-store catalog and
//!   stock (`inventory.json`)
//!
//! Both follow the same shape: `load` returns the empty default when the
//! file does not exist yet, `save` rewrites the whole document, and
//! `update` wraps a load-modify-save cycle for callers that mutate.

pub mod inventory;
pub mod sales;
