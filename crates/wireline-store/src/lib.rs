//! # wireline-store: Persistence Layer for Wireline POS
//!
//! File-backed storage for the sales log and the inventory catalog.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  apps/terminal command (record sale, restock, report, ...)          │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                 wireline-store (THIS CRATE)                   │  │
//! │  │                                                               │  │
//! │  │   ┌──────────────┐   ┌─────────────────────────────────────┐  │  │
//! │  │   │   DataDir    │   │  Repositories                       │  │  │
//! │  │   │  (paths.rs)  │   │  SalesRepository  sales.json        │  │  │
//! │  │   │              │◄──│  InventoryRepository inventory.json │  │  │
//! │  │   └──────────────┘   └─────────────────────────────────────┘  │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ~/.local/share/wireline/{sales.json, inventory.json}               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persistence Model
//! Each repository is a load / modify / save cycle over one whole JSON
//! document. There is no locking: two operators saving at once race and
//! the last write wins. That is an accepted limitation of the deployment
//! (one operator per terminal), not a guarantee.
//!
//! ## Module Organization
//! - [`paths`] - Data directory resolution
//! - [`error`] - Storage error types
//! - [`repository`] - Sales log and inventory repositories

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod paths;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use paths::DataDir;
pub use repository::inventory::InventoryRepository;
pub use repository::sales::SalesRepository;
