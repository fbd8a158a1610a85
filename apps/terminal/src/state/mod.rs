//! # Application State
//!
//! The repositories every command operates through. Unlike a long-running
//! app there is no in-process cache: each command loads the documents it
//! needs, mutates, and saves, so concurrent terminals only contend at the
//! file level (last write wins).

use std::path::Path;

use tracing::debug;

use wireline_store::{DataDir, InventoryRepository, SalesRepository};

use crate::error::ApiError;

/// Repository handles for one command invocation.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Sales log document handle.
    pub sales: SalesRepository,

    /// Inventory document handle.
    pub inventory: InventoryRepository,
}

impl AppState {
    /// Resolves the data directory and builds the repository handles.
    pub fn init(data_dir: Option<&Path>) -> Result<AppState, ApiError> {
        let data_dir = DataDir::resolve(data_dir)?;
        debug!(dir = %data_dir.path().display(), "state initialized");

        Ok(AppState {
            sales: SalesRepository::new(&data_dir),
            inventory: InventoryRepository::new(&data_dir),
        })
    }

    /// Builds state over an explicit directory. Test entry point.
    pub fn at(dir: impl AsRef<Path>) -> Result<AppState, ApiError> {
        let data_dir = DataDir::at(dir.as_ref())?;
        Ok(AppState {
            sales: SalesRepository::new(&data_dir),
            inventory: InventoryRepository::new(&data_dir),
        })
    }
}
