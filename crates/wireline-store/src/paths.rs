//! # Data Directory
//!
//! Resolves where the two persisted documents live.
//!
//! ## Resolution Order
//! 1. Explicit path (`--data-dir` flag)
//! 2. `WIRELINE_DATA_DIR` environment variable
//! 3. Platform application data directory via `directories`
//!    - Linux: `~/.local/share/wireline`
//!    - macOS: `~/Library/Application Support/com.wireline.pos`
//!    - Windows: `%APPDATA%\wireline\pos\data`

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "WIRELINE_DATA_DIR";

const SALES_FILE: &str = "sales.json";
const INVENTORY_FILE: &str = "inventory.json";

/// The directory holding `sales.json` and `inventory.json`.
#[derive(Debug, Clone)]
pub struct DataDir {
    dir: PathBuf,
}

impl DataDir {
    /// Resolves the data directory and creates it if missing.
    ///
    /// `explicit` takes precedence over the environment variable, which
    /// takes precedence over the platform default.
    pub fn resolve(explicit: Option<&Path>) -> StoreResult<DataDir> {
        let dir = match explicit {
            Some(path) => path.to_path_buf(),
            None => match std::env::var_os(DATA_DIR_ENV) {
                Some(path) => PathBuf::from(path),
                None => ProjectDirs::from("com", "wireline", "pos")
                    .ok_or(StoreError::NoDataDir)?
                    .data_dir()
                    .to_path_buf(),
            },
        };

        std::fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;
        debug!(dir = %dir.display(), "data directory resolved");

        Ok(DataDir { dir })
    }

    /// Uses `dir` directly, creating it if missing. Test and tooling entry
    /// point that skips the environment lookup.
    pub fn at(dir: impl Into<PathBuf>) -> StoreResult<DataDir> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;
        Ok(DataDir { dir })
    }

    /// The directory itself.
    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Path of the sales log document.
    pub fn sales_path(&self) -> PathBuf {
        self.dir.join(SALES_FILE)
    }

    /// Path of the inventory document.
    pub fn inventory_path(&self) -> PathBuf {
        self.dir.join(INVENTORY_FILE)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
