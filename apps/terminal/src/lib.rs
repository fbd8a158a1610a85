//! # Wireline Terminal Library
//!
//! Library for the Wireline POS terminal application: the CLI layer that
//! turns operator input into validated commands against the core.
//!
//! ## Module Organization
//! ```text
//! wireline_terminal/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── clap definitions, dispatch, formatting
//! ├── state/
//! │   └── mod.rs      ◄─── Repository handles
//! ├── commands/
//! │   ├── sale.rs     ◄─── Record a sale
//! │   ├── inventory.rs◄─── Catalog maintenance
//! │   ├── report.rs   ◄─── Totals and listings
//! │   └── admin.rs    ◄─── Record edits and resets
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use tracing_subscriber::EnvFilter;

use error::ApiError;

/// Runs the terminal application.
///
/// ## Startup Sequence
/// 1. Initialize tracing (stderr, `RUST_LOG` override)
/// 2. Parse arguments and resolve the data directory
/// 3. Dispatch the command and print the result
pub fn run() -> Result<(), ApiError> {
    init_tracing();
    cli::run()
}

/// Initializes the tracing subscriber for structured logging.
///
/// Diagnostics go to stderr so command output on stdout stays scriptable.
/// Default level is `warn`; raise it with e.g. `RUST_LOG=wireline=debug`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
