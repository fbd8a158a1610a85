//! # Command Layer
//!
//! One module per menu area, mirroring what operators do at the counter:
//!
//! - [`sale`] - record a sale
//! - [`inventory`] - catalog maintenance and restocking
//! - [`report`] - totals and record listings
//! - [`admin`] - destructive record edits and resets
//!
//! Each command takes a request DTO, validates it, invokes the core
//! operations through [`crate::state::AppState`], and returns a response
//! DTO. Formatting for the operator happens in the CLI layer.

pub mod admin;
pub mod inventory;
pub mod report;
pub mod sale;
