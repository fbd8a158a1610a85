//! # Report Commands
//!
//! The three report types operators use at close of day: all stores, one
//! store, one employee. Each report is a pure read: totals plus the
//! matching records.

use serde::{Deserialize, Serialize};

use wireline_core::report::{employees, filter_by_employee, filter_by_store, totals, Totals};
use wireline_core::{SaleRecord, StoreLocation};

use crate::error::ApiError;
use crate::state::AppState;

/// Which slice of the sales log to report on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportScope {
    /// Every record.
    All,
    /// Records for one store.
    Store(StoreLocation),
    /// Records rung by one employee.
    Employee(String),
}

/// A rendered report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    /// Heading for the report ("ALL STORES", a store label, or a name).
    pub title: String,

    /// Aggregates over the matching records.
    pub totals: Totals,

    /// The matching records, oldest first.
    pub records: Vec<SaleRecord>,
}

/// Builds a report over the requested scope.
pub fn run(state: &AppState, scope: ReportScope) -> Result<ReportResponse, ApiError> {
    let log = state.sales.load()?;
    let records = log.records();

    let (title, matching): (String, Vec<&SaleRecord>) = match &scope {
        ReportScope::All => ("ALL STORES".to_string(), records.iter().collect()),
        ReportScope::Store(store) => (store.to_string(), filter_by_store(records, *store)),
        ReportScope::Employee(name) => (name.clone(), filter_by_employee(records, name)),
    };

    Ok(ReportResponse {
        title,
        totals: totals(matching.iter().copied()),
        records: matching.into_iter().cloned().collect(),
    })
}

/// Distinct employee names on file, for the by-employee report selector.
pub fn list_employees(state: &AppState) -> Result<Vec<String>, ApiError> {
    let log = state.sales.load()?;
    Ok(employees(log.records()))
}

// =============================================================================
// Unit Tests
// =============================================================================
