//! # Reporting & Admin Aggregator
//!
//! Totals over sale records, report filters, and the administrative
//! operations on the sales log (delete one, edit one, reset).
//!
//! Totals are a pure fold; the filters borrow records without copying.
//! Admin edits go through [`SalesLog`], which recomputes aggregates from
//! line items so the margin invariant survives any overwrite.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::inventory::Inventory;
use crate::money::Money;
use crate::types::{PaymentMethod, SaleRecord, StoreLocation};

// =============================================================================
// Totals
// =============================================================================

/// Aggregate figures over a set of sale records.
///
/// `cash` and `card` are revenue sums partitioned by payment method, so
/// `cash + card == revenue` for any record set. Addition is field-wise,
/// which makes totals additive over disjoint sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// Total cost across records.
    pub cost: Money,
    /// Total revenue across records.
    pub revenue: Money,
    /// Total margin (revenue − cost).
    pub margin: Money,
    /// Revenue taken in cash.
    pub cash: Money,
    /// Revenue taken by card.
    pub card: Money,
}

impl Totals {
    /// Totals of a single record.
    fn of(record: &SaleRecord) -> Totals {
        let (cash, card) = match record.payment {
            PaymentMethod::Cash => (record.revenue(), Money::zero()),
            PaymentMethod::Card => (Money::zero(), record.revenue()),
        };
        Totals {
            cost: record.cost(),
            revenue: record.revenue(),
            margin: record.margin(),
            cash,
            card,
        }
    }
}

impl Add for Totals {
    type Output = Totals;

    fn add(self, other: Totals) -> Totals {
        Totals {
            cost: self.cost + other.cost,
            revenue: self.revenue + other.revenue,
            margin: self.margin + other.margin,
            cash: self.cash + other.cash,
            card: self.card + other.card,
        }
    }
}

impl AddAssign for Totals {
    fn add_assign(&mut self, other: Totals) {
        *self = *self + other;
    }
}

impl Sum for Totals {
    fn sum<I: Iterator<Item = Totals>>(iter: I) -> Totals {
        iter.fold(Totals::default(), Add::add)
    }
}

/// Computes totals over the given records. Pure fold, no side effects.
pub fn totals<'a, I>(records: I) -> Totals
where
    I: IntoIterator<Item = &'a SaleRecord>,
{
    records.into_iter().map(Totals::of).sum()
}

// =============================================================================
// Report Filters
// =============================================================================

/// Records for one store.
pub fn filter_by_store(records: &[SaleRecord], store: StoreLocation) -> Vec<&SaleRecord> {
    records.iter().filter(|r| r.store == store).collect()
}

/// Records rung by one employee (exact name match).
pub fn filter_by_employee<'a>(records: &'a [SaleRecord], employee: &str) -> Vec<&'a SaleRecord> {
    records.iter().filter(|r| r.employee == employee).collect()
}

/// Records from one calendar day (UTC), used by the admin edit screen to
/// default to today's sales.
pub fn filter_by_day(records: &[SaleRecord], day: NaiveDate) -> Vec<&SaleRecord> {
    records
        .iter()
        .filter(|r| r.recorded_at.date_naive() == day)
        .collect()
}

/// Distinct employee names appearing in the records, sorted.
pub fn employees(records: &[SaleRecord]) -> Vec<String> {
    let mut names: Vec<String> = records.iter().map(|r| r.employee.clone()).collect();
    names.sort();
    names.dedup();
    names
}

// =============================================================================
// Sales Log
// =============================================================================

/// The ordered collection of sale records.
///
/// Created by the Sale Recorder; admin flows delete, overwrite or clear
/// entries by index. Deleting or editing a record does NOT reverse or
/// reapply its inventory effects: stock stays where the original sale left
/// it. That matches how the stores actually operate today and is flagged as
/// a design gap rather than silently reconciled here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SalesLog {
    records: Vec<SaleRecord>,
}

impl SalesLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        SalesLog::default()
    }

    /// Appends a record. Used by the Sale Recorder.
    pub fn push(&mut self, record: SaleRecord) {
        self.records.push(record);
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[SaleRecord] {
        &self.records
    }

    /// Record at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&SaleRecord> {
        self.records.get(index)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the log has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Removes and returns the record at `index` (admin operation).
    ///
    /// Does not re-credit inventory.
    ///
    /// ## Errors
    /// - `NotFound` if `index` is out of range
    pub fn delete(&mut self, index: usize) -> CoreResult<SaleRecord> {
        if index >= self.records.len() {
            return Err(CoreError::NotFound { index });
        }
        Ok(self.records.remove(index))
    }

    /// Overwrites the record at `index` (admin operation).
    ///
    /// The stored record's cost, revenue and margin are recomputed from
    /// `new`'s line items; whatever aggregates the caller put on `new` are
    /// discarded. Inventory is not reconciled.
    ///
    /// ## Errors
    /// - `NotFound` if `index` is out of range
    pub fn replace(&mut self, index: usize, new: SaleRecord) -> CoreResult<()> {
        let slot = self
            .records
            .get_mut(index)
            .ok_or(CoreError::NotFound { index })?;

        *slot = SaleRecord::from_items(
            new.id,
            new.employee,
            new.store,
            new.recorded_at,
            new.kind,
            new.items,
            new.payment,
        );
        Ok(())
    }

    /// Deletes every record (admin reset).
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

// =============================================================================
// Admin Reset
// =============================================================================

/// Which data set an admin reset wipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetKind {
    /// Clear every sale record.
    Sales,
    /// Clear every store's catalog and stock.
    Inventory,
}

/// Clears the selected data set back to empty.
pub fn reset(kind: ResetKind, log: &mut SalesLog, inventory: &mut Inventory) {
    match kind {
        ResetKind::Sales => log.clear(),
        ResetKind::Inventory => inventory.clear(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
