//! # Command-Line Interface
//!
//! clap definitions plus dispatch. Every subcommand parses into a request
//! DTO, runs through the command layer, and is formatted here for the
//! operator. The business rules never live in this file.
//!
//! ## Layout
//! ```text
//! wireline [--data-dir DIR] <command>
//!
//! sale      record         ring up a sale
//! inventory list|restock|rename|delete
//! report    all|store|employee
//! admin     list|delete-sale|edit-sale|reset
//! ```

use std::path::PathBuf;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};

use wireline_core::{
    LineItem, Money, PaymentMethod, ProductRef, ResetKind, SaleRecord, StoreLocation,
};

use crate::commands::{admin, inventory, report, sale};
use crate::error::ApiError;
use crate::state::AppState;

/// Timestamp format operators see and type, matching the receipts:
/// `03/15/2024 14:30`.
const DATE_FORMAT: &str = "%m/%d/%Y %H:%M";

// =============================================================================
// CLI Definition
// =============================================================================

/// Point-of-sale and inventory tracker for the Wireline stores.
#[derive(Debug, Parser)]
#[command(name = "wireline", version, about)]
pub struct Cli {
    /// Directory holding sales.json and inventory.json
    /// (defaults to WIRELINE_DATA_DIR, then the platform data dir).
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record sales.
    Sale {
        #[command(subcommand)]
        command: SaleCommand,
    },
    /// Catalog and stock maintenance.
    Inventory {
        #[command(subcommand)]
        command: InventoryCommand,
    },
    /// Totals and record listings.
    Report {
        #[command(subcommand)]
        command: ReportCommand,
    },
    /// Record edits and resets.
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum SaleCommand {
    /// Ring up a sale.
    Record(RecordSaleArgs),
}

#[derive(Debug, Args)]
pub struct RecordSaleArgs {
    /// Employee ringing the sale.
    #[arg(long)]
    pub employee: String,

    /// Store location label, e.g. "1 E Penn Sq".
    #[arg(long)]
    pub store: StoreLocation,

    /// Payment method.
    #[arg(long, value_enum)]
    pub payment: PaymentArg,

    /// Catalog line item as NAME:QTY:COST:PRICE (prices in dollars),
    /// e.g. "Galaxy A15:2:89.99:129.99". Repeatable.
    #[arg(long = "item", value_name = "NAME:QTY:COST:PRICE")]
    pub items: Vec<String>,

    /// Free-text line item as DESC:COST:PRICE (quantity 1, no stock
    /// deduction), e.g. "Bill Payment:45.00:50.00". Repeatable.
    #[arg(long = "bill", value_name = "DESC:COST:PRICE")]
    pub bills: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum InventoryCommand {
    /// List a store's catalog.
    List {
        #[arg(long)]
        store: StoreLocation,
    },
    /// Add stock, creating the product if new. Overwrites the unit cost.
    Restock {
        #[arg(long)]
        store: StoreLocation,
        #[arg(long)]
        product: String,
        #[arg(long)]
        qty: i64,
        /// Unit cost in dollars, e.g. 4.50.
        #[arg(long)]
        cost: Money,
    },
    /// Rename a product, keeping its quantity and cost.
    Rename {
        #[arg(long)]
        store: StoreLocation,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },
    /// Remove a product from the catalog.
    Delete {
        #[arg(long)]
        store: StoreLocation,
        #[arg(long)]
        product: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ReportCommand {
    /// Totals and records across every store.
    All,
    /// Totals and records for one store.
    Store {
        #[arg(long)]
        store: StoreLocation,
    },
    /// Totals and records for one employee; omit --name to list employees.
    Employee {
        #[arg(long)]
        name: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// List sale records with their log indexes.
    List {
        /// Only today's records (the edit screen default).
        #[arg(long)]
        today: bool,
    },
    /// Delete the record at an index. Stock is NOT re-credited.
    DeleteSale {
        #[arg(long)]
        index: usize,
    },
    /// Overwrite the record at an index. Aggregates are recomputed from
    /// the supplied items; stock is NOT reconciled.
    EditSale(EditSaleArgs),
    /// Clear all sales or all inventory.
    Reset {
        #[arg(value_enum)]
        kind: ResetArg,
    },
}

#[derive(Debug, Args)]
pub struct EditSaleArgs {
    /// Index from `admin list`.
    #[arg(long)]
    pub index: usize,

    #[arg(long)]
    pub employee: String,

    #[arg(long)]
    pub store: StoreLocation,

    #[arg(long, value_enum)]
    pub payment: PaymentArg,

    /// Catalog line item as NAME:QTY:COST:PRICE. Repeatable.
    #[arg(long = "item", value_name = "NAME:QTY:COST:PRICE")]
    pub items: Vec<String>,

    /// Free-text line item as DESC:COST:PRICE. Repeatable.
    #[arg(long = "bill", value_name = "DESC:COST:PRICE")]
    pub bills: Vec<String>,

    /// New timestamp as "MM/DD/YYYY HH:MM"; omit to keep the original.
    #[arg(long, value_name = "DATE")]
    pub date: Option<String>,
}

/// Payment method as a CLI value.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PaymentArg {
    Cash,
    Card,
}

impl From<PaymentArg> for PaymentMethod {
    fn from(arg: PaymentArg) -> PaymentMethod {
        match arg {
            PaymentArg::Cash => PaymentMethod::Cash,
            PaymentArg::Card => PaymentMethod::Card,
        }
    }
}

/// Reset target as a CLI value.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ResetArg {
    Sales,
    Inventory,
}

impl From<ResetArg> for ResetKind {
    fn from(arg: ResetArg) -> ResetKind {
        match arg {
            ResetArg::Sales => ResetKind::Sales,
            ResetArg::Inventory => ResetKind::Inventory,
        }
    }
}

// =============================================================================
// Argument Parsing Helpers
// =============================================================================

/// Parses a catalog item spec `NAME:QTY:COST:PRICE`.
///
/// Splits from the right so product names may contain colons.
fn parse_item_spec(spec: &str) -> Result<LineItem, ApiError> {
    let parts: Vec<&str> = spec.rsplitn(4, ':').collect();
    if parts.len() != 4 {
        return Err(ApiError::validation(format!(
            "item '{spec}' must be NAME:QTY:COST:PRICE"
        )));
    }
    // rsplitn yields fields right to left
    let (price, cost, qty, name) = (parts[0], parts[1], parts[2], parts[3]);

    Ok(LineItem {
        product: ProductRef::Catalog(name.trim().to_string()),
        quantity: qty
            .trim()
            .parse()
            .map_err(|_| ApiError::validation(format!("item '{spec}': bad quantity '{qty}'")))?,
        unit_cost_cents: parse_dollars(cost, spec)?,
        unit_price_cents: parse_dollars(price, spec)?,
    })
}

/// Parses a free-text item spec `DESC:COST:PRICE` (quantity is always 1).
fn parse_bill_spec(spec: &str) -> Result<LineItem, ApiError> {
    let parts: Vec<&str> = spec.rsplitn(3, ':').collect();
    if parts.len() != 3 {
        return Err(ApiError::validation(format!(
            "bill '{spec}' must be DESC:COST:PRICE"
        )));
    }
    let (price, cost, desc) = (parts[0], parts[1], parts[2]);

    Ok(LineItem {
        product: ProductRef::Custom(desc.trim().to_string()),
        quantity: 1,
        unit_cost_cents: parse_dollars(cost, spec)?,
        unit_price_cents: parse_dollars(price, spec)?,
    })
}

fn parse_dollars(field: &str, spec: &str) -> Result<i64, ApiError> {
    field
        .trim()
        .parse::<Money>()
        .map(|m| m.cents())
        .map_err(|e| ApiError::validation(format!("'{spec}': {e}")))
}

/// Parses the operator-facing timestamp format as UTC.
fn parse_date(s: &str) -> Result<DateTime<Utc>, ApiError> {
    let naive = NaiveDateTime::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| ApiError::validation(format!("date '{s}' must be MM/DD/YYYY HH:MM")))?;
    Ok(Utc.from_utc_datetime(&naive))
}

/// Combines --item and --bill specs into the ordered line-item list.
fn parse_line_items(items: &[String], bills: &[String]) -> Result<Vec<LineItem>, ApiError> {
    let mut parsed = Vec::with_capacity(items.len() + bills.len());
    for spec in items {
        parsed.push(parse_item_spec(spec)?);
    }
    for spec in bills {
        parsed.push(parse_bill_spec(spec)?);
    }
    Ok(parsed)
}

// =============================================================================
// Dispatch
// =============================================================================

/// Parses arguments, runs the selected command and prints the outcome.
pub fn run() -> Result<(), ApiError> {
    let cli = Cli::parse();
    let state = AppState::init(cli.data_dir.as_deref())?;
    dispatch(&state, cli.command)
}

fn dispatch(state: &AppState, command: Command) -> Result<(), ApiError> {
    match command {
        Command::Sale { command } => match command {
            SaleCommand::Record(args) => {
                let resp = sale::record(
                    state,
                    sale::RecordSaleRequest {
                        employee: args.employee,
                        store: args.store,
                        payment: args.payment.into(),
                        items: parse_line_items(&args.items, &args.bills)?,
                    },
                )?;
                println!(
                    "Sale recorded ({}): {} item(s) | Cost: {} | Sold: {} | Margin: {}",
                    resp.kind,
                    resp.item_count,
                    Money::from_cents(resp.cost_cents),
                    Money::from_cents(resp.revenue_cents),
                    Money::from_cents(resp.margin_cents),
                );
            }
        },

        Command::Inventory { command } => match command {
            InventoryCommand::List { store } => {
                let rows = inventory::list(state, store)?;
                if rows.is_empty() {
                    println!("No inventory at {store}.");
                } else {
                    println!("Inventory at {store}:");
                    for row in rows {
                        println!(
                            "  {:<30} qty {:>4}  cost {}",
                            row.name,
                            row.quantity,
                            Money::from_cents(row.unit_cost_cents)
                        );
                    }
                }
            }
            InventoryCommand::Restock {
                store,
                product,
                qty,
                cost,
            } => {
                let new_quantity = inventory::restock(
                    state,
                    inventory::RestockRequest {
                        store,
                        product: product.clone(),
                        quantity: qty,
                        unit_cost_cents: cost.cents(),
                    },
                )?;
                println!("{product} updated. New quantity: {new_quantity}");
            }
            InventoryCommand::Rename { store, from, to } => {
                inventory::rename(state, store, &from, &to)?;
                println!("Renamed '{from}' to '{to}' at {store}.");
            }
            InventoryCommand::Delete { store, product } => {
                let entry = inventory::delete(state, store, &product)?;
                println!(
                    "Deleted '{product}' at {store} ({} unit(s) discarded).",
                    entry.quantity
                );
            }
        },

        Command::Report { command } => {
            let scope = match command {
                ReportCommand::All => report::ReportScope::All,
                ReportCommand::Store { store } => report::ReportScope::Store(store),
                ReportCommand::Employee { name: Some(name) } => {
                    report::ReportScope::Employee(name)
                }
                ReportCommand::Employee { name: None } => {
                    let names = report::list_employees(state)?;
                    if names.is_empty() {
                        println!("No sales data available.");
                    } else {
                        println!("Employees on file: {}", names.join(", "));
                    }
                    return Ok(());
                }
            };
            let resp = report::run(state, scope)?;
            print_totals(&resp.title, &resp.totals);
            for (i, record) in resp.records.iter().enumerate() {
                print_record(i, record);
            }
        }

        Command::Admin { command } => match command {
            AdminCommand::List { today } => {
                let rows = admin::list_sales(state, today)?;
                if rows.is_empty() {
                    println!("No sale records found.");
                }
                for row in rows {
                    print_record(row.index, &row.record);
                }
            }
            AdminCommand::DeleteSale { index } => {
                let removed = admin::delete_sale(state, index)?;
                println!(
                    "Deleted sale {} from {} (stock not re-credited).",
                    index,
                    removed.recorded_at.format(DATE_FORMAT)
                );
            }
            AdminCommand::EditSale(args) => {
                let updated = admin::edit_sale(
                    state,
                    admin::EditSaleRequest {
                        index: args.index,
                        employee: args.employee,
                        store: args.store,
                        payment: args.payment.into(),
                        items: parse_line_items(&args.items, &args.bills)?,
                        recorded_at: args.date.as_deref().map(parse_date).transpose()?,
                    },
                )?;
                println!(
                    "Sale {} updated | Cost: {} | Sold: {} | Margin: {}",
                    args.index,
                    updated.cost(),
                    updated.revenue(),
                    updated.margin(),
                );
            }
            AdminCommand::Reset { kind } => {
                let kind: ResetKind = kind.into();
                admin::reset(state, kind)?;
                match kind {
                    ResetKind::Sales => println!("All sales data has been reset."),
                    ResetKind::Inventory => println!("All inventory has been reset."),
                }
            }
        },
    }

    Ok(())
}

// =============================================================================
// Output Formatting
// =============================================================================

fn print_totals(title: &str, totals: &wireline_core::Totals) {
    println!(
        "{title} | Cost: {} | Sold: {} | Margin: {} | Cash: {} | Card: {}",
        totals.cost, totals.revenue, totals.margin, totals.cash, totals.card
    );
}

fn print_record(index: usize, record: &SaleRecord) {
    let first_item = record
        .items
        .first()
        .map(|i| i.product.name())
        .unwrap_or("-");
    println!(
        "{}. {} | {} | {} | {} | {} | {} | {}",
        index,
        record.recorded_at.format(DATE_FORMAT),
        record.employee,
        record.store,
        record.kind,
        first_item,
        record.revenue(),
        record.payment,
    );
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item_spec() {
        let item = parse_item_spec("Galaxy A15:2:89.99:129.99").unwrap();
        assert_eq!(item.product, ProductRef::Catalog("Galaxy A15".to_string()));
        assert_eq!(item.quantity, 2);
        assert_eq!(item.unit_cost_cents, 8999);
        assert_eq!(item.unit_price_cents, 12999);
    }

    #[test]
    fn test_parse_item_spec_name_may_contain_colons() {
        let item = parse_item_spec("SIM: prepaid:1:0:10").unwrap();
        assert_eq!(item.product.name(), "SIM: prepaid");
        assert_eq!(item.unit_price_cents, 1000);
    }

    #[test]
    fn test_parse_item_spec_rejects_bad_shapes() {
        assert!(parse_item_spec("Widget:2:5.00").is_err());
        assert!(parse_item_spec("Widget:two:5.00:8.00").is_err());
        assert!(parse_item_spec("Widget:2:money:8.00").is_err());
    }

    #[test]
    fn test_parse_bill_spec() {
        let item = parse_bill_spec("Bill Payment:45.00:50.00").unwrap();
        assert_eq!(item.product, ProductRef::Custom("Bill Payment".to_string()));
        assert_eq!(item.quantity, 1);
        assert_eq!(item.unit_cost_cents, 4500);
        assert_eq!(item.unit_price_cents, 5000);
    }

    #[test]
    fn test_parse_date() {
        let dt = parse_date("03/15/2024 14:30").unwrap();
        assert_eq!(dt.format(DATE_FORMAT).to_string(), "03/15/2024 14:30");

        assert!(parse_date("2024-03-15").is_err());
    }

    #[test]
    fn test_cli_parses_sale_record() {
        let cli = Cli::try_parse_from([
            "wireline",
            "sale",
            "record",
            "--employee",
            "pat",
            "--store",
            "1 E Penn Sq",
            "--payment",
            "cash",
            "--item",
            "Widget:3:5.00:8.00",
        ])
        .unwrap();

        match cli.command {
            Command::Sale {
                command: SaleCommand::Record(args),
            } => {
                assert_eq!(args.employee, "pat");
                assert_eq!(args.store, StoreLocation::PennSquare);
                assert_eq!(args.items.len(), 1);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_store() {
        let result = Cli::try_parse_from([
            "wireline",
            "inventory",
            "list",
            "--store",
            "12 Nowhere St",
        ]);
        assert!(result.is_err());
    }
}
