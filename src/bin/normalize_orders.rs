//! Batch utility: split and reconcile an orders file
//!
//! Usage: normalize_orders [ORDERS_JSON|-] [ITEMIZED_BILL_JSON]
//!
//! Reads a JSON array of order rows (stdin when the path is missing or "-"),
//! and prints the line items, the itemized totals and, when an itemized bill
//! is given, its consistency check.

use std::io::Read;

use serde::Serialize;
use tracing_subscriber::EnvFilter;

use tailorbill::models::{ExpandedOrderRecord, ItemizedBill, OrderRecord};
use tailorbill::orders::{self, Reconciliation, SnapshotCheck};

#[derive(Serialize)]
struct Report {
    line_items: Vec<ExpandedOrderRecord>,
    reconciliation: Reconciliation<ExpandedOrderRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    snapshot_check: Option<SnapshotCheck>,
}

fn read_input(path: Option<&str>) -> std::io::Result<String> {
    match path {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => std::fs::read_to_string(path),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("tailorbill=warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let records: Vec<OrderRecord> = serde_json::from_str(&read_input(args.first().map(String::as_str))?)?;
    eprintln!("Read {} orders", records.len());

    let line_items = orders::split(&records);
    let reconciliation = orders::reconcile(&line_items);

    let snapshot_check = match args.get(1) {
        Some(path) => {
            let snapshot: ItemizedBill = serde_json::from_str(&std::fs::read_to_string(path)?)?;
            Some(orders::compare_with_snapshot(&snapshot, &reconciliation))
        }
        None => None,
    };

    if let Some(check) = &snapshot_check {
        eprintln!(
            "Itemized bill: {} ({} discrepancies)",
            if check.consistent { "consistent" } else { "INCONSISTENT" },
            check.discrepancies.len()
        );
    }

    let report = Report {
        line_items,
        reconciliation,
        snapshot_check,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
