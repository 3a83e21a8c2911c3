//! Order Pipeline MCP Tools
//!
//! Splitting, reconciliation, itemized bill checks and garment numbering over
//! order rows passed in as JSON.

use serde::Serialize;
use serde_json::Value;

use crate::models::{
    ExpandedOrderRecord, GarmentCategory, ItemizedBill, ItemizedTotals, OrderRecord,
};
use crate::orders::{self, GarmentLabel, Reconciliation, SnapshotCheck};

/// Response for split_orders
#[derive(Debug, Serialize)]
pub struct SplitOrdersResponse {
    pub order_count: usize,
    pub line_item_count: usize,
    /// Orders that were expanded into more than one line item
    pub split_order_count: usize,
    pub line_items: Vec<ExpandedOrderRecord>,
}

/// Response for check_itemized_bill
#[derive(Debug, Serialize)]
pub struct CheckItemizedBillResponse {
    #[serde(flatten)]
    pub check: SnapshotCheck,
    pub stored: ItemizedTotals,
    pub computed: ItemizedTotals,
    pub garment_types: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance_due: Option<f64>,
}

/// One numbered garment
#[derive(Debug, Serialize)]
pub struct NumberedGarment {
    #[serde(flatten)]
    pub label: GarmentLabel,
    pub garment_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<GarmentCategory>,
    pub max_workers: u32,
}

/// Response for number_garments
#[derive(Debug, Serialize)]
pub struct NumberGarmentsResponse {
    pub garments: Vec<NumberedGarment>,
}

/// Decode order rows. Each row must be a JSON object; its fields are coerced
/// leniently.
pub fn decode_orders(rows: Vec<Value>) -> Result<Vec<OrderRecord>, String> {
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| {
            serde_json::from_value(row).map_err(|e| format!("Order at index {}: {}", i, e))
        })
        .collect()
}

/// Decode rows into line items: split raw orders, or take rows that are
/// already line items as they are.
pub fn decode_line_items(
    rows: Vec<Value>,
    split_first: bool,
) -> Result<Vec<ExpandedOrderRecord>, String> {
    if split_first {
        return Ok(orders::split(&decode_orders(rows)?));
    }
    let mut lines = rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            serde_json::from_value::<ExpandedOrderRecord>(row)
                .map_err(|e| format!("Line item at index {}: {}", i, e))
        })
        .collect::<Result<Vec<_>, _>>()?;
    orders::sort_line_items(&mut lines);
    Ok(lines)
}

pub fn split_orders(rows: Vec<Value>) -> Result<SplitOrdersResponse, String> {
    let records = decode_orders(rows)?;
    let line_items = orders::split(&records);

    let mut split_sources: Vec<String> = line_items
        .iter()
        .filter(|line| line.is_fragment())
        .map(|line| line.source_key())
        .collect();
    split_sources.sort_unstable();
    split_sources.dedup();

    Ok(SplitOrdersResponse {
        order_count: records.len(),
        line_item_count: line_items.len(),
        split_order_count: split_sources.len(),
        line_items,
    })
}

pub fn reconcile_orders(
    rows: Vec<Value>,
    split_first: bool,
) -> Result<Reconciliation<ExpandedOrderRecord>, String> {
    let lines = decode_line_items(rows, split_first)?;
    Ok(orders::reconcile(&lines))
}

/// Check a stored itemized bill against the orders of the bill
pub fn check_itemized_bill(
    snapshot: Value,
    rows: Vec<Value>,
    split_first: bool,
    advance: Option<f64>,
) -> Result<CheckItemizedBillResponse, String> {
    let snapshot: ItemizedBill = serde_json::from_value(snapshot)
        .map_err(|e| format!("Invalid itemized bill: {}", e))?;
    let reconciliation = reconcile_orders(rows, split_first)?;
    let check = orders::compare_with_snapshot(&snapshot, &reconciliation);

    Ok(CheckItemizedBillResponse {
        check,
        stored: snapshot.totals(),
        computed: reconciliation.totals(),
        garment_types: snapshot.garment_types(),
        balance_due: advance.map(|a| snapshot.balance_due(a)),
    })
}

pub fn number_garments(
    rows: Vec<Value>,
    split_first: bool,
) -> Result<NumberGarmentsResponse, String> {
    let lines = decode_line_items(rows, split_first)?;
    let labels = orders::number_garments(&lines);

    let garments = lines
        .iter()
        .zip(labels)
        .map(|(line, label)| {
            let garment_type = line.order.garment_type_str().to_string();
            NumberedGarment {
                label,
                category: GarmentCategory::classify(&garment_type),
                max_workers: orders::max_workers(&garment_type),
                garment_type,
            }
        })
        .collect();

    Ok(NumberGarmentsResponse { garments })
}
