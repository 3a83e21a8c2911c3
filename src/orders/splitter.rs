//! Garment splitter
//!
//! An order row may carry several garments in one comma-joined label
//! ("Pant, Shirt"). Bills show one line per garment, so such rows are expanded
//! into fragments that share the order amount equally.

use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::{debug, warn};

use crate::models::lenient::round2;
use crate::models::{ExpandedOrderRecord, OrderRecord};

/// Expand every multi-garment order and return line items in bill order.
pub fn split(orders: &[OrderRecord]) -> Vec<ExpandedOrderRecord> {
    let mut lines: Vec<ExpandedOrderRecord> = orders.iter().flat_map(expand_order).collect();
    sort_line_items(&mut lines);

    let mut keys = HashSet::new();
    for line in &lines {
        let key = line.line_key();
        if !keys.insert(key.clone()) {
            warn!(line_key = %key, "Line key shared by more than one line item");
        }
    }

    debug!(
        orders = orders.len(),
        line_items = lines.len(),
        "Split orders into line items"
    );
    lines
}

/// Trimmed, non-empty garment names of a comma-joined label.
/// `None` when the label has no comma and is not a multi-garment label at all.
pub fn garment_parts(garment_type: &str) -> Option<Vec<&str>> {
    if !garment_type.contains(',') {
        return None;
    }
    Some(
        garment_type
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect(),
    )
}

/// Expand one order. Single-garment rows (and comma labels with nothing
/// between the commas) pass through unchanged.
pub fn expand_order(order: &OrderRecord) -> Vec<ExpandedOrderRecord> {
    let parts = match garment_parts(order.garment_type_str()) {
        Some(parts) if !parts.is_empty() => parts,
        _ => return vec![ExpandedOrderRecord::passthrough(order.clone())],
    };

    let share = round2(order.total_amt / parts.len() as f64);
    let drift = share * parts.len() as f64 - order.total_amt;
    if drift.abs() >= 0.01 - 1e-9 {
        warn!(
            order_id = %order.id_key(),
            garments = parts.len(),
            total_amt = order.total_amt,
            drift = round2(drift),
            "Split amounts do not add up to the order total"
        );
    }

    parts
        .iter()
        .enumerate()
        .map(|(index, garment)| ExpandedOrderRecord::fragment(order, garment, index, share))
        .collect()
}

/// Bill order: newest bill first, newest order first, garments in entry order.
pub fn line_order(a: &ExpandedOrderRecord, b: &ExpandedOrderRecord) -> Ordering {
    b.order
        .bill_number()
        .total_cmp(&a.order.bill_number())
        .then_with(|| b.source_id().cmp(&a.source_id()))
        .then_with(|| b.source_key().cmp(&a.source_key()))
        .then_with(|| a.garment_index.unwrap_or(0).cmp(&b.garment_index.unwrap_or(0)))
        // the rest only breaks ties between rows that share a key
        .then_with(|| a.order.garment_type_str().cmp(b.order.garment_type_str()))
        .then_with(|| a.order.total_amt.total_cmp(&b.order.total_amt))
}

pub fn sort_line_items(lines: &mut [ExpandedOrderRecord]) {
    lines.sort_by(line_order);
}

/// Look up a line item by its rendered key: an expanded id first, then a
/// plain order id.
pub fn find_line_item<'a>(
    lines: &'a [ExpandedOrderRecord],
    key: &str,
) -> Option<&'a ExpandedOrderRecord> {
    let key = key.trim();
    lines
        .iter()
        .find(|line| line.expanded_id.as_deref() == Some(key))
        .or_else(|| lines.iter().find(|line| line.order.id_key() == key))
}
