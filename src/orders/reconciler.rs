//! Itemized totals reconciler
//!
//! Groups orders into the six itemized bill categories and totals them. The
//! same totals are used to check a stored itemized snapshot against the
//! orders it claims to summarize.

use serde::Serialize;
use tracing::{debug, warn};

use crate::models::lenient::round2;
use crate::models::{Billable, CategoryTotal, GarmentCategory, ItemizedBill, ItemizedTotals};

/// Amount differences below this are rounding noise
pub const AMOUNT_TOLERANCE: f64 = 0.005;

/// Per-category totals of a set of orders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reconciliation<T> {
    /// All six categories in bill order, zero rows included
    pub categories: Vec<CategoryTotal>,
    pub total_qty: u32,
    pub total_amt: f64,
    /// Orders whose garment type matched no category
    pub unclassified: Vec<T>,
    pub unclassified_amt: f64,
}

impl<T> Reconciliation<T> {
    pub fn category(&self, category: GarmentCategory) -> &CategoryTotal {
        &self.categories[category.index()]
    }

    pub fn totals(&self) -> ItemizedTotals {
        ItemizedTotals {
            total_qty: self.total_qty,
            total_amt: self.total_amt,
        }
    }
}

/// Unrounded running sums
#[derive(Debug, Default)]
struct Tally {
    quantities: [u32; 6],
    amounts: [f64; 6],
    unclassified_amt: f64,
}

impl Tally {
    fn add(&mut self, category: Option<GarmentCategory>, amount: f64) {
        match category {
            Some(category) => {
                let i = category.index();
                self.quantities[i] = self.quantities[i].saturating_add(1);
                self.amounts[i] += amount;
            }
            None => self.unclassified_amt += amount,
        }
    }

    fn classified_amt(&self) -> f64 {
        self.amounts.iter().sum()
    }

    fn finish<T>(self, unclassified: Vec<T>) -> Reconciliation<T> {
        let categories = GarmentCategory::ALL
            .iter()
            .map(|&category| CategoryTotal {
                category,
                quantity: self.quantities[category.index()],
                amount: round2(self.amounts[category.index()]),
            })
            .collect();

        Reconciliation {
            categories,
            total_qty: self.quantities.iter().fold(0u32, |acc, q| acc.saturating_add(*q)),
            total_amt: round2(self.classified_amt()),
            unclassified,
            unclassified_amt: round2(self.unclassified_amt),
        }
    }
}

/// Total orders per category. Works on raw orders or split line items.
pub fn reconcile<T: Billable + Clone>(orders: &[T]) -> Reconciliation<T> {
    let mut tally = Tally::default();
    let mut unclassified = Vec::new();

    for order in orders {
        let category = GarmentCategory::classify(order.garment_type());
        tally.add(category, order.total_amt());
        if category.is_none() {
            unclassified.push(order.clone());
        }
    }

    if !unclassified.is_empty() {
        warn!(
            count = unclassified.len(),
            amount = round2(tally.unclassified_amt),
            "Orders with unrecognized garment types left out of itemized totals"
        );
    }

    let reconciliation = tally.finish(unclassified);
    debug!(
        orders = orders.len(),
        total_qty = reconciliation.total_qty,
        total_amt = reconciliation.total_amt,
        "Reconciled itemized totals"
    );
    reconciliation
}

impl ItemizedBill {
    /// Snapshot of a fresh reconciliation, as it would be stored with a bill
    pub fn from_reconciliation<T>(reconciliation: &Reconciliation<T>) -> Self {
        Self::from_totals(&reconciliation.categories)
    }
}

/// One disagreement between a stored snapshot and recomputed totals.
/// `category: None` is the grand total row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Discrepancy {
    pub category: Option<GarmentCategory>,
    pub stored_qty: u32,
    pub computed_qty: u32,
    pub stored_amount: f64,
    pub computed_amount: f64,
}

impl Discrepancy {
    pub fn qty_delta(&self) -> i64 {
        self.computed_qty as i64 - self.stored_qty as i64
    }

    pub fn amount_delta(&self) -> f64 {
        round2(self.computed_amount - self.stored_amount)
    }

    pub fn label(&self) -> &'static str {
        self.category.map(|c| c.display_name()).unwrap_or("Total")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotCheck {
    pub consistent: bool,
    pub discrepancies: Vec<Discrepancy>,
    /// Orders that could not be classified and so cannot appear in any row
    pub unclassified_count: usize,
}

fn differs(stored_qty: u32, computed_qty: u32, stored_amount: f64, computed_amount: f64) -> bool {
    stored_qty != computed_qty || (stored_amount - computed_amount).abs() > AMOUNT_TOLERANCE
}

/// Compare a stored itemized bill against a fresh reconciliation.
/// Discrepancies are reported, never corrected.
pub fn compare_with_snapshot<T>(
    snapshot: &ItemizedBill,
    reconciliation: &Reconciliation<T>,
) -> SnapshotCheck {
    let mut discrepancies: Vec<Discrepancy> = GarmentCategory::ALL
        .iter()
        .filter_map(|&category| {
            let (stored_qty, stored_amount) = snapshot.get(category);
            let computed = reconciliation.category(category);
            differs(stored_qty, computed.quantity, stored_amount, computed.amount).then(|| {
                Discrepancy {
                    category: Some(category),
                    stored_qty,
                    computed_qty: computed.quantity,
                    stored_amount,
                    computed_amount: computed.amount,
                }
            })
        })
        .collect();

    let stored = snapshot.totals();
    if differs(
        stored.total_qty,
        reconciliation.total_qty,
        stored.total_amt,
        reconciliation.total_amt,
    ) {
        discrepancies.push(Discrepancy {
            category: None,
            stored_qty: stored.total_qty,
            computed_qty: reconciliation.total_qty,
            stored_amount: stored.total_amt,
            computed_amount: reconciliation.total_amt,
        });
    }

    for d in &discrepancies {
        warn!(
            row = d.label(),
            stored_qty = d.stored_qty,
            computed_qty = d.computed_qty,
            stored_amount = d.stored_amount,
            computed_amount = d.computed_amount,
            "Itemized bill disagrees with its orders"
        );
    }

    SnapshotCheck {
        consistent: discrepancies.is_empty(),
        discrepancies,
        unclassified_count: reconciliation.unclassified.len(),
    }
}
