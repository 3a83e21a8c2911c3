//! Order pipeline
//!
//! Splitting multi-garment orders into line items, labelling garments, and
//! totalling them into itemized bill categories.

pub mod numbering;
pub mod reconciler;
pub mod splitter;

pub use numbering::{max_workers, number_garments, GarmentLabel};
pub use reconciler::{
    compare_with_snapshot, reconcile, Discrepancy, Reconciliation, SnapshotCheck,
    AMOUNT_TOLERANCE,
};
pub use splitter::{expand_order, find_line_item, garment_parts, sort_line_items, split};
