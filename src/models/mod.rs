//! Data models
//!
//! Order rows, line items, categories and itemized bill snapshots.

mod category;
mod itemized;
pub mod lenient;
mod order;

pub use category::{CategoryTotal, GarmentCategory};
pub use itemized::{ItemizedBill, ItemizedTotals};
pub use lenient::RawField;
pub use order::{Billable, ExpandedOrderRecord, OrderRecord};
