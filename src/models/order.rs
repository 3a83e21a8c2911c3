//! Order models
//!
//! Order rows as delivered by the storage layer, and the per-garment line
//! items produced by splitting multi-garment orders.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient::{self, RawField};

/// An order row. Fields the pipeline does not interpret (customer name,
/// mobile number, status, dates, payment columns...) are kept verbatim in
/// `extra`. The columns it does read are kept as they arrived, so a row that
/// passes through unchanged serializes exactly like its source; only
/// `total_amt` is normalized to a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    #[serde(default, skip_serializing_if = "RawField::is_missing")]
    pub id: RawField,
    /// Bill sequence number as entered on the bill (numeric text)
    #[serde(default, skip_serializing_if = "RawField::is_missing")]
    pub billnumberinput2: RawField,
    /// Free-form garment label, possibly comma-joined ("Pant, Shirt")
    #[serde(default, skip_serializing_if = "RawField::is_missing")]
    pub garment_type: RawField,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub total_amt: f64,
    #[serde(default, skip_serializing_if = "RawField::is_missing")]
    pub bill_id: RawField,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OrderRecord {
    /// Minimal order, mostly for callers building rows by hand
    pub fn new(id: i64, garment_type: &str, total_amt: f64) -> Self {
        Self {
            id: RawField::new(id),
            billnumberinput2: RawField::missing(),
            garment_type: RawField::new(garment_type),
            total_amt,
            bill_id: RawField::missing(),
            extra: Map::new(),
        }
    }

    pub fn with_bill_number(mut self, bill_number: &str) -> Self {
        self.billnumberinput2 = RawField::new(bill_number);
        self
    }

    pub fn with_bill_id(mut self, bill_id: i64) -> Self {
        self.bill_id = RawField::new(bill_id);
        self
    }

    /// Numeric order id (missing or non-numeric is 0)
    pub fn id_number(&self) -> i64 {
        self.id.as_id().unwrap_or(0)
    }

    /// Order id as text, as used in line keys
    pub fn id_key(&self) -> String {
        self.id.key()
    }

    /// Garment label, empty when missing or not text
    pub fn garment_type_str(&self) -> &str {
        self.garment_type.as_str().unwrap_or("")
    }

    /// Numeric bill number (missing or non-numeric is 0)
    pub fn bill_number(&self) -> f64 {
        self.billnumberinput2.as_number()
    }
}

/// A line item: either an order passed through unchanged, or one garment
/// fragment of a multi-garment order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpandedOrderRecord {
    #[serde(flatten)]
    pub order: OrderRecord,
    /// `"{original_id}_split_{garment_index}"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expanded_id: Option<String>,
    #[serde(default, skip_serializing_if = "RawField::is_missing")]
    pub original_id: RawField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub garment_index: Option<usize>,
}

impl ExpandedOrderRecord {
    /// Wrap an order without adding any expansion fields
    pub fn passthrough(order: OrderRecord) -> Self {
        Self {
            order,
            expanded_id: None,
            original_id: RawField::missing(),
            garment_index: None,
        }
    }

    /// Build the `index`-th fragment of `source` carrying a single garment
    pub fn fragment(source: &OrderRecord, garment: &str, index: usize, amount: f64) -> Self {
        let mut order = source.clone();
        order.garment_type = RawField::new(garment);
        order.total_amt = amount;
        Self {
            order,
            expanded_id: Some(format!("{}_split_{}", source.id_key(), index)),
            original_id: source.id.clone(),
            garment_index: Some(index),
        }
    }

    pub fn is_fragment(&self) -> bool {
        self.expanded_id.is_some()
    }

    fn source(&self) -> &RawField {
        if self.original_id.is_missing() {
            &self.order.id
        } else {
            &self.original_id
        }
    }

    /// Numeric id of the order this line item came from
    pub fn source_id(&self) -> i64 {
        self.source().as_id().unwrap_or(0)
    }

    /// Id text of the order this line item came from
    pub fn source_key(&self) -> String {
        self.source().key()
    }

    /// Key that identifies this line item in a rendered list
    pub fn line_key(&self) -> String {
        self.expanded_id
            .clone()
            .unwrap_or_else(|| self.order.id_key())
    }

    /// "Pant (2)" for the second fragment, bare garment otherwise
    pub fn display_label(&self) -> String {
        let garment = match self.order.garment_type_str().trim() {
            "" => "N/A",
            g => g,
        };
        match self.garment_index {
            Some(index) => format!("{} ({})", garment, index + 1),
            None => garment.to_string(),
        }
    }
}

/// Anything that can be classified and totalled on a bill
pub trait Billable {
    fn garment_type(&self) -> &str;
    fn total_amt(&self) -> f64;
}

impl Billable for OrderRecord {
    fn garment_type(&self) -> &str {
        self.garment_type_str()
    }

    fn total_amt(&self) -> f64 {
        self.total_amt
    }
}

impl Billable for ExpandedOrderRecord {
    fn garment_type(&self) -> &str {
        self.order.garment_type_str()
    }

    fn total_amt(&self) -> f64 {
        self.order.total_amt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_from_loose_json() {
        let order: OrderRecord = serde_json::from_value(json!({
            "id": "5924",
            "billnumberinput2": 8051,
            "garment_type": "Pant, Shirt",
            "total_amt": "600",
            "bill_id": 102,
            "customer_name": "Ravi",
            "mobile_number": "9876543210"
        }))
        .unwrap();

        assert_eq!(order.id_number(), 5924);
        assert_eq!(order.billnumberinput2.key(), "8051");
        assert_eq!(order.bill_number(), 8051.0);
        assert_eq!(order.total_amt, 600.0);
        assert_eq!(order.bill_id.as_id(), Some(102));
        assert_eq!(order.extra.get("customer_name"), Some(&json!("Ravi")));
    }

    #[test]
    fn test_missing_fields_default_safely() {
        let order: OrderRecord = serde_json::from_value(json!({ "id": 7 })).unwrap();
        assert_eq!(order.total_amt, 0.0);
        assert_eq!(order.garment_type_str(), "");
        assert_eq!(order.bill_number(), 0.0);

        let order: OrderRecord =
            serde_json::from_value(json!({ "id": 8, "total_amt": null, "garment_type": null }))
                .unwrap();
        assert_eq!(order.total_amt, 0.0);
        assert_eq!(order.garment_type.value(), None);
        assert!(!order.garment_type.is_missing());
    }

    #[test]
    fn test_null_columns_survive_a_round_trip() {
        let source = json!({
            "id": 7, "billnumberinput2": null, "garment_type": "Suit", "total_amt": 350.0,
            "due_date": null, "order_date": null, "status": null, "bill_id": null
        });
        let order: OrderRecord = serde_json::from_value(source.clone()).unwrap();

        assert_eq!(order.extra.get("status"), Some(&Value::Null));
        assert_eq!(order.bill_id.as_id(), None);
        assert_eq!(order.bill_number(), 0.0);
        assert_eq!(serde_json::to_value(&order).unwrap(), source);
    }

    #[test]
    fn test_non_numeric_ids_keep_their_text() {
        let order: OrderRecord =
            serde_json::from_value(json!({ "id": "ORD-17", "garment_type": "Pant, Shirt" })).unwrap();
        assert_eq!(order.id_number(), 0);
        assert_eq!(order.id_key(), "ORD-17");

        let fragment = ExpandedOrderRecord::fragment(&order, "Shirt", 1, 0.0);
        assert_eq!(fragment.line_key(), "ORD-17_split_1");
        assert_eq!(fragment.source_key(), "ORD-17");
        let value = serde_json::to_value(&fragment).unwrap();
        assert_eq!(value["original_id"], json!("ORD-17"));
        assert_eq!(value["id"], json!("ORD-17"));
    }

    #[test]
    fn test_passthrough_serializes_like_source() {
        let source = json!({
            "id": 1,
            "billnumberinput2": "100",
            "garment_type": "Suit",
            "total_amt": 1000.0,
            "status": "pending",
            "customer_name": "Asha"
        });
        let order: OrderRecord = serde_json::from_value(source.clone()).unwrap();
        let line = ExpandedOrderRecord::passthrough(order.clone());

        assert_eq!(serde_json::to_value(&line).unwrap(), serde_json::to_value(&order).unwrap());
        assert_eq!(serde_json::to_value(&line).unwrap(), source);
        assert!(!line.is_fragment());
    }

    #[test]
    fn test_expanded_record_roundtrips_through_json() {
        let order = OrderRecord::new(9, "Pant, Shirt", 600.0);
        let fragment = ExpandedOrderRecord::fragment(&order, "Shirt", 1, 300.0);
        let value = serde_json::to_value(&fragment).unwrap();

        assert_eq!(value["expanded_id"], json!("9_split_1"));
        assert_eq!(value["garment_index"], json!(1));

        let back: ExpandedOrderRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, fragment);
        assert!(back.order.extra.is_empty());
    }

    #[test]
    fn test_display_label() {
        let order = OrderRecord::new(9, "Pant, Shirt", 600.0);
        let fragment = ExpandedOrderRecord::fragment(&order, "Shirt", 1, 300.0);
        assert_eq!(fragment.display_label(), "Shirt (2)");
        assert_eq!(fragment.line_key(), "9_split_1");
        assert_eq!(fragment.source_id(), 9);

        let single = ExpandedOrderRecord::passthrough(OrderRecord::new(3, "Sadri", 450.0));
        assert_eq!(single.display_label(), "Sadri");
        assert_eq!(single.line_key(), "3");

        let blank = ExpandedOrderRecord::passthrough(OrderRecord::new(4, " ", 0.0));
        assert_eq!(blank.display_label(), "N/A");
    }
}
