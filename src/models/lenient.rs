//! Lenient field coercion
//!
//! Order and bill rows store numbers inconsistently: as JSON numbers, numeric
//! strings, empty strings, or null. Everything is coerced here. Columns that
//! must be written back exactly as they arrived are held in [`RawField`] and
//! coerced when read.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Coerce a JSON value into an amount. Non-numeric or missing becomes 0.0,
/// and negative zero becomes 0.0.
pub fn coerce_amount(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed.filter(|v| v.is_finite()) {
        Some(v) if v != 0.0 => v,
        _ => 0.0,
    }
}

/// Coerce a JSON value into a quantity (integer part, never negative)
pub fn coerce_quantity(value: &Value) -> u32 {
    let amount = coerce_amount(value);
    if amount <= 0.0 {
        0
    } else if amount >= u32::MAX as f64 {
        u32::MAX
    } else {
        amount.trunc() as u32
    }
}

/// Coerce a JSON value into text. Numbers keep their JSON rendering.
pub fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Coerce a JSON value into an integer id
pub fn coerce_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// An order column kept exactly as it arrived. A missing key stays missing
/// and an explicit null stays null when the row is written back out; typed
/// views are coerced on read.
///
/// Use with `#[serde(default, skip_serializing_if = "RawField::is_missing")]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawField(Option<Value>);

impl RawField {
    pub fn new(value: impl Into<Value>) -> Self {
        Self(Some(value.into()))
    }

    pub fn missing() -> Self {
        Self(None)
    }

    pub fn is_missing(&self) -> bool {
        self.0.is_none()
    }

    /// The stored value; `None` when missing or null
    pub fn value(&self) -> Option<&Value> {
        self.0.as_ref().filter(|v| !v.is_null())
    }

    /// String contents, `None` for anything that is not a JSON string
    pub fn as_str(&self) -> Option<&str> {
        self.value().and_then(Value::as_str)
    }

    pub fn as_id(&self) -> Option<i64> {
        self.value().and_then(coerce_id)
    }

    /// Numeric value (missing or non-numeric is 0)
    pub fn as_number(&self) -> f64 {
        self.value().map(coerce_amount).unwrap_or(0.0)
    }

    /// Trimmed text form, empty when missing, null or not scalar
    pub fn key(&self) -> String {
        self.value()
            .and_then(coerce_text)
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    }
}

impl Serialize for RawField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            Some(value) => value.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for RawField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(|v| Self(Some(v)))
    }
}

/// `deserialize_with` adapter for amount fields
pub fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(coerce_amount).unwrap_or(0.0))
}

/// `deserialize_with` adapter for quantity fields
pub fn quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(coerce_quantity).unwrap_or(0))
}

/// `deserialize_with` adapter for optional amounts (stored totals that may be absent)
pub fn opt_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.filter(|v| !is_blank(v)).map(|v| coerce_amount(&v)))
}

/// `deserialize_with` adapter for optional quantities
pub fn opt_quantity<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.filter(|v| !is_blank(v)).map(|v| coerce_quantity(&v)))
}

/// Round half away from zero to `digits` fractional digits.
/// Values too large to scale are returned unchanged.
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    let scaled = (value * factor).round();
    if scaled.is_finite() {
        scaled / factor
    } else {
        value
    }
}

/// Two-decimal currency rounding
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_amount() {
        assert_eq!(coerce_amount(&json!(500)), 500.0);
        assert_eq!(coerce_amount(&json!(" 12.5 ")), 12.5);
        assert_eq!(coerce_amount(&json!("abc")), 0.0);
        assert_eq!(coerce_amount(&json!("")), 0.0);
        assert_eq!(coerce_amount(&json!(null)), 0.0);
        assert_eq!(coerce_amount(&json!("NaN")), 0.0);
        assert_eq!(coerce_amount(&json!("inf")), 0.0);
        assert_eq!(coerce_amount(&json!([1, 2])), 0.0);
        assert!(coerce_amount(&json!("-0")).is_sign_positive());
        assert!(coerce_amount(&json!(-0.0)).is_sign_positive());
    }

    #[test]
    fn test_coerce_quantity() {
        assert_eq!(coerce_quantity(&json!("3")), 3);
        assert_eq!(coerce_quantity(&json!(2.9)), 2);
        assert_eq!(coerce_quantity(&json!(-1)), 0);
        assert_eq!(coerce_quantity(&json!("")), 0);
    }

    #[test]
    fn test_coerce_text() {
        assert_eq!(coerce_text(&json!(8052)), Some("8052".to_string()));
        assert_eq!(coerce_text(&json!("8052")), Some("8052".to_string()));
        assert_eq!(coerce_text(&json!(null)), None);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round2(333.333333), 333.33);
        assert_eq!(round2(-2.5), -2.5);
        assert_eq!(round_to(0.125, 2), 0.13);
        assert_eq!(round_to(3.14159265, 4), 3.1416);
        assert_eq!(round_to(1e306, 4), 1e306);
    }

    #[test]
    fn test_raw_field_views() {
        let bill: RawField = serde_json::from_value(json!(" 8051 ")).unwrap();
        assert_eq!(bill.as_number(), 8051.0);
        assert_eq!(bill.as_id(), Some(8051));
        assert_eq!(bill.key(), "8051");
        assert_eq!(bill.as_str(), Some(" 8051 "));

        let code = RawField::new("B-12");
        assert_eq!(code.as_number(), 0.0);
        assert_eq!(code.as_id(), None);
        assert_eq!(code.key(), "B-12");

        assert_eq!(RawField::new(42).as_str(), None);
        assert_eq!(RawField::new(42).key(), "42");
        assert!(RawField::new("-0").as_number().is_sign_positive());
    }

    #[test]
    fn test_raw_field_keeps_null_apart_from_missing() {
        let null: RawField = serde_json::from_value(json!(null)).unwrap();
        assert!(!null.is_missing());
        assert_eq!(null.value(), None);
        assert_eq!(null.key(), "");
        assert_eq!(serde_json::to_value(&null).unwrap(), json!(null));

        let missing = RawField::missing();
        assert!(missing.is_missing());
        assert_eq!(missing.as_id(), None);
        assert_eq!(missing, RawField::default());
    }
}
