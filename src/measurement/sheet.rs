//! Whole measurement sheets
//!
//! A sheet is a map of field name to entered text. Which fields are numeric
//! is decided by the caller's field table, not by looking at the text.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{MeasurementError, MeasurementParser, MeasurementValue, ParseMode};

/// A numeric field that could not be read. The stored value falls back to 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedField {
    pub field: String,
    pub original: String,
    pub error: MeasurementError,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedSheet {
    pub values: BTreeMap<String, MeasurementValue>,
    pub rejected: Vec<RejectedField>,
}

impl NormalizedSheet {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Normalize every field of a sheet. `is_numeric` classifies field names.
pub fn normalize_sheet<F>(
    parser: &MeasurementParser,
    fields: &BTreeMap<String, String>,
    is_numeric: F,
) -> NormalizedSheet
where
    F: Fn(&str) -> bool,
{
    let mut sheet = NormalizedSheet::default();

    for (field, text) in fields {
        let mode = if is_numeric(field) {
            ParseMode::Numeric
        } else {
            ParseMode::Text
        };
        let outcome = parser.parse(text, mode);

        if let Some(error) = outcome.error {
            sheet.rejected.push(RejectedField {
                field: field.clone(),
                original: outcome.original,
                error,
            });
        }
        sheet.values.insert(field.clone(), outcome.value);
    }

    if !sheet.is_clean() {
        tracing::warn!(
            rejected = sheet.rejected.len(),
            fields = fields.len(),
            "Measurement sheet has unreadable numeric fields"
        );
    }

    sheet
}
