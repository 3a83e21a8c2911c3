//! Measurement MCP Tools
//!
//! Parsing entered measurements and formatting stored ones for display.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::measurement::{
    nearest_common_fraction, normalize_sheet, MeasurementParser, NormalizedSheet, ParseMode,
    ParseOutcome,
};

/// Response for format_measurement
#[derive(Debug, Serialize)]
pub struct FormatMeasurementResponse {
    pub value: f64,
    pub display: String,
    /// The eighth the value was snapped to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fraction: Option<&'static str>,
}

pub fn parse_measurement(
    parser: &MeasurementParser,
    input: &str,
    mode: &str,
) -> Result<ParseOutcome, String> {
    let mode = ParseMode::from_str(mode)
        .ok_or_else(|| format!("Unknown mode {:?}, expected \"numeric\" or \"text\"", mode))?;
    Ok(parser.parse(input, mode))
}

pub fn format_measurement(
    parser: &MeasurementParser,
    value: f64,
    stored: bool,
) -> Result<FormatMeasurementResponse, String> {
    if !value.is_finite() {
        return Err(format!("Value must be a finite number, got {}", value));
    }

    let display = if stored {
        parser.format_stored(Some(value))
    } else {
        parser.format(value)
    };
    let fractional_part = value.abs() - value.abs().floor();
    let fraction = nearest_common_fraction(fractional_part, parser.tolerance()).map(|f| f.display);

    Ok(FormatMeasurementResponse {
        value,
        display,
        fraction,
    })
}

pub fn normalize_measurements(
    parser: &MeasurementParser,
    fields: BTreeMap<String, String>,
    numeric_fields: Vec<String>,
) -> NormalizedSheet {
    let numeric: HashSet<String> = numeric_fields.into_iter().map(|f| f.trim().to_string()).collect();
    normalize_sheet(parser, &fields, |field| numeric.contains(field))
}
