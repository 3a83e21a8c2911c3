//! Measurement parsing module
//!
//! Turns hand-entered measurement text into canonical decimals for storage,
//! and stored decimals back into shop-floor fractions for display.

pub mod fractions;
pub mod grammar;
pub mod sheet;
pub mod text;

use serde::{Deserialize, Serialize};

use crate::config::Settings;
pub use fractions::{
    format_decimal, format_stored, nearest_common_fraction, CommonFraction, COMMON_FRACTIONS,
    DEFAULT_FRACTION_DIGITS, DEFAULT_SNAP_TOLERANCE,
};
pub use grammar::{parse_number, MeasurementError, NumberForm, Parsed};
pub use sheet::{normalize_sheet, NormalizedSheet, RejectedField};
pub use text::normalize_text;

/// How a field is interpreted. The choice belongs to the caller's field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Lengths, widths, circumferences
    Numeric,
    /// Collar style, pocket type and other descriptive notes
    Text,
}

impl ParseMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseMode::Numeric => "numeric",
            ParseMode::Text => "text",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "numeric" | "number" | "decimal" => Some(ParseMode::Numeric),
            "text" | "descriptive" => Some(ParseMode::Text),
            _ => None,
        }
    }
}

/// A normalized measurement value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MeasurementValue {
    Number(f64),
    Text(String),
}

impl MeasurementValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            MeasurementValue::Number(v) => Some(*v),
            MeasurementValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            MeasurementValue::Number(_) => None,
            MeasurementValue::Text(s) => Some(s),
        }
    }
}

/// Result of parsing one field. Never an error: invalid numeric input is
/// reported with `valid: false`, a zero value, and the original text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseOutcome {
    pub value: MeasurementValue,
    pub valid: bool,
    /// Recognized number form (numeric mode only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<NumberForm>,
    pub original: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<MeasurementError>,
}

/// Measurement parser with configured precision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementParser {
    digits: u32,
    tolerance: f64,
}

impl Default for MeasurementParser {
    fn default() -> Self {
        Self {
            digits: DEFAULT_FRACTION_DIGITS,
            tolerance: DEFAULT_SNAP_TOLERANCE,
        }
    }
}

impl MeasurementParser {
    pub fn new(digits: u32, tolerance: f64) -> Self {
        Self { digits, tolerance }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.measurement_digits, settings.fraction_tolerance)
    }

    pub fn digits(&self) -> u32 {
        self.digits
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Parse one field
    ///
    /// Numeric mode:
    /// - "35 1/2" -> 35.5
    /// - "22/7/2" -> 25.5 (shop notation: 22 + 7/2)
    /// - "5/0" -> invalid
    pub fn parse(&self, input: &str, mode: ParseMode) -> ParseOutcome {
        match mode {
            ParseMode::Numeric => self.parse_numeric(input),
            ParseMode::Text => ParseOutcome {
                value: MeasurementValue::Text(normalize_text(input, self.digits)),
                valid: true,
                form: None,
                original: input.to_string(),
                error: None,
            },
        }
    }

    fn parse_numeric(&self, input: &str) -> ParseOutcome {
        let parsed = parse_number(input);
        let form = parsed.form();

        match parsed {
            Parsed::Invalid(error) => {
                tracing::debug!(input, %error, "Invalid numeric measurement");
                ParseOutcome {
                    value: MeasurementValue::Number(0.0),
                    valid: false,
                    form: Some(form),
                    original: input.to_string(),
                    error: Some(error),
                }
            }
            other => {
                let value = other.value().unwrap_or(0.0);
                ParseOutcome {
                    value: MeasurementValue::Number(fractions::round_measurement(
                        value,
                        self.digits,
                    )),
                    valid: true,
                    form: Some(form),
                    original: input.to_string(),
                    error: None,
                }
            }
        }
    }

    /// Decimal → display string ("35 1/2")
    pub fn format(&self, decimal: f64) -> String {
        format_decimal(decimal, self.tolerance)
    }

    /// Display for a stored value; missing or zero shows as an empty field
    pub fn format_stored(&self, value: Option<f64>) -> String {
        format_stored(value, self.tolerance)
    }
}

/// Parse with default precision
pub fn parse(input: &str, mode: ParseMode) -> ParseOutcome {
    MeasurementParser::default().parse(input, mode)
}

/// Format with default tolerance
pub fn format(decimal: f64) -> String {
    MeasurementParser::default().format(decimal)
}
