//! Common fractions and display formatting
//!
//! Tailoring measurements are taken to the nearest eighth of an inch, so a
//! stored decimal is shown as "35 1/2" whenever it sits close to an eighth.

use crate::models::lenient::round_to;

/// Fractional digits kept by numeric parsing unless configured otherwise
pub const DEFAULT_FRACTION_DIGITS: u32 = 4;

/// Distance from an eighth within which a decimal is shown as that fraction
pub const DEFAULT_SNAP_TOLERANCE: f64 = 0.01;

/// A display fraction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommonFraction {
    pub numerator: u8,
    pub denominator: u8,
    pub display: &'static str,
}

impl CommonFraction {
    pub fn value(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

/// Eighths in lowest terms
pub const COMMON_FRACTIONS: [CommonFraction; 7] = [
    CommonFraction { numerator: 1, denominator: 8, display: "1/8" },
    CommonFraction { numerator: 1, denominator: 4, display: "1/4" },
    CommonFraction { numerator: 3, denominator: 8, display: "3/8" },
    CommonFraction { numerator: 1, denominator: 2, display: "1/2" },
    CommonFraction { numerator: 5, denominator: 8, display: "5/8" },
    CommonFraction { numerator: 3, denominator: 4, display: "3/4" },
    CommonFraction { numerator: 7, denominator: 8, display: "7/8" },
];

/// First common fraction strictly within `tolerance` of `fractional_part`
pub fn nearest_common_fraction(fractional_part: f64, tolerance: f64) -> Option<&'static CommonFraction> {
    COMMON_FRACTIONS
        .iter()
        .find(|f| (fractional_part - f.value()).abs() < tolerance)
}

/// Decimal → "whole fraction" display. Lossy: thirds and other
/// non-eighths come back as plain decimals.
///
/// - 35.5 -> "35 1/2"
/// - 0.25 -> "1/4"
/// - 36.3333 -> "36.3333"
pub fn format_decimal(decimal: f64, tolerance: f64) -> String {
    if !decimal.is_finite() {
        return "0".to_string();
    }
    if decimal < 0.0 {
        return format!("-{}", format_decimal(-decimal, tolerance));
    }

    let whole = decimal.floor();
    let fractional_part = decimal - whole;

    match nearest_common_fraction(fractional_part, tolerance) {
        Some(fraction) if whole == 0.0 => fraction.display.to_string(),
        Some(fraction) => format!("{} {}", whole, fraction.display),
        None => render_decimal(decimal),
    }
}

/// Display for a stored value: missing or zero is an empty (cleared) field
pub fn format_stored(value: Option<f64>, tolerance: f64) -> String {
    match value {
        Some(v) if v != 0.0 && v.is_finite() => format_decimal(v, tolerance),
        _ => String::new(),
    }
}

/// Shortest plain rendering of a decimal ("2.5", "3")
pub fn render_decimal(value: f64) -> String {
    format!("{}", value)
}

/// Round for storage
pub fn round_measurement(value: f64, digits: u32) -> f64 {
    round_to(value, digits)
}
