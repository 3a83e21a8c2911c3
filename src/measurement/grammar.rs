//! Measurement number grammar
//!
//! ```text
//! decimal      := digits '.' digits
//! fraction     := digits '/' digits
//! mixed_number := digits space+ digits '/' digits
//! shop_triple  := digits '/' digits '/' digits      (whole + num/den)
//! integer      := digits
//! ```
//!
//! Alternatives are tried in the fixed order of [`NUMERIC_ALTERNATIVES`]; the
//! first one that consumes the whole input wins. Only ASCII digits count.

use serde::Serialize;
use thiserror::Error;

/// Why a measurement could not be read as a number
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "input", rename_all = "snake_case")]
pub enum MeasurementError {
    #[error("Denominator is zero")]
    ZeroDenominator,

    #[error("Not a recognized measurement: {0:?}")]
    Unrecognized(String),

    #[error("Measurement too large: {0:?}")]
    Overflow(String),
}

/// A recognized number form
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed {
    /// Empty input (a cleared field)
    Blank,
    Decimal(f64),
    Integer(f64),
    Fraction {
        numerator: f64,
        denominator: f64,
    },
    MixedNumber {
        whole: f64,
        numerator: f64,
        denominator: f64,
    },
    /// Shop notation "22/7/2": 22 + 7/2
    ShopTriple {
        whole: f64,
        numerator: f64,
        denominator: f64,
    },
    Invalid(MeasurementError),
}

/// Serializable tag of a [`Parsed`] value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberForm {
    Blank,
    Decimal,
    Integer,
    Fraction,
    MixedNumber,
    ShopTriple,
    Invalid,
}

impl Parsed {
    /// Decimal value, `None` for invalid input
    pub fn value(&self) -> Option<f64> {
        match *self {
            Parsed::Blank => Some(0.0),
            Parsed::Decimal(v) | Parsed::Integer(v) => Some(v),
            Parsed::Fraction {
                numerator,
                denominator,
            } => Some(numerator / denominator),
            Parsed::MixedNumber {
                whole,
                numerator,
                denominator,
            }
            | Parsed::ShopTriple {
                whole,
                numerator,
                denominator,
            } => Some(whole + numerator / denominator),
            Parsed::Invalid(_) => None,
        }
    }

    pub fn form(&self) -> NumberForm {
        match self {
            Parsed::Blank => NumberForm::Blank,
            Parsed::Decimal(_) => NumberForm::Decimal,
            Parsed::Integer(_) => NumberForm::Integer,
            Parsed::Fraction { .. } => NumberForm::Fraction,
            Parsed::MixedNumber { .. } => NumberForm::MixedNumber,
            Parsed::ShopTriple { .. } => NumberForm::ShopTriple,
            Parsed::Invalid(_) => NumberForm::Invalid,
        }
    }

    /// True for forms written with a slash
    pub fn is_fractional(&self) -> bool {
        matches!(
            self,
            Parsed::Fraction { .. } | Parsed::MixedNumber { .. } | Parsed::ShopTriple { .. }
        )
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, Parsed::Invalid(_))
    }
}

/// Cursor over the input. Digits and punctuation are matched byte-wise;
/// `pos` always sits on a char boundary.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Cursor<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(text: &'a str, pos: usize) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos,
        }
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn eat(&mut self, expected: u8) -> bool {
        if self.bytes.get(self.pos) == Some(&expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// One or more ASCII digits, as a number
    fn digits(&mut self) -> Option<f64> {
        let start = self.pos;
        while self.bytes.get(self.pos).is_some_and(u8::is_ascii_digit) {
            self.pos += 1;
        }
        if self.pos == start {
            return None;
        }
        self.text[start..self.pos].parse::<f64>().ok()
    }

    /// One or more whitespace chars, non-breaking and other Unicode spaces included
    fn spaces(&mut self) -> bool {
        let start = self.pos;
        while let Some(ch) = self.text.get(self.pos..).and_then(|rest| rest.chars().next()) {
            if !ch.is_whitespace() {
                break;
            }
            self.pos += ch.len_utf8();
        }
        self.pos > start
    }
}

pub(crate) type Alternative = for<'a> fn(&mut Cursor<'a>) -> Option<Parsed>;

/// Whole-field priority order
pub(crate) const NUMERIC_ALTERNATIVES: [Alternative; 5] =
    [decimal, fraction, mixed_number, shop_triple, integer];

/// Embedded-in-text order: longest forms first
pub(crate) const TEXT_ALTERNATIVES: [Alternative; 5] =
    [mixed_number, shop_triple, fraction, decimal, integer];

pub(crate) fn decimal(c: &mut Cursor) -> Option<Parsed> {
    let start = c.pos;
    c.digits()?;
    if !c.eat(b'.') {
        return None;
    }
    c.digits()?;
    Some(Parsed::Decimal(c.text[start..c.pos].parse::<f64>().ok()?))
}

pub(crate) fn fraction(c: &mut Cursor) -> Option<Parsed> {
    let numerator = c.digits()?;
    if !c.eat(b'/') {
        return None;
    }
    let denominator = c.digits()?;
    if denominator == 0.0 {
        return Some(Parsed::Invalid(MeasurementError::ZeroDenominator));
    }
    Some(Parsed::Fraction {
        numerator,
        denominator,
    })
}

pub(crate) fn mixed_number(c: &mut Cursor) -> Option<Parsed> {
    let whole = c.digits()?;
    if !c.spaces() {
        return None;
    }
    let numerator = c.digits()?;
    if !c.eat(b'/') {
        return None;
    }
    let denominator = c.digits()?;
    if denominator == 0.0 {
        return Some(Parsed::Invalid(MeasurementError::ZeroDenominator));
    }
    Some(Parsed::MixedNumber {
        whole,
        numerator,
        denominator,
    })
}

pub(crate) fn shop_triple(c: &mut Cursor) -> Option<Parsed> {
    let whole = c.digits()?;
    if !c.eat(b'/') {
        return None;
    }
    let numerator = c.digits()?;
    if !c.eat(b'/') {
        return None;
    }
    let denominator = c.digits()?;
    if denominator == 0.0 {
        return Some(Parsed::Invalid(MeasurementError::ZeroDenominator));
    }
    Some(Parsed::ShopTriple {
        whole,
        numerator,
        denominator,
    })
}

pub(crate) fn integer(c: &mut Cursor) -> Option<Parsed> {
    c.digits().map(Parsed::Integer)
}

/// Parse a whole field. Input is trimmed; empty input is [`Parsed::Blank`].
pub fn parse_number(input: &str) -> Parsed {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Parsed::Blank;
    }

    let start = Cursor::new(trimmed, 0);
    for alternative in NUMERIC_ALTERNATIVES {
        let mut cursor = start;
        match alternative(&mut cursor) {
            Some(parsed) if cursor.at_end() => return check_finite(parsed, trimmed),
            _ => continue,
        }
    }

    Parsed::Invalid(MeasurementError::Unrecognized(trimmed.to_string()))
}

/// Values that overflow f64 (absurdly long digit runs) are invalid
pub(crate) fn check_finite(parsed: Parsed, source: &str) -> Parsed {
    match parsed.value() {
        Some(v) if !v.is_finite() => {
            Parsed::Invalid(MeasurementError::Overflow(source.to_string()))
        }
        _ => parsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(input: &str) -> Option<f64> {
        parse_number(input).value()
    }

    #[test]
    fn test_decimal_and_integer() {
        assert_eq!(parse_number("35.5"), Parsed::Decimal(35.5));
        assert_eq!(parse_number("36"), Parsed::Integer(36.0));
        assert_eq!(parse_number("  42.25 "), Parsed::Decimal(42.25));
    }

    #[test]
    fn test_fraction() {
        assert_eq!(
            parse_number("3/4"),
            Parsed::Fraction { numerator: 3.0, denominator: 4.0 }
        );
        assert_eq!(value("1/2"), Some(0.5));
    }

    #[test]
    fn test_mixed_number() {
        assert_eq!(
            parse_number("35 1/2"),
            Parsed::MixedNumber { whole: 35.0, numerator: 1.0, denominator: 2.0 }
        );
        assert_eq!(value("36   3/4"), Some(36.75));
        assert_eq!(value("36\t3/4"), Some(36.75));
    }

    #[test]
    fn test_mixed_number_with_unicode_spaces() {
        assert_eq!(
            parse_number("35\u{00A0}1/2"),
            Parsed::MixedNumber { whole: 35.0, numerator: 1.0, denominator: 2.0 }
        );
        assert_eq!(value("36\u{202F}3/4"), Some(36.75));
        assert_eq!(value("36\u{3000} 3/4"), Some(36.75));
        assert_eq!(
            parse_number("35\u{200B}1/2"),
            Parsed::Invalid(MeasurementError::Unrecognized("35\u{200B}1/2".to_string()))
        );
    }

    #[test]
    fn test_shop_triple() {
        let parsed = parse_number("22/7/2");
        assert_eq!(parsed.form(), NumberForm::ShopTriple);
        assert_eq!(parsed.value(), Some(25.5));
        assert_eq!(value("5/0/2"), Some(5.0));
    }

    #[test]
    fn test_zero_denominator_is_invalid() {
        assert_eq!(parse_number("5/0"), Parsed::Invalid(MeasurementError::ZeroDenominator));
        assert_eq!(parse_number("2 1/0"), Parsed::Invalid(MeasurementError::ZeroDenominator));
        assert_eq!(parse_number("2/1/0"), Parsed::Invalid(MeasurementError::ZeroDenominator));
    }

    #[test]
    fn test_unrecognized() {
        for input in ["-5", "1.5 1/2", "1/2.5", "abc", "35.", ".5", "3 /4", "1/2/3/4", "٣"] {
            let parsed = parse_number(input);
            assert_eq!(
                parsed,
                Parsed::Invalid(MeasurementError::Unrecognized(input.trim().to_string())),
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_blank() {
        assert_eq!(parse_number(""), Parsed::Blank);
        assert_eq!(parse_number("   "), Parsed::Blank);
        assert_eq!(value(""), Some(0.0));
    }

    #[test]
    fn test_overflow_is_invalid() {
        let huge = "9".repeat(400);
        assert_eq!(parse_number(&huge), Parsed::Invalid(MeasurementError::Overflow(huge.clone())));
    }

    #[test]
    fn test_alternative_priority() {
        // every form is reachable, and integers only match the last alternative
        let mut cursor = Cursor::new("36", 0);
        assert_eq!(decimal(&mut cursor), None);
        let mut cursor = Cursor::new("22/7/2", 0);
        assert_eq!(
            fraction(&mut cursor),
            Some(Parsed::Fraction { numerator: 22.0, denominator: 7.0 })
        );
        assert_eq!(cursor.pos(), 4);
    }
}
