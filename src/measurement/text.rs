//! Free-text measurement normalization
//!
//! Descriptive fields ("2 1/2 inch loose", "cuff 3/4") keep their words but
//! have standalone fractions rewritten as decimals. The rewrite only ever
//! produces plain decimals, which it leaves alone, so it is idempotent.

use super::fractions::{render_decimal, round_measurement};
use super::grammar::{check_finite, Cursor, TEXT_ALTERNATIVES};

/// Replace standalone mixed numbers, fractions and shop triples with their
/// decimal value rounded to `digits`. Everything else is kept verbatim.
pub fn normalize_text(input: &str, digits: u32) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut copied = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        if !bytes[pos].is_ascii_digit() || !starts_word(input, pos) {
            pos += 1;
            continue;
        }

        match embedded_number(input, pos) {
            Some((end, Some(value))) => {
                out.push_str(&input[copied..pos]);
                out.push_str(&render_decimal(round_measurement(value, digits)));
                pos = end;
                copied = end;
            }
            Some((end, None)) => pos = end,
            None => pos = skip_word(input, pos),
        }
    }

    out.push_str(&input[copied..]);
    out
}

/// Match a number starting at `pos`. Returns the end offset and, for slash
/// forms with a usable value, the decimal to substitute.
fn embedded_number(input: &str, pos: usize) -> Option<(usize, Option<f64>)> {
    let start = Cursor::new(input, pos);

    for alternative in TEXT_ALTERNATIVES {
        let mut cursor = start;
        let Some(parsed) = alternative(&mut cursor) else {
            continue;
        };
        let end = cursor.pos();
        if !ends_word(input, end) {
            continue;
        }

        let parsed = check_finite(parsed, &input[pos..end]);
        let replacement = if parsed.is_fractional() { parsed.value() } else { None };
        return Some((end, replacement));
    }

    None
}

/// Chars that glue onto a number and make it part of a larger token.
/// Any whitespace, Unicode spaces included, separates tokens.
fn is_word_char(c: char) -> bool {
    match c {
        '.' | '/' | '_' => true,
        c if c.is_ascii() => c.is_ascii_alphanumeric(),
        c => !c.is_whitespace(),
    }
}

fn starts_word(input: &str, pos: usize) -> bool {
    !input[..pos].chars().next_back().is_some_and(is_word_char)
}

fn ends_word(input: &str, end: usize) -> bool {
    let mut rest = input[end..].chars();
    match rest.next() {
        None => true,
        // sentence punctuation, unless it starts a decimal part
        Some('.') => !rest.next().is_some_and(|c| c.is_ascii_digit()),
        Some(c) => !is_word_char(c),
    }
}

fn skip_word(input: &str, pos: usize) -> usize {
    input[pos..]
        .char_indices()
        .find(|&(_, c)| !is_word_char(c))
        .map_or(input.len(), |(i, _)| pos + i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn normalize(input: &str) -> String {
        normalize_text(input, 4)
    }

    #[test]
    fn test_mixed_number_in_text() {
        assert_eq!(normalize("2 1/2 inch loose"), "2.5 inch loose");
    }

    #[test]
    fn test_fraction_and_triple_in_text() {
        assert_eq!(normalize("cuff 3/4, collar 1/8"), "cuff 0.75, collar 0.125");
        assert_eq!(normalize("length 22/7/2"), "length 25.5");
        assert_eq!(normalize("1/3 extra"), "0.3333 extra");
        assert_eq!(normalize("ends with 1/2."), "ends with 0.5.");
    }

    #[test]
    fn test_plain_numbers_and_words_kept() {
        assert_eq!(normalize("double pocket 2.5 cm"), "double pocket 2.5 cm");
        assert_eq!(normalize("Belt loops 6"), "Belt loops 6");
        assert_eq!(normalize("no numbers here"), "no numbers here");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_glued_tokens_kept() {
        assert_eq!(normalize("x1/2 wide"), "x1/2 wide");
        assert_eq!(normalize("1/2x wide"), "1/2x wide");
        assert_eq!(normalize("v.1/2"), "v.1/2");
        assert_eq!(normalize("1/2/3/4"), "1/2/3/4");
        assert_eq!(normalize("date 12/05/2025"), "date 12.0025");
    }

    #[test]
    fn test_zero_denominator_kept() {
        assert_eq!(normalize("2 1/0 and 4/2"), "2 1/0 and 2");
    }

    #[test]
    fn test_unicode_spaces_separate_numbers() {
        assert_eq!(normalize("2\u{00A0}1/2 inch"), "2.5 inch");
        assert_eq!(normalize("cuff\u{00A0}3/4"), "cuff\u{00A0}0.75");
        assert_eq!(normalize("1/2\u{3000}loose"), "0.5\u{3000}loose");
    }

    #[test]
    fn test_rounds_to_digits_and_keeps_surrounding_space() {
        assert_eq!(normalize_text("  2/3 loose ", 2), "  0.67 loose ");
        assert_eq!(normalize_text("\t1/3\n", 4), "\t0.3333\n");
    }

    #[test]
    fn test_unicode_preserved() {
        assert_eq!(normalize("कमर 1/2 ढीला"), "कमर 0.5 ढीला");
        assert_eq!(normalize("é1/2"), "é1/2");
    }

    #[test]
    fn test_idempotent_samples() {
        for input in ["2 1/2 inch loose", "4/2 1/2", "1 2/2/1", "2 1/2/3", "4/2 1/0", "6/3 1/2"] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "input {:?}", input);
        }
    }

    proptest! {
        #[test]
        fn text_normalization_is_idempotent(input in "[0-9a-z /.\\-\u{00A0}]{0,40}") {
            let once = normalize(&input);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn text_normalization_never_panics(input in "\\PC{0,60}") {
            let _ = normalize(&input);
        }
    }
}
