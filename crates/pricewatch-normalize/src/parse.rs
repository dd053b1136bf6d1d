//! Free-text size and price parsing.
//!
//! Retailer catalogs describe pack sizes in wildly inconsistent prose
//! (`"8 x 3 oz Cans"`, `"avg. 2.5 lb/package"`, `"1 ct"`). These functions
//! scan the text manually rather than pulling in `regex`; see
//! [`crate::categories`] for the companion category taxonomy.

use crate::NormalizeError;

/// Packaging terms stripped from the end of a size string before parsing.
/// Checked in order, one pass, each with its leading space so that
/// `"Tub"` inside a word is left alone.
const PACKAGING_TERMS: &[&str] = &[
    " Pack",
    " Cans",
    " Package",
    " Loaf",
    " Plastic Bottle",
    " Bottle",
    " Bottles",
    " Bag",
    " Carton",
    " Canister",
    " Container",
    " Box",
    " Pouch",
    " Carded Pk",
    " Tray",
    " Loaves",
    " Aluminum Bottles",
    " Plastic Bottles",
    " Can",
    " Zip Pak",
    " Plastic Tub",
    " Aseptic Carton",
    " Chunk",
    " Brick",
    " Shrinkwrap",
    " Resealable Bag",
    " Wrapper",
    " Cup/Tub",
    " Tub",
    " Cylinder",
    " Packages",
    " Shrinkwrapped",
    " Gable Top",
    " Jar",
    " Sleeve",
    " Stand Up Bag",
    " Tube",
];

/// Canonical unit aliases. Order matters only for readability; the
/// non-letter boundary check prevents partial-word collisions either way.
const UNIT_ALIASES: &[(&str, &[&str])] = &[
    ("ea", &["ea", "each", "ct"]),
    ("fl oz", &["fl oz", "floz"]),
    ("oz", &["oz", "ounce", "ounces"]),
    ("gal", &["gal", "gallon", "gallons"]),
    ("lb", &["lb", "lbs", "pound", "pounds"]),
    ("pk", &["pk"]),
    ("ft", &["ft", "foot", "feet"]),
    ("L", &["l", "liter", "liters"]),
    ("pt", &["pt", "pint", "pints"]),
    ("qt", &["qt", "quart", "quarts"]),
    ("g", &["g", "gram", "grams"]),
    ("in", &["in", "inch", "inches"]),
    ("dz", &["dz", "dozen", "dozens"]),
    ("ml", &["ml", "milliliter", "milliliters"]),
];

/// Splits a free-text size string into a numeric quantity and a canonical
/// unit token.
///
/// Best-effort by contract: this never fails. An unrecognized unit is passed
/// through verbatim so the caller can still display it, and a quantity that
/// cannot be read comes back as `None`. Empty input yields `(None, "")`.
///
/// Handles the multiplicative `"<N> x <M> <unit>"` form (`"8 x 3 oz"` is 24
/// oz); if the inner size after `"x"` is not numeric, the leading count is
/// kept as the quantity and the rest becomes the unit text.
#[must_use]
pub fn parse_size(raw: &str) -> (Option<f64>, String) {
    if raw.trim().is_empty() {
        return (None, String::new());
    }

    // Trailing punctuation and approximation markers first.
    let clean = raw
        .trim()
        .trim_end_matches(['.', ','])
        .replace("avg. ", "")
        .replace('~', "");
    let mut clean = clean.trim().to_owned();

    for suffix in PACKAGING_TERMS {
        if let Some(stripped) = clean.strip_suffix(suffix) {
            clean = stripped.trim_end().to_owned();
        }
    }

    let (quantity, remaining) = if let Some((count_text, rest)) = clean.split_once(" x ") {
        split_multiplicative(count_text, rest, &clean)
    } else {
        split_leading_number(&clean)
    };

    // "lb/package" → "lb": the unit is whatever precedes the slash.
    let mut remaining = remaining;
    if let Some((head, _)) = remaining.split_once('/') {
        remaining = head.trim().to_owned();
    }

    let unit = match_canonical_unit(&remaining)
        .map_or_else(|| remaining.clone(), ToOwned::to_owned);

    (quantity, unit)
}

/// Parses a free-text price string into a decimal amount.
///
/// Trims a trailing `.` and the literal `est` suffix, keeps only the segment
/// before any `/` (price-per-something strings like `"$0.27/oz"`), and strips
/// a leading `$`.
///
/// # Errors
///
/// Returns [`NormalizeError::Price`] if the remainder is not numeric. The
/// ingestion caller treats this as a per-item failure, not a fatal one.
pub fn parse_price(raw: &str) -> Result<f64, NormalizeError> {
    let mut text = raw.trim().trim_end_matches('.');
    if let Some(stripped) = text.strip_suffix("est") {
        text = stripped;
    }
    if let Some((head, _)) = text.split_once('/') {
        text = head;
    }
    let text = text.trim().trim_start_matches('$').trim();

    text.parse::<f64>().map_err(|_| NormalizeError::Price {
        raw: raw.to_owned(),
    })
}

/// Handles the `"<N> x <M> <unit>"` form. `whole` is the cleaned string,
/// used as the fallback unit text when the leading count is not numeric.
fn split_multiplicative(count_text: &str, rest: &str, whole: &str) -> (Option<f64>, String) {
    let Ok(count) = count_text.trim().parse::<f64>() else {
        return (None, whole.to_owned());
    };

    let rest = rest.trim();
    let (head, tail) = rest.split_once(' ').unwrap_or((rest, ""));
    if is_decimal_token(head) {
        if let Ok(each_size) = head.parse::<f64>() {
            return (Some(count * each_size), tail.trim().to_owned());
        }
    }

    // Second operand is not a number ("2 x large rolls"): keep the count and
    // treat everything after the "x" as the unit text.
    (Some(count), rest.to_owned())
}

/// Consumes a leading run of digits/decimal points as the quantity; the rest
/// is the unit candidate.
fn split_leading_number(clean: &str) -> (Option<f64>, String) {
    let digits = clean
        .bytes()
        .take_while(|b| b.is_ascii_digit() || *b == b'.')
        .count();
    if digits == 0 {
        return (None, clean.to_owned());
    }
    (
        clean[..digits].parse::<f64>().ok(),
        clean[digits..].trim().to_owned(),
    )
}

/// Digits with at most one decimal point, and at least one digit.
fn is_decimal_token(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().any(|b| b.is_ascii_digit())
        && s.bytes().all(|b| b.is_ascii_digit() || b == b'.')
        && s.bytes().filter(|&b| b == b'.').count() <= 1
}

/// Matches the unit candidate case-insensitively against the alias table.
/// The character after the alias must not be a letter, so `"gala apples"`
/// does not collide with `"gal"`.
fn match_canonical_unit(candidate: &str) -> Option<&'static str> {
    let lower = candidate.to_lowercase();
    for (canonical, variations) in UNIT_ALIASES {
        for variation in *variations {
            if let Some(tail) = lower.strip_prefix(variation) {
                if !tail.starts_with(|c: char| c.is_alphabetic()) {
                    return Some(canonical);
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // parse_size
    // -----------------------------------------------------------------------

    #[test]
    fn size_empty_input() {
        assert_eq!(parse_size(""), (None, String::new()));
    }

    #[test]
    fn size_whitespace_only_input() {
        assert_eq!(parse_size("   "), (None, String::new()));
    }

    #[test]
    fn size_simple_oz() {
        assert_eq!(parse_size("12 oz"), (Some(12.0), "oz".to_owned()));
    }

    #[test]
    fn size_no_space_before_unit() {
        assert_eq!(parse_size("6.5oz"), (Some(6.5), "oz".to_owned()));
    }

    #[test]
    fn size_multiplicative() {
        assert_eq!(parse_size("8 x 3 oz"), (Some(24.0), "oz".to_owned()));
    }

    #[test]
    fn size_multiplicative_decimal() {
        assert_eq!(parse_size("4 x 1.5 L"), (Some(6.0), "L".to_owned()));
    }

    #[test]
    fn size_multiplicative_non_numeric_second_operand() {
        assert_eq!(
            parse_size("2 x large rolls"),
            (Some(2.0), "large rolls".to_owned())
        );
    }

    #[test]
    fn size_ct_aliases_to_ea() {
        assert_eq!(parse_size("1 ct "), (Some(1.0), "ea".to_owned()));
    }

    #[test]
    fn size_each_aliases_to_ea() {
        assert_eq!(parse_size("4 each"), (Some(4.0), "ea".to_owned()));
    }

    #[test]
    fn size_strips_packaging_suffix() {
        assert_eq!(parse_size("16 oz Tub"), (Some(16.0), "oz".to_owned()));
    }

    #[test]
    fn size_fl_oz_with_packaging() {
        assert_eq!(parse_size("64 fl oz Carton"), (Some(64.0), "fl oz".to_owned()));
    }

    #[test]
    fn size_strips_avg_marker() {
        assert_eq!(parse_size("avg. 2.5 lb"), (Some(2.5), "lb".to_owned()));
    }

    #[test]
    fn size_strips_approx_marker() {
        assert_eq!(parse_size("~3 lb"), (Some(3.0), "lb".to_owned()));
    }

    #[test]
    fn size_strips_trailing_punctuation() {
        assert_eq!(parse_size("12 oz."), (Some(12.0), "oz".to_owned()));
    }

    #[test]
    fn size_unit_before_slash_wins() {
        assert_eq!(parse_size("1 lb/package"), (Some(1.0), "lb".to_owned()));
    }

    #[test]
    fn size_case_insensitive_unit() {
        assert_eq!(parse_size("1 Gallon"), (Some(1.0), "gal".to_owned()));
    }

    #[test]
    fn size_plural_long_form() {
        assert_eq!(parse_size("2 pounds"), (Some(2.0), "lb".to_owned()));
    }

    #[test]
    fn size_dozen() {
        assert_eq!(parse_size("1 dozen"), (Some(1.0), "dz".to_owned()));
    }

    #[test]
    fn size_unknown_unit_passes_through() {
        assert_eq!(parse_size("3 bunches"), (Some(3.0), "bunches".to_owned()));
    }

    #[test]
    fn size_boundary_prevents_partial_word_match() {
        // "gala" must not match "gal", "g", or "l".
        assert_eq!(
            parse_size("3 gala apples"),
            (Some(3.0), "gala apples".to_owned())
        );
    }

    #[test]
    fn size_no_leading_number() {
        assert_eq!(parse_size("bunch"), (None, "bunch".to_owned()));
    }

    #[test]
    fn size_bare_number_has_empty_unit() {
        assert_eq!(parse_size("6"), (Some(6.0), String::new()));
    }

    // -----------------------------------------------------------------------
    // parse_price
    // -----------------------------------------------------------------------

    #[test]
    fn price_with_dollar_sign() {
        assert_eq!(parse_price("$4.99").unwrap(), 4.99);
    }

    #[test]
    fn price_per_unit_keeps_leading_segment() {
        assert_eq!(parse_price("$0.27/oz").unwrap(), 0.27);
    }

    #[test]
    fn price_without_dollar_sign() {
        assert_eq!(parse_price("3.49").unwrap(), 3.49);
    }

    #[test]
    fn price_trailing_dot() {
        assert_eq!(parse_price("$1.99.").unwrap(), 1.99);
    }

    #[test]
    fn price_est_suffix() {
        assert_eq!(parse_price("$5.23 est").unwrap(), 5.23);
    }

    #[test]
    fn price_non_numeric_is_error() {
        let err = parse_price("free").unwrap_err();
        assert!(matches!(err, NormalizeError::Price { ref raw } if raw == "free"));
    }

    #[test]
    fn price_empty_is_error() {
        assert!(parse_price("").is_err());
    }
}
