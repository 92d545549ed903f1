//! Attribute sort keys
//!
//! The catalog's filter columns hold free-text horticultural attributes
//! ("6-8 months", "50 cm - 1 m", "Perennial (20+ years)"). These functions
//! map each raw value to an orderable key so distinct filter values can be
//! presented in domain order instead of lexically. The keys order
//! presentation only; filtering and search always compare the raw strings.
//!
//! Every parser is pure and total: missing or unparseable input maps to a
//! sentinel that sorts last, never to an error.

use std::cmp::Ordering;

use once_cell::sync::Lazy;
use regex::Regex;

/// Numeric sort key: a (start, end) range in a column-specific unit.
pub type RangeKey = (f64, f64);

/// Sentinel for blank or unparseable values; sorts after everything else.
pub const UNPARSED: RangeKey = (f64::INFINITY, f64::INFINITY);

static INTEGERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("integer regex"));

static AMOUNTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*(cm|m)?").expect("amount regex"));

/// Compare two range keys, start first, then end. Total over infinities.
pub fn cmp_range(a: RangeKey, b: RangeKey) -> Ordering {
    a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1))
}

/// Time-to-maturity as a (start, end) range in months.
///
/// All integers are taken in order of appearance; if "year" occurs anywhere
/// in the text, every number is scaled by 12. Mixed phrasings like
/// "1 year 6 months" therefore come out wrong (both numbers scaled) — the
/// dataset never mixes units within one value, and this parser keeps that
/// assumption.
pub fn maturity_key(text: &str) -> RangeKey {
    let lower = text.to_lowercase();
    let factor = if lower.contains("year") { 12.0 } else { 1.0 };
    scaled_range(&lower, factor).unwrap_or(UNPARSED)
}

/// Lifespan as a (start, end) range in years.
///
/// Lifecycle words trump any numbers in the text: "Annual (6 months)" sorts
/// as an annual, not as half a year. Named lifecycles sort before every
/// numeric lifespan; wordless, numberless values ("varies") sort after all
/// of them but still before blanks.
pub fn lifespan_key(text: &str) -> RangeKey {
    let lower = text.trim().to_lowercase();
    if lower.is_empty() {
        return UNPARSED;
    }
    if lower.contains("annual") {
        return (0.1, 0.1);
    }
    if lower.contains("biennial") {
        return (0.2, 0.2);
    }
    if lower.contains("perennial") {
        return (0.3, 0.3);
    }

    let factor = if lower.contains("month") && !lower.contains("year") {
        1.0 / 12.0
    } else {
        1.0
    };
    scaled_range(&lower, factor).unwrap_or((9999.0, 9999.0))
}

/// Strata as a fixed canopy-layer rank. Unrecognized values rank 99.
pub fn strata_rank(text: &str) -> u8 {
    match text.trim().to_lowercase().as_str() {
        "emergent" => 0,
        "low" => 1,
        "medium" => 2,
        "high" => 3,
        _ => 99,
    }
}

/// Spacing as a (start, end) range in meters.
///
/// Scans for number-plus-optional-unit pairs. Numbers without an explicit
/// unit inherit a global bias: centimeters if "cm" occurs anywhere in the
/// text ("10-20 cm" means both numbers are cm), meters otherwise. An
/// explicit unit on a number always overrides the bias ("50 cm - 1 m").
pub fn spacing_key(text: &str) -> RangeKey {
    let lower = text.to_lowercase();
    let bare_factor = if lower.contains("cm") { 0.01 } else { 1.0 };

    let mut meters = AMOUNTS.captures_iter(&lower).filter_map(|caps| {
        let value: f64 = caps.get(1)?.as_str().parse().ok()?;
        let factor = match caps.get(2).map(|m| m.as_str()) {
            Some("cm") => 0.01,
            Some("m") => 1.0,
            _ => bare_factor,
        };
        Some(value * factor)
    });

    let Some(start) = meters.next() else {
        return UNPARSED;
    };
    let end = meters.next().unwrap_or(start);
    (start, end)
}

/// Extract the integers of `lower` in order and scale them: one number maps
/// to (n, n), two or more to (first, second). None → None.
fn scaled_range(lower: &str, factor: f64) -> Option<RangeKey> {
    let mut numbers = INTEGERS
        .find_iter(lower)
        .filter_map(|m| m.as_str().parse::<f64>().ok());

    let start = numbers.next()? * factor;
    let end = numbers.next().map(|n| n * factor).unwrap_or(start);
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maturity_range_in_months() {
        assert_eq!(maturity_key("6-8 months"), (6.0, 8.0));
        assert_eq!(maturity_key("9 months"), (9.0, 9.0));
    }

    #[test]
    fn test_maturity_years_scale_by_twelve() {
        assert_eq!(maturity_key("1 year"), (12.0, 12.0));
        assert_eq!(maturity_key("2-3 years"), (24.0, 36.0));
    }

    #[test]
    fn test_maturity_unparseable_sorts_last() {
        assert_eq!(maturity_key(""), UNPARSED);
        assert_eq!(maturity_key("varies with climate"), UNPARSED);
    }

    #[test]
    fn test_lifespan_lifecycle_words_trump_numbers() {
        assert_eq!(lifespan_key("Annual (6 months)"), (0.1, 0.1));
        assert_eq!(lifespan_key("Biennial"), (0.2, 0.2));
        assert_eq!(lifespan_key("Perennial (20+ years)"), (0.3, 0.3));
    }

    #[test]
    fn test_lifespan_months_divide_by_twelve() {
        assert_eq!(lifespan_key("6 months"), (0.5, 0.5));
        assert_eq!(lifespan_key("30 years"), (30.0, 30.0));
    }

    #[test]
    fn test_lifespan_wordless_sorts_before_blank() {
        let wordless = lifespan_key("varies");
        assert_eq!(wordless, (9999.0, 9999.0));
        assert_eq!(lifespan_key("  "), UNPARSED);
        assert_eq!(cmp_range(wordless, UNPARSED), Ordering::Less);
    }

    #[test]
    fn test_strata_fixed_ranks() {
        assert_eq!(strata_rank("Emergent"), 0);
        assert_eq!(strata_rank("Low"), 1);
        assert_eq!(strata_rank("Medium"), 2);
        assert_eq!(strata_rank("High"), 3);
        assert_eq!(strata_rank("Understory"), 99);
        assert_eq!(strata_rank(""), 99);
    }

    #[test]
    fn test_spacing_explicit_units_win() {
        assert_eq!(spacing_key("50 cm - 1 m"), (0.5, 1.0));
    }

    #[test]
    fn test_spacing_global_unit_bias() {
        assert_eq!(spacing_key("10-20 cm"), (0.1, 0.2));
        assert_eq!(spacing_key("1-2 m"), (1.0, 2.0));
    }

    #[test]
    fn test_spacing_single_value_and_unparseable() {
        assert_eq!(spacing_key("3 m"), (3.0, 3.0));
        assert_eq!(spacing_key("clumping"), UNPARSED);
    }

    #[test]
    fn test_cmp_range_orders_by_start_then_end() {
        assert_eq!(cmp_range((1.0, 2.0), (1.0, 3.0)), Ordering::Less);
        assert_eq!(cmp_range((2.0, 0.0), (1.0, 9.0)), Ordering::Greater);
        assert_eq!(cmp_range(UNPARSED, UNPARSED), Ordering::Equal);
    }
}
