//! Total parsing functions for raw user input.
//!
//! Numeric values reach the domain as the strings a form field produces.
//! Every field is parsed through exactly one of these functions, so the
//! coercion rules live in one place instead of ad hoc conversions at each
//! call site.

/// Parse a non-negative number. NaN, infinities, negatives, and anything
/// unparseable yield `default`. Used for prices, charge amounts, and
/// consumption values (default 0).
pub fn parse_non_negative_number(input: &str, default: f64) -> f64 {
    match input.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        _ => default,
    }
}

/// Parse a strictly positive number; zero also falls back to `default`.
/// Used for item quantities (default 1), which must never divide by zero.
pub fn parse_positive_number(input: &str, default: f64) -> f64 {
    match input.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value,
        _ => default,
    }
}

/// Parse an optional number. Empty, unparseable, or non-finite input yields
/// `None`. Used for the paid total, where "not entered" must stay distinct
/// from "entered as zero".
pub fn parse_optional_number(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_non_negative_number() {
        assert_eq!(parse_non_negative_number("12.5", 0.0), 12.5);
        assert_eq!(parse_non_negative_number(" 3 ", 0.0), 3.0);
        assert_eq!(parse_non_negative_number("0", 0.0), 0.0);
        assert_eq!(parse_non_negative_number("", 0.0), 0.0);
        assert_eq!(parse_non_negative_number("abc", 0.0), 0.0);
        assert_eq!(parse_non_negative_number("-4", 0.0), 0.0);
        assert_eq!(parse_non_negative_number("NaN", 0.0), 0.0);
        assert_eq!(parse_non_negative_number("inf", 0.0), 0.0);
    }

    #[test]
    fn test_parse_positive_number() {
        assert_eq!(parse_positive_number("2", 1.0), 2.0);
        assert_eq!(parse_positive_number("0.5", 1.0), 0.5);
        assert_eq!(parse_positive_number("0", 1.0), 1.0);
        assert_eq!(parse_positive_number("-1", 1.0), 1.0);
        assert_eq!(parse_positive_number("", 1.0), 1.0);
        assert_eq!(parse_positive_number("junk", 1.0), 1.0);
    }

    #[test]
    fn test_parse_optional_number() {
        assert_eq!(parse_optional_number("100.02"), Some(100.02));
        assert_eq!(parse_optional_number("0"), Some(0.0));
        assert_eq!(parse_optional_number("-2.5"), Some(-2.5));
        assert_eq!(parse_optional_number(""), None);
        assert_eq!(parse_optional_number("   "), None);
        assert_eq!(parse_optional_number("abc"), None);
        assert_eq!(parse_optional_number("NaN"), None);
    }
}
