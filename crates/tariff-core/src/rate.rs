use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::types::Rate;

fn percent_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"([\d.]+)\s*%").expect("valid percent pattern"))
}

/// Turn a free-text duty-rate string into an ad-valorem fraction.
///
/// Empty text and "Free" mean zero. Compound and alternative entries
/// ("5% or 10.5¢/kg") yield the maximum percentage found, a conservative
/// consumer-facing estimate rather than a verified legal reading.
/// Malformed input degrades to zero; this never fails.
pub fn parse_rate(rate_text: &str) -> Rate {
    let s = rate_text.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("free") {
        return Decimal::ZERO;
    }

    let mut max_pct: Option<Decimal> = None;
    for capture in percent_pattern().captures_iter(s) {
        if let Ok(value) = Decimal::from_str(&capture[1]) {
            max_pct = Some(match max_pct {
                Some(current) if current >= value => current,
                _ => value,
            });
        }
    }

    match max_pct {
        Some(value) => value / Decimal::ONE_HUNDRED,
        None => {
            tracing::debug!(rate_text = s, "no percentage found in duty-rate text");
            Decimal::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_free_and_empty_are_zero() {
        assert_eq!(parse_rate(""), dec!(0));
        assert_eq!(parse_rate("   "), dec!(0));
        assert_eq!(parse_rate("Free"), dec!(0));
        assert_eq!(parse_rate("free"), dec!(0));
        assert_eq!(parse_rate("FREE"), dec!(0));
    }

    #[test]
    fn test_simple_percentage() {
        assert_eq!(parse_rate("25%"), dec!(0.25));
        assert_eq!(parse_rate("3.9%"), dec!(0.039));
        assert_eq!(parse_rate("16.5%"), dec!(0.165));
    }

    #[test]
    fn test_compound_rate_takes_maximum() {
        assert_eq!(parse_rate("5% or 10¢/kg"), dec!(0.05));
        assert_eq!(parse_rate("5% + 10%"), dec!(0.10));
        assert_eq!(parse_rate("2.5% but not less than 7% of value"), dec!(0.07));
    }

    #[test]
    fn test_whitespace_before_percent_sign() {
        assert_eq!(parse_rate("4.9 %"), dec!(0.049));
    }

    #[test]
    fn test_malformed_degrades_to_zero() {
        assert_eq!(parse_rate("N/A"), dec!(0));
        assert_eq!(parse_rate("10.5¢/kg"), dec!(0));
        assert_eq!(parse_rate("see chapter note 4"), dec!(0));
    }
}
