use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::country::Country;
use crate::types::Rate;

//
// Four independent, additive surcharge regimes. Each is pure and stateless;
// their sum plus the FTA-adjusted base rate is the total effective rate.
//

fn clean_digits(code: &str) -> String {
    code.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Trade-war surcharge: applies to Chinese origin only. Rate keyed on the
/// code's leading 4-digit or 2-digit prefix; 4 digits tried first.
pub fn trade_war_rate(code: &str, country: &Country) -> Rate {
    if !country.is_china() {
        return Decimal::ZERO;
    }
    let clean = clean_digits(code);
    for length in [4, 2] {
        let prefix = &clean[..clean.len().min(length)];
        if let Some(rate) = trade_war_chapter_rate(prefix) {
            return rate;
        }
    }
    Decimal::ZERO
}

fn trade_war_chapter_rate(prefix: &str) -> Option<Rate> {
    // Machinery/electronics, furniture, autos and metals carry the full
    // surcharge; textiles and toys the reduced one.
    let rate = match prefix {
        "84" | "85" | "94" | "87" | "72" | "73" | "76" => dec!(0.25),
        "61" | "62" | "63" | "95" => dec!(0.075),
        _ => return None,
    };
    Some(rate)
}

/// National-security surcharge: flat 25% for all countries on metals
/// chapters and passenger/commercial-vehicle headings.
pub fn security_rate(code: &str) -> Rate {
    let clean = clean_digits(code);
    let chapter = &clean[..clean.len().min(2)];
    if matches!(chapter, "72" | "73" | "76") {
        return dec!(0.25);
    }
    let heading = &clean[..clean.len().min(4)];
    if matches!(heading, "8703" | "8704") {
        return dec!(0.25);
    }
    Decimal::ZERO
}

/// Emergency-powers surcharge: flat 20%, Chinese origin only.
pub fn emergency_rate(country: &Country) -> Rate {
    if country.is_china() {
        dec!(0.20)
    } else {
        Decimal::ZERO
    }
}

/// Blanket surcharge: flat 10% on every non-domestic origin.
pub fn blanket_rate(country: &Country) -> Rate {
    if country.is_domestic() {
        Decimal::ZERO
    } else {
        dec!(0.10)
    }
}
