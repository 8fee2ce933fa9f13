use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::country::Country;
use crate::types::Rate;

/// Countries in the default preferential trade zone, assumed qualifying.
const ZONE_COUNTRIES: [&str; 2] = ["CA", "MX"];

/// Separate bilateral free-trade-agreement partners.
const FTA_PARTNERS: [&str; 12] = [
    "AU", "BH", "CL", "CO", "KR", "MA", "OM", "PA", "PE", "SG", "IL", "JO",
];

fn in_zone(country: &Country) -> bool {
    ZONE_COUNTRIES.contains(&country.iso2())
}

fn is_fta_partner(country: &Country) -> bool {
    FTA_PARTNERS.contains(&country.iso2())
}

/// Adjust the base (MFN) rate for preferential trade agreements.
///
/// Precedence, checked in order with early return:
///   (a) the schedule's special-rate text names this country and marks it
///       duty-free;
///   (b) the country is in the default preferential zone (assumed
///       qualifying);
///   (c) the country is a bilateral FTA partner: half the base rate.
/// Otherwise the base rate stands unchanged.
///
/// Qualification really depends on rules of origin not modeled here; the
/// notes flag every adjusted result as an estimate.
pub fn adjust(country: &Country, base_rate: Rate, special_rate_text: &str) -> (Rate, Option<String>) {
    let special = special_rate_text.trim();
    if !special.is_empty() && special.to_lowercase().contains("free") {
        let named = special.contains(country.iso2());
        if named && in_zone(country) {
            return (
                Decimal::ZERO,
                Some("Preferential zone rate: Free".to_string()),
            );
        }
        if named && is_fta_partner(country) {
            return (Decimal::ZERO, Some("FTA preferential: Free".to_string()));
        }
    }

    if in_zone(country) {
        return (
            Decimal::ZERO,
            Some("Preferential zone qualifying (assumed)".to_string()),
        );
    }

    if is_fta_partner(country) {
        return (
            base_rate * dec!(0.5),
            Some("FTA reduced (estimated)".to_string()),
        );
    }

    (base_rate, None)
}
