use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::country::Country;
use crate::fta;
use crate::rate::parse_rate;
use crate::schedule::ScheduleIndex;
use crate::surcharge;
use crate::types::{pct, to_cents, Money, Rate};

/// The engine's output record for one (code, country) pair. Immutable once
/// produced; all derived values are computed from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffQuote {
    pub hts_code: String,
    pub country: String,
    pub country_name: String,
    pub category: Category,
    pub category_label: String,
    pub description: String,

    pub mfn_base_rate: Rate,
    pub fta_adjusted_rate: Rate,
    pub trade_war_rate: Rate,
    pub security_rate: Rate,
    pub emergency_rate: Rate,
    pub blanket_rate: Rate,

    pub total_rate: Rate,
    /// Human-readable explanation, one line per component, ending in the
    /// total.
    pub breakdown: Vec<String>,
    pub raw_rate_text: String,
}

impl TariffQuote {
    pub fn total_pct(&self) -> String {
        pct(self.total_rate)
    }

    /// Tariff cost embedded in a retail price, rounded to cents.
    pub fn cost_at(&self, price: Money) -> Money {
        to_cents(price * self.total_rate)
    }
}

/// Compute the total effective tariff for a classification code and a
/// country of manufacture.
///
/// This is the engine's single public entry point and it never fails:
/// unknown codes, unrecognized countries and unparseable rate text all
/// degrade to documented defaults with explanatory breakdown text.
pub fn compute_tariff(index: &ScheduleIndex, hts_code: &str, country_input: &str) -> TariffQuote {
    let country = Country::normalize(country_input);
    let category = Category::from_code(hts_code);

    let (description, raw_rate_text, special_rate_text, mfn_base_rate) =
        match index.find(hts_code) {
            Some(entry) => (
                entry.description.clone(),
                entry.general_rate.clone(),
                entry.special_rate.clone(),
                parse_rate(&entry.general_rate),
            ),
            None => {
                tracing::debug!(hts_code, "code not found in schedule");
                (
                    "Product not found in schedule".to_string(),
                    "N/A".to_string(),
                    String::new(),
                    Decimal::ZERO,
                )
            }
        };

    let (fta_adjusted_rate, fta_note) = fta::adjust(&country, mfn_base_rate, &special_rate_text);

    let trade_war = surcharge::trade_war_rate(hts_code, &country);
    let security = surcharge::security_rate(hts_code);
    let emergency = surcharge::emergency_rate(&country);
    let blanket = surcharge::blanket_rate(&country);

    let total_rate = fta_adjusted_rate + trade_war + security + emergency + blanket;

    let mut breakdown = Vec::new();
    if fta_adjusted_rate.is_zero() && mfn_base_rate.is_zero() {
        breakdown.push(format!("Base rate: Free ({raw_rate_text})"));
    } else if let Some(note) = &fta_note {
        breakdown.push(format!(
            "Base rate: {} → {} ({note})",
            pct(mfn_base_rate),
            pct(fta_adjusted_rate)
        ));
    } else {
        breakdown.push(format!(
            "Base rate: {} ({raw_rate_text})",
            pct(fta_adjusted_rate)
        ));
    }
    if trade_war > Decimal::ZERO {
        breakdown.push(format!("Trade-war surcharge (China): +{}", pct(trade_war)));
    }
    if security > Decimal::ZERO {
        breakdown.push(format!("National-security surcharge: +{}", pct(security)));
    }
    if emergency > Decimal::ZERO {
        breakdown.push(format!(
            "Emergency-powers surcharge (China): +{}",
            pct(emergency)
        ));
    }
    if blanket > Decimal::ZERO {
        breakdown.push(format!("Blanket import surcharge: +{}", pct(blanket)));
    }
    breakdown.push(format!("Total effective rate: {}", pct(total_rate)));

    TariffQuote {
        hts_code: hts_code.to_string(),
        country: country.iso2().to_string(),
        country_name: country.display_name(),
        category,
        category_label: category.label().to_string(),
        description,
        mfn_base_rate,
        fta_adjusted_rate,
        trade_war_rate: trade_war,
        security_rate: security,
        emergency_rate: emergency,
        blanket_rate: blanket,
        total_rate,
        breakdown,
        raw_rate_text,
    }
}
