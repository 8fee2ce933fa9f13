use std::time::Instant;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::error::TariffError;
use crate::types::{pct, to_cents, with_metadata, ComputationOutput, Money};
use crate::TariffResult;

/// National average tariff burden per household, per year (survey estimate).
pub const NATIONAL_AVG_ANNUAL: Decimal = dec!(1300);

/// One purchase already resolved to a consumer tariff cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardItem {
    pub product: String,
    pub price: Money,
    pub consumer_tariff_cost: Money,
    pub category_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTariff {
    pub category: String,
    pub tariff_paid: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareableCard {
    pub headline: String,
    pub subtext: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub total_spent: Money,
    pub total_tariff_paid: Money,
    pub tariff_as_pct_of_spending: String,
    /// Submitted purchases are assumed to represent about one month.
    pub estimated_annual_tariff: Money,
    pub national_average_annual: Money,
    pub vs_national_avg: String,
    pub category_breakdown: Vec<CategoryTariff>,
    pub shareable_card: ShareableCard,
}

/// Detailed per-product price impact with pass-through adjustment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceImpact {
    pub retail_price: Money,
    pub import_tariff_total: Money,
    pub estimated_tariff_you_pay: Money,
    pub estimated_pre_tariff_price: Money,
    pub tariff_share_of_price: String,
    pub passthrough_rate: Decimal,
    pub passthrough_note: String,
}

pub fn build_price_impact(price: Money, raw_tariff_cost: Money, category: Category) -> PriceImpact {
    let passthrough = category.passthrough_rate();
    let consumer_cost = to_cents(raw_tariff_cost * passthrough);

    PriceImpact {
        retail_price: price,
        import_tariff_total: to_cents(raw_tariff_cost),
        estimated_tariff_you_pay: consumer_cost,
        estimated_pre_tariff_price: to_cents(price - consumer_cost),
        tariff_share_of_price: if price > Decimal::ZERO {
            pct(consumer_cost / price)
        } else {
            "0.0%".to_string()
        },
        passthrough_rate: passthrough,
        passthrough_note: format!(
            "~{} of tariffs are typically passed to consumers for {}",
            pct(passthrough),
            category.label().to_lowercase()
        ),
    }
}

/// Fold analyzed purchases into the consumer's tariff-tax report.
pub fn generate_dashboard(
    items: &[DashboardItem],
) -> TariffResult<ComputationOutput<Dashboard>> {
    let start = Instant::now();

    if items.is_empty() {
        return Err(TariffError::InvalidInput {
            field: "items".to_string(),
            reason: "Dashboard requires at least one purchase".to_string(),
        });
    }

    let total_spent: Money = to_cents(items.iter().map(|i| i.price).sum());
    let total_tariff: Money = to_cents(items.iter().map(|i| i.consumer_tariff_cost).sum());

    let mut category_totals: std::collections::BTreeMap<String, Money> =
        std::collections::BTreeMap::new();
    for item in items {
        *category_totals
            .entry(item.category_label.clone())
            .or_default() += item.consumer_tariff_cost;
    }
    let mut category_breakdown: Vec<CategoryTariff> = category_totals
        .into_iter()
        .map(|(category, tariff_paid)| CategoryTariff {
            category,
            tariff_paid: to_cents(tariff_paid),
        })
        .collect();
    category_breakdown.sort_by(|a, b| b.tariff_paid.cmp(&a.tariff_paid));

    let estimated_annual = to_cents(total_tariff * dec!(12));

    let tariff_share = if total_spent > Decimal::ZERO {
        pct(total_tariff / total_spent)
    } else {
        "0.0%".to_string()
    };

    let direction = if estimated_annual > NATIONAL_AVG_ANNUAL {
        "above"
    } else {
        "below"
    };

    let subtext = if total_spent > Decimal::ZERO {
        format!(
            "That's {} of my spending going to tariffs",
            pct(total_tariff / total_spent)
        )
    } else {
        String::new()
    };

    let result = Dashboard {
        total_spent,
        total_tariff_paid: total_tariff,
        tariff_as_pct_of_spending: tariff_share,
        estimated_annual_tariff: estimated_annual,
        national_average_annual: NATIONAL_AVG_ANNUAL,
        vs_national_avg: format!("{direction} the ${NATIONAL_AVG_ANNUAL} national average"),
        category_breakdown,
        shareable_card: ShareableCard {
            headline: format!("I've paid ~${total_tariff:.2} in hidden tariffs"),
            subtext,
        },
    };

    let assumptions = serde_json::json!({
        "num_items": items.len(),
        "annualization": "submitted purchases represent ~1 month of spending",
        "national_average_annual": NATIONAL_AVG_ANNUAL.to_string(),
    });

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Consumer tariff burden report with pass-through adjustment and annualized projection",
        &assumptions,
        Vec::new(),
        elapsed,
        result,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(product: &str, price: Decimal, tariff: Decimal, category: &str) -> DashboardItem {
        DashboardItem {
            product: product.to_string(),
            price,
            consumer_tariff_cost: tariff,
            category_label: category.to_string(),
        }
    }

    #[test]
    fn test_totals_and_annualization() {
        let items = vec![
            item("TV", dec!(499.99), dec!(144.28), "Electronics & Electrical Equipment"),
            item("Chair", dec!(249.00), dec!(102.71), "Furniture & Home Furnishings"),
        ];
        let output = generate_dashboard(&items).unwrap();
        let d = &output.result;

        assert_eq!(d.total_spent, dec!(748.99));
        assert_eq!(d.total_tariff_paid, dec!(246.99));
        assert_eq!(d.estimated_annual_tariff, dec!(2963.88));
        assert!(d.vs_national_avg.starts_with("above"));
    }

    #[test]
    fn test_below_national_average() {
        let items = vec![item("Shoes", dec!(129.99), dec!(14.87), "Other Goods")];
        let output = generate_dashboard(&items).unwrap();
        assert!(output.result.vs_national_avg.starts_with("below"));
    }

    #[test]
    fn test_category_breakdown_sorted_descending() {
        let items = vec![
            item("Shoes", dec!(129.99), dec!(14.87), "Other Goods"),
            item("TV", dec!(499.99), dec!(144.28), "Electronics & Electrical Equipment"),
        ];
        let output = generate_dashboard(&items).unwrap();
        let cats = &output.result.category_breakdown;
        assert_eq!(cats[0].category, "Electronics & Electrical Equipment");
        assert_eq!(cats[0].tariff_paid, dec!(144.28));
    }

    #[test]
    fn test_empty_input_rejected() {
        let err = generate_dashboard(&[]).unwrap_err();
        assert!(matches!(err, TariffError::InvalidInput { .. }));
    }

    #[test]
    fn test_price_impact_passthrough() {
        let impact = build_price_impact(dec!(499.99), dec!(294.49), Category::Electronics);
        // 294.49 * 0.70 = 206.143 → 206.14
        assert_eq!(impact.estimated_tariff_you_pay, dec!(206.14));
        assert_eq!(impact.estimated_pre_tariff_price, dec!(293.85));
        assert!(impact.passthrough_note.contains("70.0%"));
    }
}
