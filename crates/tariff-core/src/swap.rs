use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::cart::AnalyzedItem;
use crate::classify::ProductClassifier;
use crate::schedule::ScheduleIndex;
use crate::tariff::compute_tariff;
use crate::types::{pct, to_cents, Money, Rate};

// Composite-score weights: price savings matter more to consumers than
// rate savings.
const PRICE_WEIGHT: Decimal = dec!(0.6);
const RATE_WEIGHT: Decimal = dec!(0.4);

/// A candidate competing product from the external finder. Price may be
/// absent; priceless candidates cannot be compared and are dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alternative {
    pub title: String,
    pub price: Option<Money>,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub origin_hint: String,
}

/// Seam for the external product search. Implementations return an empty
/// list on failure rather than erroring.
pub trait AlternativeFinder {
    fn find_alternatives(&self, query: &str, category: &str, count: usize) -> Vec<Alternative>;
}

/// Default finder: no external search wired in.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAlternatives;

impl AlternativeFinder for NoAlternatives {
    fn find_alternatives(&self, _query: &str, _category: &str, _count: usize) -> Vec<Alternative> {
        Vec::new()
    }
}

/// An alternative that survived filtering, enriched with its own tariff
/// data and savings relative to the original item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedAlternative {
    pub title: String,
    pub price: Money,
    pub source: String,
    pub link: String,
    pub hts_code: String,
    pub country_of_origin: String,
    pub tariff_rate: Rate,
    pub tariff_pct: String,
    pub tariff_cost: Money,
    pub price_savings: Money,
    /// Rate delta in percentage points (25.0 means 25% lower).
    pub rate_savings_pts: Decimal,
    pub composite_score: Decimal,
    pub is_cheaper: bool,
    pub is_lower_tariff: bool,
    pub advantage: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapOriginal {
    pub product_name: String,
    pub price: Money,
    pub tariff_rate: Rate,
    pub tariff_pct: String,
    pub consumer_tariff_cost: Money,
    pub country_name: String,
    pub hts_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapSuggestion {
    pub original: SwapOriginal,
    pub alternatives: Vec<EnrichedAlternative>,
    pub potential_savings: Money,
    pub verdict: String,
}

/// Classify and quote each raw alternative, keep only those strictly
/// better than the original on price or tariff rate, and rank by the
/// weighted composite of the two savings.
pub fn enrich_and_filter(
    index: &ScheduleIndex,
    classifier: &dyn ProductClassifier,
    alternatives: &[Alternative],
    original_price: Money,
    original_rate: Rate,
) -> Vec<EnrichedAlternative> {
    let mut enriched: Vec<EnrichedAlternative> = Vec::new();

    for alt in alternatives {
        let Some(price) = alt.price else { continue };
        if price <= Decimal::ZERO {
            continue;
        }

        let classification = classifier.classify(&alt.title);
        let quote = compute_tariff(index, &classification.hts_code, &classification.country_of_origin);

        let price_savings = original_price - price;
        let rate_savings = original_rate - quote.total_rate;

        // Worse or equal on both dimensions: not a swap.
        if price_savings <= Decimal::ZERO && rate_savings <= Decimal::ZERO {
            continue;
        }

        let composite =
            price_savings * PRICE_WEIGHT + rate_savings * Decimal::ONE_HUNDRED * RATE_WEIGHT;

        let mut advantages: Vec<String> = Vec::new();
        if price_savings > Decimal::ZERO {
            advantages.push(format!("${:.2} cheaper", price_savings));
        }
        if rate_savings > Decimal::ZERO {
            advantages.push(format!("{} lower tariff", pct(rate_savings)));
        }

        enriched.push(EnrichedAlternative {
            title: alt.title.clone(),
            price,
            source: alt.source.clone(),
            link: alt.link.clone(),
            hts_code: quote.hts_code.clone(),
            country_of_origin: quote.country_name.clone(),
            tariff_rate: quote.total_rate,
            tariff_pct: quote.total_pct(),
            tariff_cost: quote.cost_at(price),
            price_savings: to_cents(price_savings),
            rate_savings_pts: (rate_savings * Decimal::ONE_HUNDRED).round_dp(1),
            composite_score: composite.round_dp(2),
            is_cheaper: price_savings > Decimal::ZERO,
            is_lower_tariff: rate_savings > Decimal::ZERO,
            advantage: advantages.join(" + "),
        });
    }

    enriched.sort_by(|a, b| b.composite_score.cmp(&a.composite_score));
    enriched
}

/// Rank analyzed cart lines by consumer tariff dollars, pick the top
/// offenders, and look for strictly better alternatives for each.
///
/// Dollar impact drives the ranking: a 10% tariff on a $500 item matters
/// more than a 50% tariff on a $5 item.
pub fn build_swap_suggestions(
    index: &ScheduleIndex,
    classifier: &dyn ProductClassifier,
    finder: &dyn AlternativeFinder,
    analyzed_items: &[AnalyzedItem],
    max_swaps: usize,
    alts_per_item: usize,
) -> Vec<SwapSuggestion> {
    let mut candidates: Vec<&AnalyzedItem> = analyzed_items
        .iter()
        .filter(|i| !i.is_error() && i.consumer_tariff_cost > Decimal::ZERO)
        .collect();
    candidates.sort_by(|a, b| b.consumer_tariff_cost.cmp(&a.consumer_tariff_cost));

    let mut suggestions = Vec::new();
    for item in candidates.into_iter().take(max_swaps) {
        let category = item.category_label.clone().unwrap_or_default();
        // Fetch extra; filtering trims the list down.
        let raw = finder.find_alternatives(&item.product_name, &category, alts_per_item + 3);

        let mut alternatives = if item.unit_price > Decimal::ZERO && item.tariff_rate > Decimal::ZERO
        {
            enrich_and_filter(index, classifier, &raw, item.unit_price, item.tariff_rate)
        } else {
            Vec::new()
        };
        alternatives.truncate(alts_per_item);

        let potential_savings = best_savings(item, alternatives.first());
        let verdict = verdict(&alternatives, potential_savings, item.consumer_tariff_cost);

        suggestions.push(SwapSuggestion {
            original: SwapOriginal {
                product_name: item.product_name.clone(),
                price: item.unit_price,
                tariff_rate: item.tariff_rate,
                tariff_pct: item.tariff_pct.clone(),
                consumer_tariff_cost: item.consumer_tariff_cost,
                country_name: item.country_name.clone().unwrap_or_default(),
                hts_code: item.hts_code.clone().unwrap_or_default(),
            },
            alternatives,
            potential_savings,
            verdict,
        });
    }

    suggestions
}

/// Savings from taking the best alternative: avoided tariff cost plus the
/// price difference, floored at zero.
fn best_savings(item: &AnalyzedItem, best: Option<&EnrichedAlternative>) -> Money {
    let Some(alt) = best else {
        return Decimal::ZERO;
    };
    let tariff_delta = item.consumer_tariff_cost - alt.tariff_cost;
    let price_delta = item.unit_price - alt.price;
    let savings = to_cents(tariff_delta + price_delta);
    savings.max(Decimal::ZERO)
}

fn verdict(alternatives: &[EnrichedAlternative], savings: Money, original_cost: Money) -> String {
    if alternatives.is_empty() {
        return "No better alternatives found — this may be the best option available.".to_string();
    }
    if savings <= Decimal::ZERO {
        return "Alternatives exist but don't offer meaningful savings.".to_string();
    }

    let savings_share = if original_cost > Decimal::ZERO {
        savings / original_cost * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    if savings_share >= Decimal::from(50) {
        format!("Strong swap — save ${savings:.2} ({savings_share:.0}% less tariff exposure)")
    } else if savings_share >= Decimal::from(20) {
        format!("Good swap — save ${savings:.2} with a lower-tariff alternative")
    } else {
        format!("Marginal swap — ${savings:.2} savings available")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::KeywordClassifier;

    use rust_decimal_macros::dec;

    fn index() -> ScheduleIndex {
        ScheduleIndex::embedded().unwrap()
    }

    fn alt(title: &str, price: Option<Decimal>) -> Alternative {
        Alternative {
            title: title.to_string(),
            price,
            source: String::new(),
            link: String::new(),
            origin_hint: String::new(),
        }
    }

    struct FixedFinder(Vec<Alternative>);

    impl AlternativeFinder for FixedFinder {
        fn find_alternatives(&self, _q: &str, _c: &str, _n: usize) -> Vec<Alternative> {
            self.0.clone()
        }
    }

    #[test]
    fn test_worse_on_both_dimensions_is_dropped() {
        // Original: cheap toy from the US, zero tariff. A pricier TV from
        // China is worse on both price and rate.
        let alts = vec![alt("Samsung OLED TV", Some(dec!(899.00)))];
        let kept = enrich_and_filter(&index(), &KeywordClassifier, &alts, dec!(500.00), dec!(0.10));
        assert!(kept.is_empty());
    }

    #[test]
    fn test_better_on_one_dimension_is_kept() {
        // Cheaper, even though the rate (TV from China, 58.9%) is worse.
        let alts = vec![alt("Samsung OLED TV", Some(dec!(299.00)))];
        let kept = enrich_and_filter(&index(), &KeywordClassifier, &alts, dec!(500.00), dec!(0.10));
        assert_eq!(kept.len(), 1);
        assert!(kept[0].is_cheaper);
        assert!(!kept[0].is_lower_tariff);
    }

    #[test]
    fn test_priceless_alternatives_are_dropped() {
        let alts = vec![alt("Samsung OLED TV", None)];
        let kept = enrich_and_filter(&index(), &KeywordClassifier, &alts, dec!(500.00), dec!(0.589));
        assert!(kept.is_empty());
    }

    #[test]
    fn test_composite_ranking_prefers_double_win() {
        // Original: TV from China at $500, 58.9%.
        let alts = vec![
            // Cheaper only (also a China TV, same rate)
            alt("Budget OLED TV", Some(dec!(450.00))),
            // Cheaper AND lower rate (toy chapter from China is 37.5%)
            alt("LEGO set", Some(dec!(60.00))),
        ];
        let kept = enrich_and_filter(&index(), &KeywordClassifier, &alts, dec!(500.00), dec!(0.589));
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].title, "LEGO set");
        assert!(kept[0].composite_score > kept[1].composite_score);
    }

    #[test]
    fn test_swap_suggestions_ranked_by_dollar_impact() {
        use crate::cart::{analyze_cart, CartAnalysisInput, CartItem};

        let input = CartAnalysisInput {
            items: vec![
                CartItem {
                    product_name: "Cheap pan, huge rate".into(),
                    unit_price: dec!(5.00),
                    quantity: 1,
                    hts_code: "7323.93.00".into(),
                    country: "China".into(),
                },
                CartItem {
                    product_name: "Expensive laptop, moderate rate".into(),
                    unit_price: dec!(1999.00),
                    quantity: 1,
                    hts_code: "8471.30.01".into(),
                    country: "China".into(),
                },
            ],
        };
        let analysis = analyze_cart(&index(), &input).unwrap().result;
        let suggestions = build_swap_suggestions(
            &index(),
            &KeywordClassifier,
            &NoAlternatives,
            &analysis.analyzed_items,
            1,
            2,
        );

        // The laptop's tariff dollars dwarf the pan's despite a lower rate.
        assert_eq!(suggestions.len(), 1);
        assert_eq!(
            suggestions[0].original.product_name,
            "Expensive laptop, moderate rate"
        );
        assert!(suggestions[0].alternatives.is_empty());
        assert!(suggestions[0].verdict.contains("No better alternatives"));
        assert_eq!(suggestions[0].potential_savings, dec!(0));
    }

    #[test]
    fn test_swap_with_fixed_finder_produces_savings() {
        use crate::cart::{analyze_cart, CartAnalysisInput, CartItem};

        let input = CartAnalysisInput {
            items: vec![CartItem {
                product_name: "65 inch OLED TV".into(),
                unit_price: dec!(899.00),
                quantity: 1,
                hts_code: "8528.72.64".into(),
                country: "China".into(),
            }],
        };
        let analysis = analyze_cart(&index(), &input).unwrap().result;

        let finder = FixedFinder(vec![alt("Budget 55 inch TV", Some(dec!(499.00)))]);
        let suggestions = build_swap_suggestions(
            &index(),
            &KeywordClassifier,
            &finder,
            &analysis.analyzed_items,
            3,
            2,
        );

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].alternatives.len(), 1);
        assert!(suggestions[0].potential_savings > dec!(0));
        assert!(suggestions[0].verdict.contains("swap"));
    }
}
