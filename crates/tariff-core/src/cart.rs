use std::collections::BTreeMap;
use std::time::Instant;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::TariffError;
use crate::schedule::ScheduleIndex;
use crate::tariff::compute_tariff;
use crate::types::{pct, to_cents, with_metadata, ComputationOutput, Money, Rate};
use crate::TariffResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One cart line, already resolved to a classification code and country.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub product_name: String,
    pub unit_price: Money,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    pub hts_code: String,
    pub country: String,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartAnalysisInput {
    pub items: Vec<CartItem>,
}

/// Per-line analysis result. A line that cannot be priced or classified
/// carries an `error` note and is excluded from every aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzedItem {
    pub product_name: String,
    pub unit_price: Money,
    pub quantity: u32,
    pub line_total: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hts_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_label: Option<String>,
    pub tariff_rate: Rate,
    pub tariff_pct: String,
    pub raw_tariff_cost: Money,
    pub passthrough_rate: Rate,
    /// Consumer-adjusted tariff cost: raw cost × category pass-through.
    pub consumer_tariff_cost: Money,
    pub price_without_tariff: Money,
    pub breakdown: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalyzedItem {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    fn rejected(item: &CartItem, line_total: Money, reason: &str) -> Self {
        AnalyzedItem {
            product_name: item.product_name.clone(),
            unit_price: item.unit_price,
            quantity: item.quantity,
            line_total,
            hts_code: None,
            country_name: None,
            category_label: None,
            tariff_rate: Decimal::ZERO,
            tariff_pct: "0.0%".to_string(),
            raw_tariff_cost: Decimal::ZERO,
            passthrough_rate: Decimal::ZERO,
            consumer_tariff_cost: Decimal::ZERO,
            price_without_tariff: line_total,
            breakdown: Vec::new(),
            error: Some(reason.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub items: u32,
    pub spend: Money,
    pub tariff_cost: Money,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountryBreakdown {
    pub items: u32,
    pub spend: Money,
    pub tariff_cost: Money,
    pub avg_tariff_rate: String,
    // All observed rates; averaged once at finalization rather than
    // recomputed incrementally.
    #[serde(skip)]
    rates: Vec<Rate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartSummary {
    pub total_items: u32,
    pub total_cart_price: Money,
    pub total_tariff_cost_raw: Money,
    pub total_consumer_tariff_cost: Money,
    pub tariff_as_pct_of_cart: String,
    pub price_without_tariffs: Money,
    pub highest_tariff_item: Option<String>,
    pub highest_tariff_rate: String,
    pub category_breakdown: BTreeMap<String, CategoryBreakdown>,
    pub country_breakdown: BTreeMap<String, CountryBreakdown>,
    pub headline: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartAnalysis {
    pub analyzed_items: Vec<AnalyzedItem>,
    pub summary: CartSummary,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Fold a cart of resolved items into per-line quotes and an aggregate
/// summary. A single bad line is recorded and skipped; the batch proceeds.
pub fn analyze_cart(
    index: &ScheduleIndex,
    input: &CartAnalysisInput,
) -> TariffResult<ComputationOutput<CartAnalysis>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.items.is_empty() {
        return Err(TariffError::InvalidInput {
            field: "items".to_string(),
            reason: "Cart must contain at least one item".to_string(),
        });
    }

    let mut analyzed_items: Vec<AnalyzedItem> = Vec::new();
    let mut total_cart_price = Decimal::ZERO;
    let mut total_raw_cost = Decimal::ZERO;
    let mut total_consumer_cost = Decimal::ZERO;
    let mut total_units: u32 = 0;
    let mut category_breakdown: BTreeMap<String, CategoryBreakdown> = BTreeMap::new();
    let mut country_breakdown: BTreeMap<String, CountryBreakdown> = BTreeMap::new();
    let mut highest: Option<(Rate, String)> = None;

    for item in &input.items {
        if item.unit_price <= Decimal::ZERO {
            tracing::warn!(product = %item.product_name, "cart line has no usable price");
            warnings.push(format!("'{}': no price available", item.product_name));
            analyzed_items.push(AnalyzedItem::rejected(item, Decimal::ZERO, "No price available"));
            continue;
        }
        if item.hts_code.trim().is_empty() {
            tracing::warn!(product = %item.product_name, "cart line has no classification code");
            warnings.push(format!("'{}': no classification code", item.product_name));
            let line_total = to_cents(item.unit_price * Decimal::from(item.quantity));
            analyzed_items.push(AnalyzedItem::rejected(
                item,
                line_total,
                "Could not classify product",
            ));
            continue;
        }

        let line_total = to_cents(item.unit_price * Decimal::from(item.quantity));
        total_cart_price += line_total;
        total_units += item.quantity;

        let quote = compute_tariff(index, &item.hts_code, &item.country);
        let raw_cost = quote.cost_at(line_total);
        let passthrough = quote.category.passthrough_rate();
        let consumer_cost = to_cents(raw_cost * passthrough);

        total_raw_cost += raw_cost;
        total_consumer_cost += consumer_cost;

        let cat = category_breakdown
            .entry(quote.category_label.clone())
            .or_default();
        cat.items += item.quantity;
        cat.spend += line_total;
        cat.tariff_cost += consumer_cost;

        let ctry = country_breakdown
            .entry(quote.country_name.clone())
            .or_default();
        ctry.items += item.quantity;
        ctry.spend += line_total;
        ctry.tariff_cost += consumer_cost;
        ctry.rates.push(quote.total_rate);

        // Strictly greater: the first item at the maximum rate wins ties.
        let is_new_high = match &highest {
            Some((rate, _)) => quote.total_rate > *rate,
            None => quote.total_rate > Decimal::ZERO,
        };
        if is_new_high {
            highest = Some((quote.total_rate, item.product_name.clone()));
        }

        analyzed_items.push(AnalyzedItem {
            product_name: item.product_name.clone(),
            unit_price: item.unit_price,
            quantity: item.quantity,
            line_total,
            hts_code: Some(quote.hts_code.clone()),
            country_name: Some(quote.country_name.clone()),
            category_label: Some(quote.category_label.clone()),
            tariff_rate: quote.total_rate,
            tariff_pct: quote.total_pct(),
            raw_tariff_cost: raw_cost,
            passthrough_rate: passthrough,
            consumer_tariff_cost: consumer_cost,
            price_without_tariff: to_cents(line_total - consumer_cost),
            breakdown: quote.breakdown,
            error: None,
        });
    }

    for country in country_breakdown.values_mut() {
        let rates = std::mem::take(&mut country.rates);
        country.avg_tariff_rate = if rates.is_empty() {
            "0.0%".to_string()
        } else {
            let sum: Decimal = rates.iter().sum();
            pct(sum / Decimal::from(rates.len() as u64))
        };
        country.spend = to_cents(country.spend);
        country.tariff_cost = to_cents(country.tariff_cost);
    }
    for cat in category_breakdown.values_mut() {
        cat.spend = to_cents(cat.spend);
        cat.tariff_cost = to_cents(cat.tariff_cost);
    }

    let total_cart_price = to_cents(total_cart_price);
    let total_raw_cost = to_cents(total_raw_cost);
    let total_consumer_cost = to_cents(total_consumer_cost);

    let tariff_as_pct_of_cart = if total_cart_price > Decimal::ZERO {
        pct(total_consumer_cost / total_cart_price)
    } else {
        "0.0%".to_string()
    };

    let (highest_rate, highest_item) = match highest {
        Some((rate, name)) => (pct(rate), Some(name)),
        None => ("0.0%".to_string(), None),
    };

    let summary = CartSummary {
        total_items: total_units,
        total_cart_price,
        total_tariff_cost_raw: total_raw_cost,
        total_consumer_tariff_cost: total_consumer_cost,
        tariff_as_pct_of_cart,
        price_without_tariffs: to_cents(total_cart_price - total_consumer_cost),
        highest_tariff_item: highest_item,
        highest_tariff_rate: highest_rate,
        category_breakdown,
        country_breakdown,
        headline: headline(total_consumer_cost, total_cart_price),
    };

    let result = CartAnalysis {
        analyzed_items,
        summary,
    };

    let assumptions = serde_json::json!({
        "num_items": input.items.len(),
        "passthrough": "per-category consumer pass-through applied to raw tariff cost",
        "rate_parsing": "maximum percentage in compound duty text (conservative estimate)",
    });

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Per-line tariff quotes with surcharge composition, aggregated by category and origin",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}

/// Shareable one-line summary of the cart's hidden tariff burden.
fn headline(consumer_cost: Money, cart_total: Money) -> String {
    if cart_total <= Decimal::ZERO {
        return "Add items to see your hidden tariff tax".to_string();
    }
    let share = consumer_cost / cart_total * Decimal::ONE_HUNDRED;

    if share >= Decimal::from(30) {
        format!(
            "${consumer_cost:.2} of your ${cart_total:.2} cart is hidden tariff tax. That's {share:.0}% you didn't know about."
        )
    } else if share >= Decimal::from(15) {
        format!(
            "You're paying ${consumer_cost:.2} in hidden tariffs on a ${cart_total:.2} cart — {share:.0}% invisible markup."
        )
    } else if share >= Decimal::from(5) {
        format!("${consumer_cost:.2} in tariffs hiding in your ${cart_total:.2} cart ({share:.1}% of total).")
    } else {
        format!(
            "Your ${cart_total:.2} cart has ${consumer_cost:.2} in tariff costs — relatively low exposure."
        )
    }
}
