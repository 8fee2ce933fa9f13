use rust_decimal_macros::dec;
use tariff_core::cart::{analyze_cart, CartAnalysisInput, CartItem};
use tariff_core::classify::KeywordClassifier;
use tariff_core::dashboard::{generate_dashboard, DashboardItem};
use tariff_core::schedule::ScheduleIndex;
use tariff_core::swap::{build_swap_suggestions, NoAlternatives};
use tariff_core::types::Money;
use tariff_core::TariffError;

fn index() -> ScheduleIndex {
    ScheduleIndex::embedded().unwrap()
}

fn item(name: &str, price: Money, qty: u32, code: &str, country: &str) -> CartItem {
    CartItem {
        product_name: name.to_string(),
        unit_price: price,
        quantity: qty,
        hts_code: code.to_string(),
        country: country.to_string(),
    }
}

fn sample_cart() -> CartAnalysisInput {
    CartAnalysisInput {
        items: vec![
            item("65 inch OLED TV", dec!(499.99), 1, "8528.72.64", "China"),
            item("Office chair", dec!(249.00), 1, "9401.30.80", "China"),
            item("Cotton T-shirt", dec!(14.99), 3, "6109.10.00", "Bangladesh"),
            item("Stainless frying pan", dec!(89.99), 1, "7323.93.00", "Germany"),
        ],
    }
}

// ===========================================================================
// Cart aggregation
// ===========================================================================

#[test]
fn test_mixed_cart_totals() {
    let output = analyze_cart(&index(), &sample_cart()).unwrap();
    let r = &output.result;

    assert_eq!(r.analyzed_items.len(), 4);
    assert_eq!(r.summary.total_items, 6);
    // 499.99 + 249.00 + 44.97 + 89.99
    assert_eq!(r.summary.total_cart_price, dec!(883.95));

    // Every line succeeded
    assert!(r.analyzed_items.iter().all(|i| !i.is_error()));
    assert!(output.warnings.is_empty());
}

#[test]
fn test_highest_rate_is_the_china_tv() {
    let output = analyze_cart(&index(), &sample_cart()).unwrap();
    let s = &output.result.summary;

    assert_eq!(s.highest_tariff_item.as_deref(), Some("65 inch OLED TV"));
    assert_eq!(s.highest_tariff_rate, "58.9%");
}

#[test]
fn test_consumer_cost_below_raw_cost() {
    // Pass-through is below 100% for every category, so the consumer
    // share must be strictly smaller than the raw import cost.
    let output = analyze_cart(&index(), &sample_cart()).unwrap();
    let s = &output.result.summary;

    assert!(s.total_consumer_tariff_cost < s.total_tariff_cost_raw);
    assert!(s.total_consumer_tariff_cost > dec!(0));
}

#[test]
fn test_price_without_tariffs_reconstructs_cart() {
    let output = analyze_cart(&index(), &sample_cart()).unwrap();
    let s = &output.result.summary;

    assert_eq!(
        s.price_without_tariffs + s.total_consumer_tariff_cost,
        s.total_cart_price
    );
}

#[test]
fn test_bad_lines_do_not_poison_the_batch() {
    let input = CartAnalysisInput {
        items: vec![
            item("Good TV", dec!(499.99), 1, "8528.72.64", "China"),
            item("Free sample", dec!(0), 1, "8528.72.64", "China"),
            item("Mystery箱", dec!(25.00), 1, "", "Narnia"),
        ],
    };
    let output = analyze_cart(&index(), &input).unwrap();
    let r = &output.result;

    assert_eq!(r.analyzed_items.iter().filter(|i| i.is_error()).count(), 2);
    assert_eq!(r.summary.total_items, 1);
    assert_eq!(output.warnings.len(), 2);
}

#[test]
fn test_empty_cart_is_an_input_error() {
    let err = analyze_cart(&index(), &CartAnalysisInput { items: vec![] }).unwrap_err();
    assert!(matches!(err, TariffError::InvalidInput { .. }));
}

#[test]
fn test_breakdowns_cover_every_successful_line() {
    let output = analyze_cart(&index(), &sample_cart()).unwrap();
    let s = &output.result.summary;

    let cat_items: u32 = s.category_breakdown.values().map(|c| c.items).sum();
    let ctry_items: u32 = s.country_breakdown.values().map(|c| c.items).sum();
    assert_eq!(cat_items, s.total_items);
    assert_eq!(ctry_items, s.total_items);
    assert!(s.country_breakdown.contains_key("China"));
    assert!(s.country_breakdown.contains_key("Germany"));
}

// ===========================================================================
// Swaps on top of a cart
// ===========================================================================

#[test]
fn test_swap_targets_the_biggest_tariff_dollars() {
    let output = analyze_cart(&index(), &sample_cart()).unwrap();
    let suggestions = build_swap_suggestions(
        &index(),
        &KeywordClassifier,
        &NoAlternatives,
        &output.result.analyzed_items,
        2,
        3,
    );

    assert_eq!(suggestions.len(), 2);
    // TV carries the most consumer tariff dollars in this cart.
    assert_eq!(suggestions[0].original.product_name, "65 inch OLED TV");
    // Tariff-free lines never make the list even with open slots.
    for s in &suggestions {
        assert!(s.original.consumer_tariff_cost > dec!(0));
    }
}

// ===========================================================================
// Dashboard from analyzed purchases
// ===========================================================================

#[test]
fn test_dashboard_from_cart_results() {
    let output = analyze_cart(&index(), &sample_cart()).unwrap();

    let items: Vec<DashboardItem> = output
        .result
        .analyzed_items
        .iter()
        .filter(|i| !i.is_error())
        .map(|i| DashboardItem {
            product: i.product_name.clone(),
            price: i.line_total,
            consumer_tariff_cost: i.consumer_tariff_cost,
            category_label: i.category_label.clone().unwrap_or_default(),
        })
        .collect();

    let dash = generate_dashboard(&items).unwrap().result;

    assert_eq!(dash.total_spent, dec!(883.95));
    assert_eq!(
        dash.total_tariff_paid,
        output.result.summary.total_consumer_tariff_cost
    );
    assert_eq!(dash.estimated_annual_tariff, dash.total_tariff_paid * dec!(12));
    assert!(!dash.category_breakdown.is_empty());
    assert!(dash.shareable_card.headline.contains("hidden tariffs"));
}

#[test]
fn test_dashboard_rejects_empty_input() {
    let err = generate_dashboard(&[]).unwrap_err();
    assert!(matches!(err, TariffError::InvalidInput { .. }));
}
