use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use rust_decimal::Decimal;
use tariff_core::cart::{analyze_cart, CartAnalysisInput};
use tariff_core::classify::{analyze_product, KeywordClassifier};
use tariff_core::dashboard::{generate_dashboard, DashboardItem};
use tariff_core::schedule::ScheduleIndex;
use tariff_core::tariff::compute_tariff;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct LookupInput {
    hts_code: String,
    country: String,
}

#[napi]
pub fn lookup_tariff(input_json: String) -> NapiResult<String> {
    let input: LookupInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let quote = compute_tariff(ScheduleIndex::global(), &input.hts_code, &input.country);
    serde_json::to_string(&quote).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ClassifyInput {
    product: String,
    #[serde(default)]
    price: Option<Decimal>,
}

#[napi]
pub fn classify_product(input_json: String) -> NapiResult<String> {
    let input: ClassifyInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let analysis = analyze_product(
        ScheduleIndex::global(),
        &KeywordClassifier,
        &input.product,
        input.price,
    );
    serde_json::to_string(&analysis).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Cart
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_cart_items(input_json: String) -> NapiResult<String> {
    let input: CartAnalysisInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = analyze_cart(ScheduleIndex::global(), &input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[napi]
pub fn generate_tariff_dashboard(input_json: String) -> NapiResult<String> {
    let items: Vec<DashboardItem> = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = generate_dashboard(&items).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
