use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values are exact decimals, never f64.
pub type Money = Decimal;

/// Rates expressed as decimals (0.25 = 25%). Never as percentages.
pub type Rate = Decimal;

/// Format a rate the way the consumer surface shows it: "58.9%".
pub fn pct(rate: Rate) -> String {
    format!("{:.1}%", rate * Decimal::ONE_HUNDRED)
}

/// Round a monetary amount to cents (banker's rounding).
pub fn to_cents(amount: Money) -> Money {
    amount.round_dp(2)
}

/// Standard computation output envelope for batch analyses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
