use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use tariff_core::tariff::compute_tariff;
use tariff_core::types::{pct, to_cents};

/// Arguments for a single tariff quote
#[derive(Args)]
pub struct LookupArgs {
    /// Classification (HTS) code, with or without dots
    #[arg(long)]
    pub code: String,

    /// Country of manufacture (ISO code or free-text name)
    #[arg(long)]
    pub country: String,

    /// Retail price; adds a dollar-cost breakdown to the quote
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Path to an alternate schedule CSV (defaults to the bundled table)
    #[arg(long)]
    pub schedule: Option<String>,
}

pub fn run_lookup(args: LookupArgs) -> Result<Value, Box<dyn std::error::Error>> {
    if let Some(price) = args.price {
        if price <= Decimal::ZERO {
            return Err("--price must be positive".into());
        }
    }

    let index = super::load_schedule(&args.schedule)?;
    let quote = compute_tariff(&index, &args.code, &args.country);

    let mut value = json!({ "tariff": quote });

    if let Some(price) = args.price {
        let cost = quote.cost_at(price);
        value["price_analysis"] = json!({
            "retail_price": price,
            "estimated_tariff_cost": cost,
            "price_without_tariff": to_cents(price - cost),
            "tariff_as_pct_of_price": pct(cost / price),
        });
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(price: Option<Decimal>) -> LookupArgs {
        LookupArgs {
            code: "8528.72.64".to_string(),
            country: "China".to_string(),
            price,
            schedule: None,
        }
    }

    #[test]
    fn test_nonpositive_price_rejected() {
        let err = run_lookup(args(Some(Decimal::from(-100)))).unwrap_err();
        assert!(err.to_string().contains("--price"));

        let err = run_lookup(args(Some(Decimal::ZERO))).unwrap_err();
        assert!(err.to_string().contains("--price"));
    }

    #[test]
    fn test_positive_price_adds_cost_block() {
        let price: Decimal = "499.99".parse().unwrap();
        let value = run_lookup(args(Some(price))).unwrap();
        assert_eq!(
            value["price_analysis"]["estimated_tariff_cost"]
                .as_str()
                .unwrap(),
            "294.49"
        );
    }

    #[test]
    fn test_price_is_optional() {
        let value = run_lookup(args(None)).unwrap();
        assert!(value["price_analysis"].is_null());
        assert_eq!(value["tariff"]["total_rate"].as_str().unwrap(), "0.589");
    }
}
