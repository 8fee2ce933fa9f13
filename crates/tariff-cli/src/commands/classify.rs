use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use tariff_core::classify::{analyze_product, KeywordClassifier};

/// Arguments for free-text product classification
#[derive(Args)]
pub struct ClassifyArgs {
    /// Product description, e.g. "Samsung 65 inch OLED TV"
    pub product: String,

    /// Retail price; adds a dollar-cost breakdown to the analysis
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Path to an alternate schedule CSV (defaults to the bundled table)
    #[arg(long)]
    pub schedule: Option<String>,
}

pub fn run_classify(args: ClassifyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    if args.product.trim().is_empty() {
        return Err("product description must not be empty".into());
    }
    if let Some(price) = args.price {
        if price <= Decimal::ZERO {
            return Err("--price must be positive".into());
        }
    }

    let index = super::load_schedule(&args.schedule)?;
    let analysis = analyze_product(&index, &KeywordClassifier, &args.product, args.price);

    Ok(serde_json::to_value(analysis)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(product: &str, price: Option<Decimal>) -> ClassifyArgs {
        ClassifyArgs {
            product: product.to_string(),
            price,
            schedule: None,
        }
    }

    #[test]
    fn test_nonpositive_price_rejected() {
        let err = run_classify(args("Samsung 65 inch OLED TV", Some(Decimal::from(-100))))
            .unwrap_err();
        assert!(err.to_string().contains("--price"));

        let err = run_classify(args("Samsung 65 inch OLED TV", Some(Decimal::ZERO))).unwrap_err();
        assert!(err.to_string().contains("--price"));
    }

    #[test]
    fn test_empty_product_rejected() {
        let err = run_classify(args("   ", None)).unwrap_err();
        assert!(err.to_string().contains("product description"));
    }

    #[test]
    fn test_classifies_without_price() {
        let value = run_classify(args("Samsung 65 inch OLED TV", None)).unwrap();
        assert_eq!(
            value["classification"]["hts_code"].as_str().unwrap(),
            "8528.72.64"
        );
    }
}
