use clap::Args;
use serde_json::Value;

use tariff_core::cart::{analyze_cart, CartAnalysisInput};
use tariff_core::classify::KeywordClassifier;
use tariff_core::swap::{build_swap_suggestions, NoAlternatives};

use crate::input;

/// Arguments for cart analysis
#[derive(Args)]
pub struct CartArgs {
    /// Path to a cart JSON file ({"items": [...]}); omit to read stdin
    #[arg(long)]
    pub input: Option<String>,

    /// Suggest lower-tariff swaps for the top N items by tariff dollars
    #[arg(long)]
    pub swaps: Option<usize>,

    /// Path to an alternate schedule CSV (defaults to the bundled table)
    #[arg(long)]
    pub schedule: Option<String>,
}

pub fn run_cart(args: CartArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let cart_input: CartAnalysisInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("provide --input <cart.json> or pipe cart JSON on stdin".into());
    };

    let index = super::load_schedule(&args.schedule)?;
    let output = analyze_cart(&index, &cart_input)?;

    let mut value = serde_json::to_value(&output)?;

    if let Some(max_swaps) = args.swaps {
        let suggestions = build_swap_suggestions(
            &index,
            &KeywordClassifier,
            &NoAlternatives,
            &output.result.analyzed_items,
            max_swaps,
            3,
        );
        value["swap_suggestions"] = serde_json::to_value(suggestions)?;
    }

    Ok(value)
}
