use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Rate;

/// Consumer product category, derived from the classification code's
/// leading chapter digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Electronics,
    Furniture,
    Clothing,
    AutoParts,
    SteelAluminum,
    Toys,
    Other,
}

impl Category {
    /// First chapter-prefix match wins; unrecognized chapters are `Other`.
    pub fn from_code(code: &str) -> Self {
        let clean: String = code.chars().filter(|c| c.is_ascii_digit()).collect();
        let chapter = &clean[..clean.len().min(2)];

        match chapter {
            "84" | "85" => Category::Electronics,
            "94" => Category::Furniture,
            "61" | "62" | "63" => Category::Clothing,
            "87" => Category::AutoParts,
            "72" | "73" | "76" => Category::SteelAluminum,
            "95" => Category::Toys,
            _ => Category::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics & Electrical Equipment",
            Category::Furniture => "Furniture & Home Furnishings",
            Category::Clothing => "Clothing & Textiles",
            Category::AutoParts => "Vehicles & Auto Parts",
            Category::SteelAluminum => "Steel & Aluminum Products",
            Category::Toys => "Toys, Games & Sports Equipment",
            Category::Other => "Other Goods",
        }
    }

    /// Fraction of the import-side tariff cost assumed to reach the retail
    /// price the consumer pays. Sector estimates; `Other` is a weighted
    /// average across categories.
    pub fn passthrough_rate(&self) -> Rate {
        match self {
            Category::Electronics => dec!(0.70),
            Category::Furniture => dec!(0.75),
            Category::Clothing => dec!(0.85),
            Category::AutoParts => dec!(0.60),
            Category::SteelAluminum => dec!(0.65),
            Category::Toys => dec!(0.80),
            Category::Other => dec!(0.72),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chapter_mapping() {
        assert_eq!(Category::from_code("8528.72.64"), Category::Electronics);
        assert_eq!(Category::from_code("9401.30.80"), Category::Furniture);
        assert_eq!(Category::from_code("6109.10.00"), Category::Clothing);
        assert_eq!(Category::from_code("8703.23.01"), Category::AutoParts);
        assert_eq!(Category::from_code("7323.93.00"), Category::SteelAluminum);
        assert_eq!(Category::from_code("9503.00.00"), Category::Toys);
        assert_eq!(Category::from_code("4011.10.10"), Category::Other);
    }

    #[test]
    fn test_short_and_empty_codes() {
        assert_eq!(Category::from_code("85"), Category::Electronics);
        assert_eq!(Category::from_code("8"), Category::Other);
        assert_eq!(Category::from_code(""), Category::Other);
    }

    #[test]
    fn test_passthrough_rates_are_fractions() {
        use rust_decimal_macros::dec;
        for cat in [
            Category::Electronics,
            Category::Furniture,
            Category::Clothing,
            Category::AutoParts,
            Category::SteelAluminum,
            Category::Toys,
            Category::Other,
        ] {
            let p = cat.passthrough_rate();
            assert!(p > dec!(0) && p <= dec!(1), "{:?}", cat);
        }
    }
}
