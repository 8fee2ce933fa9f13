use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::schedule::ScheduleIndex;
use crate::tariff::{compute_tariff, TariffQuote};
use crate::types::{pct, to_cents, Money};

/// Classifier confidence, carried through to the consumer surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// A product classification: free text resolved to a schedule code and a
/// country of origin. Always total; classifiers degrade to low-confidence
/// defaults rather than failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    pub product_name: String,
    pub hts_code: String,
    pub country_of_origin: String,
    pub country_name: String,
    pub description: String,
    pub category: Category,
    pub confidence: Confidence,
    pub notes: String,
}

/// Seam for the external product classifier (hosted model or keyword
/// table). Implementations must return a usable default instead of
/// erroring; the engine branches on confidence, not on failures.
pub trait ProductClassifier {
    fn classify(&self, product_text: &str) -> Classification;
}

// ---------------------------------------------------------------------------
// Keyword classifier
// ---------------------------------------------------------------------------

/// Built-in classifier backed by an ordered keyword table. Used when no
/// hosted model is wired in, and as the fallback behind one.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordClassifier;

struct KeywordRule {
    keywords: &'static [&'static str],
    hts_code: &'static str,
    country: &'static str,
    description: &'static str,
}

// Order matters: specific rules come before generic ones so that e.g.
// "stainless steel pan" resolves as cookware, not via "pan" → clothing.
const KEYWORD_RULES: &[KeywordRule] = &[
    // Steel / aluminum first
    KeywordRule {
        keywords: &[
            "steel pan",
            "stainless steel",
            "cookware",
            "frying pan",
            "pressure cooker",
            "instant pot",
            "wok",
            "skillet",
        ],
        hts_code: "7323.93.00",
        country: "CN",
        description: "Steel cookware",
    },
    KeywordRule {
        keywords: &["aluminum foil", "foil"],
        hts_code: "7607.11.90",
        country: "CN",
        description: "Aluminum foil",
    },
    KeywordRule {
        keywords: &["bolt", "screw", "fastener", "hardware"],
        hts_code: "7318.15.20",
        country: "CN",
        description: "Steel fasteners",
    },
    // Electronics
    KeywordRule {
        keywords: &["iphone", "ipad", "smartphone", "phone", "galaxy", "pixel"],
        hts_code: "8517.13.00",
        country: "CN",
        description: "Smartphone/tablet",
    },
    KeywordRule {
        keywords: &["macbook", "laptop", "thinkpad", "chromebook", "notebook"],
        hts_code: "8471.30.01",
        country: "CN",
        description: "Laptop computer",
    },
    KeywordRule {
        keywords: &["desktop", "imac", "pc tower"],
        hts_code: "8471.41.01",
        country: "CN",
        description: "Desktop computer",
    },
    KeywordRule {
        keywords: &["tv", "television", "monitor", "display", "oled", "qled"],
        hts_code: "8528.72.64",
        country: "CN",
        description: "Television/monitor",
    },
    KeywordRule {
        keywords: &["headphone", "earphone", "earbud", "airpod", "beats"],
        hts_code: "8518.30.20",
        country: "CN",
        description: "Headphones/earphones",
    },
    KeywordRule {
        keywords: &["printer", "scanner"],
        hts_code: "8443.32.10",
        country: "CN",
        description: "Printer",
    },
    KeywordRule {
        keywords: &["camera", "dslr", "mirrorless"],
        hts_code: "8525.89.30",
        country: "CN",
        description: "Digital camera",
    },
    KeywordRule {
        keywords: &["charger", "power adapter", "usb-c"],
        hts_code: "8504.40.95",
        country: "CN",
        description: "Power adapter/charger",
    },
    KeywordRule {
        keywords: &["battery", "lithium", "power bank"],
        hts_code: "8507.60.00",
        country: "CN",
        description: "Battery",
    },
    // Furniture
    KeywordRule {
        keywords: &["desk chair", "office chair", "swivel chair"],
        hts_code: "9401.30.80",
        country: "CN",
        description: "Office/desk chair",
    },
    KeywordRule {
        keywords: &["couch", "sofa", "loveseat", "sectional"],
        hts_code: "9401.61.40",
        country: "CN",
        description: "Upholstered seating",
    },
    KeywordRule {
        keywords: &["desk", "table", "kitchen table", "dining table"],
        hts_code: "9403.40.90",
        country: "CN",
        description: "Wood furniture",
    },
    KeywordRule {
        keywords: &["bed frame", "bookshelf", "dresser", "nightstand", "cabinet"],
        hts_code: "9403.60.80",
        country: "CN",
        description: "Wood furniture",
    },
    KeywordRule {
        keywords: &["mattress", "memory foam"],
        hts_code: "9404.29.90",
        country: "CN",
        description: "Mattress",
    },
    KeywordRule {
        keywords: &["lamp", "light fixture", "chandelier"],
        hts_code: "9405.11.40",
        country: "CN",
        description: "Lighting fixture",
    },
    // Clothing
    KeywordRule {
        keywords: &["t-shirt", "tee", "cotton shirt"],
        hts_code: "6109.10.00",
        country: "BD",
        description: "Cotton t-shirt",
    },
    KeywordRule {
        keywords: &["sweater", "pullover", "hoodie", "sweatshirt"],
        hts_code: "6110.20.20",
        country: "VN",
        description: "Sweater/pullover",
    },
    KeywordRule {
        keywords: &["jeans", "pants", "trousers", "chinos"],
        hts_code: "6203.42.40",
        country: "BD",
        description: "Trousers/pants",
    },
    KeywordRule {
        keywords: &["jacket", "coat", "parka", "down jacket"],
        hts_code: "6201.13.40",
        country: "CN",
        description: "Jacket/coat",
    },
    KeywordRule {
        keywords: &[
            "running shoe",
            "sneaker",
            "athletic shoe",
            "nike",
            "adidas",
            "new balance",
        ],
        hts_code: "6402.99.31",
        country: "VN",
        description: "Athletic footwear",
    },
    KeywordRule {
        keywords: &["leather shoe", "boot", "dress shoe", "loafer"],
        hts_code: "6403.99.60",
        country: "CN",
        description: "Leather footwear",
    },
    KeywordRule {
        keywords: &["bed sheet", "pillow case", "linen", "duvet"],
        hts_code: "6302.31.90",
        country: "CN",
        description: "Bed linens",
    },
    // Vehicles and parts
    KeywordRule {
        keywords: &[
            "car", "sedan", "suv", "vehicle", "honda", "toyota", "ford", "bmw", "tesla",
        ],
        hts_code: "8703.23.00",
        country: "JP",
        description: "Passenger vehicle",
    },
    KeywordRule {
        keywords: &["brake pad", "brake", "rotor"],
        hts_code: "8708.30.50",
        country: "CN",
        description: "Brake parts",
    },
    KeywordRule {
        keywords: &["car part", "auto part", "fender", "bumper"],
        hts_code: "8708.29.50",
        country: "CN",
        description: "Vehicle body parts",
    },
    KeywordRule {
        keywords: &["tire", "tyre"],
        hts_code: "4011.10.10",
        country: "CN",
        description: "Vehicle tire",
    },
    // Toys and sporting goods
    KeywordRule {
        keywords: &["lego", "toy", "action figure", "doll", "plush"],
        hts_code: "9503.00.00",
        country: "CN",
        description: "Toys",
    },
    KeywordRule {
        keywords: &["playstation", "xbox", "nintendo", "switch", "game console"],
        hts_code: "9504.50.00",
        country: "CN",
        description: "Video game console",
    },
    KeywordRule {
        keywords: &["board game", "puzzle", "card game"],
        hts_code: "9504.90.60",
        country: "CN",
        description: "Board game/puzzle",
    },
    KeywordRule {
        keywords: &["exercise", "treadmill", "dumbbell", "yoga mat"],
        hts_code: "9506.91.00",
        country: "CN",
        description: "Exercise equipment",
    },
];

fn truncate(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

impl ProductClassifier for KeywordClassifier {
    fn classify(&self, product_text: &str) -> Classification {
        let text = product_text.to_lowercase();

        for rule in KEYWORD_RULES {
            if rule.keywords.iter().any(|kw| text.contains(kw)) {
                let country = crate::country::Country::from_iso2(rule.country);
                return Classification {
                    product_name: truncate(product_text, 50),
                    hts_code: rule.hts_code.to_string(),
                    country_of_origin: rule.country.to_string(),
                    country_name: country.display_name(),
                    description: rule.description.to_string(),
                    category: Category::from_code(rule.hts_code),
                    confidence: Confidence::Medium,
                    notes: "Classified via keyword matching".to_string(),
                };
            }
        }

        tracing::debug!(product_text, "keyword classifier found no match");
        Classification {
            product_name: truncate(product_text, 50),
            hts_code: "9999.99.99".to_string(),
            country_of_origin: "CN".to_string(),
            country_name: "China".to_string(),
            description: "Unclassified product".to_string(),
            category: Category::Other,
            confidence: Confidence::Low,
            notes: "Could not classify — defaulting to general goods from China".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Single-product pipeline
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceAnalysis {
    pub retail_price: Money,
    pub estimated_tariff_cost: Money,
    pub price_without_tariff: Money,
    pub tariff_as_pct_of_price: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductAnalysis {
    pub input: String,
    pub classification: Classification,
    pub tariff: TariffQuote,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_analysis: Option<PriceAnalysis>,
}

/// Full pipeline for one product: classification → tariff quote →
/// optional price breakdown.
pub fn analyze_product(
    index: &ScheduleIndex,
    classifier: &dyn ProductClassifier,
    product_text: &str,
    price: Option<Money>,
) -> ProductAnalysis {
    let classification = classifier.classify(product_text);
    let tariff = compute_tariff(index, &classification.hts_code, &classification.country_of_origin);

    let price_analysis = price.map(|p| {
        let cost = tariff.cost_at(p);
        PriceAnalysis {
            retail_price: p,
            estimated_tariff_cost: cost,
            price_without_tariff: to_cents(p - cost),
            tariff_as_pct_of_price: if p > Money::ZERO {
                pct(cost / p)
            } else {
                "0.0%".to_string()
            },
        }
    });

    ProductAnalysis {
        input: product_text.to_string(),
        classification,
        tariff,
        price_analysis,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_keyword_match() {
        let c = KeywordClassifier.classify("Samsung 65 inch OLED TV");
        assert_eq!(c.hts_code, "8528.72.64");
        assert_eq!(c.country_of_origin, "CN");
        assert_eq!(c.category, Category::Electronics);
        assert_eq!(c.confidence, Confidence::Medium);
    }

    #[test]
    fn test_specific_rules_beat_generic_ones() {
        // "stainless steel" must win before any clothing/table keyword.
        let c = KeywordClassifier.classify("Instant Pot stainless steel pressure cooker");
        assert_eq!(c.hts_code, "7323.93.00");
        assert_eq!(c.category, Category::SteelAluminum);
    }

    #[test]
    fn test_unmatched_input_degrades_to_default() {
        let c = KeywordClassifier.classify("mystery object");
        assert_eq!(c.hts_code, "9999.99.99");
        assert_eq!(c.country_of_origin, "CN");
        assert_eq!(c.confidence, Confidence::Low);
    }

    #[test]
    fn test_long_names_truncated() {
        let long = "x".repeat(200);
        let c = KeywordClassifier.classify(&long);
        assert_eq!(c.product_name.len(), 50);
    }

    #[test]
    fn test_analyze_product_with_price() {
        let index = ScheduleIndex::embedded().unwrap();
        let analysis = analyze_product(
            &index,
            &KeywordClassifier,
            "Sony WF-1000XM5 wireless earbuds",
            Some(dec!(348.00)),
        );
        assert_eq!(analysis.classification.hts_code, "8518.30.20");
        let pa = analysis.price_analysis.unwrap();
        assert_eq!(
            pa.retail_price - pa.estimated_tariff_cost,
            pa.price_without_tariff
        );
    }

    #[test]
    fn test_analyze_product_without_price() {
        let index = ScheduleIndex::embedded().unwrap();
        let analysis = analyze_product(&index, &KeywordClassifier, "LEGO Star Wars set", None);
        assert!(analysis.price_analysis.is_none());
        assert_eq!(analysis.tariff.hts_code, "9503.00.00");
    }
}
