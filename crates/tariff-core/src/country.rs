use serde::{Deserialize, Serialize};

/// Country of manufacture, held canonically as an ISO 3166-1 alpha-2 code.
///
/// Construction never fails: free-text names map through a fixed table and
/// anything unrecognized degrades to a best-effort two-letter guess.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Country {
    iso2: String,
}

impl Country {
    /// Normalize free-text input (country name or existing 2-letter code).
    pub fn normalize(input: &str) -> Self {
        let s = input.trim().to_lowercase();

        if s.len() == 2 && display_name_for(&s.to_uppercase()).is_some() {
            return Country {
                iso2: s.to_uppercase(),
            };
        }

        if let Some(code) = name_to_iso2(&s) {
            return Country { iso2: code.into() };
        }

        // Best-effort guess: first two letters, uppercased.
        let guess: String = s.to_uppercase().chars().take(2).collect();
        tracing::debug!(input, guess = %guess, "unrecognized country input");
        Country { iso2: guess }
    }

    pub fn from_iso2(code: &str) -> Self {
        Country {
            iso2: code.trim().to_uppercase(),
        }
    }

    pub fn iso2(&self) -> &str {
        &self.iso2
    }

    /// Display name for known codes, falling back to the code itself.
    pub fn display_name(&self) -> String {
        display_name_for(&self.iso2)
            .map(str::to_string)
            .unwrap_or_else(|| self.iso2.clone())
    }

    /// Domestic origin (no import duty applies).
    pub fn is_domestic(&self) -> bool {
        self.iso2 == "US"
    }

    pub fn is_china(&self) -> bool {
        self.iso2 == "CN"
    }
}

fn name_to_iso2(name: &str) -> Option<&'static str> {
    let code = match name {
        "china" | "prc" => "CN",
        "united states" | "usa" | "us" => "US",
        "canada" => "CA",
        "mexico" => "MX",
        "japan" => "JP",
        "south korea" | "korea" => "KR",
        "germany" => "DE",
        "uk" | "united kingdom" => "GB",
        "france" => "FR",
        "india" => "IN",
        "vietnam" => "VN",
        "taiwan" => "TW",
        "brazil" => "BR",
        "australia" => "AU",
        "italy" => "IT",
        "spain" => "ES",
        "indonesia" => "ID",
        "thailand" => "TH",
        "malaysia" => "MY",
        "bangladesh" => "BD",
        "cambodia" => "KH",
        "philippines" => "PH",
        "turkey" => "TR",
        _ => return None,
    };
    Some(code)
}

fn display_name_for(iso2: &str) -> Option<&'static str> {
    let name = match iso2 {
        "CN" => "China",
        "US" => "United States",
        "CA" => "Canada",
        "MX" => "Mexico",
        "JP" => "Japan",
        "KR" => "South Korea",
        "DE" => "Germany",
        "GB" => "United Kingdom",
        "FR" => "France",
        "IN" => "India",
        "VN" => "Vietnam",
        "TW" => "Taiwan",
        "BR" => "Brazil",
        "AU" => "Australia",
        "BD" => "Bangladesh",
        "ID" => "Indonesia",
        "TH" => "Thailand",
        "MY" => "Malaysia",
        "KH" => "Cambodia",
        "PH" => "Philippines",
        _ => return None,
    };
    Some(name)
}
