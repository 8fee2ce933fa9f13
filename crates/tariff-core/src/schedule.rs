use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::TariffError;
use crate::TariffResult;

/// Bundled subset of the HTS table, same column contract as the published CSV.
const EMBEDDED_SCHEDULE: &str = include_str!("../data/hts_subset.csv");

/// One row of the tariff schedule. Immutable after load.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleEntry {
    pub hts_number: String,
    /// Digits-only form used for prefix matching.
    pub normalized: String,
    pub description: String,
    pub general_rate: String,
    pub special_rate: String,
}

impl ScheduleEntry {
    pub fn has_rate(&self) -> bool {
        !self.general_rate.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct ScheduleRow {
    #[serde(rename = "HTS Number")]
    hts_number: String,
    #[serde(rename = "Description", default)]
    description: String,
    #[serde(rename = "General Rate of Duty", default)]
    general_rate: String,
    #[serde(rename = "Special Rate of Duty", default)]
    special_rate: String,
}

/// Read-only index over the tariff schedule, preserving table order.
#[derive(Debug, Clone)]
pub struct ScheduleIndex {
    entries: Vec<ScheduleEntry>,
}

static GLOBAL: OnceLock<ScheduleIndex> = OnceLock::new();

impl ScheduleIndex {
    /// Load the schedule from a CSV file. A missing or unreadable file is
    /// the engine's one fatal startup condition.
    pub fn from_csv_path(path: impl AsRef<Path>) -> TariffResult<Self> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| TariffError::ScheduleUnavailable {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        Self::from_csv_str(&contents)
    }

    /// Parse the schedule bundled with the crate.
    pub fn embedded() -> TariffResult<Self> {
        Self::from_csv_str(EMBEDDED_SCHEDULE)
    }

    /// Process-wide read-only handle over the embedded table. Loaded once;
    /// concurrent first callers cannot observe a partially built index.
    pub fn global() -> &'static ScheduleIndex {
        GLOBAL.get_or_init(|| {
            // The embedded table is compiled in; parse failure here is a
            // build defect, not a runtime condition.
            ScheduleIndex::embedded().expect("embedded schedule parses")
        })
    }

    fn from_csv_str(contents: &str) -> TariffResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(contents.as_bytes());

        let mut entries = Vec::new();
        for row in reader.deserialize::<ScheduleRow>() {
            let row = row?;
            let hts_number = row.hts_number.trim().to_string();
            // Blank-code rows are section headers in the published file.
            if hts_number.is_empty() {
                continue;
            }
            let normalized: String = hts_number.chars().filter(|c| c.is_ascii_digit()).collect();
            entries.push(ScheduleEntry {
                hts_number,
                normalized,
                description: row.description.trim().to_string(),
                general_rate: row.general_rate.trim().to_string(),
                special_rate: row.special_rate.trim().to_string(),
            });
        }

        if entries.is_empty() {
            return Err(TariffError::ScheduleMalformed(
                "schedule contains no usable rows".to_string(),
            ));
        }

        tracing::info!(entries = entries.len(), "loaded tariff schedule");
        Ok(ScheduleIndex { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best-matching entry for a classification code of any digit length.
    ///
    /// Tries prefix lengths {query length, 10, 8, 6, 4} in order. At each
    /// length, prefers the first entry (stable table order) carrying a
    /// non-empty duty-rate string; falls back to the first match outright.
    /// Codes are often only known to 6 or 8 digits, and exact 10-digit rows
    /// may not carry a usable rate string.
    pub fn find(&self, code: &str) -> Option<&ScheduleEntry> {
        let target: String = code.chars().filter(|c| c.is_ascii_digit()).collect();
        if target.is_empty() {
            return None;
        }

        for length in [target.len(), 10, 8, 6, 4] {
            let prefix = &target[..target.len().min(length)];
            let mut first_match: Option<&ScheduleEntry> = None;
            for entry in &self.entries {
                if !entry.normalized.starts_with(prefix) {
                    continue;
                }
                if entry.has_rate() {
                    return Some(entry);
                }
                first_match.get_or_insert(entry);
            }
            if let Some(entry) = first_match {
                return Some(entry);
            }
        }

        None
    }
}
