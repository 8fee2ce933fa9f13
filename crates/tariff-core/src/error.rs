use thiserror::Error;

#[derive(Debug, Error)]
pub enum TariffError {
    #[error("Tariff schedule unavailable at '{path}': {reason}")]
    ScheduleUnavailable { path: String, reason: String },

    #[error("Tariff schedule malformed: {0}")]
    ScheduleMalformed(String),

    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for TariffError {
    fn from(e: serde_json::Error) -> Self {
        TariffError::SerializationError(e.to_string())
    }
}

impl From<csv::Error> for TariffError {
    fn from(e: csv::Error) -> Self {
        TariffError::ScheduleMalformed(e.to_string())
    }
}
