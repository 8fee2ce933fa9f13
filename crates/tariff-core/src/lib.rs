pub mod cart;
pub mod category;
pub mod classify;
pub mod country;
pub mod dashboard;
pub mod error;
pub mod fta;
pub mod rate;
pub mod schedule;
pub mod surcharge;
pub mod swap;
pub mod tariff;
pub mod types;

pub use error::TariffError;
pub use types::*;

/// Standard result type for all tariff operations
pub type TariffResult<T> = Result<T, TariffError>;
