use thiserror::Error;

/// Validation failures raised by the tariff and forecast engines.
///
/// Every variant describes malformed caller input; nothing here is transient.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BillingError {
    #[error("units must be a finite, non-negative number (got {0})")]
    InvalidUnits(f64),

    #[error("invalid billing period: {elapsed} elapsed of {total} days")]
    InvalidPeriod { elapsed: u32, total: u32 },

    #[error("invalid tariff: {0}")]
    InvalidTariff(String),

    #[error("budget must be a finite, positive amount (got {0})")]
    InvalidBudget(f64),

    #[error("meter reading must be a finite number (got {0})")]
    InvalidReading(f64),

    #[error("current reading {current} is lower than previous reading {previous}")]
    ReadingRegression { current: f64, previous: f64 },
}

pub type Result<T> = std::result::Result<T, BillingError>;
