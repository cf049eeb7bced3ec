pub mod calculator;
pub mod error;
pub mod forecast;
pub mod tariff;
pub mod types;

pub use calculator::{budget_status, consumed_units, consumed_units_strict, round_currency};
pub use error::{BillingError, Result};
pub use forecast::{project_period, BillingPeriod};
pub use tariff::TariffEngine;
pub use types::{
    BudgetStatus, CostBreakdown, ForecastResult, LineItem, PeriodComparison, ReferencePeriod,
    TariffSlab,
};
