use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;
use tracing::debug;

use super::calculator::{percentage_change, round_currency};
use super::{
    BillingError, CostBreakdown, ForecastResult, PeriodComparison, ReferencePeriod, Result,
    TariffEngine,
};

/// Project month-to-date usage onto the whole period and price the result
///
/// Assumes the average daily rate seen so far holds for the remaining days.
pub fn project_period(
    engine: &TariffEngine,
    usage_to_date: f64,
    days_elapsed: u32,
    days_in_period: u32,
    reference: Option<ReferencePeriod>,
) -> Result<ForecastResult> {
    if !usage_to_date.is_finite() || usage_to_date < 0.0 {
        return Err(BillingError::InvalidUnits(usage_to_date));
    }
    if days_elapsed == 0 || days_elapsed > days_in_period {
        return Err(BillingError::InvalidPeriod {
            elapsed: days_elapsed,
            total: days_in_period,
        });
    }

    let daily_average_units = usage_to_date / f64::from(days_elapsed);
    let projected_usage_units = daily_average_units * f64::from(days_in_period);
    let projected_cost = engine.price_usage(projected_usage_units)?;

    debug!(
        "Projected {} units over {} days from {} units in {} days",
        projected_usage_units, days_in_period, usage_to_date, days_elapsed
    );

    let comparison_to_reference_period = reference
        .map(|reference| compare_to_reference(projected_usage_units, &projected_cost, &reference));

    Ok(ForecastResult {
        usage_to_date,
        days_elapsed,
        days_in_period,
        daily_average_units,
        projected_usage_units,
        projected_cost,
        comparison_to_reference_period,
    })
}

/// Deltas between a projection and the caller's reference period
pub fn compare_to_reference(
    projected_usage_units: f64,
    projected_cost: &CostBreakdown,
    reference: &ReferencePeriod,
) -> PeriodComparison {
    PeriodComparison {
        percentage_change_usage: percentage_change(projected_usage_units, reference.usage_units),
        percentage_change_cost: percentage_change(projected_cost.total_cost, reference.total_cost),
        absolute_difference_cost: round_currency(projected_cost.total_cost - reference.total_cost),
    }
}

/// Calendar-month billing period, both ends inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BillingPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl BillingPeriod {
    /// Period covering the calendar month that contains `date`
    pub fn month_of(date: NaiveDate) -> Self {
        let start = date.with_day(1).unwrap_or(date);
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(start);
        Self { start, end }
    }

    pub fn days_in_period(&self) -> u32 {
        (self.end - self.start).num_days().max(0) as u32 + 1
    }

    /// Days from period start through `on` inclusive, clamped to the period
    pub fn days_elapsed(&self, on: NaiveDate) -> u32 {
        if on < self.start {
            return 0;
        }
        let on = on.min(self.end);
        (on - self.start).num_days() as u32 + 1
    }
}
