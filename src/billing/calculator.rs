use crate::billing::{BillingError, BudgetStatus, Result};
use tracing::warn;

/// Round a currency figure to 2 decimal places, half up
pub fn round_currency(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

/// Units consumed between two meter readings, clamped at zero
///
/// A reading lower than the previous one (meter replaced, reset, or a typo)
/// reports zero consumption rather than an error. Use
/// [`consumed_units_strict`] to reject regressions instead.
pub fn consumed_units(current: f64, previous: f64) -> Result<f64> {
    check_readings(current, previous)?;
    if current < previous {
        warn!(
            "Meter reading went backwards ({} -> {}), reporting zero usage",
            previous, current
        );
        return Ok(0.0);
    }
    Ok(current - previous)
}

fn check_readings(current: f64, previous: f64) -> Result<()> {
    for reading in [current, previous] {
        if !reading.is_finite() {
            return Err(BillingError::InvalidReading(reading));
        }
    }
    Ok(())
}

/// Units consumed between two meter readings, rejecting regressions
pub fn consumed_units_strict(current: f64, previous: f64) -> Result<f64> {
    check_readings(current, previous)?;
    if current < previous {
        return Err(BillingError::ReadingRegression { current, previous });
    }
    Ok(current - previous)
}

/// Relative change from `reference` to `value` in percent, None if reference is zero
pub fn percentage_change(value: f64, reference: f64) -> Option<f64> {
    if reference == 0.0 || !reference.is_finite() {
        return None;
    }
    Some(round_currency((value - reference) / reference * 100.0))
}

/// Measure a projected bill against a budget
pub fn budget_status(projected_cost: f64, budget: f64) -> Result<BudgetStatus> {
    if !budget.is_finite() || budget <= 0.0 {
        return Err(BillingError::InvalidBudget(budget));
    }

    Ok(BudgetStatus {
        budget,
        projected_cost,
        remaining: round_currency(budget - projected_cost),
        percent_used: round_currency(projected_cost / budget * 100.0),
        over_budget: projected_cost > budget,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_currency() {
        assert_eq!(round_currency(340.51000000000005), 340.51);
        assert_eq!(round_currency(12.346), 12.35);
        assert_eq!(round_currency(12.5), 12.5);
        assert_eq!(round_currency(0.004), 0.0);
        assert_eq!(round_currency(197.5), 197.5);
    }

    #[test]
    fn test_round_currency_half_up_for_negatives() {
        assert_eq!(round_currency(-0.125), -0.12);
        assert_eq!(round_currency(-0.126), -0.13);
        assert_eq!(round_currency(-500.0), -500.0);
    }

    #[test]
    fn test_consumed_units() {
        assert_eq!(consumed_units(1150.0, 1000.0), Ok(150.0));
        assert_eq!(consumed_units(100.0, 100.0), Ok(0.0));
        assert_eq!(consumed_units(100.5, 100.0), Ok(0.5));
    }

    #[test]
    fn test_consumed_units_clamps_regression() {
        assert_eq!(consumed_units(80.0, 100.0), Ok(0.0));
    }

    #[test]
    fn test_consumed_units_rejects_non_finite_readings() {
        for (current, previous) in [
            (f64::INFINITY, 0.0),
            (f64::NAN, 100.0),
            (100.0, f64::NEG_INFINITY),
        ] {
            assert!(matches!(
                consumed_units(current, previous),
                Err(BillingError::InvalidReading(_))
            ));
        }
    }

    #[test]
    fn test_consumed_units_strict() {
        assert_eq!(consumed_units_strict(1150.0, 1000.0), Ok(150.0));
        assert_eq!(
            consumed_units_strict(80.0, 100.0),
            Err(BillingError::ReadingRegression {
                current: 80.0,
                previous: 100.0
            })
        );
        assert!(matches!(
            consumed_units_strict(f64::INFINITY, 100.0),
            Err(BillingError::InvalidReading(_))
        ));
    }

    #[test]
    fn test_percentage_change() {
        assert_eq!(percentage_change(300.0, 250.0), Some(20.0));
        assert_eq!(percentage_change(200.0, 250.0), Some(-20.0));
        assert_eq!(percentage_change(10.0, 0.0), None);
    }

    #[test]
    fn test_budget_status() {
        let status = budget_status(2378.51, 3000.0).unwrap();
        assert_eq!(status.remaining, 621.49);
        assert_eq!(status.percent_used, 79.28);
        assert!(!status.over_budget);

        let status = budget_status(3500.0, 3000.0).unwrap();
        assert_eq!(status.remaining, -500.0);
        assert!(status.over_budget);
    }

    #[test]
    fn test_budget_status_rejects_invalid_budget() {
        assert!(matches!(
            budget_status(100.0, 0.0),
            Err(BillingError::InvalidBudget(_))
        ));
        assert!(budget_status(100.0, f64::NAN).is_err());
    }
}
