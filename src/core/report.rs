use crate::billing::{BudgetStatus, CostBreakdown, ForecastResult};
use std::fmt::Write;

/// Renders engine output as plain-text reports
pub struct ReportGenerator {
    currency: String,
}

impl ReportGenerator {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }

    pub fn render_bill(&self, breakdown: &CostBreakdown) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Bill for {} units", format_units(breakdown.units));

        for item in &breakdown.line_items {
            let _ = writeln!(
                out,
                "  {:<10} {:>9} x {:>6.2} = {}",
                item.label,
                format_units(item.units_charged),
                item.rate,
                self.amount(item.cost)
            );
        }

        let rows = [
            ("Energy charges", breakdown.base_cost),
            ("Fuel adjustment", breakdown.surcharge_amount),
            ("Fixed charges", breakdown.fixed_charges),
            ("Subtotal", breakdown.subtotal),
            ("GST", breakdown.tax_amount),
            ("TV fee", breakdown.flat_fee),
            ("Total", breakdown.total_cost),
        ];
        for (label, value) in rows {
            let _ = writeln!(out, "  {:<16} {}", label, self.amount(value));
        }

        if let Some(rate) = breakdown.effective_rate() {
            let _ = writeln!(out, "  {:<16} {}/unit", "Effective rate", self.amount(rate));
        }

        if let Some(warning) = slab_warning(breakdown) {
            let _ = writeln!(out, "  ! {}", warning);
        }

        out
    }

    pub fn render_forecast(&self, forecast: &ForecastResult) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Forecast: {} units so far over {}/{} days ({} units/day)",
            format_units(forecast.usage_to_date),
            forecast.days_elapsed,
            forecast.days_in_period,
            format_units(forecast.daily_average_units)
        );
        let _ = writeln!(
            out,
            "  Projected usage  {} units",
            format_units(forecast.projected_usage_units)
        );
        let _ = writeln!(
            out,
            "  Projected bill   {}",
            self.amount(forecast.projected_cost.total_cost)
        );

        match &forecast.comparison_to_reference_period {
            Some(comparison) => {
                let _ = writeln!(
                    out,
                    "  vs. reference    usage {} · cost {} ({})",
                    format_change(comparison.percentage_change_usage),
                    format_change(comparison.percentage_change_cost),
                    self.signed_amount(comparison.absolute_difference_cost)
                );
            }
            None => {
                let _ = writeln!(out, "  vs. reference    unavailable");
            }
        }

        if let Some(warning) = slab_warning(&forecast.projected_cost) {
            let _ = writeln!(out, "  ! Projected {}", warning.to_lowercase());
        }

        out
    }

    pub fn render_budget(&self, status: &BudgetStatus) -> String {
        let verdict = if status.over_budget {
            format!("over by {}", self.amount(-status.remaining))
        } else {
            format!("{} left", self.amount(status.remaining))
        };
        format!(
            "Budget {}: {:.1}% used, {}\n",
            self.amount(status.budget),
            status.percent_used,
            verdict
        )
    }

    fn amount(&self, value: f64) -> String {
        format!("{} {:.2}", self.currency, value)
    }

    fn signed_amount(&self, value: f64) -> String {
        if value < 0.0 {
            format!("-{}", self.amount(-value))
        } else {
            format!("+{}", self.amount(value))
        }
    }
}

fn slab_warning(breakdown: &CostBreakdown) -> Option<String> {
    if !breakdown.approaching_next_slab {
        return None;
    }
    breakdown
        .next_slab_threshold_units
        .map(|units| format!("Usage is {} units from the next slab", format_units(units)))
}

/// Format a unit count without trailing zeros
pub fn format_units(units: f64) -> String {
    if units.fract() == 0.0 {
        format!("{:.0}", units)
    } else {
        format!("{:.2}", units)
    }
}

fn format_change(change: Option<f64>) -> String {
    match change {
        Some(value) if value >= 0.0 => format!("+{:.1}%", value),
        Some(value) => format!("{:.1}%", value),
        None => "n/a".to_string(),
    }
}
