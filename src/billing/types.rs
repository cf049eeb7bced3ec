use serde::{Deserialize, Serialize};

/// One tier of a progressive tariff. `max: None` marks the unbounded top slab.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TariffSlab {
    pub min: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
    pub rate: f64,
}

impl TariffSlab {
    pub const fn bounded(min: u32, max: u32, rate: f64) -> Self {
        Self {
            min,
            max: Some(max),
            rate,
        }
    }

    pub const fn unbounded(min: u32, rate: f64) -> Self {
        Self {
            min,
            max: None,
            rate,
        }
    }

    /// Human readable range, e.g. "51-100" or "701+"
    pub fn label(&self) -> String {
        match self.max {
            Some(max) => format!("{}-{}", self.min, max),
            None => format!("{}+", self.min),
        }
    }
}

/// Units billed at a single slab's rate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    pub label: String,
    pub units_charged: f64,
    pub rate: f64,
    pub cost: f64,
}

/// Itemized bill for a consumption figure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub units: f64,
    pub line_items: Vec<LineItem>,
    pub base_cost: f64,
    pub surcharge_amount: f64,
    pub fixed_charges: f64,
    pub subtotal: f64,
    pub tax_amount: f64,
    pub flat_fee: f64,
    pub total_cost: f64,
    /// Units left before the next slab's rate applies. None in the top slab.
    pub next_slab_threshold_units: Option<f64>,
    pub approaching_next_slab: bool,
}

impl CostBreakdown {
    /// Total units across all line items
    pub fn units_charged(&self) -> f64 {
        self.line_items.iter().map(|item| item.units_charged).sum()
    }

    /// Average price paid per unit, all charges included
    pub fn effective_rate(&self) -> Option<f64> {
        if self.units > 0.0 {
            Some(self.total_cost / self.units)
        } else {
            None
        }
    }
}

/// Actual figures of a previous billing period, supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferencePeriod {
    pub usage_units: f64,
    pub total_cost: f64,
}

/// Projected period vs. reference period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodComparison {
    /// None when the reference usage is zero
    pub percentage_change_usage: Option<f64>,
    /// None when the reference cost is zero
    pub percentage_change_cost: Option<f64>,
    pub absolute_difference_cost: f64,
}

/// End-of-period projection built from month-to-date usage
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResult {
    pub usage_to_date: f64,
    pub days_elapsed: u32,
    pub days_in_period: u32,
    pub daily_average_units: f64,
    pub projected_usage_units: f64,
    pub projected_cost: CostBreakdown,
    /// None when no reference period was supplied
    pub comparison_to_reference_period: Option<PeriodComparison>,
}

/// Projected bill measured against a user-set budget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStatus {
    pub budget: f64,
    pub projected_cost: f64,
    pub remaining: f64,
    pub percent_used: f64,
    pub over_budget: bool,
}
