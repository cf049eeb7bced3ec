use once_cell::sync::Lazy;
use tracing::{debug, trace};

use super::calculator::round_currency;
use super::{BillingError, CostBreakdown, LineItem, Result, TariffSlab};
use crate::config::TariffConfig;

/// Engine built from the reference tariff, shared for the lifetime of the process
static DEFAULT_ENGINE: Lazy<TariffEngine> = Lazy::new(TariffEngine::default);

/// Prices consumption against a validated slab table
#[derive(Debug, Clone)]
pub struct TariffEngine {
    config: TariffConfig,
}

impl Default for TariffEngine {
    fn default() -> Self {
        Self {
            config: TariffConfig::default(),
        }
    }
}

impl TariffEngine {
    /// Build an engine, rejecting tables with gaps, overlaps or bad constants
    pub fn new(config: TariffConfig) -> Result<Self> {
        config.validate()?;
        debug!(
            "Tariff engine ready: {} slabs, surcharge {}/unit, tax {}",
            config.slabs.len(),
            config.surcharge_rate,
            config.tax_rate
        );
        Ok(Self { config })
    }

    /// Engine for the reference tariff
    pub fn reference() -> &'static TariffEngine {
        &DEFAULT_ENGINE
    }

    pub fn config(&self) -> &TariffConfig {
        &self.config
    }

    /// Itemized bill for `units` of consumption in one billing period
    pub fn price_usage(&self, units: f64) -> Result<CostBreakdown> {
        if !units.is_finite() || units < 0.0 {
            return Err(BillingError::InvalidUnits(units));
        }

        let config = &self.config;
        let mut line_items = Vec::new();
        let mut remaining = units;
        let mut lower = 0.0;

        for slab in &config.slabs {
            if remaining <= 0.0 {
                break;
            }

            let billed = match slab.max {
                Some(max) => remaining.min(f64::from(max) - lower),
                None => remaining,
            };

            if billed > 0.0 {
                let cost = round_currency(billed * slab.rate);
                trace!("Slab {}: {} units x {} = {}", slab.label(), billed, slab.rate, cost);
                line_items.push(LineItem {
                    label: slab.label(),
                    units_charged: billed,
                    rate: slab.rate,
                    cost,
                });
            }

            remaining -= billed;
            if let Some(max) = slab.max {
                lower = f64::from(max);
            }
        }

        let base_cost = round_currency(line_items.iter().map(|item| item.cost).sum());
        let surcharge_amount = round_currency(units * config.surcharge_rate);
        let subtotal = round_currency(base_cost + surcharge_amount + config.fixed_charges);
        let tax_amount = round_currency(subtotal * config.tax_rate);
        let total_cost = round_currency(subtotal + tax_amount + config.flat_fee);

        let (next_slab_threshold_units, approaching_next_slab) = self.slab_warning(units);

        Ok(CostBreakdown {
            units,
            line_items,
            base_cost,
            surcharge_amount,
            fixed_charges: config.fixed_charges,
            subtotal,
            tax_amount,
            flat_fee: config.flat_fee,
            total_cost,
            next_slab_threshold_units,
            approaching_next_slab,
        })
    }

    /// Slab whose rate applies to the last unit of `units`, with its index
    pub fn current_slab(&self, units: f64) -> Option<(usize, &TariffSlab)> {
        self.config
            .slabs
            .iter()
            .enumerate()
            .find(|(_, slab)| match slab.max {
                Some(max) => units <= f64::from(max),
                None => true,
            })
    }

    fn slab_warning(&self, units: f64) -> (Option<f64>, bool) {
        let Some((index, slab)) = self.current_slab(units) else {
            return (None, false);
        };
        let Some(max) = slab.max else {
            return (None, false);
        };

        let threshold = f64::from(max) - units;
        let exempt = index == 0 && !self.config.warn_in_base_slab;
        let approaching = !exempt && threshold <= self.config.warning_threshold_units;

        (Some(threshold), approaching)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price(units: f64) -> CostBreakdown {
        TariffEngine::reference().price_usage(units).unwrap()
    }

    #[test]
    fn test_first_slab_boundary() {
        let breakdown = price(50.0);
        assert_eq!(breakdown.base_cost, 197.5);
        assert_eq!(breakdown.line_items.len(), 1);
    }

    #[test]
    fn test_second_slab_starts_at_51() {
        let breakdown = price(51.0);
        assert_eq!(breakdown.base_cost, 205.24);
        assert_eq!(breakdown.line_items.len(), 2);
        assert_eq!(breakdown.line_items[1].units_charged, 1.0);
        assert_eq!(breakdown.line_items[1].rate, 7.74);
    }

    #[test]
    fn test_full_breakdown_for_150_units() {
        let breakdown = price(150.0);
        let costs: Vec<f64> = breakdown.line_items.iter().map(|i| i.cost).collect();
        assert_eq!(costs, vec![197.5, 387.0, 503.0]);
        assert_eq!(breakdown.base_cost, 1087.5);
        assert_eq!(breakdown.surcharge_amount, 715.5);
        assert_eq!(breakdown.subtotal, 2003.0);
        assert_eq!(breakdown.tax_amount, 340.51);
        assert_eq!(breakdown.flat_fee, 35.0);
        assert_eq!(breakdown.total_cost, 2378.51);
    }

    #[test]
    fn test_top_slab_is_unbounded() {
        let breakdown = price(1000.0);
        assert_eq!(breakdown.line_items.len(), 6);
        let top = breakdown.line_items.last().unwrap();
        assert_eq!(top.label, "701+");
        assert_eq!(top.rate, 28.30);
        assert_eq!(top.units_charged, 300.0);
        assert_eq!(breakdown.next_slab_threshold_units, None);
        assert!(!breakdown.approaching_next_slab);
    }

    #[test]
    fn test_zero_units_pays_fixed_charges_only() {
        let breakdown = price(0.0);
        assert!(breakdown.line_items.is_empty());
        assert_eq!(breakdown.base_cost, 0.0);
        assert_eq!(breakdown.subtotal, 200.0);
        assert_eq!(breakdown.tax_amount, 34.0);
        assert_eq!(breakdown.total_cost, 269.0);
    }

    #[test]
    fn test_fractional_units_are_not_truncated() {
        let breakdown = price(50.5);
        assert_eq!(breakdown.line_items.len(), 2);
        assert_eq!(breakdown.line_items[1].units_charged, 0.5);
        assert_eq!(breakdown.line_items[1].cost, 3.87);
        assert_eq!(breakdown.base_cost, 201.37);
    }

    #[test]
    fn test_rejects_invalid_units() {
        let engine = TariffEngine::reference();
        for units in [-1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                engine.price_usage(units),
                Err(BillingError::InvalidUnits(_))
            ));
        }
    }

    #[test]
    fn test_slab_warning_near_boundary() {
        let breakdown = price(90.0);
        assert!(breakdown.approaching_next_slab);
        assert_eq!(breakdown.next_slab_threshold_units, Some(10.0));

        let breakdown = price(150.0);
        assert!(!breakdown.approaching_next_slab);
        assert_eq!(breakdown.next_slab_threshold_units, Some(50.0));
    }

    #[test]
    fn test_base_slab_is_exempt_from_warning() {
        let breakdown = price(40.0);
        assert!(!breakdown.approaching_next_slab);
        assert_eq!(breakdown.next_slab_threshold_units, Some(10.0));

        let config = TariffConfig {
            warn_in_base_slab: true,
            ..TariffConfig::default()
        };
        let engine = TariffEngine::new(config).unwrap();
        assert!(engine.price_usage(40.0).unwrap().approaching_next_slab);
    }

    #[test]
    fn test_warning_threshold_is_inclusive() {
        let breakdown = price(80.0);
        assert!(breakdown.approaching_next_slab);
        assert_eq!(breakdown.next_slab_threshold_units, Some(20.0));

        let breakdown = price(79.5);
        assert!(!breakdown.approaching_next_slab);
        assert_eq!(breakdown.next_slab_threshold_units, Some(20.5));
    }

    #[test]
    fn test_fractional_units_just_past_boundary() {
        let breakdown = price(100.5);
        assert!(!breakdown.approaching_next_slab);
        assert_eq!(breakdown.next_slab_threshold_units, Some(99.5));
        assert_eq!(breakdown.line_items.len(), 3);
        assert_eq!(breakdown.line_items[2].units_charged, 0.5);
    }

    #[test]
    fn test_warning_at_exact_slab_max() {
        let breakdown = price(100.0);
        assert!(breakdown.approaching_next_slab);
        assert_eq!(breakdown.next_slab_threshold_units, Some(0.0));
    }

    #[test]
    fn test_units_are_conserved() {
        let mut units = 0.0;
        while units <= 1500.0 {
            let breakdown = price(units);
            assert!(
                (breakdown.units_charged() - units).abs() < 1e-9,
                "units lost at {}",
                units
            );
            units += 7.5;
        }
    }

    #[test]
    fn test_total_cost_is_monotonic() {
        let mut previous = price(0.0).total_cost;
        for step in 1..=4000 {
            let units = f64::from(step) * 0.25;
            let total = price(units).total_cost;
            assert!(total >= previous, "total dropped at {} units", units);
            previous = total;
        }
    }

    #[test]
    fn test_pricing_is_idempotent() {
        let first = price(437.25);
        let second = price(437.25);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_custom_tariff_is_used() {
        let config = TariffConfig {
            surcharge_rate: 0.0,
            tax_rate: 0.0,
            flat_fee: 0.0,
            fixed_charges: 0.0,
            slabs: vec![
                TariffSlab::bounded(0, 100, 1.0),
                TariffSlab::unbounded(101, 2.0),
            ],
            ..TariffConfig::default()
        };
        let engine = TariffEngine::new(config).unwrap();
        let breakdown = engine.price_usage(150.0).unwrap();
        assert_eq!(breakdown.base_cost, 200.0);
        assert_eq!(breakdown.total_cost, 200.0);
    }

    #[test]
    fn test_new_rejects_invalid_tariff() {
        let config = TariffConfig {
            slabs: Vec::new(),
            ..TariffConfig::default()
        };
        assert!(matches!(
            TariffEngine::new(config),
            Err(BillingError::InvalidTariff(_))
        ));
    }
}
