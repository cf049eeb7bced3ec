use crate::billing::{BillingError, TariffSlab};
use serde::{Deserialize, Serialize};

/// Tariff schedule: slab table plus the per-period constants layered on top
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffConfig {
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Fuel-price adjustment per unit, charged on total consumption
    pub surcharge_rate: f64,
    pub tax_rate: f64,
    /// Per-period fee added after tax (TV fee)
    pub flat_fee: f64,
    pub fixed_charges: f64,
    pub warning_threshold_units: f64,
    /// Raise slab warnings while still inside the lowest slab
    #[serde(default)]
    pub warn_in_base_slab: bool,
    pub slabs: Vec<TariffSlab>,
}

fn default_currency() -> String {
    "Rs".to_string()
}

impl TariffConfig {
    /// Check the slab table is contiguous and every constant is usable
    pub fn validate(&self) -> Result<(), BillingError> {
        let first = self
            .slabs
            .first()
            .ok_or_else(|| BillingError::InvalidTariff("no slabs configured".to_string()))?;

        if first.min != 0 {
            return Err(BillingError::InvalidTariff(format!(
                "first slab must start at 0, starts at {}",
                first.min
            )));
        }

        for (index, slab) in self.slabs.iter().enumerate() {
            if !slab.rate.is_finite() || slab.rate < 0.0 {
                return Err(BillingError::InvalidTariff(format!(
                    "slab {} has invalid rate {}",
                    slab.label(),
                    slab.rate
                )));
            }

            let is_last = index + 1 == self.slabs.len();
            match (slab.max, is_last) {
                (None, true) => {}
                (None, false) => {
                    return Err(BillingError::InvalidTariff(format!(
                        "only the last slab may be unbounded, found {}",
                        slab.label()
                    )));
                }
                (Some(_), true) => {
                    return Err(BillingError::InvalidTariff(
                        "last slab must be unbounded".to_string(),
                    ));
                }
                (Some(max), false) => {
                    if max < slab.min {
                        return Err(BillingError::InvalidTariff(format!(
                            "slab {} has max below min",
                            slab.label()
                        )));
                    }
                    let next = &self.slabs[index + 1];
                    let expected_min = max.checked_add(1).ok_or_else(|| {
                        BillingError::InvalidTariff(format!(
                            "slab {} max out of range",
                            slab.label()
                        ))
                    })?;
                    if next.min != expected_min {
                        return Err(BillingError::InvalidTariff(format!(
                            "slabs {} and {} are not contiguous",
                            slab.label(),
                            next.label()
                        )));
                    }
                }
            }
        }

        let constants = [
            ("surcharge_rate", self.surcharge_rate),
            ("tax_rate", self.tax_rate),
            ("flat_fee", self.flat_fee),
            ("fixed_charges", self.fixed_charges),
            ("warning_threshold_units", self.warning_threshold_units),
        ];
        for (name, value) in constants {
            if !value.is_finite() || value < 0.0 {
                return Err(BillingError::InvalidTariff(format!(
                    "{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}
