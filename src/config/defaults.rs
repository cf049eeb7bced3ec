use super::types::TariffConfig;
use crate::billing::TariffSlab;
use tracing::warn;

/// Reference residential slab table
pub const DEFAULT_SLABS: [TariffSlab; 6] = [
    TariffSlab::bounded(0, 50, 3.95),
    TariffSlab::bounded(51, 100, 7.74),
    TariffSlab::bounded(101, 200, 10.06),
    TariffSlab::bounded(201, 300, 18.15),
    TariffSlab::bounded(301, 700, 22.71),
    TariffSlab::unbounded(701, 28.30),
];

pub const DEFAULT_SURCHARGE_RATE: f64 = 4.77;
pub const DEFAULT_TAX_RATE: f64 = 0.17;
pub const DEFAULT_FLAT_FEE: f64 = 35.0;
pub const DEFAULT_FIXED_CHARGES: f64 = 200.0;
pub const DEFAULT_WARNING_THRESHOLD_UNITS: f64 = 20.0;

impl Default for TariffConfig {
    fn default() -> Self {
        TariffConfig {
            currency: "Rs".to_string(),
            surcharge_rate: DEFAULT_SURCHARGE_RATE,
            tax_rate: DEFAULT_TAX_RATE,
            flat_fee: DEFAULT_FLAT_FEE,
            fixed_charges: DEFAULT_FIXED_CHARGES,
            warning_threshold_units: DEFAULT_WARNING_THRESHOLD_UNITS,
            warn_in_base_slab: false,
            slabs: DEFAULT_SLABS.to_vec(),
        }
    }
}

impl TariffConfig {
    /// Apply VOLT_TAX_RATE, VOLT_SURCHARGE_RATE and VOLT_WARNING_THRESHOLD overrides
    ///
    /// An override that is not a finite, non-negative number is skipped and
    /// the loaded value kept.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(value) = env_override("VOLT_TAX_RATE") {
            self.tax_rate = value;
        }

        if let Some(value) = env_override("VOLT_SURCHARGE_RATE") {
            self.surcharge_rate = value;
        }

        if let Some(value) = env_override("VOLT_WARNING_THRESHOLD") {
            self.warning_threshold_units = value;
        }

        self
    }
}

fn env_override(key: &str) -> Option<f64> {
    let raw = std::env::var(key).ok()?;
    let value = parse_override(&raw);
    if value.is_none() {
        warn!("Ignoring {}={:?}: expected a finite, non-negative number", key, raw);
    }
    value
}

fn parse_override(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
}
