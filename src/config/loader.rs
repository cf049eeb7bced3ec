use super::types::TariffConfig;
use crate::billing::BillingError;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access tariff file: {0}")]
    Io(#[from] std::io::Error),

    #[error("tariff file is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize tariff: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Invalid(#[from] BillingError),
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the tariff from the default location, falling back to the reference table
    pub fn load() -> TariffConfig {
        TariffConfig::load().unwrap_or_else(|e| {
            tracing::warn!("Using reference tariff: {}", e);
            TariffConfig::default()
        })
    }

    /// Read and validate a tariff file
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<TariffConfig, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config: TariffConfig = toml::from_str(&content)?;
        config.validate()?;
        debug!(
            "Loaded tariff from {} ({} slabs)",
            path.display(),
            config.slabs.len()
        );
        Ok(config)
    }
}

impl TariffConfig {
    /// Load tariff from default location, env overrides applied
    pub fn load() -> Result<TariffConfig, ConfigError> {
        let config_path = Self::get_config_path();

        let config = if config_path.exists() {
            ConfigLoader::load_from_path(&config_path)?
        } else {
            debug!("No tariff file at {}", config_path.display());
            TariffConfig::default()
        };

        let config = config.with_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Save tariff to the given path, creating parent directories
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default tariff file path (~/.config/volt/tariff.toml)
    pub fn get_config_path() -> PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("volt").join("tariff.toml")
        } else {
            PathBuf::from(".config/volt/tariff.toml")
        }
    }

    /// Write the reference tariff to `path` unless a file already exists there
    pub fn init_at<P: AsRef<Path>>(path: P) -> Result<bool, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            println!("Tariff already exists at {}", path.display());
            return Ok(false);
        }

        TariffConfig::default().save_to(path)?;
        println!("Created tariff at {}", path.display());
        Ok(true)
    }

    /// Validate tariff
    pub fn check(&self) -> Result<(), ConfigError> {
        self.validate()?;
        Ok(())
    }

    /// Print tariff as TOML
    pub fn print(&self) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        println!("{}", content);
        Ok(())
    }
}
