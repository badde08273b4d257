use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use std::path::{Path, PathBuf};

use crate::domain::dashboard_config::DashboardConfig;
use crate::domain::error::{AppError, Result};

pub const DEFAULT_CONFIG_FILE: &str = "dashboard.toml";
pub const ENV_PREFIX: &str = "DASHBOARD_";

/// Layered configuration: defaults, then `dashboard.toml`, then
/// `DASHBOARD_*` environment variables (`__` separates nested keys)
pub struct ConfigService {
    config_path: PathBuf,
}

impl ConfigService {
    pub fn new() -> Self {
        Self::with_path(DEFAULT_CONFIG_FILE)
    }

    pub fn with_path(path: impl AsRef<Path>) -> Self {
        Self {
            config_path: path.as_ref().to_path_buf(),
        }
    }

    pub fn figment(&self) -> Figment {
        Figment::from(Serialized::defaults(DashboardConfig::default()))
            .merge(Toml::file(&self.config_path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn load(&self) -> Result<DashboardConfig> {
        let config: DashboardConfig = self.figment().extract()?;
        config
            .validate()
            .map_err(|e| AppError::ConfigError(format!("Invalid dashboard config: {}", e)))?;
        Ok(config)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}
