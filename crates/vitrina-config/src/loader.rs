//! Configuration loader with layered sources.

use crate::AppConfig;
use config::{Config, ConfigError, Environment, File};
use std::path::Path;
use tracing::{debug, info, warn};
use vitrina_core::VitrinaError;

/// Layered configuration loader.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Uncommitted local overrides
    /// 4. Environment variables with `VITRINA_` prefix
    pub fn new(config_dir: impl Into<String>) -> Result<Self, VitrinaError> {
        let config = Self::load_config(&config_dir.into())?;
        Ok(Self { config })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, VitrinaError> {
        Self::new("./config")
    }

    /// Consumes the loader, returning the configuration.
    #[must_use]
    pub fn into_config(self) -> AppConfig {
        self.config
    }

    /// Loads configuration from the specified directory.
    fn load_config(config_dir: &str) -> Result<AppConfig, VitrinaError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var("VITRINA_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{}/{}.toml", config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        // VITRINA_CACHE__REDIS_URL -> cache.redis_url
        builder = builder.add_source(
            Environment::with_prefix("VITRINA")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let app_config: AppConfig = builder
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(config_error_to_vitrina_error)?;

        Self::validate_config(&app_config)?;

        Ok(app_config)
    }

    /// Validates the configuration.
    fn validate_config(config: &AppConfig) -> Result<(), VitrinaError> {
        if config.cache.redis_url_is_invalid() {
            warn!("Ignoring unusable cache.redis_url; running with the in-process cache only");
        } else if config.cache.redis_url().is_none() {
            info!("No Redis configured; running with the in-process cache only");
        }

        if config.cache.sweep_interval_secs == 0 {
            return Err(VitrinaError::Configuration(
                "cache.sweep_interval_secs must be greater than zero".to_string(),
            ));
        }

        if config.cache.remote_timeout_ms == 0 {
            return Err(VitrinaError::Configuration(
                "cache.remote_timeout_ms must be greater than zero".to_string(),
            ));
        }

        if config.catalog.default_page_size == 0 {
            return Err(VitrinaError::Configuration(
                "catalog.default_page_size must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

fn config_error_to_vitrina_error(err: ConfigError) -> VitrinaError {
    VitrinaError::Configuration(err.to_string())
}
