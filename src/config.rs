//! Configuration management and validation.
//!
//! Configuration is layered: built-in defaults, then an optional JSON file,
//! then environment variables, then command-line flags (applied by the CLI).

use crate::app::services::field_normalizers::CalendarContext;
use crate::constants::{
    APP_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_LOG_LEVEL, DEFAULT_TENANT_ID, DEFAULT_TIME_ZONE,
    ENV_STORE_PATH, ENV_TEMPLATE_DIR, ENV_TENANT, ENV_TIME_ZONE, TEMPLATE_STORE_FILE,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Template persistence settings
    pub templates: TemplatesConfig,

    /// Import defaults
    pub import: ImportConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Template persistence settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplatesConfig {
    /// JSON file holding every stored template
    pub store_path: PathBuf,

    /// Directory of template documents seeded at startup
    pub seed_dir: Option<PathBuf>,
}

/// Import defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Tenant stamped on transactions when the caller names none
    pub default_tenant: String,

    /// IANA zone or fixed UTC offset in which booking days start
    #[serde(alias = "utc_offset")]
    pub time_zone: String,

    /// Bank id used when the caller names none (otherwise `unknown`)
    pub default_bank: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level used when no verbosity flag is given
    pub level: String,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            store_path: Config::default_store_path(),
            seed_dir: None,
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            default_tenant: DEFAULT_TENANT_ID.to_string(),
            time_zone: DEFAULT_TIME_ZONE.to_string(),
            default_bank: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Default configuration file location
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            Error::configuration("Could not determine user configuration directory")
        })?;
        Ok(config_dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Default template store location (falls back to the working directory)
    pub fn default_store_path() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from("."))
            .join(TEMPLATE_STORE_FILE)
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file: {}", path.display()), e)
        })?;

        serde_json::from_str(&content).map_err(|e| {
            Error::serialization(format!("Invalid config file: {}", path.display()), e)
        })
    }

    /// Load configuration from defaults, an optional file and the environment
    ///
    /// An explicitly named file must exist. Without one, the default config
    /// path is used when present.
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Ok(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        config.apply_env(|key| std::env::var(key).ok());
        debug!("Layered configuration: {:?}", config);

        Ok(config)
    }

    /// Apply environment overrides; empty values are ignored
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = var(ENV_STORE_PATH) {
            self.templates.store_path = PathBuf::from(path);
        }
        if let Some(dir) = var(ENV_TEMPLATE_DIR) {
            self.templates.seed_dir = Some(PathBuf::from(dir));
        }
        if let Some(tenant) = var(ENV_TENANT) {
            self.import.default_tenant = tenant;
        }
        if let Some(zone) = var(ENV_TIME_ZONE) {
            self.import.time_zone = zone;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.import.default_tenant.trim().is_empty() {
            return Err(Error::configuration("default tenant must not be empty"));
        }

        if self.templates.store_path.as_os_str().is_empty() {
            return Err(Error::configuration("template store path must not be empty"));
        }

        self.calendar_context()?;
        Ok(())
    }

    /// Calendar context built from the configured time zone
    pub fn calendar_context(&self) -> Result<CalendarContext> {
        self.import.time_zone.parse()
    }

    /// Set the template store path
    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.templates.store_path = path.into();
        self
    }

    /// Set the seed directory
    pub fn with_seed_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.templates.seed_dir = Some(dir.into());
        self
    }

    /// Set the default tenant
    pub fn with_default_tenant(mut self, tenant: impl Into<String>) -> Self {
        self.import.default_tenant = tenant.into();
        self
    }

    /// Set the calendar context time zone
    pub fn with_time_zone(mut self, zone: impl Into<String>) -> Self {
        self.import.time_zone = zone.into();
        self
    }
}
