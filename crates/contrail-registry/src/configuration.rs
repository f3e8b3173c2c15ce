//! Configuration management for contrail-registry
//!
//! Sources, lowest priority first: built-in defaults, the YAML config file,
//! `CONTRAIL_REGISTRY__*` environment variables, then command line flags.

use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use contrail_common::ENV_PREFIX;

use crate::cli::Cli;
use crate::logging::{LogRotation, LoggingConfig};

/// Config file read when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "conf/registry.yml";

pub const REGISTRY_CATALOG: &str = "registry.catalog";
pub const LOG_LEVEL: &str = "log.level";
pub const LOG_CONSOLE: &str = "log.console";
pub const LOG_FILE: &str = "log.file";
pub const LOG_DIR: &str = "log.dir";
pub const LOG_ROTATION: &str = "log.rotation";

/// Application configuration loaded from config files and environment
#[derive(Clone, Debug, Default)]
pub struct Configuration {
    pub config: Config,
}

impl Configuration {
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        // An explicit --config must exist; the default file is optional
        let file = match &cli.config {
            Some(path) => File::from(path.as_path()).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let mut builder = Config::builder()
            .set_default(LOG_LEVEL, "info")?
            .set_default(LOG_CONSOLE, true)?
            .set_default(LOG_FILE, false)?
            .set_default(LOG_ROTATION, "daily")?
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        if let Some(catalog) = &cli.catalog {
            builder = builder.set_override(REGISTRY_CATALOG, catalog.display().to_string())?;
        }
        if let Some(level) = &cli.log_level {
            builder = builder.set_override(LOG_LEVEL, level.as_str())?;
        }

        Ok(Configuration {
            config: builder.build()?,
        })
    }

    // ========================================================================
    // Registry Configuration
    // ========================================================================

    /// Catalog file replacing the built-in one, if configured.
    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.config
            .get_string(REGISTRY_CATALOG)
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
    }

    // ========================================================================
    // Logging Configuration
    // ========================================================================

    pub fn log_level(&self) -> String {
        self.config
            .get_string(LOG_LEVEL)
            .unwrap_or("info".to_string())
    }

    pub fn log_console(&self) -> bool {
        self.config.get_bool(LOG_CONSOLE).unwrap_or(true)
    }

    pub fn log_file(&self) -> bool {
        self.config.get_bool(LOG_FILE).unwrap_or(false)
    }

    pub fn log_dir(&self) -> Option<String> {
        self.config.get_string(LOG_DIR).ok()
    }

    pub fn log_rotation(&self) -> LogRotation {
        self.config
            .get_string(LOG_ROTATION)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(LogRotation::Daily)
    }

    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig::from_config(
            self.log_dir(),
            self.log_console(),
            self.log_file(),
            self.log_level(),
            self.log_rotation(),
        )
    }
}
