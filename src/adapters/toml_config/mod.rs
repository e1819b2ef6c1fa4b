// TOML config adapter - Layered configuration from file and environment

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::errors::*;
use crate::domain::template::NamingTemplate;
use crate::ports::*;

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "FREEBOT_CONFIG";
pub const LOG_LEVEL_ENV: &str = "FREEBOT_LOG_LEVEL";
pub const FFPROBE_ENV: &str = "FREEBOT_FFPROBE";
pub const CATALOG_URL_ENV: &str = "FREEBOT_CATALOG_URL";
pub const TEMPLATE_ENV: &str = "FREEBOT_TEMPLATE";

/// Config file picked up from the working directory when nothing else is named
pub const DEFAULT_CONFIG_FILE: &str = "freebot.toml";

/// TOML configuration adapter
///
/// Layering, lowest first: built-in defaults, the TOML file, `FREEBOT_*`
/// environment overrides. Command-line flags are applied by the caller.
pub struct TomlConfigAdapter {
    env: HashMap<String, String>,
    default_path: PathBuf,
}

impl TomlConfigAdapter {
    /// Snapshot `FREEBOT_*` variables from the process environment
    pub fn new() -> Self {
        let env = std::env::vars()
            .filter(|(key, _)| key.starts_with("FREEBOT_"))
            .collect();
        Self::with_env(env)
    }

    /// Use a fixed environment instead of the process one
    pub fn with_env(env: HashMap<String, String>) -> Self {
        Self {
            env,
            default_path: PathBuf::from(DEFAULT_CONFIG_FILE),
        }
    }

    pub fn with_default_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.default_path = path.into();
        self
    }

    /// Which file to read, if any. A file named explicitly must exist; the
    /// working-directory default is optional.
    fn resolve_path(&self, file_path: Option<&Path>) -> Result<Option<PathBuf>, DomainError> {
        let explicit = file_path
            .map(Path::to_path_buf)
            .or_else(|| self.env.get(CONFIG_PATH_ENV).map(PathBuf::from));

        match explicit {
            Some(path) if path.is_file() => Ok(Some(path)),
            Some(path) => Err(DomainError::ConfigurationError(format!(
                "Config file does not exist: {}",
                path.display()
            ))),
            None if self.default_path.is_file() => Ok(Some(self.default_path.clone())),
            None => Ok(None),
        }
    }

    fn parse_file(path: &Path) -> Result<AppConfig, DomainError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::ConfigurationError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        toml::from_str(&content).map_err(|e| {
            DomainError::ConfigurationError(format!(
                "Failed to parse TOML config {}: {}",
                path.display(),
                e
            ))
        })
    }

    fn apply_env_overrides(&self, config: &mut AppConfig) {
        if let Some(level) = self.env.get(LOG_LEVEL_ENV) {
            config.log_level = level.clone();
        }
        if let Some(ffprobe) = self.env.get(FFPROBE_ENV) {
            config.probe.ffprobe_path = ffprobe.clone();
        }
        if let Some(url) = self.env.get(CATALOG_URL_ENV) {
            config.catalog.base_url = url.clone();
        }
        if let Some(template) = self.env.get(TEMPLATE_ENV) {
            config.naming.template = template.clone();
        }
    }
}

impl Default for TomlConfigAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigPort for TomlConfigAdapter {
    async fn load_config(&self, file_path: Option<&Path>) -> Result<AppConfig, DomainError> {
        let mut config = match self.resolve_path(file_path)? {
            Some(path) => {
                debug!("Loading config from {}", path.display());
                Self::parse_file(&path)?
            }
            None => AppConfig::default(),
        };

        self.apply_env_overrides(&mut config);
        Ok(config)
    }

    async fn validate_config(&self, config: &AppConfig) -> Result<(), DomainError> {
        LogLevel::parse(&config.log_level)?;

        if config.probe.ffprobe_path.trim().is_empty() {
            return Err(DomainError::ConfigurationError(
                "probe.ffprobe_path cannot be empty".to_string(),
            ));
        }

        if !config.catalog.base_url.starts_with("http://")
            && !config.catalog.base_url.starts_with("https://")
        {
            return Err(DomainError::ConfigurationError(format!(
                "catalog.base_url must be an http(s) URL, got '{}'",
                config.catalog.base_url
            )));
        }

        if config.catalog.token_env.trim().is_empty() {
            return Err(DomainError::ConfigurationError(
                "catalog.token_env cannot be empty".to_string(),
            ));
        }

        if config.catalog.timeout_secs == 0 {
            return Err(DomainError::ConfigurationError(
                "catalog.timeout_secs must be greater than 0".to_string(),
            ));
        }

        if config.input.extensions.iter().all(|ext| ext.trim().is_empty()) {
            return Err(DomainError::ConfigurationError(
                "input.extensions must list at least one extension".to_string(),
            ));
        }

        NamingTemplate::parse(&config.naming.template)?;

        Ok(())
    }
}
