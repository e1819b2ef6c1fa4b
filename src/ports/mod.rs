// Ports - Interface definitions (contracts)

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::*;
use crate::domain::model::*;

/// Port for media container probing
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Probe first video stream height and field order plus container duration
    async fn probe(&self, file_path: &Path) -> Result<ProbeResult, DomainError>;
}

/// Port for the remote movie catalog
///
/// Each call is attempted exactly once.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogPort: Send + Sync {
    /// Search by free-text title, narrowed to a release year when known.
    /// Results keep the catalog's order.
    async fn search_movies(
        &self,
        query: &str,
        year: Option<u16>,
    ) -> Result<Vec<CatalogCandidate>, DomainError>;

    /// Fetch per-movie detail, including the authoritative runtime
    async fn fetch_movie_detail(&self, id: u64) -> Result<CatalogDetail, DomainError>;
}

/// Port for file system operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FsPort: Send + Sync {
    /// Resolve the single video file named by `input`.
    ///
    /// A file is returned as-is; a directory is scanned (non-recursively) for
    /// files with one of `extensions`.
    async fn find_video_file(
        &self,
        input: &Path,
        extensions: &[String],
    ) -> Result<PathBuf, DomainError>;

    /// Place `source` at `destination` using `mode`, creating missing parent
    /// directories. Never overwrites an existing destination.
    async fn place_file(
        &self,
        source: &Path,
        destination: &Path,
        mode: PlacementMode,
    ) -> Result<(), DomainError>;
}

/// Port for operator confirmation before a filesystem mutation
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConfirmPort: Send + Sync {
    /// Return `true` to proceed
    async fn confirm(&self, prompt: &str) -> Result<bool, DomainError>;
}

/// Catalog connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    pub base_url: String,
    /// Environment variable holding the bearer token
    pub token_env: String,
    pub language: Option<String>,
    pub timeout_secs: u64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.themoviedb.org/3".to_string(),
            token_env: "TMDB".to_string(),
            language: None,
            timeout_secs: 30,
        }
    }
}

/// Media probe settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    pub ffprobe_path: String,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            ffprobe_path: "ffprobe".to_string(),
        }
    }
}

/// Naming settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingSettings {
    pub template: String,
}

impl Default for NamingSettings {
    fn default() -> Self {
        Self {
            template: "{n} ({y}) [tbdbid-{id}] [{res}] [{run} mins]".to_string(),
        }
    }
}

/// Input selection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// Accepted video container extensions, without the dot
    pub extensions: Vec<String>,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mkv".to_string(), "mp4".to_string(), "avi".to_string()],
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    pub catalog: CatalogSettings,
    pub probe: ProbeSettings,
    pub naming: NamingSettings,
    pub input: InputSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            catalog: CatalogSettings::default(),
            probe: ProbeSettings::default(),
            naming: NamingSettings::default(),
            input: InputSettings::default(),
        }
    }
}

/// Port for configuration management
#[async_trait]
pub trait ConfigPort: Send + Sync {
    /// Load configuration: file (if any) over defaults, then environment overrides
    async fn load_config(&self, file_path: Option<&Path>) -> Result<AppConfig, DomainError>;

    /// Validate a loaded configuration
    async fn validate_config(&self, config: &AppConfig) -> Result<(), DomainError>;
}

/// Port for logging and observability
#[async_trait]
pub trait LogPort: Send + Sync {
    /// Log info message
    async fn info(&self, message: &str);

    /// Log warning message
    async fn warn(&self, message: &str);

    /// Log error message
    async fn error(&self, message: &str);

    /// Log debug message
    async fn debug(&self, message: &str);
}

/// Log level enumeration
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parse log level from string
    pub fn parse(level_str: &str) -> Result<Self, DomainError> {
        match level_str.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(DomainError::BadArgs(format!(
                "Invalid log level: {}. Valid levels: trace, debug, info, warn, error",
                level_str
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
