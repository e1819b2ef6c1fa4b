//! Logging system setup

use tracing_subscriber::EnvFilter;

use crate::domain::errors::DomainError;
use crate::ports::LogLevel;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable text on stderr
    Pretty,
    /// One JSON object per event on stderr
    Json,
}

impl LogFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

/// Build the event filter. `RUST_LOG`, when set and valid, wins over `level`.
pub fn build_filter(level: &LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()))
}

/// Install the global subscriber.
///
/// Logs go to stderr so the report on stdout stays machine-readable. Calling
/// this twice is harmless; the second subscriber is ignored.
pub fn init_logging(level: &str, format: LogFormat) -> Result<(), DomainError> {
    let level = LogLevel::parse(level)?;
    let filter = build_filter(&level);

    let result = match format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
    };

    if result.is_ok() {
        tracing::debug!("Logging initialized at level {} ({:?})", level.as_str(), format);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_flag() {
        assert_eq!(LogFormat::from_json_flag(true), LogFormat::Json);
        assert_eq!(LogFormat::from_json_flag(false), LogFormat::Pretty);
    }

    #[test]
    fn test_invalid_level_rejected() {
        assert!(matches!(
            init_logging("loud", LogFormat::Pretty),
            Err(DomainError::BadArgs(_))
        ));
    }

    #[test]
    fn test_repeated_init_is_ok() {
        assert!(init_logging("warn", LogFormat::Pretty).is_ok());
        assert!(init_logging("debug", LogFormat::Json).is_ok());
    }
}
