//! FFprobe adapter for media file probing
//!
//! Runs `ffprobe` once against the file and reads back two CSV lines:
//! `height,field_order` for the first video stream and `duration` (seconds)
//! for the container. Any other output shape is a probe failure; nothing is
//! guessed or defaulted.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// FFprobe-based probe adapter
pub struct FFprobeAdapter {
    ffprobe_path: PathBuf,
}

impl FFprobeAdapter {
    /// Create new FFprobe adapter
    pub fn new(ffprobe_path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let ffprobe_path = ffprobe_path.into();
        if ffprobe_path.as_os_str().is_empty() {
            return Err(DomainError::ConfigurationError(
                "ffprobe path cannot be empty".to_string(),
            ));
        }
        Ok(Self { ffprobe_path })
    }

    /// Fixed argument list; the output contract depends on these flags
    fn probe_args(file_path: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = [
            "-v",
            "error",
            "-select_streams",
            "v:0",
            "-show_entries",
            "stream=height,field_order",
            "-show_entries",
            "format=duration",
            "-of",
            "csv=p=0",
        ]
        .iter()
        .map(|arg| OsString::from(*arg))
        .collect();
        args.push(file_path.as_os_str().to_owned());
        args
    }
}

#[async_trait]
impl ProbePort for FFprobeAdapter {
    async fn probe(&self, file_path: &Path) -> Result<ProbeResult, DomainError> {
        debug!("Running {} on {}", self.ffprobe_path.display(), file_path.display());

        let output = Command::new(&self.ffprobe_path)
            .args(Self::probe_args(file_path))
            .output()
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => DomainError::ProbeFailure(format!(
                    "ffprobe not found at '{}'",
                    self.ffprobe_path.display()
                )),
                _ => DomainError::ProbeFailure(format!("Failed to run ffprobe: {}", e)),
            })?;

        if !output.status.success() {
            return Err(DomainError::ProbeFailure(format!(
                "ffprobe exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_probe_output(&stdout)
    }
}

/// Parse the two-line `height,field_order` / `duration` CSV output
pub fn parse_probe_output(output: &str) -> Result<ProbeResult, DomainError> {
    let lines: Vec<&str> = output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.len() != 2 {
        return Err(DomainError::ProbeFailure(format!(
            "Expected 2 lines of ffprobe output, got {} (is this a video file?)",
            lines.len()
        )));
    }

    let stream_fields: Vec<&str> = lines[0].split(',').collect();
    if stream_fields.len() != 2 {
        return Err(DomainError::ProbeFailure(format!(
            "Expected 'height,field_order', got '{}'",
            lines[0]
        )));
    }

    let height: u32 = stream_fields[0]
        .trim()
        .parse()
        .map_err(|_| DomainError::ProbeFailure(format!("Invalid height '{}'", stream_fields[0])))?;

    let format_fields: Vec<&str> = lines[1].split(',').collect();
    if format_fields.len() != 1 {
        return Err(DomainError::ProbeFailure(format!(
            "Expected a single duration value, got '{}'",
            lines[1]
        )));
    }

    let duration_seconds: f64 = format_fields[0].trim().parse().map_err(|_| {
        DomainError::ProbeFailure(format!("Invalid duration '{}'", format_fields[0]))
    })?;

    ProbeResult::from_ffprobe(duration_seconds, height, stream_fields[1])
}
