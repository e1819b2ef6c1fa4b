//! Command-line argument definitions

use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::domain::errors::DomainError;
use crate::domain::model::PlacementMode;

/// How the final report is printed on stdout
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

/// Arguments for identifying and placing one video file
#[derive(Args, Debug)]
pub struct IdentifyArgs {
    /// Video file, or a directory holding exactly one video file
    #[arg(short, long)]
    pub input: PathBuf,

    /// What to do with the file: test, rename, copy, move, hardlink, softlink
    #[arg(short, long, value_parser = parse_mode)]
    pub mode: PlacementMode,

    /// Destination directory (ignored by rename; defaults to the source directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Naming template; placeholders {id} {y} {n} {res} {run}
    #[arg(short, long)]
    pub template: Option<String>,

    /// Do not ask before changing the filesystem
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

fn parse_mode(mode: &str) -> Result<PlacementMode, DomainError> {
    PlacementMode::parse(mode)
}
