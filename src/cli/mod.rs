//! CLI module for freebot
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::Parser;

pub mod args;
pub mod commands;

/// freebot - name movie files from catalog metadata
///
/// Reads the title and year from a video filename, probes the file with
/// ffprobe, looks the movie up in the catalog, and renames, copies, moves or
/// links the file under a templated name.
#[derive(Parser, Debug)]
#[command(name = "freebot")]
#[command(about = "Identify a movie file and place it under a catalog-derived name")]
#[command(version)]
pub struct Cli {
    /// Logging level (overrides config and FREEBOT_LOG_LEVEL)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    pub json_logs: bool,

    /// Config file (default: FREEBOT_CONFIG, then ./freebot.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub identify: args::IdentifyArgs,
}
