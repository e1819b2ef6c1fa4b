//! freebot library
//!
//! Identifies a movie file from its name, container properties and a remote
//! catalog, then places it under a templated name.
//!
//! Layout follows a ports-and-adapters split: `domain` holds the pure
//! parsing, matching and naming rules, `ports` the traits the pipeline
//! talks through, `adapters` the ffprobe, catalog, filesystem, prompt and
//! config implementations, and `app` the pipeline itself.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod domain;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use domain::errors::{DomainError, PipelineFailure};
pub use domain::model::{PipelineStage, PlacementMode};
