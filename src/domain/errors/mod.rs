// Domain errors - Error taxonomy for the identification pipeline

use thiserror::Error;

use crate::domain::model::PipelineStage;

/// Domain-specific error types
///
/// Every variant is fatal to the current invocation. The two advisory states
/// (year not found, runtime mismatch) are not errors and never appear here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid arguments provided
    #[error("Bad arguments: {0}")]
    BadArgs(String),

    /// Configuration file or environment value could not be used
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Input path missing, or a directory without any video file
    #[error("Input not found: {0}")]
    InputNotFound(String),

    /// Input directory holds more than one video file
    #[error("Multiple video files found in {dir}: {files}")]
    MultipleCandidateFiles { dir: String, files: String },

    /// ffprobe missing, failed, or produced output of the wrong shape
    #[error("Probe failed: {0}")]
    ProbeFailure(String),

    /// No bearer token available for the catalog
    #[error("Missing catalog credential: set the {0} environment variable")]
    MissingCredential(String),

    /// Transport error or non-200 status from the catalog
    #[error("Catalog unreachable: {0}")]
    CatalogUnreachable(String),

    /// Search returned an empty result list
    #[error("No catalog candidates found for query \"{0}\"")]
    NoCandidatesFound(String),

    /// Catalog body could not be decoded or lacks a required field
    #[error("Malformed catalog response: {0}")]
    MalformedCatalogResponse(String),

    /// Naming template references an unknown placeholder or is unbalanced
    #[error("Invalid naming template: {0}")]
    TemplateValidationFailure(String),

    /// Link, copy, move or rename of the source file failed
    #[error("Filesystem operation failed: {0}")]
    FilesystemOperationFailure(String),
}

/// A stage failure, carrying the last stage the pipeline reached.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("aborted after stage {stage}: {error}")]
pub struct PipelineFailure {
    pub stage: PipelineStage,
    #[source]
    pub error: DomainError,
}

impl PipelineFailure {
    pub fn new(stage: PipelineStage, error: DomainError) -> Self {
        Self { stage, error }
    }
}
