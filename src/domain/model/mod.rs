// Domain models - Core types and data structures

use std::fmt;

use serde::Serialize;

use crate::domain::errors::DomainError;

/// Video field encoding of the first video stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanType {
    Progressive,
    Interlaced,
}

impl ScanType {
    /// Map an ffprobe `field_order` value. Only `progressive` is progressive;
    /// `tt`, `bb`, `unknown` and empty all count as interlaced.
    pub fn from_field_order(field_order: &str) -> Self {
        if field_order.trim() == "progressive" {
            ScanType::Progressive
        } else {
            ScanType::Interlaced
        }
    }

    /// Resolution suffix letter
    pub fn suffix(&self) -> char {
        match self {
            ScanType::Progressive => 'p',
            ScanType::Interlaced => 'i',
        }
    }
}

/// Vertical resolution plus scan type, rendered as `1080p` / `1080i`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub height: u32,
    pub scan: ScanType,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.height, self.scan.suffix())
    }
}

/// Container-level technical facts obtained from the media prober
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeResult {
    pub duration_minutes: f64,
    pub height_pixels: u32,
    pub scan_type: ScanType,
}

impl ProbeResult {
    /// Create new probe result with validation
    pub fn new(duration_minutes: f64, height_pixels: u32, scan_type: ScanType) -> Result<Self, DomainError> {
        if !duration_minutes.is_finite() || duration_minutes < 0.0 {
            return Err(DomainError::ProbeFailure(format!(
                "Duration must be a non-negative number, got {}",
                duration_minutes
            )));
        }
        if height_pixels == 0 {
            return Err(DomainError::ProbeFailure("Video height cannot be zero".to_string()));
        }

        Ok(Self {
            duration_minutes,
            height_pixels,
            scan_type,
        })
    }

    /// Build from the raw ffprobe values: duration in seconds, height, field order
    pub fn from_ffprobe(duration_seconds: f64, height_pixels: u32, field_order: &str) -> Result<Self, DomainError> {
        Self::new(
            duration_seconds / 60.0,
            height_pixels,
            ScanType::from_field_order(field_order),
        )
    }

    pub fn resolution(&self) -> Resolution {
        Resolution {
            height: self.height_pixels,
            scan: self.scan_type,
        }
    }

    /// Runtime truncated to whole minutes
    pub fn whole_minutes(&self) -> u32 {
        self.duration_minutes as u32
    }
}

/// What the filename tells us before any I/O
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilenameHint {
    pub raw_title_fragment: String,
    pub year: Option<u16>,
}

impl FilenameHint {
    pub fn new(raw_title_fragment: impl Into<String>, year: Option<u16>) -> Self {
        Self {
            raw_title_fragment: raw_title_fragment.into(),
            year,
        }
    }

    /// `false` is the advisory "year not found" state
    pub fn has_year(&self) -> bool {
        self.year.is_some()
    }

    /// Free-text catalog query: dots and underscores become spaces
    pub fn search_query(&self) -> String {
        self.raw_title_fragment
            .replace(['.', '_'], " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// One catalog search result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogCandidate {
    pub id: u64,
    pub title: String,
    pub original_title: Option<String>,
    /// Four-digit year taken from the release date, when the catalog has one
    pub release_year: Option<String>,
    pub vote_average: f64,
    pub vote_count: u64,
    /// Only known after the detail fetch
    pub runtime_minutes: Option<u32>,
}

impl CatalogCandidate {
    /// Augment a search result with the authoritative detail runtime
    pub fn with_detail(mut self, detail: &CatalogDetail) -> Self {
        self.runtime_minutes = detail.runtime_minutes;
        self
    }
}

/// Per-movie detail returned by the fetch-by-id call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogDetail {
    pub id: u64,
    pub title: String,
    pub runtime_minutes: Option<u32>,
}

/// Outcome of comparing probed runtime to catalog runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchVerdict {
    Match,
    NotMatch,
}

impl fmt::Display for MatchVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchVerdict::Match => write!(f, "Match"),
            MatchVerdict::NotMatch => write!(f, "Not Match"),
        }
    }
}

/// Runtime comparison details kept for the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuntimeComparison {
    pub probed_minutes: f64,
    pub catalog_minutes: u32,
    pub difference: f64,
    pub verdict: MatchVerdict,
}

/// Values bound into a naming template. All fields are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderContext {
    pub id: u64,
    pub year: String,
    pub name: String,
    pub resolution: String,
    pub runtime_minutes: u32,
}

impl RenderContext {
    /// Bind the selected candidate and the probe result.
    pub fn bind(candidate: &CatalogCandidate, probe: &ProbeResult) -> Result<Self, DomainError> {
        let year = candidate.release_year.clone().ok_or_else(|| {
            DomainError::MalformedCatalogResponse(format!(
                "Candidate {} ({}) has no release date",
                candidate.id, candidate.title
            ))
        })?;

        if candidate.title.trim().is_empty() {
            return Err(DomainError::MalformedCatalogResponse(format!(
                "Candidate {} has no title",
                candidate.id
            )));
        }

        Ok(Self {
            id: candidate.id,
            year,
            name: candidate.title.clone(),
            resolution: probe.resolution().to_string(),
            runtime_minutes: probe.whole_minutes(),
        })
    }
}

/// What to do with the source file once the destination name is known
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementMode {
    /// Report only, no filesystem mutation
    Test,
    /// Rename within the source directory
    Rename,
    Copy,
    Move,
    HardLink,
    SoftLink,
}

impl PlacementMode {
    /// Parse placement mode from string
    pub fn parse(mode_str: &str) -> Result<Self, DomainError> {
        match mode_str.to_lowercase().as_str() {
            "test" => Ok(PlacementMode::Test),
            "rename" => Ok(PlacementMode::Rename),
            "copy" => Ok(PlacementMode::Copy),
            "move" => Ok(PlacementMode::Move),
            "hardlink" => Ok(PlacementMode::HardLink),
            "softlink" => Ok(PlacementMode::SoftLink),
            _ => Err(DomainError::BadArgs(format!(
                "Invalid mode: {}. Valid modes: test, rename, copy, move, hardlink, softlink",
                mode_str
            ))),
        }
    }

    /// Whether this mode changes the filesystem (and so needs confirmation)
    pub fn mutates(&self) -> bool {
        !matches!(self, PlacementMode::Test)
    }
}

impl fmt::Display for PlacementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlacementMode::Test => "test",
            PlacementMode::Rename => "rename",
            PlacementMode::Copy => "copy",
            PlacementMode::Move => "move",
            PlacementMode::HardLink => "hardlink",
            PlacementMode::SoftLink => "softlink",
        };
        f.write_str(name)
    }
}

/// Pipeline state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Idle,
    ParsedFilename,
    Probed,
    SearchedCatalog,
    DetailFetched,
    Validated,
    Rendered,
    AwaitingConfirmation,
    Committed,
    Aborted,
}

impl PipelineStage {
    /// Terminal stages end the run
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineStage::Committed | PipelineStage::Aborted)
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Idle => "idle",
            PipelineStage::ParsedFilename => "parsed-filename",
            PipelineStage::Probed => "probed",
            PipelineStage::SearchedCatalog => "searched-catalog",
            PipelineStage::DetailFetched => "detail-fetched",
            PipelineStage::Validated => "validated",
            PipelineStage::Rendered => "rendered",
            PipelineStage::AwaitingConfirmation => "awaiting-confirmation",
            PipelineStage::Committed => "committed",
            PipelineStage::Aborted => "aborted",
        };
        f.write_str(name)
    }
}
