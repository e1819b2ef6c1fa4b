// Identify interactor - Orchestrates the identify-and-place use case

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::domain::template::NamingTemplate;
use crate::ports::*;
use crate::utils::path::PathUtils;

/// One identify invocation
#[derive(Debug, Clone)]
pub struct IdentifyRequest {
    /// A video file, or a directory holding exactly one
    pub input: PathBuf,
    /// Destination directory for non-rename modes; defaults to the source directory
    pub output_dir: Option<PathBuf>,
    pub template: String,
    pub mode: PlacementMode,
    pub extensions: Vec<String>,
}

/// What the pipeline found and did
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentifyReport {
    pub source: PathBuf,
    pub hint: FilenameHint,
    pub probe: ProbeResult,
    pub resolution: String,
    pub ranking: String,
    pub candidate: CatalogCandidate,
    pub comparison: RuntimeComparison,
    pub rendered_name: String,
    pub destination: PathBuf,
    pub mode: PlacementMode,
    pub final_stage: PipelineStage,
}

impl IdentifyReport {
    /// Advisory notes for the operator
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if !self.hint.has_year() {
            warnings.push("No release year found in filename; searched by title only".to_string());
        }
        if self.comparison.verdict == MatchVerdict::NotMatch {
            warnings.push(format!(
                "Runtime mismatch: file runs {:.1} min, catalog says {} min",
                self.comparison.probed_minutes, self.comparison.catalog_minutes
            ));
        }
        warnings
    }
}

/// Interactor for the identify use case
pub struct IdentifyInteractor {
    probe_port: Arc<dyn ProbePort>,
    catalog_port: Arc<dyn CatalogPort>,
    fs_port: Arc<dyn FsPort>,
    confirm_port: Arc<dyn ConfirmPort>,
    log_port: Arc<dyn LogPort>,
    ranking: Arc<dyn RankingStrategy>,
    parser: FilenameParser,
}

impl IdentifyInteractor {
    /// Create new identify interactor with injected ports
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        catalog_port: Arc<dyn CatalogPort>,
        fs_port: Arc<dyn FsPort>,
        confirm_port: Arc<dyn ConfirmPort>,
        log_port: Arc<dyn LogPort>,
    ) -> Self {
        Self {
            probe_port,
            catalog_port,
            fs_port,
            confirm_port,
            log_port,
            ranking: Arc::new(FirstResultRanking),
            parser: FilenameParser::default(),
        }
    }

    pub fn with_ranking(mut self, ranking: Arc<dyn RankingStrategy>) -> Self {
        self.ranking = ranking;
        self
    }

    pub fn with_parser(mut self, parser: FilenameParser) -> Self {
        self.parser = parser;
        self
    }

    /// Run the pipeline once. Every port call is attempted at most once; the
    /// first failure aborts with the last stage reached.
    pub async fn execute(&self, request: IdentifyRequest) -> Result<IdentifyReport, PipelineFailure> {
        let mut stage = PipelineStage::Idle;
        let fail = |stage: PipelineStage| move |error: DomainError| PipelineFailure::new(stage, error);

        // Template problems are configuration errors, caught before any I/O
        let template = NamingTemplate::parse(&request.template).map_err(fail(stage))?;

        let source = self
            .fs_port
            .find_video_file(&request.input, &request.extensions)
            .await
            .map_err(fail(stage))?;
        self.log_port
            .info(&format!("Identifying {}", source.display()))
            .await;

        let hint = self.parser.parse(&PathUtils::get_file_name(&source));
        self.advance(&mut stage, PipelineStage::ParsedFilename).await;
        match hint.year {
            Some(year) => {
                self.log_port
                    .info(&format!("Filename title '{}', year {}", hint.raw_title_fragment, year))
                    .await
            }
            None => {
                self.log_port
                    .warn(&format!(
                        "No release year found in '{}'; searching by title only",
                        hint.raw_title_fragment
                    ))
                    .await
            }
        }

        let probe = self.probe_port.probe(&source).await.map_err(fail(stage))?;
        self.advance(&mut stage, PipelineStage::Probed).await;
        self.log_port
            .info(&format!(
                "Probed {:.1} min at {}",
                probe.duration_minutes,
                probe.resolution()
            ))
            .await;

        let query = hint.search_query();
        let candidates = self
            .catalog_port
            .search_movies(&query, hint.year)
            .await
            .map_err(fail(stage))?;
        for candidate in &candidates {
            self.log_port
                .debug(&format!(
                    "Candidate {} '{}' (original '{}') released {}, rated {:.1} from {} votes",
                    candidate.id,
                    candidate.title,
                    candidate.original_title.as_deref().unwrap_or("-"),
                    candidate.release_year.as_deref().unwrap_or("unknown"),
                    candidate.vote_average,
                    candidate.vote_count
                ))
                .await;
        }
        let selected = self
            .ranking
            .select(&candidates)
            .cloned()
            .ok_or_else(|| DomainError::NoCandidatesFound(query.clone()))
            .map_err(fail(stage))?;
        self.advance(&mut stage, PipelineStage::SearchedCatalog).await;
        self.log_port
            .info(&format!(
                "Selected candidate {} '{}' by {} out of {}",
                selected.id,
                selected.title,
                self.ranking.name(),
                candidates.len()
            ))
            .await;

        let detail = self
            .catalog_port
            .fetch_movie_detail(selected.id)
            .await
            .map_err(fail(stage))?;
        let candidate = selected.with_detail(&detail);
        let catalog_minutes = candidate
            .runtime_minutes
            .ok_or_else(|| {
                DomainError::MalformedCatalogResponse(format!(
                    "Movie {} has no runtime",
                    candidate.id
                ))
            })
            .map_err(fail(stage))?;
        self.advance(&mut stage, PipelineStage::DetailFetched).await;

        let comparison = RuntimeMatcher::compare(&probe, catalog_minutes);
        self.advance(&mut stage, PipelineStage::Validated).await;
        match comparison.verdict {
            MatchVerdict::Match => {
                self.log_port
                    .info(&format!(
                        "Runtime {} (off by {:.1} min)",
                        comparison.verdict, comparison.difference
                    ))
                    .await
            }
            MatchVerdict::NotMatch => {
                self.log_port
                    .warn(&format!(
                        "Runtime {}: file {:.1} min vs catalog {} min; continuing",
                        comparison.verdict, comparison.probed_minutes, comparison.catalog_minutes
                    ))
                    .await
            }
        }

        let context = RenderContext::bind(&candidate, &probe).map_err(fail(stage))?;
        let extension = PathUtils::get_extension(&source);
        let rendered_name = template.render(&context, &extension);
        let destination = PathUtils::destination_for(
            &source,
            request.output_dir.as_deref(),
            request.mode == PlacementMode::Rename,
            &rendered_name,
        );
        self.advance(&mut stage, PipelineStage::Rendered).await;
        self.log_port
            .info(&format!("Destination {}", destination.display()))
            .await;

        if request.mode.mutates() {
            self.advance(&mut stage, PipelineStage::AwaitingConfirmation).await;
            let outcome = self
                .commit(&source, &destination, request.mode)
                .await
                .map_err(fail(stage))?;
            self.advance(&mut stage, outcome).await;
        }

        Ok(IdentifyReport {
            source,
            hint,
            resolution: probe.resolution().to_string(),
            probe,
            ranking: self.ranking.name().to_string(),
            candidate,
            comparison,
            rendered_name,
            destination,
            mode: request.mode,
            final_stage: stage,
        })
    }

    async fn advance(&self, stage: &mut PipelineStage, next: PipelineStage) {
        self.log_port
            .debug(&format!("Stage {} -> {}", stage, next))
            .await;
        *stage = next;
    }

    /// Ask, then place. A declined prompt aborts without touching anything.
    async fn commit(
        &self,
        source: &Path,
        destination: &Path,
        mode: PlacementMode,
    ) -> Result<PipelineStage, DomainError> {
        let prompt = format!("{} {} -> {}?", mode, source.display(), destination.display());
        if !self.confirm_port.confirm(&prompt).await? {
            self.log_port.warn("Declined; nothing was changed").await;
            return Ok(PipelineStage::Aborted);
        }

        self.fs_port.place_file(source, destination, mode).await?;
        self.log_port
            .info(&format!("{} done: {}", mode, destination.display()))
            .await;
        Ok(PipelineStage::Committed)
    }
}
