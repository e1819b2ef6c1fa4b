//! Command implementations

use std::fmt::Write as _;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::adapters::TomlConfigAdapter;
use crate::app::{AppContainer, DefaultAppContainer, IdentifyReport, IdentifyRequest};
use crate::cli::args::ReportFormat;
use crate::cli::Cli;
use crate::ports::{AppConfig, ConfigPort};
use crate::utils::logging::{init_logging, LogFormat};

/// Load layered configuration and apply command-line overrides on top
pub async fn resolve_config(cli: &Cli, config_port: &dyn ConfigPort) -> Result<AppConfig> {
    let mut config = config_port.load_config(cli.config.as_deref()).await?;

    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(template) = &cli.identify.template {
        config.naming.template = template.clone();
    }

    config_port.validate_config(&config).await?;
    Ok(config)
}

/// Run one identify invocation and print the report on stdout
pub async fn identify(cli: Cli) -> Result<()> {
    let config_port = TomlConfigAdapter::new();
    let config = resolve_config(&cli, &config_port).await?;

    init_logging(&config.log_level, LogFormat::from_json_flag(cli.json_logs))?;
    debug!("Effective config: {:?}", config);

    let token = std::env::var(&config.catalog.token_env).ok();
    let container = DefaultAppContainer::new(&config, token, cli.identify.yes)?;

    let args = cli.identify;
    let request = IdentifyRequest {
        input: args.input,
        output_dir: args.output,
        template: config.naming.template.clone(),
        mode: args.mode,
        extensions: config.input.extensions.clone(),
    };

    info!("Running in {} mode", request.mode);
    let report = container
        .identify_interactor()
        .execute(request)
        .await
        .context("Identification failed")?;

    println!("{}", render_report(&report, args.format)?);
    Ok(())
}

/// Format the report for stdout
pub fn render_report(report: &IdentifyReport, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Json => {
            serde_json::to_string_pretty(report).context("Failed to serialize report as JSON")
        }
        ReportFormat::Yaml => {
            serde_yaml::to_string(report).context("Failed to serialize report as YAML")
        }
        ReportFormat::Text => Ok(render_text(report)),
    }
}

fn render_text(report: &IdentifyReport) -> String {
    let candidate = &report.candidate;
    let comparison = &report.comparison;
    let mut out = String::new();

    let _ = writeln!(out, "Source:      {}", report.source.display());
    let _ = writeln!(
        out,
        "Parsed:      '{}' ({})",
        report.hint.raw_title_fragment,
        report
            .hint
            .year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "no year".to_string())
    );
    let _ = writeln!(
        out,
        "Probed:      {:.1} min, {}",
        report.probe.duration_minutes, report.resolution
    );
    let _ = writeln!(
        out,
        "Candidate:   {} {} ({}) via {}",
        candidate.id,
        candidate.title,
        candidate.release_year.as_deref().unwrap_or("?"),
        report.ranking
    );
    let _ = writeln!(
        out,
        "Runtime:     {} (catalog {} min, off by {:.1})",
        comparison.verdict, comparison.catalog_minutes, comparison.difference
    );
    let _ = writeln!(out, "Destination: {}", report.destination.display());
    let _ = writeln!(out, "Mode:        {}", report.mode);
    let _ = write!(out, "Result:      {}", report.final_stage);

    for warning in report.warnings() {
        let _ = write!(out, "\nWarning:     {}", warning);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::*;
    use std::collections::HashMap;
    use std::path::PathBuf;

    use clap::Parser;

    fn sample_report(verdict: MatchVerdict, year: Option<u16>) -> IdentifyReport {
        IdentifyReport {
            source: PathBuf::from("/downloads/Dune.2021.mkv"),
            hint: FilenameHint::new("Dune", year),
            probe: ProbeResult::new(155.3, 2160, ScanType::Progressive).unwrap(),
            resolution: "2160p".to_string(),
            ranking: "first-result".to_string(),
            candidate: CatalogCandidate {
                id: 438631,
                title: "Dune".to_string(),
                original_title: None,
                release_year: Some("2021".to_string()),
                vote_average: 7.8,
                vote_count: 11000,
                runtime_minutes: Some(155),
            },
            comparison: RuntimeComparison {
                probed_minutes: 155.3,
                catalog_minutes: 155,
                difference: 0.3,
                verdict,
            },
            rendered_name: "Dune (2021).mkv".to_string(),
            destination: PathBuf::from("/library/Dune (2021).mkv"),
            mode: PlacementMode::Copy,
            final_stage: PipelineStage::Committed,
        }
    }

    #[test]
    fn test_text_report() {
        let text = render_report(&sample_report(MatchVerdict::Match, Some(2021)), ReportFormat::Text)
            .unwrap();
        assert!(text.contains("Destination: /library/Dune (2021).mkv"));
        assert!(text.contains("Runtime:     Match"));
        assert!(text.contains("Result:      committed"));
        assert!(!text.contains("Warning"));
    }

    #[test]
    fn test_text_report_lists_advisories() {
        let text = render_report(&sample_report(MatchVerdict::NotMatch, None), ReportFormat::Text)
            .unwrap();
        assert!(text.contains("no year"));
        assert_eq!(text.matches("Warning:").count(), 2);
    }

    #[test]
    fn test_json_report() {
        let json = render_report(&sample_report(MatchVerdict::Match, Some(2021)), ReportFormat::Json)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["candidate"]["id"], 438631);
        assert_eq!(value["mode"], "copy");
        assert_eq!(value["final_stage"], "committed");
    }

    #[test]
    fn test_yaml_report() {
        let yaml = render_report(&sample_report(MatchVerdict::Match, Some(2021)), ReportFormat::Yaml)
            .unwrap();
        assert!(yaml.contains("rendered_name: Dune (2021).mkv"));
    }

    #[tokio::test]
    async fn test_cli_overrides_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let adapter = TomlConfigAdapter::with_env(HashMap::from([(
            "FREEBOT_LOG_LEVEL".to_string(),
            "warn".to_string(),
        )]))
        .with_default_path(dir.path().join("freebot.toml"));

        let cli = Cli::parse_from([
            "freebot",
            "-i",
            "a.mkv",
            "-m",
            "test",
            "--log-level",
            "trace",
            "-t",
            "{n}",
        ]);
        let config = resolve_config(&cli, &adapter).await.unwrap();
        assert_eq!(config.log_level, "trace");
        assert_eq!(config.naming.template, "{n}");
    }

    #[tokio::test]
    async fn test_bad_cli_template_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let adapter = TomlConfigAdapter::with_env(HashMap::new())
            .with_default_path(dir.path().join("freebot.toml"));

        let cli = Cli::parse_from(["freebot", "-i", "a.mkv", "-m", "test", "-t", "{title}"]);
        let err = resolve_config(&cli, &adapter).await.unwrap_err();
        assert!(err.to_string().contains("{title}"));
    }
}
