use std::sync::Arc;

use crate::adapters::{
    AssumeYesAdapter, FFprobeAdapter, LocalFsAdapter, StdinConfirmAdapter, TmdbCatalogAdapter,
    TracingLogAdapter,
};
use crate::app::identify_interactor::IdentifyInteractor;
use crate::domain::errors::DomainError;
use crate::domain::rules::{FilenameParser, FirstResultRanking, RankingStrategy};
use crate::ports::{AppConfig, CatalogPort, ConfirmPort, FsPort, LogPort, ProbePort};

pub trait AppContainer: Send + Sync {
    fn identify_interactor(&self) -> Arc<IdentifyInteractor>;
}

/// Wires the production adapters
pub struct DefaultAppContainer {
    identify_interactor: Arc<IdentifyInteractor>,
}

impl DefaultAppContainer {
    /// `token` is the catalog credential, read once by the caller. A missing
    /// token fails here, before any network activity.
    pub fn new(
        config: &AppConfig,
        token: Option<String>,
        assume_yes: bool,
    ) -> Result<Self, DomainError> {
        let probe_port = Arc::new(FFprobeAdapter::new(config.probe.ffprobe_path.as_str())?);
        let catalog_port = Arc::new(TmdbCatalogAdapter::new(&config.catalog, token)?);
        let fs_port = Arc::new(LocalFsAdapter::new()?);
        let log_port = Arc::new(TracingLogAdapter::new());
        let confirm_port: Arc<dyn ConfirmPort> = if assume_yes {
            Arc::new(AssumeYesAdapter)
        } else {
            Arc::new(StdinConfirmAdapter::new())
        };

        let identify_interactor = Arc::new(
            IdentifyInteractor::new(
                probe_port as Arc<dyn ProbePort>,
                catalog_port as Arc<dyn CatalogPort>,
                fs_port as Arc<dyn FsPort>,
                confirm_port,
                log_port as Arc<dyn LogPort>,
            )
            .with_ranking(Arc::new(FirstResultRanking) as Arc<dyn RankingStrategy>)
            .with_parser(FilenameParser::default()),
        );

        Ok(Self {
            identify_interactor,
        })
    }
}

impl AppContainer for DefaultAppContainer {
    fn identify_interactor(&self) -> Arc<IdentifyInteractor> {
        Arc::clone(&self.identify_interactor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_token_fails_wiring() {
        let config = AppConfig::default();
        let result = DefaultAppContainer::new(&config, None, true);
        assert!(matches!(result, Err(DomainError::MissingCredential(_))));
    }

    #[test]
    fn test_wiring_with_token() {
        let config = AppConfig::default();
        let container = DefaultAppContainer::new(&config, Some("token".to_string()), false).unwrap();
        let _ = container.identify_interactor();
    }
}
