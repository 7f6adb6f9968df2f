use roadmap_core::Roadmap;
use roadmap_logging::{roadmap_info, roadmap_warn};

use crate::{
    ClientPdfStrategy, EngineConfig, EngineError, ExportError, ExportJob, ExportReport,
    ExportSuccess, JobOutcome, RenderedView, ServerExportStrategy, StrategyError,
    StrategyFailure, StrategyKind,
};

/// One self-contained way of producing the exported document.
#[async_trait::async_trait]
pub trait ExportStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    async fn attempt(
        &self,
        roadmap: &Roadmap,
        view: &dyn RenderedView,
    ) -> Result<ExportSuccess, StrategyError>;
}

/// Tries its strategies in order; the first success wins.
pub struct DocumentExporter {
    strategies: Vec<Box<dyn ExportStrategy>>,
}

impl DocumentExporter {
    pub fn new(strategies: Vec<Box<dyn ExportStrategy>>) -> Self {
        Self { strategies }
    }

    /// Local PDF first, then the remote export endpoint.
    pub fn from_config(config: &EngineConfig) -> Result<Self, EngineError> {
        Ok(Self::new(vec![
            Box::new(ClientPdfStrategy::new(config)),
            Box::new(ServerExportStrategy::new(config)?),
        ]))
    }

    pub async fn export(
        &self,
        roadmap: &Roadmap,
        view: &dyn RenderedView,
    ) -> Result<ExportReport, ExportError> {
        let mut jobs = Vec::with_capacity(self.strategies.len());
        let mut failures = Vec::new();

        for strategy in &self.strategies {
            let kind = strategy.kind();
            match strategy.attempt(roadmap, view).await {
                Ok(success) => {
                    roadmap_info!("Export via {} strategy succeeded: {:?}", kind, success);
                    jobs.push(ExportJob {
                        strategy: kind,
                        outcome: JobOutcome::Success,
                    });
                    return Ok(ExportReport {
                        strategy: kind,
                        success,
                        jobs,
                    });
                }
                Err(error) => {
                    roadmap_warn!("Export via {} strategy failed: {}", kind, error);
                    jobs.push(ExportJob {
                        strategy: kind,
                        outcome: JobOutcome::Failure,
                    });
                    failures.push(StrategyFailure {
                        strategy: kind,
                        error,
                    });
                }
            }
        }

        Err(ExportError { failures })
    }
}
