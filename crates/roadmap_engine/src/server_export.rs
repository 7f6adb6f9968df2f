use roadmap_core::Roadmap;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::http::{build_client, describe_reqwest_error, read_body};
use crate::{
    EngineConfig, EngineError, ExportStrategy, ExportSuccess, RenderedView, StrategyError,
    StrategyKind,
};

pub const SERVER_EXPORT_NOTICE: &str =
    "PDF generation successful! In a production environment, the PDF would be downloaded automatically.";

#[derive(Serialize)]
struct ExportRequest<'a> {
    roadmap: &'a Roadmap,
}

#[derive(Deserialize)]
struct ExportResponse {
    #[serde(default)]
    success: bool,
}

/// Asks the remote export endpoint to produce the document. Success only
/// confirms the job was accepted; no file comes back.
pub struct ServerExportStrategy {
    http: reqwest::Client,
    endpoint: Url,
}

impl ServerExportStrategy {
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        Ok(Self {
            http: build_client(&config.request)?,
            endpoint: config.server_export_endpoint()?,
        })
    }
}

#[async_trait::async_trait]
impl ExportStrategy for ServerExportStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Server
    }

    async fn attempt(
        &self,
        roadmap: &Roadmap,
        _view: &dyn RenderedView,
    ) -> Result<ExportSuccess, StrategyError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&ExportRequest { roadmap })
            .send()
            .await
            .map_err(|err| StrategyError::Transport(describe_reqwest_error(&err)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StrategyError::HttpStatus(status.as_u16()));
        }
        let body = read_body(response)
            .await
            .map_err(|err| StrategyError::Transport(describe_reqwest_error(&err)))?;
        let parsed: ExportResponse = serde_json::from_slice(&body)
            .map_err(|err| StrategyError::MalformedResponse(err.to_string()))?;
        if !parsed.success {
            return Err(StrategyError::NotConfirmed);
        }

        Ok(ExportSuccess::Accepted {
            message: SERVER_EXPORT_NOTICE.to_string(),
        })
    }
}
