use roadmap_core::{Roadmap, RoadmapRequest};
use roadmap_logging::{roadmap_debug, roadmap_info, roadmap_warn};
use serde::Deserialize;
use url::Url;

use crate::http::{build_client, describe_reqwest_error, read_body};
use crate::{EngineConfig, EngineError, GenerateError, ServiceError};

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Client for the external roadmap generation service.
///
/// Each call makes exactly one attempt; there are no retries.
#[derive(Debug, Clone)]
pub struct RoadmapRequestClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl RoadmapRequestClient {
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        Ok(Self {
            http: build_client(&config.request)?,
            endpoint: config.generate_endpoint()?,
        })
    }

    /// Validates `goal` and requests a roadmap for it. Blank goals fail with
    /// a validation error before any network traffic.
    pub async fn generate(&self, goal: &str) -> Result<Roadmap, GenerateError> {
        let request = RoadmapRequest::new(goal)?;
        Ok(self.generate_request(&request).await?)
    }

    pub async fn generate_request(
        &self,
        request: &RoadmapRequest,
    ) -> Result<Roadmap, ServiceError> {
        roadmap_info!(
            "Requesting roadmap goal_len={} endpoint={}",
            request.goal().len(),
            self.endpoint
        );

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|err| ServiceError::Transport(describe_reqwest_error(&err)))?;

        let status = response.status();
        if !status.is_success() {
            // An unreadable error body still reports the status.
            let message = read_body(response)
                .await
                .ok()
                .and_then(|body| serde_json::from_slice::<ErrorBody>(&body).ok())
                .and_then(|body| body.error)
                .filter(|message| !message.trim().is_empty());
            roadmap_warn!(
                "Roadmap service returned status {} message={:?}",
                status.as_u16(),
                message
            );
            return Err(ServiceError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = read_body(response)
            .await
            .map_err(|err| ServiceError::Transport(describe_reqwest_error(&err)))?;

        let roadmap: Roadmap = serde_json::from_slice(&body)
            .map_err(|err| ServiceError::MalformedResponse(err.to_string()))?;
        roadmap
            .validate()
            .map_err(|err| ServiceError::MalformedResponse(err.to_string()))?;

        roadmap_debug!(
            "Received roadmap title={:?} steps={}",
            roadmap.title,
            roadmap.steps.len()
        );
        Ok(roadmap)
    }
}
