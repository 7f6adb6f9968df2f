use std::fmt;
use std::path::PathBuf;

use roadmap_core::{Epoch, Roadmap, ValidationError};

use crate::{PersistError, RenderError};

const GENERIC_STATUS_MESSAGE: &str = "Failed to generate roadmap";
const GENERIC_TRANSPORT_MESSAGE: &str = "Failed to generate roadmap. Please try again.";
const MALFORMED_MESSAGE: &str = "The roadmap service returned an invalid roadmap. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid base url {base_url:?}: {source}")]
    InvalidBaseUrl {
        base_url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("http client error: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("service responded with status {status}")]
    Status { status: u16, message: Option<String> },
    #[error("malformed roadmap response: {0}")]
    MalformedResponse(String),
}

impl ServiceError {
    /// Message shown to the user: the service-provided message when present,
    /// otherwise a generic one.
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Transport(_) => GENERIC_TRANSPORT_MESSAGE.to_string(),
            ServiceError::Status {
                message: Some(message),
                ..
            } => message.clone(),
            ServiceError::Status { message: None, .. } => GENERIC_STATUS_MESSAGE.to_string(),
            ServiceError::MalformedResponse(_) => MALFORMED_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    Client,
    Server,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Client => write!(f, "client"),
            StrategyKind::Server => write!(f, "server"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StrategyError {
    #[error("render failed: {0}")]
    Render(#[from] RenderError),
    #[error("document layout failed: {0}")]
    Layout(String),
    #[error("saving document failed: {0}")]
    Persist(#[from] PersistError),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("server did not confirm the export")]
    NotConfirmed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportSuccess {
    /// A document was written locally.
    Saved { path: PathBuf },
    /// The remote exporter accepted the job. No file is transferred.
    Accepted { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    Success,
    Failure,
}

/// One strategy attempt within a single export call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportJob {
    pub strategy: StrategyKind,
    pub outcome: JobOutcome,
}

#[derive(Debug)]
pub struct StrategyFailure {
    pub strategy: StrategyKind,
    pub error: StrategyError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub strategy: StrategyKind,
    pub success: ExportSuccess,
    /// Every attempt made, in order, ending with the successful one.
    pub jobs: Vec<ExportJob>,
}

#[derive(Debug, thiserror::Error)]
#[error("all export strategies failed: {}", summarize(.failures))]
pub struct ExportError {
    pub failures: Vec<StrategyFailure>,
}

fn summarize(failures: &[StrategyFailure]) -> String {
    if failures.is_empty() {
        return "no strategies configured".to_string();
    }
    failures
        .iter()
        .map(|failure| format!("{}: {}", failure.strategy, failure.error))
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug)]
pub enum EngineEvent {
    GenerationCompleted {
        epoch: Epoch,
        result: Result<Roadmap, ServiceError>,
    },
    ExportCompleted {
        result: Result<ExportReport, ExportError>,
    },
}
