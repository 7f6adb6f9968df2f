use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::EngineError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

const GENERATE_PATH: &str = "api/ai/generate-roadmap";
const SERVER_EXPORT_PATH: &str = "api/pdf/generate";

/// Produces the human-readable date printed on the title page.
pub type DateClock = Arc<dyn Fn() -> String + Send + Sync>;

#[derive(Debug, Clone, PartialEq)]
pub struct RequestSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for RequestSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
        }
    }
}

/// Page geometry in millimetres. Defaults to portrait A4.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSettings {
    pub width_mm: f32,
    pub height_mm: f32,
    /// Vertical space reserved on the image page; the image height is capped
    /// at `height_mm - image_margin_mm`.
    pub image_margin_mm: f32,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            width_mm: 210.0,
            height_mm: 297.0,
            image_margin_mm: 90.0,
        }
    }
}

#[derive(Clone)]
pub struct EngineConfig {
    pub base_url: String,
    pub output_dir: PathBuf,
    pub request: RequestSettings,
    pub page: PageSettings,
    pub generated_on: DateClock,
}

impl EngineConfig {
    pub fn default_with_output(output_dir: PathBuf) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir,
            request: RequestSettings::default(),
            page: PageSettings::default(),
            generated_on: Arc::new(|| chrono::Local::now().format("%Y-%m-%d").to_string()),
        }
    }

    pub fn generate_endpoint(&self) -> Result<Url, EngineError> {
        self.endpoint(GENERATE_PATH)
    }

    pub fn server_export_endpoint(&self) -> Result<Url, EngineError> {
        self.endpoint(SERVER_EXPORT_PATH)
    }

    fn endpoint(&self, path: &str) -> Result<Url, EngineError> {
        let invalid = |source| EngineError::InvalidBaseUrl {
            base_url: self.base_url.clone(),
            source,
        };
        // Without a trailing slash `join` would replace the last path segment.
        let mut base = Url::parse(&self.base_url).map_err(invalid)?;
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        base.join(path).map_err(invalid)
    }
}

impl fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineConfig")
            .field("base_url", &self.base_url)
            .field("output_dir", &self.output_dir)
            .field("request", &self.request)
            .field("page", &self.page)
            .finish_non_exhaustive()
    }
}
