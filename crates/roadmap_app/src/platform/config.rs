use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use roadmap_engine::{EngineConfig, DEFAULT_BASE_URL};
use roadmap_logging::LogDestination;
use serde::{Deserialize, Serialize};

pub(crate) const CONFIG_FILENAME: &str = "roadmap.ron";

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Settings read from `roadmap.ron`. Missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub base_url: String,
    /// Relative paths resolve against the working directory.
    pub output_dir: PathBuf,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub log_to_file: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: PathBuf::from("output"),
            connect_timeout_secs: 10,
            request_timeout_secs: 60,
            log_to_file: true,
        }
    }
}

impl AppConfig {
    pub(crate) fn engine_config(&self, working_dir: &Path) -> EngineConfig {
        let mut config = EngineConfig::default_with_output(working_dir.join(&self.output_dir));
        config.base_url = self.base_url.clone();
        config.request.connect_timeout = Duration::from_secs(self.connect_timeout_secs);
        config.request.request_timeout = Duration::from_secs(self.request_timeout_secs);
        config
    }

    pub(crate) fn log_destination(&self) -> LogDestination {
        if self.log_to_file {
            LogDestination::File
        } else {
            LogDestination::Terminal
        }
    }
}

/// Reads `roadmap.ron` from `dir`. A missing file yields the defaults.
pub(crate) fn load_config(dir: &Path) -> Result<AppConfig, ConfigError> {
    let path = dir.join(CONFIG_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };

    ron::from_str(&content).map_err(|source| ConfigError::Parse { path, source })
}
