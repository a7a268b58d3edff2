//! Optional RON settings file.
//!
//! Every field may be omitted; omitted fields keep the built-in defaults.
//!
//! ```ron
//! (
//!     source_field: Some("Link"),
//!     destination_field: Some("Abstract"),
//!     batch_size: Some(25),
//!     request_timeout_secs: Some(30),
//! )
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use engine_logging::engine_info;
use serde::Deserialize;
use summarizer_engine::{PipelineConfig, ServiceSettings};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SettingsFile {
    pub source_field: Option<String>,
    pub destination_field: Option<String>,
    pub batch_size: Option<usize>,
    pub default_sentence_count: Option<u8>,
    pub endpoint: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub max_response_bytes: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub pipeline: PipelineConfig,
    pub service: ServiceSettings,
}

impl SettingsFile {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        let settings = ron::from_str(&content)
            .with_context(|| format!("parsing settings from {}", path.display()))?;
        engine_info!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    pub fn into_config(self) -> AppConfig {
        let defaults = PipelineConfig::default();
        let pipeline = PipelineConfig {
            source_field: self.source_field.unwrap_or(defaults.source_field),
            destination_field: self.destination_field.unwrap_or(defaults.destination_field),
            batch_size: self.batch_size.unwrap_or(defaults.batch_size),
            default_sentence_count: self
                .default_sentence_count
                .unwrap_or(defaults.default_sentence_count),
        };

        let mut service = ServiceSettings::default();
        if let Some(endpoint) = self.endpoint {
            service.endpoint = endpoint;
        }
        if let Some(secs) = self.connect_timeout_secs {
            service.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = self.request_timeout_secs {
            service.request_timeout = Duration::from_secs(secs);
        }
        if let Some(bytes) = self.max_response_bytes {
            service.max_bytes = bytes;
        }

        AppConfig { pipeline, service }
    }
}
