use thiserror::Error;

/// The host rejects bulk updates above this many records.
pub const MAX_RECORDS_PER_UPDATE: usize = 50;
pub const DEFAULT_SENTENCE_COUNT: u8 = 7;
pub const MIN_SENTENCE_COUNT: u8 = 1;
pub const MAX_SENTENCE_COUNT: u8 = 7;
pub const DEFAULT_SOURCE_FIELD: &str = "URL";
pub const DEFAULT_DESTINATION_FIELD: &str = "Summary";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("batch size must be at least 1")]
    ZeroBatchSize,
    #[error("{0} field name must not be empty")]
    EmptyFieldName(&'static str),
    #[error("source and destination field are both {0:?}")]
    SameField(String),
    #[error("sentence count {0} is outside 1..=7")]
    SentenceCountOutOfRange(u8),
}

/// Field names and limits for one pipeline, constructed once at the call boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub source_field: String,
    pub destination_field: String,
    pub batch_size: usize,
    pub default_sentence_count: u8,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_field: DEFAULT_SOURCE_FIELD.to_string(),
            destination_field: DEFAULT_DESTINATION_FIELD.to_string(),
            batch_size: MAX_RECORDS_PER_UPDATE,
            default_sentence_count: DEFAULT_SENTENCE_COUNT,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        if self.source_field.trim().is_empty() {
            return Err(ConfigError::EmptyFieldName("source"));
        }
        if self.destination_field.trim().is_empty() {
            return Err(ConfigError::EmptyFieldName("destination"));
        }
        if self.source_field == self.destination_field {
            return Err(ConfigError::SameField(self.source_field.clone()));
        }
        check_sentence_count(self.default_sentence_count)
    }

    /// Sentence count for a run: the user's value when given, else the default.
    pub fn sentence_count(&self, requested: Option<u8>) -> u8 {
        requested.unwrap_or(self.default_sentence_count)
    }
}

pub fn check_sentence_count(count: u8) -> Result<(), ConfigError> {
    if (MIN_SENTENCE_COUNT..=MAX_SENTENCE_COUNT).contains(&count) {
        Ok(())
    } else {
        Err(ConfigError::SentenceCountOutOfRange(count))
    }
}
