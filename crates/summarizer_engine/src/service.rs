use std::time::Duration;

use engine_logging::engine_debug;
use futures_util::StreamExt;
use serde::Deserialize;
use url::Url;

use crate::{ServiceError, ServiceFailureKind};

pub const DEFAULT_ENDPOINT: &str = "https://api.smmry.com/";

/// `sm_api_message` value the service sends for a rejected key.
pub const INVALID_API_KEY_MESSAGE: &str = "INVALID API KEY";

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
            max_bytes: 1024 * 1024,
        }
    }
}

/// Parameters of one summary request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryRequest<'a> {
    pub api_key: &'a str,
    pub sentence_count: u8,
    pub target_url: &'a str,
}

/// The subset of the service's JSON body the pipeline reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SummaryResponse {
    #[serde(default)]
    pub sm_api_message: Option<String>,
    #[serde(default)]
    pub sm_api_content: Option<String>,
    #[serde(default)]
    pub sm_api_title: Option<String>,
}

impl SummaryResponse {
    pub fn is_invalid_api_key(&self) -> bool {
        self.sm_api_message.as_deref() == Some(INVALID_API_KEY_MESSAGE)
    }
}

#[async_trait::async_trait]
pub trait SummaryClient: Send + Sync {
    async fn summarize(&self, request: SummaryRequest<'_>) -> Result<SummaryResponse, ServiceError>;
}

/// Builds the request URL for `request` against `endpoint`.
///
/// All values are percent-encoded. `SM_URL` must stay the last parameter:
/// the service treats everything after it as part of the target.
pub fn build_request_url(endpoint: &str, request: &SummaryRequest<'_>) -> Result<Url, ServiceError> {
    let mut url = Url::parse(endpoint)
        .map_err(|err| ServiceError::new(ServiceFailureKind::InvalidEndpoint, err.to_string()))?;
    url.query_pairs_mut()
        .append_pair("SM_API_KEY", request.api_key)
        .append_pair("SM_LENGTH", &request.sentence_count.to_string())
        .append_pair("SM_URL", request.target_url);
    Ok(url)
}

/// Client for the SMMRY summarization API.
#[derive(Debug, Clone)]
pub struct SmmryClient {
    settings: ServiceSettings,
    client: reqwest::Client,
}

impl SmmryClient {
    pub fn new(settings: ServiceSettings) -> Result<Self, ServiceError> {
        // Fail early on a bad endpoint rather than on the first row.
        Url::parse(&settings.endpoint)
            .map_err(|err| ServiceError::new(ServiceFailureKind::InvalidEndpoint, err.to_string()))?;

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ServiceError::new(ServiceFailureKind::Network, err.to_string()))?;

        Ok(Self { settings, client })
    }
}

#[async_trait::async_trait]
impl SummaryClient for SmmryClient {
    async fn summarize(&self, request: SummaryRequest<'_>) -> Result<SummaryResponse, ServiceError> {
        let url = build_request_url(&self.settings.endpoint, &request)?;
        engine_debug!(
            "Requesting summary sentences={} target={}",
            request.sentence_count,
            request.target_url
        );

        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::new(
                ServiceFailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(ServiceError::new(
                    ServiceFailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(ServiceError::new(
                    ServiceFailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            body.extend_from_slice(&chunk);
        }

        serde_json::from_slice(&body)
            .map_err(|err| ServiceError::new(ServiceFailureKind::MalformedResponse, err.to_string()))
    }
}

// The request URL carries the API key, so it never reaches error text.
fn map_reqwest_error(err: reqwest::Error) -> ServiceError {
    let err = err.without_url();
    if err.is_timeout() {
        return ServiceError::new(ServiceFailureKind::Timeout, err.to_string());
    }
    ServiceError::new(ServiceFailureKind::Network, err.to_string())
}
