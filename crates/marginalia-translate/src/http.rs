//! HTTP translation backend implementation.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use marginalia_core::{
    Error, Result, TranslationProvider, TranslationRequest, TranslationResponse,
};

/// Timeout for translation requests (seconds).
pub const DEFAULT_TRANSLATE_TIMEOUT_SECS: u64 = 15;

/// Passthrough backend forwarding requests to an upstream translation API.
pub struct HttpTranslationBackend {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    timeout_secs: u64,
}

#[derive(Debug, Serialize)]
struct UpstreamRequest<'a> {
    text: &'a str,
    source: &'a str,
    target: &'a str,
}

#[derive(Debug, Deserialize)]
struct UpstreamResponse {
    translation: String,
    source: Option<String>,
    target: Option<String>,
}

impl HttpTranslationBackend {
    /// Create a backend pointed at the given upstream base URL.
    pub fn new(base_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TRANSLATE_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        info!(
            subsystem = "translate",
            component = "http",
            base_url = %base_url,
            "Initializing translation backend"
        );

        Self {
            client,
            base_url,
            api_key: None,
            timeout_secs: DEFAULT_TRANSLATE_TIMEOUT_SECS,
        }
    }

    /// Attach an API key sent as a bearer token.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Override the per-request timeout.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Create from environment variables.
    ///
    /// `TRANSLATE_API_URL` is required; `TRANSLATE_API_KEY` and
    /// `TRANSLATE_TIMEOUT_SECS` are optional.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("TRANSLATE_API_URL")
            .map_err(|_| Error::Config("TRANSLATE_API_URL is not set".to_string()))?;
        let mut backend = Self::new(base_url);
        if let Ok(key) = std::env::var("TRANSLATE_API_KEY") {
            if !key.is_empty() {
                backend = backend.with_api_key(key);
            }
        }
        if let Some(timeout) = std::env::var("TRANSLATE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            backend = backend.with_timeout_secs(timeout);
        }
        Ok(backend)
    }
}

#[async_trait]
impl TranslationProvider for HttpTranslationBackend {
    async fn translate(&self, req: &TranslationRequest) -> Result<TranslationResponse> {
        req.validate()?;

        let start = Instant::now();
        let body = UpstreamRequest {
            text: &req.text,
            source: &req.source,
            target: &req.target,
        };

        let mut request = self
            .client
            .post(format!("{}/translate", self.base_url))
            .timeout(Duration::from_secs(self.timeout_secs))
            .json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!(
                "Translation provider returned {}: {}",
                status, text
            )));
        }

        let result: UpstreamResponse = response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("Failed to parse response: {}", e)))?;

        debug!(
            subsystem = "translate",
            component = "http",
            op = "translate",
            text_len = req.text.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Translation complete"
        );

        Ok(TranslationResponse {
            translation: result.translation,
            source: result.source.unwrap_or_else(|| req.source.clone()),
            target: result.target.unwrap_or_else(|| req.target.clone()),
        })
    }
}
