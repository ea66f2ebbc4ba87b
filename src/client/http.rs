//! Shared HTTP plumbing for the backend clients.
//!
//! One configured reqwest client per process, injected into every store.
//! Responses are decoded uniformly: non-2xx statuses and `{"error": ...}`
//! payloads inside 2xx bodies both become typed `AppError`s.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;

use crate::config::config::BackendConfig;
use crate::error::{AppError, Result};
use crate::observability::ClientMetrics;

/// Longest error-body excerpt carried into an `AppError`.
const MAX_ERROR_DETAIL: usize = 300;

/// Shared backend HTTP client.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    metrics: Arc<ClientMetrics>,
}

impl ApiClient {
    /// Build a client from injected configuration.
    pub fn new(config: &BackendConfig, metrics: Arc<ClientMetrics>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .timeout(Duration::from_secs(config.request_timeout))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            metrics,
        })
    }

    /// Absolute URL for a fixed path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Absolute URL for a path ending in a percent-encoded identifier.
    pub fn url_with_id(&self, prefix: &str, id: &str) -> String {
        format!("{}{}/{}", self.base_url, prefix, urlencoding::encode(id))
    }

    /// Raw reqwest handle, for request shapes the helpers don't cover
    /// (multipart upload).
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn metrics(&self) -> &Arc<ClientMetrics> {
        &self.metrics
    }

    pub fn get(&self, url: String) -> reqwest::RequestBuilder {
        self.http.get(url)
    }

    pub fn post(&self, url: String) -> reqwest::RequestBuilder {
        self.http.post(url)
    }

    pub fn delete(&self, url: String) -> reqwest::RequestBuilder {
        self.http.delete(url)
    }

    /// Send a request and decode the JSON body.
    ///
    /// Every request gets an `x-request-id` correlation header. 404 maps
    /// to `NotFound`; other non-2xx statuses to `Backend`; a 2xx body of
    /// the shape `{"error": ...}` to `Store` or `NotFound`.
    pub async fn expect_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T> {
        let request_id = uuid::Uuid::new_v4();
        let started = Instant::now();
        let result = request
            .header("x-request-id", request_id.to_string())
            .send()
            .await;
        self.metrics
            .record_request(started.elapsed().as_millis() as u64);

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                self.metrics.record_error();
                tracing::warn!(%request_id, error = %e, "backend request failed");
                return Err(e.into());
            }
        };

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            self.metrics.record_error();
            return Err(AppError::NotFound(format!("HTTP 404 from {}", response.url())));
        }
        if !status.is_success() {
            let detail = truncate_detail(response.text().await.unwrap_or_default());
            self.metrics.record_error();
            tracing::warn!(%request_id, status = status.as_u16(), %detail, "backend returned an error status");
            return Err(AppError::Backend {
                status: status.as_u16(),
                detail,
            });
        }

        let value: serde_json::Value = response.json().await?;
        if let Some(message) = value.get("error").and_then(serde_json::Value::as_str) {
            self.metrics.record_error();
            tracing::warn!(%request_id, message, "backend reported a failure inside a 2xx body");
            let lowered = message.to_ascii_lowercase();
            if lowered.contains("not found") || lowered.contains("no vector found") {
                return Err(AppError::NotFound(message.to_string()));
            }
            return Err(AppError::Store(message.to_string()));
        }

        Ok(serde_json::from_value(value)?)
    }
}

fn truncate_detail(detail: String) -> String {
    if detail.chars().count() <= MAX_ERROR_DETAIL {
        detail
    } else {
        detail.chars().take(MAX_ERROR_DETAIL).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        let config = BackendConfig {
            base_url: "http://localhost:8000/".to_string(),
            ..BackendConfig::default()
        };
        ApiClient::new(&config, Arc::new(ClientMetrics::default())).unwrap()
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        assert_eq!(
            client().url("/api/fetch-term"),
            "http://localhost:8000/api/fetch-term"
        );
    }

    #[test]
    fn identifiers_are_percent_encoded() {
        assert_eq!(
            client().url_with_id("/api/vectors", "term 4/a"),
            "http://localhost:8000/api/vectors/term%204%2Fa"
        );
    }

    #[test]
    fn long_error_bodies_are_truncated() {
        let detail = truncate_detail("x".repeat(1000));
        assert_eq!(detail.chars().count(), MAX_ERROR_DETAIL);
    }
}
