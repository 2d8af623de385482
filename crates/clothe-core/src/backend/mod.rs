//! HTTP client for the outfit recommendation backend.
//!
//! Every call is a single JSON POST whose response is decoded into a typed
//! projection (see `response`) and turned into display text. Calls never retry.

mod endpoint;
mod error;
mod response;

use std::time::Duration;

use anyhow::{Context, Result};
pub use endpoint::{Endpoint, ResponseKey};
pub use error::BackendError;
use reqwest::header::CONTENT_TYPE;
pub use response::{OutfitRequest, extract_display_text, request_body};
use tokio_util::sync::CancellationToken;

/// Backend URL used when neither env nor config provide one.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// User-Agent header sent with every request.
pub const USER_AGENT: &str = concat!("clothe/", env!("CARGO_PKG_VERSION"));

/// Text shown when the response lacks the expected field.
pub const UNEXPECTED_FORMAT_MESSAGE: &str = "Error: Unexpected response format";

/// Connection settings shared by every screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Validated base URL without a trailing slash.
    pub base_url: String,
    /// Per-request timeout (`None` relies on socket defaults).
    pub timeout: Option<Duration>,
}

impl BackendConfig {
    /// # Errors
    /// Returns an error if `base_url` is not an http(s) URL.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let trimmed = base_url.trim();
        let parsed = url::Url::parse(trimmed)
            .with_context(|| format!("Invalid backend URL: {trimmed}"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            anyhow::bail!("Backend URL must use http or https: {trimmed}");
        }
        Ok(Self {
            base_url: trimmed.trim_end_matches('/').to_string(),
            timeout,
        })
    }
}

/// Asynchronous backend client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    config: BackendConfig,
}

impl BackendClient {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS init failure).
    pub fn new(config: BackendConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;
        Ok(Self { http, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Builds the full URL for an endpoint (base + literal path).
    ///
    /// # Errors
    /// Returns `BackendError::InvalidUrl` if the joined string does not parse.
    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<reqwest::Url, BackendError> {
        let raw = format!("{}{}", self.config.base_url, endpoint.path());
        reqwest::Url::parse(&raw).map_err(|e| BackendError::InvalidUrl(format!("{raw}: {e}")))
    }

    /// POSTs `{userId, text}` to `endpoint` and returns the display text.
    ///
    /// # Errors
    /// Returns a `BackendError` for transport failures, non-success statuses and
    /// responses that do not match the endpoint's response shape.
    pub async fn call(
        &self,
        endpoint: Endpoint,
        user_id: &str,
        text: &str,
    ) -> Result<String, BackendError> {
        let url = self.endpoint_url(endpoint)?;
        let body = request_body(user_id, text)
            .map_err(|e| BackendError::UnexpectedFormat(format!("request encoding: {e}")))?;

        tracing::debug!(endpoint = %endpoint, %url, "backend request");

        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| BackendError::from_reqwest(&e))?;

        let status = response.status();
        let payload = response
            .text()
            .await
            .map_err(|e| BackendError::from_reqwest(&e))?;

        if !status.is_success() {
            tracing::warn!(endpoint = %endpoint, status = status.as_u16(), "backend returned error status");
            return Err(BackendError::Status {
                status: status.as_u16(),
                body: payload.trim().to_string(),
            });
        }

        let text = extract_display_text(endpoint.response_key(), &payload);
        match &text {
            Ok(_) => tracing::info!(endpoint = %endpoint, status = status.as_u16(), "backend request completed"),
            Err(err) => tracing::warn!(endpoint = %endpoint, error = %err, "backend response did not decode"),
        }
        text
    }

    /// Like [`call`](Self::call), but resolves to `BackendError::Cancelled` as soon
    /// as `cancel` fires. Dropping the request future closes its connection.
    ///
    /// # Errors
    /// See [`call`](Self::call); additionally `BackendError::Cancelled`.
    pub async fn call_cancellable(
        &self,
        endpoint: Endpoint,
        user_id: &str,
        text: &str,
        cancel: CancellationToken,
    ) -> Result<String, BackendError> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                tracing::debug!(endpoint = %endpoint, "backend request cancelled");
                Err(BackendError::Cancelled)
            }
            result = self.call(endpoint, user_id, text) => result,
        }
    }

    /// Calls the backend's root route and returns its status message.
    ///
    /// # Errors
    /// Same failure classes as [`call`](Self::call).
    pub async fn health(&self) -> Result<String, BackendError> {
        let raw = format!("{}/", self.config.base_url);
        let url =
            reqwest::Url::parse(&raw).map_err(|e| BackendError::InvalidUrl(format!("{raw}: {e}")))?;
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| BackendError::from_reqwest(&e))?;
        let status = response.status();
        let payload = response
            .text()
            .await
            .map_err(|e| BackendError::from_reqwest(&e))?;
        if !status.is_success() {
            return Err(BackendError::Status {
                status: status.as_u16(),
                body: payload.trim().to_string(),
            });
        }
        response::extract_health_message(&payload)
    }
}

/// Turns the outcome of a call into the text shown to the user.
pub fn display_text(result: &Result<String, BackendError>, base_url: &str) -> String {
    match result {
        Ok(text) => text.clone(),
        Err(err) if err.is_connection_failure() => format!(
            "Error connecting to backend:\n{err}\n\nMake sure the backend is running at {base_url}"
        ),
        Err(BackendError::Cancelled) => "Request cancelled.".to_string(),
        Err(_) => UNEXPECTED_FORMAT_MESSAGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> BackendClient {
        BackendClient::new(BackendConfig::new(base, None).unwrap()).unwrap()
    }

    #[test]
    fn test_config_trims_trailing_slash_and_rejects_other_schemes() {
        let config = BackendConfig::new("http://localhost:8000/", None).unwrap();
        assert_eq!(config.base_url, "http://localhost:8000");

        assert!(BackendConfig::new("ftp://localhost", None).is_err());
        assert!(BackendConfig::new("localhost:8000", None).is_err());
    }

    #[test]
    fn test_endpoint_url_appends_literal_path() {
        let client = client("http://127.0.0.1:8000");
        let url = client.endpoint_url(Endpoint::FindIdeas).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/api/outfits/find-ideas");

        let url = client.endpoint_url(Endpoint::ListGarments).unwrap();
        assert_eq!(url.path(), "/api/garments/");
    }

    #[test]
    fn test_endpoint_url_keeps_base_path_prefix() {
        let client = client("http://example.test/clothe");
        let url = client.endpoint_url(Endpoint::Analyze).unwrap();
        assert_eq!(url.as_str(), "http://example.test/clothe/api/outfits/analyze");
    }

    #[test]
    fn test_add_garment_placeholder_is_sent_encoded() {
        let client = client("http://127.0.0.1:8000");
        let url = client.endpoint_url(Endpoint::AddGarment).unwrap();
        assert_eq!(url.path(), "/api/garments/%7Bgarment_id%7D");
    }

    #[test]
    fn test_display_text_for_each_outcome() {
        let base = "http://127.0.0.1:8000";
        assert_eq!(display_text(&Ok("wear a coat".into()), base), "wear a coat");
        assert_eq!(
            display_text(&Err(BackendError::UnexpectedFormat("x".into())), base),
            UNEXPECTED_FORMAT_MESSAGE
        );

        let text = display_text(&Err(BackendError::Transport("connection refused".into())), base);
        assert!(text.starts_with("Error connecting to backend:\n"));
        assert!(text.contains("connection refused"));
        assert!(text.ends_with("Make sure the backend is running at http://127.0.0.1:8000"));

        let text = display_text(
            &Err(BackendError::Status {
                status: 500,
                body: "boom".into(),
            }),
            base,
        );
        assert!(text.contains("HTTP 500: boom"));
        assert!(text.ends_with("Make sure the backend is running at http://127.0.0.1:8000"));

        assert_eq!(
            display_text(&Err(BackendError::Cancelled), base),
            "Request cancelled."
        );
    }
}
