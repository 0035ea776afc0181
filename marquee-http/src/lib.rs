//! Minimal HTTP GET helper anchored to a base URL.
//!
//! - Per-request timeout via [`RequestOpts`]
//! - Structured `tracing` events for request start, response status/duration,
//!   and body snippets
//! - Typed errors through [`HttpError`]
//!
//! There is deliberately no transport-level retry here: callers own their
//! retry policy, and a failed request surfaces as an error they can absorb.
//!
//! Example (no_run):
//! ```rust
//! # async fn demo() -> Result<(), marquee_http::HttpError> {
//! let client = marquee_http::HttpClient::new("https://example.com/api/")?;
//! let body = client
//!     .get_text("items/1.json", marquee_http::RequestOpts::default())
//!     .await?;
//! # let _ = body;
//! # Ok(()) }
//! ```
//!
//! Base URLs that carry a path should end with `/` so that relative paths
//! join underneath them rather than replacing the last segment.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use thiserror::Error;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; marquee/0.1)";
const SNIPPET_MAX: usize = 500;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("client build failed: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("server returned {status}: {body_snippet}")]
    Status {
        status: StatusCode,
        body_snippet: String,
    },
}

/// Per-request tuning knobs.
#[derive(Clone, Debug, Default)]
pub struct RequestOpts {
    pub timeout: Option<Duration>,
}

#[derive(Clone)]
pub struct HttpClient {
    base: Url,
    inner: Client,
    pub default_timeout: Duration,
}

impl HttpClient {
    /// Construct a client anchored to a base URL.
    pub fn new(base: &str) -> Result<Self, HttpError> {
        let base = Url::parse(base).map_err(|e| HttpError::Url(e.to_string()))?;
        let inner = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;
        Ok(Self {
            base,
            inner,
            default_timeout: Duration::from_secs(15),
        })
    }

    /// Override the default timeout returned by [`HttpClient::new`].
    pub fn with_timeout(mut self, dur: Duration) -> Self {
        self.default_timeout = dur;
        self
    }

    /// GET `path` (joined onto the base URL) and return the response body as
    /// text. Non-2xx statuses are reported as [`HttpError::Status`] with a
    /// body snippet attached.
    pub async fn get_text(&self, path: &str, opts: RequestOpts) -> Result<String, HttpError> {
        let url = self
            .base
            .join(path)
            .map_err(|e| HttpError::Url(e.to_string()))?;
        let timeout = opts.timeout.unwrap_or(self.default_timeout);

        // Lightweight request id without extra deps
        let req_id = format!(
            "r{:x}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        );

        tracing::debug!(
            req_id = %req_id,
            host_path = %format!("{}{}", url.domain().unwrap_or("-"), url.path()),
            timeout_ms = timeout.as_millis() as u64,
            "http.request.start"
        );

        let t0 = std::time::Instant::now();
        let resp = self
            .inner
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|err| {
                tracing::warn!(req_id = %req_id, error = %err, "http.network_error.send");
                HttpError::Network(err.to_string())
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|err| {
            tracing::warn!(req_id = %req_id, error = %err, "http.network_error.body");
            HttpError::Network(err.to_string())
        })?;
        let dur_ms = t0.elapsed().as_millis() as u64;

        tracing::debug!(
            req_id = %req_id,
            %status,
            duration_ms = dur_ms,
            body_len = body.len(),
            "http.response"
        );
        tracing::trace!(req_id = %req_id, body_snippet = %snip_body(&body), "http.response.body_snippet");

        if !status.is_success() {
            return Err(HttpError::Status {
                status,
                body_snippet: snip_body(&body),
            });
        }
        Ok(body)
    }
}

fn snip_body(body: &str) -> String {
    match body.char_indices().nth(SNIPPET_MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_with_trailing_slash_joins_underneath() {
        let client = HttpClient::new("https://example.com/suggests/").unwrap();
        let joined = client.base.join("c/captain.json").unwrap();
        assert_eq!(joined.as_str(), "https://example.com/suggests/c/captain.json");
    }

    #[test]
    fn rejects_garbage_base() {
        assert!(matches!(
            HttpClient::new("not a url"),
            Err(HttpError::Url(_))
        ));
    }

    #[test]
    fn snippets_are_capped() {
        let long = "x".repeat(2000);
        let snip = snip_body(&long);
        assert_eq!(snip.len(), SNIPPET_MAX + 3);
        assert!(snip.ends_with("..."));
        assert_eq!(snip_body("short"), "short");
    }
}
