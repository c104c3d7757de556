//! JSON fetching with fallback-on-failure semantics.
//!
//! The node accessors in [`crate::node`] are built on two layers: a `Result`
//! layer ([`Fetcher::fetch`] / [`Fetcher::json`]) for callers that want to
//! see failures, and a fallback layer ([`Fetcher::get_or`] /
//! [`Fetcher::json_or`]) that logs the failure and substitutes a default.

use reqwest::header;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Failures surfaced by the `Result` fetch layer.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure (DNS, connect, read, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("unexpected status {status} for {url}")]
    Status {
        /// Status code the server returned.
        status: reqwest::StatusCode,
        /// URL that was requested.
        url: String,
    },

    /// The response body was not valid JSON (or not the expected shape).
    #[error("invalid JSON body: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Async JSON fetcher shared by all node accessors.
///
/// Cheap to clone; the underlying `reqwest::Client` is reference-counted.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    /// Build a fetcher with the library user-agent.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the client cannot be constructed.
    pub fn new() -> Result<Self, FetchError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(concat!("pake-net/", env!("CARGO_PKG_VERSION"))),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;
        Ok(Self { client })
    }

    /// Wrap an existing client, e.g. one with custom timeouts.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// GET `url` and decode the body as `T`.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] on transport failure, a non-success status,
    /// or an undecodable body.
    pub async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                url: url.to_string(),
            });
        }
        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// GET `url` and parse the body as an untyped JSON value.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch`].
    pub async fn json(&self, url: &str) -> Result<Value, FetchError> {
        self.fetch(url).await
    }

    /// GET and decode `url`, returning `fallback` on any failure.
    ///
    /// The failure is logged; callers cannot distinguish a failed fetch from
    /// a resource that was genuinely empty.
    pub async fn get_or<T: DeserializeOwned>(&self, url: &str, fallback: T) -> T {
        match self.fetch(url).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to fetch {}: {}", url, e);
                fallback
            }
        }
    }

    /// Untyped variant of [`Self::get_or`].
    pub async fn json_or(&self, url: &str, fallback: Value) -> Value {
        self.get_or(url, fallback).await
    }
}
