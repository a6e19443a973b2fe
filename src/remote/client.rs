//! HTTP client for the remote content service

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::ApiConfig;

use super::types::{Envelope, RemoteCategory, RemotePost, RemoteUser};

/// Errors from remote lookups. All of these are recoverable at page
/// level: a failed lookup degrades to defaults, it never hides the page.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("content API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("content API returned {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("content API response for {url} carried no data")]
    EmptyEnvelope { url: String },
}

/// Read-only operations against the content service.
///
/// A trait seam so pages can be assembled against a canned implementation
/// in tests.
#[async_trait]
pub trait ContentApi: Send + Sync {
    /// `GET /blog/post/{slug}`
    async fn fetch_post(&self, slug: &str) -> Result<RemotePost, RemoteError>;

    /// `GET /user/{id}`
    async fn fetch_user(&self, id: &str) -> Result<RemoteUser, RemoteError>;

    /// `GET /blog/category/{id}`
    async fn fetch_category(&self, id: &str) -> Result<RemoteCategory, RemoteError>;
}

/// Real client backed by reqwest, with a bounded per-request timeout
pub struct HttpContentApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpContentApi {
    pub fn new(config: &ApiConfig) -> Result<Self, RemoteError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T, RemoteError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status { url, status });
        }

        let envelope: Envelope<T> = response.json().await?;
        envelope.data.ok_or(RemoteError::EmptyEnvelope { url })
    }
}

#[async_trait]
impl ContentApi for HttpContentApi {
    async fn fetch_post(&self, slug: &str) -> Result<RemotePost, RemoteError> {
        self.get_data(&format!("/blog/post/{}", slug)).await
    }

    async fn fetch_user(&self, id: &str) -> Result<RemoteUser, RemoteError> {
        self.get_data(&format!("/user/{}", id)).await
    }

    async fn fetch_category(&self, id: &str) -> Result<RemoteCategory, RemoteError> {
        self.get_data(&format!("/blog/category/{}", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let api = HttpContentApi::new(&ApiConfig {
            base_url: "https://api.example.com/".to_string(),
            timeout_secs: 5,
        })
        .unwrap();
        assert_eq!(api.base_url, "https://api.example.com");
    }
}
