//! REST client for the content-resolution service.
//!
//! # Responsibilities
//! - Issue the four lookup calls the resolution pipeline needs
//! - Handle timeouts and network errors gracefully
//! - Keep the wire contract (status codes, field names) in one place

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tokio::time::timeout;

use crate::structure::PermalinkStructure;

/// Errors that can occur talking to the CMS.
#[derive(Debug, Error)]
pub enum CmsError {
    /// Transport-level failure (connect, DNS, malformed body).
    #[error("CMS request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The CMS answered with a status the contract does not define.
    #[error("CMS returned unexpected status {0}")]
    UnexpectedStatus(u16),

    /// The request did not complete within the configured deadline.
    #[error("CMS request timed out after {0:?}")]
    Timeout(Duration),
}

/// Minimal identity of a piece of content returned by a lookup.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ContentHit {
    /// Unique content ID.
    pub id: u64,
}

/// Client for the CMS lookup endpoints.
#[derive(Debug, Clone)]
pub struct CmsClient {
    http: reqwest::Client,
    api_base: String,
    timeout: Duration,
}

impl CmsClient {
    /// Create a client for the given API base URL (trailing slash tolerated).
    pub fn new(api_base: &str, request_timeout: Duration) -> Self {
        // no_proxy: lookups go straight to the configured CMS host, an
        // ambient HTTP_PROXY must not reroute them.
        let http = reqwest::Client::builder()
            .no_proxy()
            .build()
            .unwrap_or_default();
        Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            timeout: request_timeout,
        }
    }

    /// Fetch the permalink settings document.
    pub async fn get_permalink_structure(&self) -> Result<PermalinkStructure, CmsError> {
        let url = format!("{}/permalink-structure", self.api_base);
        let response = self.send(self.http.get(&url)).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CmsError::UnexpectedStatus(status.as_u16()));
        }
        Ok(response.json().await?)
    }

    /// Look up a post by slug. `Ok(None)` means no post carries that slug.
    pub async fn get_post_by_slug(&self, slug: &str) -> Result<Option<ContentHit>, CmsError> {
        let url = format!("{}/posts", self.api_base);
        let request = self.http.get(&url).query(&[("slug", slug)]);
        self.lookup(request).await
    }

    /// Confirm a post exists by ID.
    pub async fn get_post_by_id(&self, id: u64) -> Result<Option<ContentHit>, CmsError> {
        let url = format!("{}/posts/{}", self.api_base, id);
        self.lookup(self.http.get(&url)).await
    }

    /// Look up a page by slug. `Ok(None)` means no page carries that slug.
    pub async fn get_page_by_slug(&self, slug: &str) -> Result<Option<ContentHit>, CmsError> {
        let url = format!("{}/pages", self.api_base);
        let request = self.http.get(&url).query(&[("slug", slug)]);
        self.lookup(request).await
    }

    /// Shared 200/404 handling for the content lookups.
    async fn lookup(&self, request: reqwest::RequestBuilder) -> Result<Option<ContentHit>, CmsError> {
        let response = self.send(request).await?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(CmsError::UnexpectedStatus(status.as_u16()));
        }
        Ok(Some(response.json().await?))
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, CmsError> {
        match timeout(self.timeout, request.send()).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(e)) => Err(CmsError::Transport(e)),
            Err(_) => Err(CmsError::Timeout(self.timeout)),
        }
    }
}
