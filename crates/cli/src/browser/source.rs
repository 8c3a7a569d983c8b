//! Where image pages come from.

use std::sync::Arc;

use async_trait::async_trait;
use imagelingo_core::{Connection, ImageRecord, PageRequest};
use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;
use url::Url;

/// Errors fetching a page from the image page action.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image action returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to encode directive: {0}")]
    Encode(serde_json::Error),

    #[error("Failed to decode image page: {0}")]
    Decode(serde_json::Error),

    #[error("Invalid admin URL: {0}")]
    InvalidUrl(String),
}

/// Something that can answer a paging directive.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(
        &self,
        request: &PageRequest,
    ) -> Result<Connection<ImageRecord>, SourceError>;
}

#[derive(Deserialize)]
struct ActionResponse {
    response: Connection<ImageRecord>,
}

/// Posts directives to the admin service's `/app` action.
#[derive(Clone)]
pub struct HttpPageSource {
    inner: Arc<HttpPageSourceInner>,
}

struct HttpPageSourceInner {
    client: reqwest::Client,
    action_url: Url,
}

impl HttpPageSource {
    /// Create a source for the admin service at `admin_url`.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::InvalidUrl` if `admin_url` does not parse or
    /// cannot carry a path.
    pub fn new(admin_url: &str) -> Result<Self, SourceError> {
        let mut action_url =
            Url::parse(admin_url).map_err(|e| SourceError::InvalidUrl(e.to_string()))?;

        action_url
            .path_segments_mut()
            .map_err(|()| SourceError::InvalidUrl(admin_url.to_string()))?
            .pop_if_empty()
            .push("app");

        Ok(Self {
            inner: Arc::new(HttpPageSourceInner {
                client: reqwest::Client::new(),
                action_url,
            }),
        })
    }

    #[must_use]
    pub fn action_url(&self) -> &Url {
        &self.inner.action_url
    }
}

impl std::fmt::Debug for HttpPageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPageSource")
            .field("action_url", &self.inner.action_url.as_str())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    #[instrument(skip(self), fields(direction = %request.direction))]
    async fn fetch_page(
        &self,
        request: &PageRequest,
    ) -> Result<Connection<ImageRecord>, SourceError> {
        let directive = serde_json::to_string(request).map_err(SourceError::Encode)?;

        let response = self
            .inner
            .client
            .post(self.inner.action_url.clone())
            .form(&[(PageRequest::FORM_FIELD, directive.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let parsed: ActionResponse =
            serde_json::from_slice(&bytes).map_err(SourceError::Decode)?;

        Ok(parsed.response)
    }
}
