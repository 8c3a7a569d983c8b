//! Shopify Admin API GraphQL client.
//!
//! Authenticates with a static Admin API access token (custom app install).

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use url::Url;

use super::{AdminShopifyError, GraphQLError};
use crate::config::ShopifyAdminConfig;

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Shopify Admin API GraphQL client.
///
/// # Security
///
/// The access token has HIGH PRIVILEGE access to the store.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    client: reqwest::Client,
    endpoint: Url,
    store: String,
}

/// GraphQL request body.
#[derive(Debug, Serialize)]
struct GraphQLRequest<'a> {
    query: &'a str,
    variables: serde_json::Value,
}

/// GraphQL response wrapper.
#[derive(Debug, Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLErrorResponse>>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorResponse {
    message: String,
    #[serde(default)]
    path: Vec<serde_json::Value>,
}

impl AdminClient {
    /// Create a client for the configured store.
    ///
    /// # Errors
    ///
    /// Returns `AdminShopifyError::Config` if the store domain does not form
    /// a valid URL or the token is not a valid header value.
    pub fn new(config: &ShopifyAdminConfig) -> Result<Self, AdminShopifyError> {
        let endpoint = Url::parse(&format!(
            "https://{}/admin/api/{}/graphql.json",
            config.store, config.api_version
        ))
        .map_err(|e| AdminShopifyError::Config(format!("Invalid store domain: {e}")))?;

        Self::with_endpoint(endpoint, &config.store, &config.access_token)
    }

    /// Create a client against an explicit GraphQL endpoint.
    ///
    /// # Errors
    ///
    /// Returns `AdminShopifyError::Config` if the token is not a valid header
    /// value, or `AdminShopifyError::Http` if the HTTP client fails to build.
    pub fn with_endpoint(
        endpoint: Url,
        store: &str,
        access_token: &SecretString,
    ) -> Result<Self, AdminShopifyError> {
        let mut token = HeaderValue::from_str(access_token.expose_secret())
            .map_err(|e| AdminShopifyError::Config(format!("Invalid access token format: {e}")))?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ACCESS_TOKEN_HEADER, token);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(AdminClientInner {
                client,
                endpoint,
                store: store.to_string(),
            }),
        })
    }

    /// Get the store domain.
    #[must_use]
    pub fn store(&self) -> &str {
        &self.inner.store
    }

    /// Execute a GraphQL document and decode `data`.
    pub(super) async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, AdminShopifyError> {
        let response = self
            .inner
            .client
            .post(self.inner.endpoint.clone())
            .json(&GraphQLRequest { query, variables })
            .send()
            .await?;

        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(AdminShopifyError::RateLimited(retry_after));
        }

        // Check for unauthorized
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(AdminShopifyError::Unauthorized(
                "Invalid or expired access token".to_string(),
            ));
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AdminShopifyError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        let graphql_response: GraphQLResponse<T> = serde_json::from_slice(&bytes)?;

        // Check for GraphQL errors
        if let Some(errors) = graphql_response.errors
            && !errors.is_empty()
        {
            let converted_errors: Vec<GraphQLError> = errors
                .into_iter()
                .map(|e| GraphQLError {
                    message: e.message,
                    path: e.path,
                })
                .collect();
            return Err(AdminShopifyError::GraphQL(converted_errors));
        }

        graphql_response.data.ok_or_else(|| {
            AdminShopifyError::GraphQL(vec![GraphQLError {
                message: "No data in response".to_string(),
                path: vec![],
            }])
        })
    }
}

impl std::fmt::Debug for AdminClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminClient")
            .field("store", &self.inner.store)
            .field("endpoint", &self.inner.endpoint.as_str())
            .finish_non_exhaustive()
    }
}
