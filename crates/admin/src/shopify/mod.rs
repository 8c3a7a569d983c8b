//! Shopify Admin API client (HIGH PRIVILEGE).
//!
//! # Security
//!
//! **This module holds the Shopify Admin API access token.** The token is
//! only ever sent to the configured store's GraphQL endpoint and is never
//! logged.
//!
//! # Architecture
//!
//! - Hand-written GraphQL documents in [`queries`]
//! - Responses decoded straight into `serde` types (core `Connection<T>`)
//! - Direct API calls to Shopify (no local cache)
//!
//! # Example
//!
//! ```rust,ignore
//! use imagelingo_admin::shopify::AdminClient;
//! use imagelingo_core::{PageDirection, PageRequest};
//!
//! let client = AdminClient::new(&config.shopify)?;
//! let page = client
//!     .get_store_images(&PageRequest::new(PageDirection::Next, None))
//!     .await?;
//! ```

mod client;
mod images;
pub mod queries;

pub use client::AdminClient;

use thiserror::Error;

/// Errors that can occur when interacting with Shopify Admin API.
#[derive(Debug, Error)]
pub enum AdminShopifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication/authorization failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Unexpected HTTP status.
    #[error("Unexpected status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body.
        message: String,
    },

    /// Client could not be configured (bad store domain or token).
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

/// A GraphQL error returned by the Shopify Admin API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

impl std::fmt::Display for GraphQLError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)?;
        if !self.path.is_empty() {
            let path: Vec<String> = self
                .path
                .iter()
                .map(|p| p.as_str().map_or_else(|| p.to_string(), str::to_string))
                .collect();
            write!(f, " (at {})", path.join("."))?;
        }
        Ok(())
    }
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
