//! Translation server metrics client.
//!
//! Proxies five read-only queries (untranslated word counts, conversion
//! report, per-language translation status, real-time quota switches and
//! translation quality score) to the external translation server.
//!
//! # Failure model
//!
//! The public operations never return `Err`. Every failure (transport,
//! non-2xx status, undecodable body) is logged and collapsed into the fixed
//! [`FailureRecord`]:
//!
//! ```json
//! {"success": false, "errorCode": 10001, "errorMsg": "SERVER_ERROR"}
//! ```
//!
//! The cause is kept on [`RemoteFailure`] for callers that need it, and the
//! `try_*` variants on [`MetricsClient`] return it directly.

pub mod client;
pub mod types;

pub use client::MetricsClient;
pub use types::*;

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Error code reported for every failed remote call.
pub const SERVER_ERROR_CODE: u32 = 10001;

/// Error message reported for every failed remote call.
pub const SERVER_ERROR_MSG: &str = "SERVER_ERROR";

/// Errors that can occur when calling the translation server.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// HTTP request failed (connection, TLS, timeout).
    #[error("HTTP error: {0}")]
    Network(#[from] reqwest::Error),

    /// Server answered with a non-2xx status.
    #[error("Server returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        body: String,
    },

    /// Response body was not valid JSON.
    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Endpoint URL could not be built from the base URL.
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),
}

impl MetricsError {
    /// Short label for the failure class, used in logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Status { .. } => "status",
            Self::Decode(_) => "decode",
            Self::InvalidUrl(_) => "invalid_url",
        }
    }
}

/// The fixed-shape failure body returned to callers.
///
/// `response` is always absent on the failures this crate produces; it is
/// kept so that server-sent records with the same shape also deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureRecord {
    pub success: bool,
    pub error_code: u32,
    pub error_msg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<serde_json::Value>,
}

impl FailureRecord {
    /// The record every failed call collapses into.
    #[must_use]
    pub fn server_error() -> Self {
        Self {
            success: false,
            error_code: SERVER_ERROR_CODE,
            error_msg: SERVER_ERROR_MSG.to_string(),
            response: None,
        }
    }
}

/// A failed remote call.
///
/// Serializes as [`FailureRecord::server_error`]; the cause never leaves
/// the process.
#[derive(Debug)]
pub struct RemoteFailure {
    cause: MetricsError,
}

impl RemoteFailure {
    /// Wrap a cause.
    #[must_use]
    pub const fn new(cause: MetricsError) -> Self {
        Self { cause }
    }

    /// The underlying error.
    #[must_use]
    pub const fn cause(&self) -> &MetricsError {
        &self.cause
    }

    /// The wire record for this failure.
    #[must_use]
    pub fn record(&self) -> FailureRecord {
        FailureRecord::server_error()
    }
}

impl Serialize for RemoteFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.record().serialize(serializer)
    }
}

/// Outcome of a remote metrics call.
///
/// Serializes untagged: the server's body as-is, or the failure record.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RemoteResponse {
    /// Parsed response body, unchanged.
    Success(serde_json::Value),
    /// Any failure, normalized.
    Failure(RemoteFailure),
}

impl RemoteResponse {
    /// Log and normalize the outcome of a `try_*` call.
    pub(crate) fn settle(
        operation: &'static str,
        result: Result<serde_json::Value, MetricsError>,
    ) -> Self {
        match result {
            Ok(body) => {
                tracing::debug!(operation, body = %body, "Remote metrics call succeeded");
                Self::Success(body)
            }
            Err(e) => {
                tracing::error!(
                    operation,
                    error = %e,
                    kind = e.kind(),
                    "Remote metrics call failed"
                );
                Self::Failure(RemoteFailure::new(e))
            }
        }
    }

    /// Returns true for a transport-level success.
    ///
    /// The server's own body may still report `success: false`.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The failure cause, if this is a failure.
    #[must_use]
    pub const fn failure_cause(&self) -> Option<&MetricsError> {
        match self {
            Self::Success(_) => None,
            Self::Failure(f) => Some(f.cause()),
        }
    }

    /// Convert to the JSON value callers would see on the wire.
    #[must_use]
    pub fn into_json(self) -> serde_json::Value {
        match self {
            Self::Success(body) => body,
            Self::Failure(f) => serde_json::to_value(f.record()).unwrap_or_default(),
        }
    }

    /// Convert to a `Result`, keeping the cause.
    ///
    /// # Errors
    ///
    /// Returns the failure cause if the call failed.
    pub fn into_result(self) -> Result<serde_json::Value, MetricsError> {
        match self {
            Self::Success(body) => Ok(body),
            Self::Failure(f) => Err(f.cause),
        }
    }
}
