//! CLI subcommand implementations.

use thiserror::Error;

pub mod images;
pub mod metrics;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Required environment variable is missing or invalid.
    #[error(transparent)]
    Config(#[from] imagelingo_admin::config::ConfigError),

    /// Missing input that has no default.
    #[error("Missing {0}")]
    MissingInput(&'static str),

    /// The image page source could not be created.
    #[error(transparent)]
    Source(#[from] crate::browser::SourceError),

    /// Reading commands or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Output could not be rendered.
    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}
