//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Health check (registered in main)
//!
//! # Image browser action
//! POST /app                             - One page of store images (form field `initDataFetcher`)
//!
//! # Pricing
//! GET  /app/pricing                     - Pricing plans page
//! GET  /api/pricing                     - Pricing plans as JSON
//!
//! # Translation server proxy (always 200; failures use the fixed failure record)
//! POST /api/metrics/untranslated-words  - Untranslated character count
//! POST /api/metrics/conversion-data     - Conversion report
//! POST /api/metrics/store-language      - Translation status per language
//! POST /api/metrics/quota               - Real-time quota switches
//! POST /api/metrics/quality-score       - Translation quality score
//! ```

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

pub mod images;
pub mod metrics;
pub mod pricing;

/// All application routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/app", post(images::action))
        .route("/app/pricing", get(pricing::index))
        .route("/api/pricing", get(pricing::list))
        .route(
            "/api/metrics/untranslated-words",
            post(metrics::untranslated_words),
        )
        .route("/api/metrics/conversion-data", post(metrics::conversion_data))
        .route("/api/metrics/store-language", post(metrics::store_language))
        .route("/api/metrics/quota", post(metrics::real_time_quota))
        .route("/api/metrics/quality-score", post(metrics::quality_score))
}
