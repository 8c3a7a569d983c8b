//! Translation server proxy routes.
//!
//! Each handler forwards to [`crate::metrics::MetricsClient`] and returns
//! its `RemoteResponse` as JSON with status 200.

use axum::{Json, extract::State};

use crate::{
    metrics::{
        ConversionDataParams, QualityScoreParams, RealTimeQuotaParams, RemoteResponse,
        StoreLanguageParams, UnTranslatedWordsParams,
    },
    state::AppState,
};

pub async fn untranslated_words(
    State(state): State<AppState>,
    Json(params): Json<UnTranslatedWordsParams>,
) -> Json<RemoteResponse> {
    Json(state.metrics().get_untranslated_words(&params).await)
}

pub async fn conversion_data(
    State(state): State<AppState>,
    Json(params): Json<ConversionDataParams>,
) -> Json<RemoteResponse> {
    Json(state.metrics().get_conversion_data(&params).await)
}

pub async fn store_language(
    State(state): State<AppState>,
    Json(params): Json<StoreLanguageParams>,
) -> Json<RemoteResponse> {
    Json(state.metrics().get_store_language(&params).await)
}

pub async fn real_time_quota(
    State(state): State<AppState>,
    Json(params): Json<RealTimeQuotaParams>,
) -> Json<RemoteResponse> {
    Json(state.metrics().get_real_time_quota_data(&params).await)
}

pub async fn quality_score(
    State(state): State<AppState>,
    Json(params): Json<QualityScoreParams>,
) -> Json<RemoteResponse> {
    Json(state.metrics().get_translation_quality_score(&params).await)
}
