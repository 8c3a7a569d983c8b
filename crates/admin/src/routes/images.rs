//! Image page action used by the image browser.

use axum::{
    Form, Json,
    extract::{State, rejection::FormRejection},
};
use imagelingo_core::{Connection, ImageRecord, PageRequest};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{error::AppError, state::AppState};

/// Form body posted by the browser.
#[derive(Debug, Deserialize)]
pub struct ImagePageForm {
    /// JSON-encoded [`PageRequest`].
    #[serde(rename = "initDataFetcher")]
    pub init_data_fetcher: String,
}

/// Action response: `{ "response": { "edges": [...], "pageInfo": {...} } }`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ImagePageResponse {
    pub response: Connection<ImageRecord>,
}

/// Decode and validate a paging directive.
///
/// # Errors
///
/// Returns `AppError::BadRequest` if the directive is not valid JSON or its
/// page size is outside `1..=250`.
pub fn parse_directive(raw: &str) -> Result<PageRequest, AppError> {
    let request: PageRequest = serde_json::from_str(raw)
        .map_err(|e| AppError::BadRequest(format!("invalid {}: {e}", PageRequest::FORM_FIELD)))?;

    if !request.has_valid_size() {
        return Err(AppError::BadRequest(format!(
            "num must be between 1 and {} (got {})",
            PageRequest::MAX_PAGE_SIZE,
            request.num
        )));
    }

    Ok(request)
}

/// Return one page of store images.
#[instrument(skip(state, form))]
pub async fn action(
    State(state): State<AppState>,
    form: Result<Form<ImagePageForm>, FormRejection>,
) -> Result<Json<ImagePageResponse>, AppError> {
    let Form(form) = form.map_err(|e| {
        AppError::BadRequest(format!("expected form field {}: {e}", PageRequest::FORM_FIELD))
    })?;
    let request = parse_directive(&form.init_data_fetcher)?;

    tracing::info!(
        direction = %request.direction,
        num = request.num,
        has_cursor = request.cursor.is_some(),
        "Fetching store images"
    );

    let page = state.shopify().get_store_images(&request).await?;

    Ok(Json(ImagePageResponse { response: page }))
}
