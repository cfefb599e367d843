use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use log::info;
use std::sync::Arc;

use super::AppState;
use crate::api::error::{rejected, ApiResult};
use crate::api::models::{SubmitRequest, SubmitResponse};
use crate::errors::TrackerError;

pub async fn submit_url(
    State(state): State<Arc<AppState>>,
    request: Result<Json<SubmitRequest>, JsonRejection>,
) -> ApiResult<Json<SubmitResponse>> {
    let Json(request) = request.map_err(rejected)?;
    let url = request
        .url
        .filter(|url| !url.trim().is_empty())
        .ok_or(TrackerError::MissingField("url"))?;

    info!("Submit requested for {}", url);
    let outcome = state.ingestion.lock().await.submit(&url).await?;

    Ok(Json(SubmitResponse {
        success: true,
        game: outcome.game,
        tier: outcome.tier,
        tier_id: outcome.tier_id,
        tournaments: outcome.tournaments,
        inserted: outcome.inserted,
    }))
}
