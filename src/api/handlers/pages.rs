use axum::{extract::State, Json};
use std::sync::Arc;

use super::AppState;
use crate::api::error::ApiResult;
use crate::api::models::SavedPagesResponse;

pub async fn get_saved_pages(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<SavedPagesResponse>> {
    let pages = state.pages.list(&state.config.scraper.base_url)?;

    Ok(Json(SavedPagesResponse { pages }))
}
