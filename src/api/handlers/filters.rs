use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use log::info;
use std::sync::Arc;

use super::AppState;
use crate::api::error::{rejected, ApiResult};
use crate::api::models::{FiltersResponse, SaveFiltersRequest, SuccessResponse, TierParams};
use crate::database::tiers;
use crate::errors::TrackerError;

pub async fn get_filters(
    State(state): State<Arc<AppState>>,
    params: Result<Query<TierParams>, QueryRejection>,
) -> ApiResult<Json<FiltersResponse>> {
    let Query(params) = params.map_err(rejected)?;
    let tier_id = params.tier_id.ok_or(TrackerError::MissingField("tier_id"))?;

    let conn = state.connection()?;
    let filters = tiers::get_filters(&conn, tier_id)?;

    Ok(Json(FiltersResponse { filters }))
}

pub async fn save_filters(
    State(state): State<Arc<AppState>>,
    request: Result<Json<SaveFiltersRequest>, JsonRejection>,
) -> ApiResult<Json<SuccessResponse>> {
    let Json(request) = request.map_err(rejected)?;
    let tier_id = request.tier_id.ok_or(TrackerError::MissingField("tier_id"))?;
    let filters = request.filters.ok_or(TrackerError::MissingField("filters"))?;

    let conn = state.connection()?;
    tiers::set_filters(&conn, tier_id, &filters)?;
    info!(
        "Saved {} include / {} exclude rules for tier {}",
        filters.include_rules.len(),
        filters.exclude_rules.len(),
        tier_id
    );

    Ok(Json(SuccessResponse { success: true }))
}
