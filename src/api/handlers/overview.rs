use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use super::AppState;
use crate::api::error::{rejected, ApiResult};
use crate::api::models::OverviewParams;
use crate::services::overview::{Overview, OverviewQuery};

pub async fn get_overview(
    State(state): State<Arc<AppState>>,
    params: Result<Query<OverviewParams>, QueryRejection>,
) -> ApiResult<Json<Overview>> {
    let Query(params) = params.map_err(rejected)?;
    let query = OverviewQuery::new(params.game, params.tier);

    let today = Utc::now().date_naive();
    let overview = state.overview.overview(&query, today)?;

    Ok(Json(overview))
}
