use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use std::sync::Arc;

use super::AppState;
use crate::api::error::{rejected, ApiResult};
use crate::api::models::{
    GameParams, GamesResponse, TierParams, TiersResponse, TournamentItem, TournamentsResponse,
};
use crate::database::{games, tiers, tournaments};
use crate::domain::filters::evaluate;
use crate::errors::TrackerError;

pub async fn get_games(State(state): State<Arc<AppState>>) -> ApiResult<Json<GamesResponse>> {
    let conn = state.connection()?;
    let games = games::list_all(&conn)?;

    Ok(Json(GamesResponse { games }))
}

/// Tiers of one game; empty when the game is missing or unknown
pub async fn get_tiers(
    State(state): State<Arc<AppState>>,
    params: Result<Query<GameParams>, QueryRejection>,
) -> ApiResult<Json<TiersResponse>> {
    let Query(params) = params.map_err(rejected)?;
    let name = params
        .game
        .map(|game| game.trim().to_lowercase())
        .filter(|game| !game.is_empty());
    let Some(name) = name else {
        return Ok(Json(TiersResponse { tiers: Vec::new() }));
    };

    let conn = state.connection()?;
    let tiers = match games::find_by_name(&conn, &name)? {
        Some(game) => tiers::list_by_game(&conn, game.id)?,
        None => Vec::new(),
    };

    Ok(Json(TiersResponse { tiers }))
}

/// Every stored tournament of a tier, each flagged by the tier's rules
pub async fn get_tournaments(
    State(state): State<Arc<AppState>>,
    params: Result<Query<TierParams>, QueryRejection>,
) -> ApiResult<Json<TournamentsResponse>> {
    let Query(params) = params.map_err(rejected)?;
    let tier_id = params.tier_id.ok_or(TrackerError::MissingField("tier_id"))?;

    let conn = state.connection()?;
    let rules = tiers::get_filters(&conn, tier_id)?;
    let tournaments = tournaments::list_by_tier(&conn, tier_id)?
        .into_iter()
        .map(|record| TournamentItem {
            included: evaluate(&record, &rules),
            record,
        })
        .collect();

    Ok(Json(TournamentsResponse { tournaments }))
}
