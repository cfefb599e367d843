use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{
    filters::{get_filters, save_filters},
    listing::{get_games, get_tiers, get_tournaments},
    overview::get_overview,
    pages::get_saved_pages,
    submit::submit_url,
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/submit", post(submit_url))
        .route("/api/games", get(get_games))
        .route("/api/tiers", get(get_tiers))
        .route("/api/tournaments", get(get_tournaments))
        .route("/api/filters", get(get_filters).post(save_filters))
        .route("/api/saved-pages", get(get_saved_pages))
        .route("/api/overview", get(get_overview))
        .with_state(state)
}
