use serde::{Deserialize, Deserializer, Serialize};

use crate::cache::SavedPage;
use crate::database::{Game, Tier};
use crate::domain::{FilterRuleSet, TournamentDraft, TournamentRecord};

// --- Requests ---

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GameParams {
    pub game: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TierParams {
    #[serde(default, alias = "tierId", deserialize_with = "blank_as_none")]
    pub tier_id: Option<i64>,
}

/// `tier=` (blank) selects every tier of the game
#[derive(Debug, Deserialize)]
pub struct OverviewParams {
    pub game: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub tier: Option<i64>,
}

// Query values arrive as text; an empty value means "not given"
fn blank_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Deserialize)]
pub struct SaveFiltersRequest {
    #[serde(alias = "tierId")]
    pub tier_id: Option<i64>,
    pub filters: Option<FilterRuleSet>,
}

// --- Responses ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub success: bool,
    pub game: String,
    pub tier: String,
    pub tier_id: i64,
    pub tournaments: Vec<TournamentDraft>,
    pub inserted: usize,
}

#[derive(Debug, Serialize)]
pub struct GamesResponse {
    pub games: Vec<Game>,
}

#[derive(Debug, Serialize)]
pub struct TiersResponse {
    pub tiers: Vec<Tier>,
}

/// Stored tournament plus whether its tier's rules let it through
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentItem {
    #[serde(flatten)]
    pub record: TournamentRecord,
    pub included: bool,
}

#[derive(Debug, Serialize)]
pub struct TournamentsResponse {
    pub tournaments: Vec<TournamentItem>,
}

#[derive(Debug, Serialize)]
pub struct FiltersResponse {
    pub filters: FilterRuleSet,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct SavedPagesResponse {
    pub pages: Vec<SavedPage>,
}
