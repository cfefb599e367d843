use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::domain::{FilterRuleSet, Named, Scheduled, TournamentRecord};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: i64,
    pub name: String,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tier {
    pub id: i64,
    pub game_id: i64,
    pub url: String,
    #[serde(skip)]
    pub filter_json: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

impl Tier {
    pub fn filters(&self) -> FilterRuleSet {
        FilterRuleSet::from_json(self.filter_json.as_deref())
    }
}

/// Which tournaments a listing covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    All,
    Game(i64),
    Tier(i64),
}

// DTO for the joined listing query
#[derive(Debug, Clone, PartialEq)]
pub struct ListedTournament {
    pub record: TournamentRecord,
    pub game_name: String,
    pub filter_json: Option<String>,
}

impl Scheduled for ListedTournament {
    fn start_date(&self) -> Option<NaiveDate> {
        self.record.start_date
    }

    fn end_date(&self) -> Option<NaiveDate> {
        self.record.end_date
    }
}

impl Named for ListedTournament {
    fn name(&self) -> &str {
        &self.record.name
    }
}
