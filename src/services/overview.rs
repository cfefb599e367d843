use anyhow::Result;
use chrono::NaiveDate;
use log::{debug, info};
use rusqlite::Connection;
use serde::Serialize;
use std::collections::HashMap;

use crate::database::{
    self, games, tiers, tournaments, DbPool, Game, ListScope, ListedTournament, Tier,
};
use crate::domain::filters::evaluate;
use crate::domain::{
    classify, date_badge, format_date_range, strip_game_prefix, Bucket, Classification, Classified,
    DateBadge, FilterRuleSet,
};
use crate::errors::TrackerError;

/// What the caller is looking at; passed in with every request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverviewQuery {
    pub game: Option<String>,
    pub tier: Option<i64>,
}

impl OverviewQuery {
    pub fn new(game: Option<String>, tier: Option<i64>) -> Self {
        Self { game, tier }
    }

    fn game_name(&self) -> Option<String> {
        self.game
            .as_deref()
            .map(|game| game.trim().to_lowercase())
            .filter(|game| !game.is_empty())
    }
}

/// One tournament ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentView {
    pub key: String,
    pub id: i64,
    pub tier_id: i64,
    pub game: String,
    pub name: String,
    pub display_name: String,
    pub badge: DateBadge,
    pub date_range: String,
    pub date_text: Option<String>,
    pub prize_pool: String,
    pub location: String,
    pub url: Option<String>,
    pub has_prize: bool,
    pub has_location: bool,
    pub is_live: bool,
    pub show_eta: bool,
    pub relative_label: Option<String>,
}

impl TournamentView {
    fn new(entry: Classified<ListedTournament>, bucket: Bucket) -> Self {
        let Classified {
            record: listed,
            relative_label,
        } = entry;
        let record = listed.record;

        Self {
            key: record.list_key(),
            display_name: strip_game_prefix(&record.name, &listed.game_name),
            badge: date_badge(record.start_date),
            date_range: format_date_range(record.start_date, record.end_date),
            has_prize: record.has_prize(),
            has_location: record.has_location(),
            is_live: bucket == Bucket::Live,
            show_eta: bucket == Bucket::Upcoming && relative_label.is_some(),
            relative_label,
            id: record.id,
            tier_id: record.tier_id,
            game: listed.game_name,
            name: record.name,
            date_text: record.date_text,
            prize_pool: record.prize_pool,
            location: record.location,
            url: record.url,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKind {
    Live,
    Highlight,
    NextUp,
    Past,
}

impl SectionKind {
    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Live => "Currently live",
            SectionKind::Highlight => "Upcoming",
            SectionKind::NextUp => "Next up",
            SectionKind::Past => "Past",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub kind: SectionKind,
    pub title: &'static str,
    pub tournaments: Vec<TournamentView>,
}

impl Section {
    fn new(kind: SectionKind, tournaments: Vec<TournamentView>) -> Self {
        Self {
            kind,
            title: kind.title(),
            tournaments,
        }
    }
}

/// Filtered, classified tournaments plus what is needed to change the selection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub today: NaiveDate,
    pub game: Option<String>,
    pub tier: Option<Tier>,
    pub games: Vec<Game>,
    pub tiers: Vec<Tier>,
    pub filters: Option<FilterRuleSet>,
    pub sections: Vec<Section>,
    pub total: usize,
    pub hidden: usize,
}

// Selection after looking the query up in storage
struct Selection {
    scope: Option<ListScope>,
    game: Option<Game>,
    tier: Option<Tier>,
}

pub struct OverviewService {
    pool: DbPool,
}

impl OverviewService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn overview(&self, query: &OverviewQuery, today: NaiveDate) -> Result<Overview> {
        let conn = database::get_connection(&self.pool)?;
        build_overview(&conn, query, today)
    }
}

pub fn build_overview(
    conn: &Connection,
    query: &OverviewQuery,
    today: NaiveDate,
) -> Result<Overview> {
    let selection = select(conn, query)?;

    let listed = match selection.scope {
        Some(scope) => tournaments::list_listed(conn, scope)?,
        None => Vec::new(),
    };
    let fetched = listed.len();
    let visible = apply_tier_filters(listed);
    let hidden = fetched - visible.len();
    if hidden > 0 {
        debug!("Filters hid {} of {} tournaments", hidden, fetched);
    }

    let classification = classify(visible, today);
    let total = classification.len();
    info!(
        "Overview for {:?}: {} live, {} upcoming, {} past",
        query,
        classification.live.len(),
        classification.upcoming.len() + usize::from(classification.highlight.is_some()),
        classification.past.len()
    );

    let tiers = match &selection.game {
        Some(game) => tiers::list_by_game(conn, game.id)?,
        None => tiers::list_all(conn)?,
    };

    Ok(Overview {
        today,
        game: selection.game.map(|game| game.name),
        filters: selection.tier.as_ref().map(Tier::filters),
        tier: selection.tier,
        games: games::list_all(conn)?,
        tiers,
        sections: build_sections(classification),
        total,
        hidden,
    })
}

fn select(conn: &Connection, query: &OverviewQuery) -> Result<Selection> {
    if let Some(tier_id) = query.tier {
        let tier = tiers::find_by_id(conn, tier_id)?
            .ok_or_else(|| TrackerError::NotFound(format!("tier {tier_id}")))?;
        let game = games::find_by_id(conn, tier.game_id)?;
        return Ok(Selection {
            scope: Some(ListScope::Tier(tier.id)),
            game,
            tier: Some(tier),
        });
    }

    match query.game_name() {
        Some(name) => {
            // An unknown game selects nothing rather than everything
            let game = games::find_by_name(conn, &name)?;
            Ok(Selection {
                scope: game.as_ref().map(|game| ListScope::Game(game.id)),
                game,
                tier: None,
            })
        }
        None => Ok(Selection {
            scope: Some(ListScope::All),
            game: None,
            tier: None,
        }),
    }
}

/// Drop records excluded by their own tier's rules
fn apply_tier_filters(listed: Vec<ListedTournament>) -> Vec<ListedTournament> {
    let mut rules_by_tier: HashMap<i64, FilterRuleSet> = HashMap::new();

    listed
        .into_iter()
        .filter(|item| {
            let rules = rules_by_tier
                .entry(item.record.tier_id)
                .or_insert_with(|| FilterRuleSet::from_json(item.filter_json.as_deref()));
            evaluate(item, rules)
        })
        .collect()
}

fn build_sections(classification: Classification<ListedTournament>) -> Vec<Section> {
    let Classification {
        live,
        highlight,
        upcoming,
        past,
    } = classification;

    let views = |entries: Vec<Classified<ListedTournament>>, bucket| {
        entries
            .into_iter()
            .map(|entry| TournamentView::new(entry, bucket))
            .collect::<Vec<_>>()
    };

    [
        Section::new(SectionKind::Live, views(live, Bucket::Live)),
        Section::new(
            SectionKind::Highlight,
            views(highlight.into_iter().collect(), Bucket::Upcoming),
        ),
        Section::new(SectionKind::NextUp, views(upcoming, Bucket::Upcoming)),
        Section::new(SectionKind::Past, views(past, Bucket::Past)),
    ]
    .into_iter()
    .filter(|section| !section.tournaments.is_empty())
    .collect()
}
