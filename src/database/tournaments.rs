use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use super::models::{ListScope, ListedTournament};
use crate::domain::{TournamentDraft, TournamentRecord};

const TOURNAMENT_COLUMNS: &str = "t.id, t.tier_id, t.name, t.date_text, t.start_date, \
    t.end_date, t.prize_pool, t.location, t.url";

/// Store a draft under a tier unless `(name, start_date)` is already known.
///
/// Returns whether a new row was written.
pub fn insert_draft(conn: &Connection, tier_id: i64, draft: &TournamentDraft) -> Result<bool> {
    let sql = "INSERT OR IGNORE INTO tournaments
            (name, date_text, start_date, end_date, prize_pool, location, url, tier_id)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";

    let inserted = conn
        .execute(
            sql,
            params![
                draft.name,
                draft.date_text,
                draft.start_date,
                draft.end_date,
                draft.prize_pool,
                draft.location,
                draft.url,
                tier_id
            ],
        )
        .with_context(|| format!("Failed to insert tournament {}", draft.name))?;

    Ok(inserted > 0)
}

pub fn list_by_tier(conn: &Connection, tier_id: i64) -> Result<Vec<TournamentRecord>> {
    let sql = format!(
        "SELECT {TOURNAMENT_COLUMNS} FROM tournaments t WHERE t.tier_id = ?1 ORDER BY t.id"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![tier_id], parse_tournament_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// Tournaments in scope, joined with their game name and tier filters
pub fn list_listed(conn: &Connection, scope: ListScope) -> Result<Vec<ListedTournament>> {
    let (condition, id) = match scope {
        ListScope::All => ("1 = 1", None),
        ListScope::Game(game_id) => ("r.game_id = ?1", Some(game_id)),
        ListScope::Tier(tier_id) => ("t.tier_id = ?1", Some(tier_id)),
    };
    let sql = format!(
        "SELECT {TOURNAMENT_COLUMNS}, g.name, r.filter_json
         FROM tournaments t
         JOIN tiers r ON t.tier_id = r.id
         JOIN games g ON r.game_id = g.id
         WHERE {condition}
         ORDER BY t.id"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = match id {
        Some(id) => stmt.query_map(params![id], parse_listed_row)?,
        None => stmt.query_map([], parse_listed_row)?,
    }
    .collect::<rusqlite::Result<Vec<_>>>()
    .context("Failed to list tournaments")?;

    Ok(rows)
}

fn parse_tournament_row(row: &rusqlite::Row) -> rusqlite::Result<TournamentRecord> {
    Ok(TournamentRecord {
        id: row.get(0)?,
        tier_id: row.get(1)?,
        name: row.get(2)?,
        date_text: row.get(3)?,
        start_date: row.get(4)?,
        end_date: row.get(5)?,
        prize_pool: row.get(6)?,
        location: row.get(7)?,
        url: row.get(8)?,
    })
}

fn parse_listed_row(row: &rusqlite::Row) -> rusqlite::Result<ListedTournament> {
    Ok(ListedTournament {
        record: parse_tournament_row(row)?,
        game_name: row.get(9)?,
        filter_json: row.get(10)?,
    })
}
