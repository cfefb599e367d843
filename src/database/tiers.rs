use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::Tier;
use crate::domain::FilterRuleSet;
use crate::errors::TrackerError;

const TIER_COLUMNS: &str = "id, game_id, url, filter_json, created_at";

/// Return the tier for this game and page URL, creating it on first scrape
pub fn insert_or_get(conn: &Connection, game_id: i64, url: &str) -> Result<Tier> {
    conn.execute(
        "INSERT OR IGNORE INTO tiers (game_id, url) VALUES (?1, ?2)",
        params![game_id, url],
    )
    .context("Failed to insert tier")?;

    let sql = format!("SELECT {TIER_COLUMNS} FROM tiers WHERE game_id = ?1 AND url = ?2");
    conn.query_row(&sql, params![game_id, url], parse_tier_row)
        .context("Failed to query tier after insert")
}

pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Tier>> {
    let sql = format!("SELECT {TIER_COLUMNS} FROM tiers WHERE id = ?1");

    conn.query_row(&sql, params![id], parse_tier_row)
        .optional()
        .context("Failed to query tier by id")
}

pub fn list_all(conn: &Connection) -> Result<Vec<Tier>> {
    let sql = format!("SELECT {TIER_COLUMNS} FROM tiers ORDER BY id");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_tier_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn list_by_game(conn: &Connection, game_id: i64) -> Result<Vec<Tier>> {
    let sql = format!("SELECT {TIER_COLUMNS} FROM tiers WHERE game_id = ?1 ORDER BY id");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![game_id], parse_tier_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// Rule set attached to a tier; unreadable JSON counts as no rules
pub fn get_filters(conn: &Connection, tier_id: i64) -> Result<FilterRuleSet> {
    let tier = find_by_id(conn, tier_id)?
        .ok_or_else(|| TrackerError::NotFound(format!("tier {tier_id}")))?;
    Ok(tier.filters())
}

pub fn set_filters(conn: &Connection, tier_id: i64, filters: &FilterRuleSet) -> Result<()> {
    let json = filters.to_json().context("Failed to serialize filter rules")?;

    let updated = conn
        .execute(
            "UPDATE tiers SET filter_json = ?1 WHERE id = ?2",
            params![json, tier_id],
        )
        .context("Failed to update tier filters")?;

    if updated == 0 {
        return Err(TrackerError::NotFound(format!("tier {tier_id}")).into());
    }
    Ok(())
}

fn parse_tier_row(row: &rusqlite::Row) -> rusqlite::Result<Tier> {
    Ok(Tier {
        id: row.get(0)?,
        game_id: row.get(1)?,
        url: row.get(2)?,
        filter_json: row.get(3)?,
        created_at: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{create_memory_pool, games, get_connection, setup::apply_schema};
    use crate::domain::{FilterKind, FilterRule};

    const URL: &str = "https://liquipedia.net/dota2/Tier_1_Tournaments";

    #[test]
    fn test_insert_or_get_reuses_tier() {
        let pool = create_memory_pool().unwrap();
        let conn = get_connection(&pool).unwrap();
        apply_schema(&conn).unwrap();
        let game = games::insert_or_get(&conn, "dota2").unwrap();

        let first = insert_or_get(&conn, game.id, URL).unwrap();
        let second = insert_or_get(&conn, game.id, URL).unwrap();
        insert_or_get(&conn, game.id, "https://liquipedia.net/dota2/Tier_2_Tournaments").unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(list_by_game(&conn, game.id).unwrap().len(), 2);
        assert_eq!(list_all(&conn).unwrap().len(), 2);
        assert!(list_by_game(&conn, game.id + 1).unwrap().is_empty());
    }

    #[test]
    fn test_filters_round_trip() {
        let pool = create_memory_pool().unwrap();
        let conn = get_connection(&pool).unwrap();
        apply_schema(&conn).unwrap();
        let game = games::insert_or_get(&conn, "dota2").unwrap();
        let tier = insert_or_get(&conn, game.id, URL).unwrap();

        assert!(get_filters(&conn, tier.id).unwrap().is_empty());

        let rules = FilterRuleSet {
            include_rules: vec![FilterRule::new(FilterKind::Contains, "Major")],
            exclude_rules: vec![],
        };
        set_filters(&conn, tier.id, &rules).unwrap();

        assert_eq!(get_filters(&conn, tier.id).unwrap(), rules);
    }

    #[test]
    fn test_missing_tier_is_not_found() {
        let pool = create_memory_pool().unwrap();
        let conn = get_connection(&pool).unwrap();
        apply_schema(&conn).unwrap();

        let error = get_filters(&conn, 42).unwrap_err();
        assert!(matches!(TrackerError::find(&error), Some(TrackerError::NotFound(_))));

        let error = set_filters(&conn, 42, &FilterRuleSet::default()).unwrap_err();
        assert!(matches!(TrackerError::find(&error), Some(TrackerError::NotFound(_))));
    }

    #[test]
    fn test_tier_requires_existing_game() {
        let pool = create_memory_pool().unwrap();
        let conn = get_connection(&pool).unwrap();
        apply_schema(&conn).unwrap();

        assert!(insert_or_get(&conn, 99, URL).is_err());
    }
}
