use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::Game;

/// Return the game with this name, creating it on first use
pub fn insert_or_get(conn: &Connection, name: &str) -> Result<Game> {
    conn.execute("INSERT OR IGNORE INTO games (name) VALUES (?1)", params![name])
        .context("Failed to insert game")?;

    find_by_name(conn, name)?
        .with_context(|| format!("Game {name} missing after insert"))
}

pub fn find_by_name(conn: &Connection, name: &str) -> Result<Option<Game>> {
    let sql = "SELECT id, name, created_at FROM games WHERE name = ?1";

    conn.query_row(sql, params![name], parse_game_row)
        .optional()
        .context("Failed to query game by name")
}

pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Game>> {
    let sql = "SELECT id, name, created_at FROM games WHERE id = ?1";

    conn.query_row(sql, params![id], parse_game_row)
        .optional()
        .context("Failed to query game by id")
}

pub fn list_all(conn: &Connection) -> Result<Vec<Game>> {
    let sql = "SELECT id, name, created_at FROM games ORDER BY name";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_game_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

fn parse_game_row(row: &rusqlite::Row) -> rusqlite::Result<Game> {
    Ok(Game {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: row.get(2)?,
    })
}
