use anyhow::{Context, Result};
use rusqlite::Connection;

use super::connection::{create_pool, get_connection, DbPool};

/// Open (creating if needed) the database at `path` with an up-to-date schema
pub fn open_database(path: &str) -> Result<DbPool> {
    let pool = create_pool(path)?;
    let conn = get_connection(&pool)?;
    apply_schema(&conn)?;
    Ok(pool)
}

/// Create any missing tables and indexes; safe to run on every start
pub fn apply_schema(conn: &Connection) -> Result<()> {
    let schema_sql = include_str!("schema.sql");
    let statements = split_sql_statements(schema_sql);

    for (idx, statement) in statements.iter().enumerate() {
        execute_sql(conn, statement)
            .with_context(|| format!("Failed to execute statement {}", idx + 1))?;
    }

    log::debug!("Database schema is up to date");
    Ok(())
}

fn split_sql_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn execute_sql(conn: &Connection, sql: &str) -> Result<()> {
    conn.execute(sql, [])
        .context("Failed to execute SQL statement")
        .map(|_| ())
}
