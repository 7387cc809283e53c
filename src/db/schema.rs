use std::collections::HashSet;

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::Connection;

/// One schema step. Versions are applied in ascending order, once each.
struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "key-value store",
    sql: include_str!("migrations/001_initial.sql"),
}];

const CREATE_LEDGER: &str = "CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at TEXT NOT NULL
)";

pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(CREATE_LEDGER)
        .context("Failed to create schema_migrations table")?;

    let applied = applied_versions(conn)?;
    let pending = MIGRATIONS
        .iter()
        .filter(|m| !applied.contains(&m.version));

    for migration in pending {
        tracing::info!("Applying migration {:03}: {}", migration.version, migration.name);

        // The schema change and its ledger row commit together.
        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(migration.sql).with_context(|| {
            format!("Failed to apply migration {:03}: {}", migration.version, migration.name)
        })?;
        tx.execute(
            "INSERT INTO schema_migrations (version, name, applied_at) VALUES (?, ?, ?)",
            (migration.version, migration.name, Utc::now().to_rfc3339()),
        )?;
        tx.commit()?;
    }

    Ok(())
}

fn applied_versions(conn: &Connection) -> Result<HashSet<u32>> {
    let mut stmt = conn.prepare("SELECT version FROM schema_migrations")?;
    let versions = stmt
        .query_map([], |row| row.get(0))?
        .collect::<Result<HashSet<u32>, _>>()?;
    Ok(versions)
}
