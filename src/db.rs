//! Store connection lifecycle and embedded schema migrations.

use crate::errors::{DbError, DbResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

// Embed migration SQL files at compile time
const MIGRATION_USERS: &str = include_str!("../migrations/20250601000000_users.sql");

// List of migrations with their names and SQL content
const MIGRATIONS: &[(&str, &str)] = &[
    ("20250601000000_users.sql", MIGRATION_USERS),
];

/// Open the connection pool for the user store, creating the database file
/// if it does not exist yet.
pub async fn init_pool(database_url: &str) -> DbResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(DbError::Sqlx)?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Apply any pending migrations. Safe to call repeatedly; applied
/// migrations are recorded in a bookkeeping table and skipped on re-run.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    create_migrations_table(pool).await?;

    let last_migration = get_last_migration(pool).await?;
    let pending = pending_migrations(last_migration);

    if pending.is_empty() {
        log::debug!("no pending migrations");
        return Ok(());
    }

    let mut tx = pool.begin().await?;

    for (name, sql) in pending {
        sqlx::query(sql)
            .execute(&mut *tx)
            .await
            .map_err(|e| DbError::Migration(format!("failed to apply {}: {}", name, e)))?;

        sqlx::query("INSERT INTO migrations (name, applied_at) VALUES (?, ?)")
            .bind(name)
            .bind(chrono::Utc::now().to_rfc3339())
            .execute(&mut *tx)
            .await
            .map_err(|e| DbError::Migration(format!("failed to record {}: {}", name, e)))?;

        log::info!("applied migration {}", name);
    }

    tx.commit().await?;
    Ok(())
}

async fn create_migrations_table(pool: &SqlitePool) -> DbResult<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS migrations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            applied_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn get_last_migration(pool: &SqlitePool) -> DbResult<Option<String>> {
    let result = sqlx::query_scalar::<_, String>(
        "SELECT name FROM migrations ORDER BY id DESC LIMIT 1",
    )
    .fetch_optional(pool)
    .await?;

    Ok(result)
}

/// Determine which migrations need to be applied
fn pending_migrations(last_migration: Option<String>) -> Vec<(&'static str, &'static str)> {
    let mut pending = Vec::new();
    let mut should_include = last_migration.is_none();

    for &(name, sql) in MIGRATIONS {
        if should_include {
            pending.push((name, sql));
        } else if Some(name.to_string()) == last_migration {
            // Found the last applied migration, include all subsequent ones
            should_include = true;
        }
    }

    pending
}
