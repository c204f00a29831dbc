//! Local SQLite profile store
//!
//! Uses sqlx with WAL mode. The profile table is created on open if it does
//! not exist yet. All inserts use bound parameters; only the table name is
//! formatted into SQL, and it is validated as a plain identifier first.

use super::{validate_table_name, ProfileStore};
use anyhow::{Context, Result};
use async_trait::async_trait;
use sdk::errors::EngineError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::ConnectOptions;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Profile store backed by a SQLite file
pub struct SqliteStore {
    pool: SqlitePool,
    insert_sql: String,
}

impl SqliteStore {
    /// Open (and create if needed) the database at `db_path`
    pub async fn open(db_path: &Path, table: &str) -> Result<Self> {
        validate_table_name(table)?;
        info!("Opening profile database at: {}", db_path.display());

        if let Some(parent) = db_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context("Failed to create database directory")?;
        }

        let connection_string = format!("sqlite:{}", db_path.display());
        let options = SqliteConnectOptions::from_str(&connection_string)?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .disable_statement_logging();

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .context("Failed to connect to database")?;

        debug!("Database connection established");

        sqlx::raw_sql(&create_table_sql(table))
            .execute(&pool)
            .await
            .with_context(|| format!("Failed to create table {}", table))?;

        Ok(Self {
            pool,
            insert_sql: format!(
                "INSERT INTO {} (user_id, structured_output, created_at) VALUES (?, ?, ?)",
                table
            ),
        })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn create_table_sql(table: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {table} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            structured_output TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_{table}_user_id ON {table}(user_id);",
        table = table
    )
}

#[async_trait]
impl ProfileStore for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn store_profile(&self, user_id: &str, profile: &str) -> Result<(), EngineError> {
        sqlx::query(&self.insert_sql)
            .bind(user_id)
            .bind(profile)
            .bind(chrono::Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(|e| EngineError::Storage(format!("SQLite insert failed: {}", e)))?;

        debug!("Inserted role profile for {}", user_id);
        Ok(())
    }

    /// Checkpoint the WAL and close all connections
    async fn close(&self) -> Result<(), EngineError> {
        sqlx::query("PRAGMA wal_checkpoint(TRUNCATE)")
            .execute(&self.pool)
            .await
            .map_err(|e| EngineError::Storage(format!("Failed to flush WAL: {}", e)))?;

        self.pool.close().await;
        info!("Profile database closed");
        Ok(())
    }
}
