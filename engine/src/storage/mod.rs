//! Role profile persistence
//!
//! Finished profiles are appended to a record store and never read back by
//! the service. Two backends are available:
//!
//! - [`SupabaseStore`]: the hosted database, written through its REST API
//! - [`SqliteStore`]: a local SQLite file for self-hosted deployments

use crate::config::{Config, StorageBackend};
use async_trait::async_trait;
use sdk::errors::EngineError;
use std::sync::Arc;

pub mod sqlite;
pub mod supabase;

pub use sqlite::SqliteStore;
pub use supabase::SupabaseStore;

/// Append-only store for generated role profiles
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Backend name used in logs
    fn name(&self) -> &str;

    /// Append one profile for `user_id`
    async fn store_profile(&self, user_id: &str, profile: &str) -> Result<(), EngineError>;

    /// Flush and release resources at shutdown
    async fn close(&self) -> Result<(), EngineError> {
        Ok(())
    }
}

/// Build the store selected by `storage.backend`
pub async fn from_config(config: &Config) -> Result<Arc<dyn ProfileStore>, EngineError> {
    match config.storage.backend {
        StorageBackend::Supabase => {
            let key = config.secrets.supabase_key.clone().ok_or_else(|| {
                EngineError::Config(
                    "SUPABASE_ANON_KEY must be set for the supabase backend".to_string(),
                )
            })?;

            let store = SupabaseStore::new(
                &config.storage.supabase,
                &config.storage.table,
                key,
            )?;
            Ok(Arc::new(store))
        }
        StorageBackend::Sqlite => {
            let store = SqliteStore::open(&config.storage.sqlite.path, &config.storage.table)
                .await
                .map_err(|e| EngineError::Storage(format!("{:#}", e)))?;
            Ok(Arc::new(store))
        }
    }
}

/// Check that a table name is a plain SQL identifier
pub(crate) fn validate_table_name(table: &str) -> Result<(), EngineError> {
    let mut chars = table.chars();
    let valid = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid {
        Ok(())
    } else {
        Err(EngineError::Config(format!(
            "Invalid table name '{}': use letters, digits and underscores",
            table
        )))
    }
}
