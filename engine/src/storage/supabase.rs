use super::{validate_table_name, ProfileStore};
use crate::config::SupabaseConfig;
use crate::secrets::SecretString;
use async_trait::async_trait;
use sdk::errors::EngineError;
use serde_json::json;
use std::time::Duration;

/// Appends profiles through the Supabase (PostgREST) REST API
pub struct SupabaseStore {
    endpoint: String,
    key: SecretString,
    client: reqwest::Client,
}

impl SupabaseStore {
    pub fn new(
        config: &SupabaseConfig,
        table: &str,
        key: SecretString,
    ) -> Result<Self, EngineError> {
        validate_table_name(table)?;

        let base = config.url.trim().trim_end_matches('/');
        if base.is_empty() {
            return Err(EngineError::Config(
                "storage.supabase.url (or SUPABASE_URL) is required for the supabase backend"
                    .to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EngineError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: format!("{}/rest/v1/{}", base, table),
            key,
            client,
        })
    }

    /// Full URL rows are inserted into
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ProfileStore for SupabaseStore {
    fn name(&self) -> &str {
        "supabase"
    }

    async fn store_profile(&self, user_id: &str, profile: &str) -> Result<(), EngineError> {
        let row = json!({
            "user_id": user_id,
            "structured_output": profile,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .header("apikey", self.key.unsecure())
            .header("Authorization", format!("Bearer {}", self.key.unsecure()))
            .header("Prefer", "return=minimal")
            .json(&row)
            .send()
            .await
            .map_err(|e| EngineError::Network(format!("Supabase insert failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(EngineError::Storage(format!(
                "Supabase insert rejected with HTTP {}: {}",
                status, text
            )));
        }

        tracing::debug!("Inserted role profile for {} into {}", user_id, self.endpoint);
        Ok(())
    }
}
