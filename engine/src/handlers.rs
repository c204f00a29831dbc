//! Command handlers for CLI operations
//!
//! This module implements the handlers for all CLI commands:
//! - serve: Run the HTTP service
//! - questions: Print the interview questions
//! - doctor: Validate configuration and report missing secrets

use anyhow::{Context, Result};
use serde_json::json;
use std::sync::Arc;

use crate::config::{Config, StorageBackend};
use crate::interview::{SessionTracker, QUESTIONS};
use crate::llm::openai::OpenAIProvider;
use crate::report::LLMReportGenerator;
use crate::server;
use crate::storage;
use sdk::errors::EngineError;

/// Output format for command results
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for machine consumption
    Json,
}

/// Wire the report generator and profile store from configuration
pub async fn build_tracker(config: &Config) -> Result<Arc<SessionTracker>, EngineError> {
    let api_key = config.secrets.openai_api_key.clone().ok_or_else(|| {
        EngineError::Config("OPENAI_API_KEY must be set to generate role profiles".to_string())
    })?;

    let provider = OpenAIProvider::new(config.llm.openai.clone(), api_key)?;
    let reports = Arc::new(LLMReportGenerator::new(Arc::new(provider)));
    let profiles = storage::from_config(config).await?;

    tracing::info!(
        "Reports from {} via {}, profiles stored in {} ({})",
        config.llm.openai.model,
        config.llm.openai.base_url,
        profiles.name(),
        config.storage.table
    );

    Ok(Arc::new(SessionTracker::new(reports, profiles)))
}

/// Run the HTTP service until Ctrl-C
pub async fn handle_serve(config: &Config) -> Result<()> {
    let tracker = build_tracker(config).await?;
    let app = server::router(Arc::clone(&tracker), &config.server.cors_origins)?;

    let bind_addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;

    server::serve(listener, app, shutdown_signal()).await?;
    tracker.close().await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Print the interview questions
pub fn handle_questions(format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for (i, question) in QUESTIONS.iter().enumerate() {
                println!("{:>2}. {}", i + 1, question);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&QUESTIONS)?);
        }
    }
    Ok(())
}

/// Check that everything `serve` needs is present
///
/// Returns the list of issues found, empty when healthy.
pub fn diagnose(config: &Config) -> Vec<String> {
    let mut issues = Vec::new();

    if config.secrets.openai_api_key.is_none() {
        issues.push("OPENAI_API_KEY is not set; role profiles cannot be generated".to_string());
    }

    if config.storage.backend == StorageBackend::Supabase {
        if config.storage.supabase.url.trim().is_empty() {
            issues.push(
                "storage.supabase.url (or SUPABASE_URL) is not set; profiles cannot be stored"
                    .to_string(),
            );
        }
        if config.secrets.supabase_key.is_none() {
            issues.push("SUPABASE_ANON_KEY is not set; profiles cannot be stored".to_string());
        }
    }

    if let Err(e) = server::cors_layer(&config.server.cors_origins) {
        issues.push(e.to_string());
    }

    issues
}

/// Validate configuration and report missing secrets
pub fn handle_doctor(config: &Config, format: OutputFormat) -> Result<()> {
    let issues = diagnose(config);

    match format {
        OutputFormat::Text => {
            println!("Sisuu Doctor");
            println!("============");
            println!();
            println!("  Configuration: valid");
            println!("  Listen address: {}", config.server.bind_addr());
            println!("  Model: {}", config.llm.openai.model);
            println!("  Storage: {:?} ({})", config.storage.backend, config.storage.table);
            println!();

            if issues.is_empty() {
                println!("✓ Ready to serve");
            } else {
                println!("⚠ Issues found:");
                println!();
                for (i, issue) in issues.iter().enumerate() {
                    println!("  {}. {}", i + 1, issue);
                }
            }
        }
        OutputFormat::Json => {
            let output = json!({
                "listen": config.server.bind_addr(),
                "model": config.llm.openai.model,
                "storage": config.storage.backend,
                "table": config.storage.table,
                "issues": issues,
                "healthy": issues.is_empty()
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
