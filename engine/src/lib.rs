//! Sisuu Engine Library
//!
//! Role-profile interviews over HTTP. Used by the `sisuu` binary and the
//! integration tests.

/// Configuration management module
pub mod config;

/// Secret handling and log scrubbing
pub mod secrets;

/// Telemetry and Observability
pub mod telemetry;

/// LLM provider abstraction layer
pub mod llm;

/// Interview questions, sessions and progression
pub mod interview;

/// Role profile generation
pub mod report;

/// Role profile persistence
pub mod storage;

/// HTTP routes
pub mod server;

/// CLI interface module
pub mod cli;

/// Command handlers module
pub mod handlers;
