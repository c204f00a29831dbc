//! Error types and handling
//!
//! This module provides the error types used throughout the Sisuu engine.
//! All errors implement the `SisuuErrorExt` trait which provides user-friendly
//! hints, a coarse failure class, and whether the error is recoverable.
//!
//! # Security
//!
//! Error messages may carry collaborator response bodies. They are meant for
//! logs (after scrubbing), never for the chat response. What the user sees is
//! always [`GENERIC_FAILURE_MESSAGE`].

use thiserror::Error;

/// Text returned to the user whenever a chat request fails, whatever the cause
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Coarse grouping of errors used by the HTTP layer to pick a status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The request itself was unusable (malformed JSON, missing user id)
    Validation,

    /// An external collaborator (language model, record store) failed
    Collaborator,

    /// Anything else: configuration, broken invariants
    Internal,
}

/// Trait for Sisuu error extensions
///
/// All engine errors implement this trait.
pub trait SisuuErrorExt {
    /// Returns a user-friendly hint for the error
    ///
    /// The hint is safe to display and does not contain secrets or
    /// collaborator response bodies.
    fn user_hint(&self) -> &str;

    /// Returns the failure class of the error
    fn class(&self) -> ErrorClass;
}

/// Main engine error type
///
/// # Error Categories
///
/// - **Configuration**: Invalid or missing configuration
/// - **Validation**: Unusable chat request
/// - **LLM Provider**: Report generation failures
/// - **Storage**: Profile persistence failures
/// - **Network**: Transport-level failures talking to a collaborator
///
/// # Examples
///
/// ```
/// use sdk::errors::{EngineError, ErrorClass, SisuuErrorExt};
///
/// let error = EngineError::Validation("missing user_id".to_string());
/// assert_eq!(error.class(), ErrorClass::Validation);
///
/// let error = EngineError::Storage("insert rejected".to_string());
/// assert_eq!(error.class(), ErrorClass::Collaborator);
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Request validation errors
    #[error("Invalid request: {0}")]
    Validation(String),

    // Report generation errors
    #[error("LLM provider error: {0}")]
    LLMProvider(String),

    // Profile persistence errors
    #[error("Storage error: {0}")]
    Storage(String),

    // Network errors
    #[error("Network error: {0}")]
    Network(String),

    // Broken internal state (poisoned lock and the like)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SisuuErrorExt for EngineError {
    fn user_hint(&self) -> &str {
        match self {
            Self::Config(_) => "Check your config.toml file and environment for errors",
            Self::Validation(_) => "Send a JSON body with a non-empty user_id and a message",
            Self::LLMProvider(_) => "Report generation failed. Check the API key and try again",
            Self::Storage(_) => "Saving the role profile failed. Try sending the answer again",
            Self::Network(_) => "Network operation failed. Check your connection",
            Self::Internal(_) => "Internal error. Try restarting the service",
        }
    }

    fn class(&self) -> ErrorClass {
        match self {
            Self::Validation(_) => ErrorClass::Validation,
            Self::LLMProvider(_) | Self::Storage(_) | Self::Network(_) => ErrorClass::Collaborator,
            Self::Config(_) | Self::Internal(_) => ErrorClass::Internal,
        }
    }
}
