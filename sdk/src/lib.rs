//! Sisuu SDK
//!
//! Shared library providing the error type and chat wire types.
//! This crate is used by the engine and by anything that talks to it.

/// Error types and handling
pub mod errors;

/// Chat request/response types
pub mod types;

// Re-export commonly used types
pub use errors::{EngineError, ErrorClass, SisuuErrorExt, GENERIC_FAILURE_MESSAGE};
pub use types::{ChatRequest, ChatResponse};
