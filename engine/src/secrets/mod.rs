//! Secret handling
//!
//! API keys for the language model and the record store come from the
//! environment and are held as [`SecretString`]. Collaborator error bodies
//! can echo credentials back, so every error message is passed through
//! [`scrub_secrets`] before it reaches the log.

pub mod string;

pub use string::SecretString;

use regex::Regex;
use std::sync::OnceLock;

/// Regex patterns for detecting common secret formats.
/// These are compiled once and reused for performance.
static SECRET_PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();

/// Initializes and returns the secret detection patterns.
///
/// Patterns match:
/// - OpenAI API keys: sk-[a-zA-Z0-9]{20,}
/// - JWTs such as Supabase anon/service keys: eyJ....eyJ....sig
/// - Bearer tokens: Bearer\s+[^\s]{20,}
/// - apikey headers echoed in error bodies: apikey: <value>
fn get_secret_patterns() -> &'static Vec<Regex> {
    SECRET_PATTERNS.get_or_init(|| {
        [
            r"sk-[a-zA-Z0-9\-_]{20,}",
            r"eyJ[a-zA-Z0-9\-_]+\.eyJ[a-zA-Z0-9\-_]+\.[a-zA-Z0-9\-_]+",
            r"Bearer\s+[^\s]{20,}",
            r"(?i)apikey[\x22']?\s*[:=]\s*[\x22']?[^\s\x22',}]{20,}",
        ]
        .iter()
        .filter_map(|pattern| Regex::new(pattern).ok())
        .collect()
    })
}

/// Scrubs secrets from text by replacing them with [REDACTED].
///
/// # Examples
/// ```
/// use sisuu_engine::secrets::scrub_secrets;
///
/// let scrubbed = scrub_secrets("My API key is sk-1234567890abcdefghij");
/// assert_eq!(scrubbed, "My API key is [REDACTED]");
/// ```
pub fn scrub_secrets(text: &str) -> String {
    let mut result = text.to_string();

    for pattern in get_secret_patterns() {
        result = pattern.replace_all(&result, "[REDACTED]").to_string();
    }

    result
}
