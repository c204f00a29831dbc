//! Interview flow
//!
//! A fixed list of questions is walked one answer at a time per user.
//! When the last answer arrives the transcript becomes a role profile.

pub mod prompts;
pub mod questions;
pub mod session;
pub mod store;
pub mod tracker;

pub use questions::{QUESTIONS, QUESTION_COUNT};
pub use session::{Conversation, Progress, Session};
pub use store::SessionStore;
pub use tracker::{OutgoingMessage, SessionTracker, COMPLETION_MESSAGE};
