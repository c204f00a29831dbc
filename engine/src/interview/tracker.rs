//! Session progression
//!
//! `SessionTracker::advance` is the whole interview: it decides which
//! question to send next, and once every question is answered it has the
//! role profile generated and stored, then forgets the session.

use super::prompts::{render_report_prompt, SYSTEM_PROMPT};
use super::questions::QUESTIONS;
use super::session::{Conversation, Progress, Session};
use super::store::{SessionStore, SlotLookup};
use crate::report::ReportGenerator;
use crate::storage::ProfileStore;
use sdk::errors::EngineError;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Acknowledgment sent after the profile has been stored
pub const COMPLETION_MESSAGE: &str = "🎉 Done! Your role profile has been created.";

/// What the user is told after a successful `advance`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutgoingMessage {
    /// Ask the question at `index`
    Question { index: usize, text: &'static str },

    /// The interview is over and the profile was stored
    Completed,
}

impl OutgoingMessage {
    fn question(index: usize) -> Self {
        Self::Question {
            index,
            text: QUESTIONS[index],
        }
    }

    /// Text shown to the user
    pub fn text(&self) -> &'static str {
        match self {
            Self::Question { text, .. } => text,
            Self::Completed => COMPLETION_MESSAGE,
        }
    }
}

/// Drives every user's interview
pub struct SessionTracker {
    sessions: SessionStore,
    reports: Arc<dyn ReportGenerator>,
    profiles: Arc<dyn ProfileStore>,
}

impl SessionTracker {
    pub fn new(reports: Arc<dyn ReportGenerator>, profiles: Arc<dyn ProfileStore>) -> Self {
        Self {
            sessions: SessionStore::new(),
            reports,
            profiles,
        }
    }

    /// Advance the interview for `user_id` with an incoming message.
    ///
    /// - Unknown user: a session is created and the first question returned.
    ///   The message is not recorded.
    /// - Known user: the message is recorded as the answer to the current
    ///   question and the next question is returned. After the last answer
    ///   the profile is generated and stored, the session is removed and
    ///   [`OutgoingMessage::Completed`] is returned.
    ///
    /// The final answer is only committed together with the stored profile.
    /// If generation or storage fails, or the request is dropped while they
    /// run, the session still waits on the last question, so resending the
    /// last answer retries finalization.
    pub async fn advance(
        &self,
        user_id: &str,
        message: String,
    ) -> Result<OutgoingMessage, EngineError> {
        if user_id.trim().is_empty() {
            return Err(EngineError::Validation("user_id must not be empty".to_string()));
        }

        let (slot, mut conversation) = loop {
            let slot = match self.sessions.get_or_create(user_id)? {
                SlotLookup::Created => {
                    info!("Started interview for {}", user_id);
                    debug!(
                        "Opening message from {} not recorded ({} chars)",
                        user_id,
                        message.chars().count()
                    );
                    return Ok(OutgoingMessage::question(0));
                }
                SlotLookup::Existing(slot) => slot,
            };

            let guard = Arc::clone(&slot).lock_owned().await;
            if matches!(*guard, Conversation::Active(_)) {
                break (slot, guard);
            }
            // Finished while we waited. Clear the entry if it is still mapped
            // and look again.
            self.sessions.remove(user_id, &slot)?;
        };

        let Conversation::Active(session) = &mut *conversation else {
            return Err(EngineError::Internal(
                "conversation completed while locked".to_string(),
            ));
        };

        match session.record_answer(message) {
            Progress::Next(index) => {
                debug!("{} answered question {}", user_id, index);
                Ok(OutgoingMessage::question(index))
            }
            Progress::ReadyToFinalize { transcript } => {
                if let Err(e) = self.finalize(user_id, &transcript).await {
                    warn!("Finalization for {} failed, session kept", user_id);
                    return Err(e);
                }

                self.sessions.remove(user_id, &slot)?;
                *conversation = Conversation::Completed;
                info!("Interview for {} completed", user_id);
                Ok(OutgoingMessage::Completed)
            }
        }
    }

    async fn finalize(&self, user_id: &str, transcript: &str) -> Result<(), EngineError> {
        let user_prompt = render_report_prompt(transcript);

        let profile = self
            .reports
            .generate_report(SYSTEM_PROMPT, &user_prompt)
            .await?;

        self.profiles.store_profile(user_id, &profile).await?;
        info!(
            "Stored role profile for {} via {}",
            user_id,
            self.profiles.name()
        );
        Ok(())
    }

    /// Copy of the user's in-progress session
    pub async fn session(&self, user_id: &str) -> Result<Option<Session>, EngineError> {
        self.sessions.snapshot(user_id).await
    }

    /// Number of interviews in progress
    pub fn active_sessions(&self) -> Result<usize, EngineError> {
        self.sessions.len()
    }

    /// Release the profile store once no more requests will arrive
    pub async fn close(&self) -> Result<(), EngineError> {
        self.profiles.close().await
    }
}
