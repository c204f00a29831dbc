//! Per-user interview state

use super::prompts::format_transcript;
use super::questions::QUESTION_COUNT;

/// Progress of one user through the interview
///
/// Invariants: `current_question_index < QUESTION_COUNT`, and
/// `answers.len() == current_question_index` between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    current_question_index: usize,
    answers: Vec<String>,
}

/// What recording an answer led to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// Ask the question at this index next
    Next(usize),

    /// Every question has an answer; the report can be produced from
    /// `transcript`. The session itself is unchanged.
    ReadyToFinalize { transcript: String },
}

impl Session {
    /// A session waiting for the answer to the first question
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_question_index(&self) -> usize {
        self.current_question_index
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    /// Record the answer to the current question and move on.
    ///
    /// The answer to the last question is not stored. It only goes into the
    /// returned transcript, so the session keeps
    /// `answers.len() == current_question_index` whether or not the
    /// finalization that follows succeeds.
    pub fn record_answer(&mut self, answer: String) -> Progress {
        if self.current_question_index + 1 < QUESTION_COUNT {
            self.answers.push(answer);
            self.current_question_index += 1;
            return Progress::Next(self.current_question_index);
        }

        let mut answers = self.answers.clone();
        answers.push(answer);
        Progress::ReadyToFinalize {
            transcript: format_transcript(&answers),
        }
    }
}

/// Conversation state held for a user id
///
/// A finished conversation is removed from the store right away; the
/// `Completed` marker is only seen by requests that were already waiting
/// on the same user when it finished.
#[derive(Debug)]
pub enum Conversation {
    Active(Session),
    Completed,
}
