//! Property tests for interview progression
//!
//! Arbitrary interleavings of messages from a few users are replayed against
//! a tracker and checked against a simple per-user model.

use async_trait::async_trait;
use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use sdk::errors::EngineError;
use sisuu_engine::interview::{
    OutgoingMessage, SessionTracker, COMPLETION_MESSAGE, QUESTIONS, QUESTION_COUNT,
};
use sisuu_engine::report::ReportGenerator;
use sisuu_engine::storage::ProfileStore;

struct EchoReports;

#[async_trait]
impl ReportGenerator for EchoReports {
    async fn generate_report(
        &self,
        _system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, EngineError> {
        Ok(user_prompt.to_string())
    }
}

#[derive(Default)]
struct RecordingProfiles {
    rows: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl ProfileStore for RecordingProfiles {
    fn name(&self) -> &str {
        "recording"
    }

    async fn store_profile(&self, user_id: &str, profile: &str) -> Result<(), EngineError> {
        self.rows
            .lock()
            .unwrap()
            .push((user_id.to_string(), profile.to_string()));
        Ok(())
    }
}

fn tracker() -> (Arc<SessionTracker>, Arc<RecordingProfiles>) {
    let profiles = Arc::new(RecordingProfiles::default());
    let tracker = Arc::new(SessionTracker::new(
        Arc::new(EchoReports),
        Arc::clone(&profiles) as Arc<dyn ProfileStore>,
    ));
    (tracker, profiles)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_progression_matches_model(
        steps in prop::collection::vec((0..3usize, "[a-z ]{0,12}"), 0..60)
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let (tracker, profiles) = tracker();
            let mut model: HashMap<String, Vec<String>> = HashMap::new();
            let mut completed = 0usize;

            for (user, message) in steps {
                let user_id = format!("user-{}", user);
                let reply = tracker.advance(&user_id, message.clone()).await.unwrap();

                match model.get_mut(&user_id) {
                    None => {
                        assert_eq!(reply.text(), QUESTIONS[0]);
                        model.insert(user_id.clone(), Vec::new());
                    }
                    Some(answers) if answers.len() < QUESTION_COUNT - 1 => {
                        answers.push(message);
                        assert_eq!(reply.text(), QUESTIONS[answers.len()]);
                    }
                    Some(_) => {
                        assert_eq!(reply, OutgoingMessage::Completed);
                        assert_eq!(reply.text(), COMPLETION_MESSAGE);
                        model.remove(&user_id);
                        completed += 1;
                    }
                }

                let session = tracker.session(&user_id).await.unwrap();
                match model.get(&user_id) {
                    Some(answers) => {
                        let session = session.unwrap();
                        assert_eq!(session.answers(), answers.as_slice());
                        assert_eq!(session.current_question_index(), answers.len());
                        assert!(session.answers().len() <= QUESTION_COUNT - 1);
                    }
                    None => assert!(session.is_none()),
                }
            }

            assert_eq!(profiles.rows.lock().unwrap().len(), completed);
            assert_eq!(tracker.active_sessions().unwrap(), model.len());
        });
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_answers_finalize_once() {
    let (tracker, profiles) = tracker();
    tracker.advance("u1", "hi".to_string()).await.unwrap();

    let handles: Vec<_> = (0..QUESTION_COUNT)
        .map(|k| {
            let tracker = Arc::clone(&tracker);
            tokio::spawn(async move { tracker.advance("u1", format!("answer {}", k)).await })
        })
        .collect();

    let mut replies = Vec::new();
    for handle in handles {
        replies.push(handle.await.unwrap().unwrap());
    }

    let completions = replies
        .iter()
        .filter(|r| **r == OutgoingMessage::Completed)
        .count();
    assert_eq!(completions, 1);

    let mut asked: Vec<usize> = replies
        .iter()
        .filter_map(|r| match r {
            OutgoingMessage::Question { index, .. } => Some(*index),
            OutgoingMessage::Completed => None,
        })
        .collect();
    asked.sort_unstable();
    assert_eq!(asked, (1..QUESTION_COUNT).collect::<Vec<_>>());

    let rows = profiles.rows.lock().unwrap().clone();
    assert_eq!(rows.len(), 1);
    for k in 0..QUESTION_COUNT {
        assert!(rows[0].1.contains(&format!("A: answer {}", k)));
    }
    assert!(tracker.session("u1").await.unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_messages_create_one_session() {
    let (tracker, _) = tracker();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let tracker = Arc::clone(&tracker);
            tokio::spawn(async move { tracker.advance("u1", "hi".to_string()).await })
        })
        .collect();

    let mut first = 0;
    for handle in handles {
        if let OutgoingMessage::Question { index: 0, .. } = handle.await.unwrap().unwrap() {
            first += 1;
        }
    }

    assert_eq!(first, 1);
    let session = tracker.session("u1").await.unwrap().unwrap();
    assert_eq!(session.answers().len(), 7);
}
