//! AI feedback
//!
//! Feedback text is shown verbatim. A failed request shows a fixed fallback
//! line in its place instead of an error toast.

use super::current_user;
use crate::client::FitwellApi;
use crate::models::{Feedback, FeedbackForm, FeedbackRequest};
use crate::session::{SessionStore, Storage};

/// Shown inline when a feedback request fails
pub const FEEDBACK_FALLBACK: &str =
    "Something went wrong while requesting feedback. Please try again.";

/// Result of a feedback action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackOutcome {
    /// Text from the backend, verbatim
    Text(String),
    /// The request failed; show [`FEEDBACK_FALLBACK`]
    Fallback,
    /// The prompt was rejected before sending
    Invalid(String),
    NotLoggedIn,
}

impl FeedbackOutcome {
    /// Text to render under the form
    pub fn display_text(&self) -> Option<&str> {
        match self {
            FeedbackOutcome::Text(text) => Some(text),
            FeedbackOutcome::Fallback => Some(FEEDBACK_FALLBACK),
            FeedbackOutcome::Invalid(message) => Some(message),
            FeedbackOutcome::NotLoggedIn => None,
        }
    }
}

/// Ask a free-form question
pub async fn ask_feedback<A, S>(api: &A, store: &SessionStore<S>, form: &FeedbackForm) -> FeedbackOutcome
where
    A: FitwellApi + ?Sized,
    S: Storage,
{
    let Some(user_id) = current_user(store) else {
        return FeedbackOutcome::NotLoggedIn;
    };
    let prompt = match form.validate() {
        Ok(prompt) => prompt,
        Err(e) => return FeedbackOutcome::Invalid(e.to_string()),
    };

    let request = FeedbackRequest {
        prompt,
        user_id: Some(user_id.to_string()),
    };
    match api.ask_feedback(&request).await {
        Ok(text) => FeedbackOutcome::Text(text),
        Err(e) => {
            tracing::warn!(user_id = %user_id, "Feedback request failed: {}", e);
            FeedbackOutcome::Fallback
        }
    }
}

/// Feedback generated from the user's own meal and exercise records
pub async fn generate_feedback<A, S>(api: &A, store: &SessionStore<S>) -> FeedbackOutcome
where
    A: FitwellApi + ?Sized,
    S: Storage,
{
    let Some(user_id) = current_user(store) else {
        return FeedbackOutcome::NotLoggedIn;
    };

    match api.generate_feedback(&user_id).await {
        Ok(text) => FeedbackOutcome::Text(text),
        Err(e) => {
            tracing::warn!(user_id = %user_id, "Feedback generation failed: {}", e);
            FeedbackOutcome::Fallback
        }
    }
}

/// Earlier feedback, newest first. `None` when there is no session.
pub async fn feedback_history<A, S>(
    api: &A,
    store: &SessionStore<S>,
) -> Option<Result<Vec<Feedback>, String>>
where
    A: FitwellApi + ?Sized,
    S: Storage,
{
    let user_id = current_user(store)?;

    let result = match api.feedback_history(&user_id).await {
        Ok(mut items) => {
            items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(items)
        }
        Err(e) => {
            tracing::warn!(user_id = %user_id, "Feedback history failed: {}", e);
            Err(e.to_string())
        }
    };
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::{Call, MockApi};
    use crate::client::ApiError;
    use crate::session::MemoryStorage;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn logged_in() -> SessionStore<MemoryStorage> {
        let store = SessionStore::new(MemoryStorage::new());
        store.save(&json!({"id": "u1"})).unwrap();
        store
    }

    #[tokio::test]
    async fn test_ask_returns_text_verbatim() {
        let api = MockApi {
            feedback: Some(Ok("Add a vegetable to lunch.".into())),
            ..Default::default()
        };

        let outcome = ask_feedback(&api, &logged_in(), &FeedbackForm::new("How is my diet?")).await;

        assert_eq!(outcome.display_text(), Some("Add a vegetable to lunch."));
        assert_eq!(api.calls(), vec![Call::AskFeedback("How is my diet?".into())]);
    }

    #[tokio::test]
    async fn test_failure_shows_fallback() {
        let api = MockApi {
            feedback: Some(Err(ApiError::Network("refused".into()))),
            ..Default::default()
        };

        let outcome = generate_feedback(&api, &logged_in()).await;

        assert_eq!(outcome, FeedbackOutcome::Fallback);
        assert_eq!(outcome.display_text(), Some(FEEDBACK_FALLBACK));
    }

    #[tokio::test]
    async fn test_blank_prompt_not_sent() {
        let api = MockApi::new();

        let outcome = ask_feedback(&api, &logged_in(), &FeedbackForm::new("   ")).await;

        assert!(matches!(outcome, FeedbackOutcome::Invalid(_)));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_requires_session() {
        let api = MockApi::new();
        let store = SessionStore::new(MemoryStorage::new());

        assert_eq!(generate_feedback(&api, &store).await, FeedbackOutcome::NotLoggedIn);
        assert!(feedback_history(&api, &store).await.is_none());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_history_newest_first() {
        let item = |day: u32, text: &str| Feedback {
            id: None,
            content: text.into(),
            created_at: Some(Utc.with_ymd_and_hms(2024, 5, day, 9, 0, 0).unwrap()),
        };
        let api = MockApi {
            history: Some(Ok(vec![item(1, "old"), item(3, "new"), item(2, "mid")])),
            ..Default::default()
        };

        let items = feedback_history(&api, &logged_in()).await.unwrap().unwrap();

        let contents: Vec<_> = items.iter().map(|f| f.content.as_str()).collect();
        assert_eq!(contents, vec!["new", "mid", "old"]);
    }
}
