//! AI feedback types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/feedback`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// A previously generated piece of feedback
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Feedback {
    /// Timestamp formatted for history lists
    pub fn created_label(&self) -> String {
        self.created_at
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_history_item() {
        let json = r#"{"id": 3, "content": "Drink more water.", "createdAt": "2024-05-01T08:30:00Z"}"#;
        let item: Feedback = serde_json::from_str(json).unwrap();
        assert_eq!(item.content, "Drink more water.");
        assert_eq!(item.created_label(), "2024-05-01 08:30");

        let bare: Feedback = serde_json::from_str(r#"{"content": "Sleep earlier."}"#).unwrap();
        assert_eq!(bare.created_label(), "-");
    }

    #[test]
    fn test_request_without_user() {
        let req = FeedbackRequest {
            prompt: "How am I doing?".into(),
            user_id: None,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({"prompt": "How am I doing?"})
        );
    }
}
