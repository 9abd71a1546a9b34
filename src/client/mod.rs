//! FitWell API Client
//!
//! The backend is an external collaborator; this module only states the
//! contract the views rely on.
//!
//! - [`FitwellApi`]: one async method per backend call
//! - [`endpoints`]: method, path and query of every call
//! - [`HttpClient`]: reqwest implementation for native builds
//! - [`ClientConfig`]: public settings the web host hands to the browser
//!
//! The browser build implements [`FitwellApi`] over `gloo-net` in the UI
//! crate. The trait is `?Send` so that implementation can hold JS values.
//!
//! No retries, cancellation or de-duplication: one call, one outcome.

pub mod endpoints;
mod error;
mod settings;

#[cfg(feature = "native")]
mod http;

#[cfg(test)]
pub(crate) mod mock;

pub use endpoints::{BaseUrls, Endpoint, Method};
pub use error::{ApiError, ApiResult};
pub use settings::ClientConfig;

#[cfg(feature = "native")]
pub use http::HttpClient;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::{
    Credentials, DailyLog, DietEntry, ExerciseEntry, Feedback, FeedbackRequest, MetricsUpdate,
    OAuthExchange, RegistrationProfile, Report, ReportPeriod, UserId,
};

/// Calls the views make against the FitWell backend
#[async_trait(?Send)]
pub trait FitwellApi {
    /// `POST /api/users/login`; returns the user snapshot to store
    async fn login(&self, credentials: &Credentials) -> ApiResult<serde_json::Value>;

    async fn register(&self, profile: &RegistrationProfile) -> ApiResult<()>;

    /// Exchange a provider authorization code. Statuses other than 200/201
    /// are errors.
    async fn exchange_oauth_code(&self, code: &str) -> ApiResult<OAuthExchange>;

    async fn add_diet(&self, user_id: &UserId, entry: &DietEntry) -> ApiResult<()>;

    async fn add_exercise(&self, user_id: &UserId, entry: &ExerciseEntry) -> ApiResult<()>;

    async fn update_metrics(&self, user_id: &UserId, update: &MetricsUpdate) -> ApiResult<()>;

    async fn report(&self, user_id: &UserId, period: ReportPeriod) -> ApiResult<Report>;

    /// Meals and exercise recorded on one day
    async fn daily_log(&self, user_id: &UserId, date: NaiveDate) -> ApiResult<DailyLog>;

    /// Free-form question; returns the feedback text verbatim
    async fn ask_feedback(&self, request: &FeedbackRequest) -> ApiResult<String>;

    /// Feedback generated from the user's own records
    async fn generate_feedback(&self, user_id: &UserId) -> ApiResult<String>;

    async fn feedback_history(&self, user_id: &UserId) -> ApiResult<Vec<Feedback>>;
}

/// Extract feedback text from a response body.
///
/// The backend has answered with plain text, a JSON string, and a JSON
/// object carrying `feedback` or `content`; all three are accepted.
pub fn feedback_text(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::String(s)) => s,
        Ok(serde_json::Value::Object(map)) => ["feedback", "content", "message"]
            .iter()
            .find_map(|k| map.get(*k).and_then(|v| v.as_str()).map(str::to_string))
            .unwrap_or_else(|| body.to_string()),
        _ => body.to_string(),
    }
}

/// Human-readable message from an error response body
pub fn error_message(body: &str) -> String {
    let fallback = || {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            "Request failed".to_string()
        } else {
            trimmed.to_string()
        }
    };

    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => ["message", "error"]
            .iter()
            .find_map(|k| match map.get(*k) {
                Some(serde_json::Value::String(s)) => Some(s.clone()),
                Some(serde_json::Value::Object(inner)) => inner
                    .get("message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string),
                _ => None,
            })
            .unwrap_or_else(fallback),
        Ok(serde_json::Value::String(s)) => s,
        _ => fallback(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_text_shapes() {
        assert_eq!(feedback_text("Eat more protein."), "Eat more protein.");
        assert_eq!(feedback_text("\"Eat more protein.\""), "Eat more protein.");
        assert_eq!(
            feedback_text(r#"{"feedback": "Walk after dinner."}"#),
            "Walk after dinner."
        );
        assert_eq!(feedback_text(r#"{"content": "Sleep 7h."}"#), "Sleep 7h.");
        assert_eq!(feedback_text(r#"{"other": 1}"#), r#"{"other": 1}"#);
    }

    #[test]
    fn test_error_message_shapes() {
        assert_eq!(error_message(r#"{"message": "Invalid password"}"#), "Invalid password");
        assert_eq!(error_message(r#"{"error": "Not found"}"#), "Not found");
        assert_eq!(
            error_message(r#"{"error": {"code": "X", "message": "Nested"}}"#),
            "Nested"
        );
        assert_eq!(error_message("plain failure"), "plain failure");
        assert_eq!(error_message("  "), "Request failed");
    }
}
