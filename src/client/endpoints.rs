//! FitWell API endpoints
//!
//! Method, path and query for every backend call, shared by the native and
//! browser clients so both speak the same contract.

use chrono::NaiveDate;
use std::fmt;

use crate::models::{ReportPeriod, UserId};

/// HTTP method of an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
            Method::Put => f.write_str("PUT"),
        }
    }
}

/// A backend call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint<'a> {
    Login,
    Register,
    OAuthLogin,
    Diet { user_id: &'a UserId },
    Exercise { user_id: &'a UserId },
    UpdateMetrics { user_id: &'a UserId },
    Report { user_id: &'a UserId, period: ReportPeriod },
    DailyLog { user_id: &'a UserId, date: NaiveDate },
    AskFeedback,
    GenerateFeedback { user_id: &'a UserId },
    FeedbackHistory { user_id: &'a UserId },
}

impl Endpoint<'_> {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::Login
            | Endpoint::Register
            | Endpoint::OAuthLogin
            | Endpoint::Diet { .. }
            | Endpoint::Exercise { .. }
            | Endpoint::AskFeedback => Method::Post,
            Endpoint::UpdateMetrics { .. } => Method::Put,
            Endpoint::Report { .. }
            | Endpoint::DailyLog { .. }
            | Endpoint::GenerateFeedback { .. }
            | Endpoint::FeedbackHistory { .. } => Method::Get,
        }
    }

    /// Path plus query string, relative to the base URL
    pub fn path(&self) -> String {
        match self {
            Endpoint::Login => "/api/users/login".to_string(),
            Endpoint::Register => "/api/users/register".to_string(),
            Endpoint::OAuthLogin => "/oauth/kakao/login".to_string(),
            Endpoint::Diet { user_id } => format!("/api/diet?userId={}", enc(user_id)),
            Endpoint::Exercise { user_id } => format!("/api/exercise?userId={}", enc(user_id)),
            Endpoint::UpdateMetrics { user_id } => {
                format!("/api/users/{}/updateMetrics", enc(user_id))
            }
            Endpoint::Report { user_id, period } => {
                format!("/api/reports/{}?userId={}", period.as_str(), enc(user_id))
            }
            Endpoint::DailyLog { user_id, date } => format!(
                "/api/diet-exercise?date={}&userId={}",
                date.format("%Y-%m-%d"),
                enc(user_id)
            ),
            Endpoint::AskFeedback => "/api/feedback".to_string(),
            Endpoint::GenerateFeedback { user_id } => {
                format!("/api/feedback?userId={}", enc(user_id))
            }
            Endpoint::FeedbackHistory { user_id } => {
                format!("/api/feedback/history?userId={}", enc(user_id))
            }
        }
    }

    /// The OAuth exchange may live on a different host than the rest of the API
    pub fn uses_oauth_base(&self) -> bool {
        matches!(self, Endpoint::OAuthLogin)
    }
}

fn enc(user_id: &UserId) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(user_id.as_str())
}

/// Base URLs the endpoints are resolved against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrls {
    pub api: String,
    pub oauth: String,
}

impl BaseUrls {
    /// Same host for everything
    pub fn new(api: impl Into<String>) -> Self {
        let api = normalize(api.into());
        Self {
            oauth: api.clone(),
            api,
        }
    }

    pub fn with_oauth(mut self, oauth: impl Into<String>) -> Self {
        self.oauth = normalize(oauth.into());
        self
    }

    /// Absolute URL of an endpoint
    pub fn url(&self, endpoint: &Endpoint<'_>) -> String {
        let base = if endpoint.uses_oauth_base() {
            &self.oauth
        } else {
            &self.api
        };
        format!("{}{}", base, endpoint.path())
    }
}

fn normalize(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_match_backend_contract() {
        let id = UserId::new("7");
        let date = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();

        assert_eq!(Endpoint::Login.path(), "/api/users/login");
        assert_eq!(Endpoint::Diet { user_id: &id }.path(), "/api/diet?userId=7");
        assert_eq!(
            Endpoint::UpdateMetrics { user_id: &id }.path(),
            "/api/users/7/updateMetrics"
        );
        assert_eq!(
            Endpoint::Report { user_id: &id, period: ReportPeriod::Monthly }.path(),
            "/api/reports/monthly?userId=7"
        );
        assert_eq!(
            Endpoint::DailyLog { user_id: &id, date }.path(),
            "/api/diet-exercise?date=2024-05-03&userId=7"
        );
        assert_eq!(
            Endpoint::FeedbackHistory { user_id: &id }.path(),
            "/api/feedback/history?userId=7"
        );
    }

    #[test]
    fn test_methods() {
        let id = UserId::new("7");
        assert_eq!(Endpoint::Login.method(), Method::Post);
        assert_eq!(Endpoint::UpdateMetrics { user_id: &id }.method(), Method::Put);
        assert_eq!(Endpoint::GenerateFeedback { user_id: &id }.method(), Method::Get);
        assert_eq!(Method::Put.to_string(), "PUT");
    }

    #[test]
    fn test_user_id_is_encoded() {
        let id = UserId::new("a b&c");
        assert_eq!(
            Endpoint::Exercise { user_id: &id }.path(),
            "/api/exercise?userId=a%20b%26c"
        );
    }

    #[test]
    fn test_base_urls() {
        let bases = BaseUrls::new("http://localhost:8080/").with_oauth("https://auth.example.com");

        assert_eq!(bases.url(&Endpoint::Login), "http://localhost:8080/api/users/login");
        assert_eq!(
            bases.url(&Endpoint::OAuthLogin),
            "https://auth.example.com/oauth/kakao/login"
        );

        let single = BaseUrls::new("http://api.test");
        assert_eq!(single.url(&Endpoint::OAuthLogin), "http://api.test/oauth/kakao/login");
    }
}
