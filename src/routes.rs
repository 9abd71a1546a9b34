//! URL routes
//!
//! Maps paths to page views. Pages that need a logged-in user redirect to the
//! login page otherwise.

use crate::models::RegistrationForm;

/// A page of the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    /// Registration, optionally prefilled from an OAuth profile
    Signup { prefill: Option<RegistrationForm> },
    Input,
    UpdateMetrics,
    Dashboard,
    Feedback,
    OAuthCallback,
}

impl Route {
    pub const HOME: &'static str = "/";
    pub const LOGIN: &'static str = "/login";
    pub const SIGNUP: &'static str = "/signup";
    pub const INPUT: &'static str = "/input";
    pub const UPDATE_METRICS: &'static str = "/update";
    pub const DASHBOARD: &'static str = "/dashboard";
    pub const FEEDBACK: &'static str = "/feedback";
    pub const OAUTH_CALLBACK: &'static str = "/oauth/callback";
    /// Redirect URI some provider registrations still point at
    pub const OAUTH_CALLBACK_ALIAS: &'static str = "/oauth/kakao/callback";

    pub fn signup() -> Self {
        Route::Signup { prefill: None }
    }

    /// Path without query
    pub fn base_path(&self) -> &'static str {
        match self {
            Route::Home => Self::HOME,
            Route::Login => Self::LOGIN,
            Route::Signup { .. } => Self::SIGNUP,
            Route::Input => Self::INPUT,
            Route::UpdateMetrics => Self::UPDATE_METRICS,
            Route::Dashboard => Self::DASHBOARD,
            Route::Feedback => Self::FEEDBACK,
            Route::OAuthCallback => Self::OAUTH_CALLBACK,
        }
    }

    /// Href for links and navigation, including the signup prefill
    pub fn path(&self) -> String {
        match self {
            Route::Signup {
                prefill: Some(form),
            } if !form.is_blank() => match serde_json::to_string(form) {
                Ok(json) => format!("{}?user={}", Self::SIGNUP, urlencoding::encode(&json)),
                Err(e) => {
                    tracing::warn!("Failed to encode signup prefill: {}", e);
                    Self::SIGNUP.to_string()
                }
            },
            other => other.base_path().to_string(),
        }
    }

    /// Map a location back to a route; unknown paths yield `None`
    pub fn parse(path: &str, query: &str) -> Option<Route> {
        let path = match path.trim_end_matches('/') {
            "" => Self::HOME,
            p => p,
        };

        let route = match path {
            Self::HOME => Route::Home,
            Self::LOGIN => Route::Login,
            Self::SIGNUP => Route::Signup {
                prefill: signup_prefill(query),
            },
            Self::INPUT => Route::Input,
            Self::UPDATE_METRICS => Route::UpdateMetrics,
            Self::DASHBOARD => Route::Dashboard,
            Self::FEEDBACK => Route::Feedback,
            Self::OAUTH_CALLBACK | Self::OAUTH_CALLBACK_ALIAS => Route::OAuthCallback,
            _ => return None,
        };
        Some(route)
    }

    pub fn requires_session(&self) -> bool {
        matches!(
            self,
            Route::Input | Route::UpdateMetrics | Route::Dashboard | Route::Feedback
        )
    }

    /// Where to actually go: session-only pages send logged-out users to login
    pub fn guard(self, logged_in: bool) -> Route {
        if self.requires_session() && !logged_in {
            tracing::debug!(path = self.base_path(), "Redirecting to login");
            Route::Login
        } else {
            self
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Login => "Sign In",
            Route::Signup { .. } => "Sign Up",
            Route::Input => "Log Meals & Exercise",
            Route::UpdateMetrics => "Update Metrics",
            Route::Dashboard => "Dashboard",
            Route::Feedback => "Insight",
            Route::OAuthCallback => "Signing In",
        }
    }

    /// Header links for the current login state
    pub fn nav(logged_in: bool) -> Vec<Route> {
        if logged_in {
            vec![
                Route::Home,
                Route::Dashboard,
                Route::Input,
                Route::UpdateMetrics,
                Route::Feedback,
            ]
        } else {
            vec![Route::Home, Route::Login, Route::signup()]
        }
    }
}

fn signup_prefill(query: &str) -> Option<RegistrationForm> {
    let raw = query_param(query, "user")?;
    match serde_json::from_str::<RegistrationForm>(&raw) {
        Ok(form) => Some(form),
        Err(e) => {
            tracing::warn!("Ignoring malformed signup prefill: {}", e);
            None
        }
    }
}

/// First value of a query-string parameter, percent-decoded.
///
/// Accepts the query with or without its leading `?`. Empty values count as
/// absent.
pub fn query_param(query: &str, name: &str) -> Option<String> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(key, _)| *key == name)
        .and_then(|(_, value)| {
            let value = value.replace('+', " ");
            urlencoding::decode(&value).ok().map(|v| v.into_owned())
        })
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_paths() {
        assert_eq!(Route::parse("/", ""), Some(Route::Home));
        assert_eq!(Route::parse("", ""), Some(Route::Home));
        assert_eq!(Route::parse("/dashboard/", ""), Some(Route::Dashboard));
        assert_eq!(Route::parse("/update", ""), Some(Route::UpdateMetrics));
        assert_eq!(Route::parse("/oauth/kakao/callback", "?code=x"), Some(Route::OAuthCallback));
        assert_eq!(Route::parse("/insight", ""), None);
    }

    #[test]
    fn test_every_route_roundtrips_its_path() {
        for route in [
            Route::Home,
            Route::Login,
            Route::signup(),
            Route::Input,
            Route::UpdateMetrics,
            Route::Dashboard,
            Route::Feedback,
            Route::OAuthCallback,
        ] {
            assert_eq!(Route::parse(&route.path(), ""), Some(route));
        }
    }

    #[test]
    fn test_signup_prefill_roundtrip() {
        let form = RegistrationForm {
            name: "Kim Ji-woo".into(),
            email: "kim+fit@kakao.com".into(),
            ..Default::default()
        };
        let route = Route::Signup {
            prefill: Some(form.clone()),
        };

        let href = route.path();
        let (path, query) = href.split_once('?').unwrap();
        assert_eq!(path, "/signup");
        assert_eq!(Route::parse(path, query), Some(route));
    }

    #[test]
    fn test_malformed_prefill_ignored() {
        assert_eq!(
            Route::parse("/signup", "user=%7Bnot-json"),
            Some(Route::signup())
        );
    }

    #[test]
    fn test_guard() {
        assert_eq!(Route::Dashboard.guard(false), Route::Login);
        assert_eq!(Route::Dashboard.guard(true), Route::Dashboard);
        assert_eq!(Route::Home.guard(false), Route::Home);
        assert_eq!(Route::OAuthCallback.guard(false), Route::OAuthCallback);
    }

    #[test]
    fn test_query_param() {
        assert_eq!(query_param("?code=abc&state=1", "code").as_deref(), Some("abc"));
        assert_eq!(query_param("state=1&code=a%2Fb", "code").as_deref(), Some("a/b"));
        assert_eq!(query_param("msg=hello+world", "msg").as_deref(), Some("hello world"));
        assert_eq!(query_param("?code=", "code"), None);
        assert_eq!(query_param("?code", "code"), None);
        assert_eq!(query_param("", "code"), None);
        assert_eq!(query_param("?error=access_denied", "code"), None);
    }

    #[test]
    fn test_nav_depends_on_login() {
        assert!(Route::nav(false).contains(&Route::Login));
        assert!(!Route::nav(false).contains(&Route::Dashboard));
        assert!(Route::nav(true).contains(&Route::Dashboard));
    }
}
