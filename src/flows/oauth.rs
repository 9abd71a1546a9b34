//! Third-party sign-in
//!
//! The provider redirects back to the callback route with `?code=...`. The
//! code is exchanged once with the backend: 200 means the account exists and
//! becomes the session, 201 means a new user who still has to sign up.

use serde::{Deserialize, Serialize};

use super::{Notice, Outcome};
use crate::client::FitwellApi;
use crate::models::{OAuthExchange, RegistrationForm};
use crate::routes::{query_param, Route};
use crate::session::{SessionStore, Storage};

/// Public client settings of the OAuth provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthProvider {
    /// Provider authorization endpoint
    pub authorize_url: String,
    pub client_id: String,
    /// Must point at the callback route of this app
    pub redirect_uri: String,
}

impl Default for OAuthProvider {
    fn default() -> Self {
        Self {
            authorize_url: "https://kauth.kakao.com/oauth/authorize".to_string(),
            client_id: String::new(),
            redirect_uri: "http://localhost:8084/oauth/callback".to_string(),
        }
    }
}

impl OAuthProvider {
    pub fn is_configured(&self) -> bool {
        !self.client_id.trim().is_empty()
    }
}

/// URL the "Sign in with Kakao" button opens
pub fn authorize_url(provider: &OAuthProvider) -> String {
    let separator = if provider.authorize_url.contains('?') {
        '&'
    } else {
        '?'
    };
    format!(
        "{}{}client_id={}&redirect_uri={}&response_type=code",
        provider.authorize_url,
        separator,
        urlencoding::encode(&provider.client_id),
        urlencoding::encode(&provider.redirect_uri),
    )
}

/// Handle the provider redirect.
///
/// `query` is the callback URL's query string. Without a `code` the backend is
/// never called.
pub async fn handle_callback<A, S>(api: &A, store: &SessionStore<S>, query: &str) -> Outcome
where
    A: FitwellApi + ?Sized,
    S: Storage,
{
    let Some(code) = query_param(query, "code") else {
        let reason = query_param(query, "error_description")
            .or_else(|| query_param(query, "error"))
            .unwrap_or_else(|| "no authorization code".to_string());
        tracing::warn!(%reason, "OAuth callback without code");
        return Outcome::navigate_with(
            Route::Login,
            Notice::error(format!("Sign-in was not completed: {}", reason)),
        );
    };

    match api.exchange_oauth_code(&code).await {
        Ok(OAuthExchange::Existing(user)) => match store.save(&user) {
            Ok(session) => {
                tracing::info!(user_id = %session.user_id, "OAuth sign-in");
                Outcome::navigate_with(
                    Route::Home,
                    Notice::success(format!("Welcome back, {}", session.display_name())),
                )
            }
            Err(e) => {
                tracing::error!("Failed to store OAuth session: {}", e);
                Outcome::navigate_with(Route::Login, Notice::error("Sign-in failed"))
            }
        },
        Ok(OAuthExchange::NewUser(profile)) => {
            tracing::info!("OAuth sign-in for a new user, continuing to signup");
            Outcome::navigate_with(
                Route::Signup {
                    prefill: Some(RegistrationForm::from_oauth_profile(&profile)),
                },
                Notice::info("Finish creating your account"),
            )
        }
        Err(e) => {
            tracing::warn!("OAuth code exchange failed: {}", e);
            Outcome::navigate_with(Route::Login, Notice::error("Sign-in failed"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::{Call, MockApi};
    use crate::client::ApiError;
    use crate::session::MemoryStorage;
    use serde_json::json;

    #[tokio::test]
    async fn test_missing_code_goes_to_login_without_backend_call() {
        let api = MockApi::new();
        let store = SessionStore::new(MemoryStorage::new());

        let outcome = handle_callback(&api, &store, "").await;

        assert_eq!(outcome.destination(), Some(Route::Login));
        assert!(outcome.is_error());
        assert!(api.calls().is_empty());
        assert!(store.storage().is_empty());
    }

    #[tokio::test]
    async fn test_provider_error_is_reported() {
        let api = MockApi::new();
        let store = SessionStore::new(MemoryStorage::new());

        let outcome = handle_callback(&api, &store, "?error=access_denied").await;

        assert_eq!(outcome.destination(), Some(Route::Login));
        assert!(outcome.notice().unwrap().message().contains("access_denied"));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_existing_user_signs_in() {
        let api = MockApi {
            oauth: Some(Ok(OAuthExchange::Existing(json!({"id": 5, "name": "Mina"})))),
            ..Default::default()
        };
        let store = SessionStore::new(MemoryStorage::new());

        let outcome = handle_callback(&api, &store, "?code=abc123").await;

        assert_eq!(outcome.destination(), Some(Route::Home));
        assert_eq!(api.calls(), vec![Call::ExchangeCode("abc123".into())]);
        assert!(store.is_logged_in());
    }

    #[tokio::test]
    async fn test_new_user_goes_to_prefilled_signup() {
        let api = MockApi {
            oauth: Some(Ok(OAuthExchange::NewUser(json!({
                "email": "new@kakao.com",
                "nickname": "Jisoo"
            })))),
            ..Default::default()
        };
        let store = SessionStore::new(MemoryStorage::new());

        let outcome = handle_callback(&api, &store, "code=xyz").await;

        let Some(Route::Signup { prefill: Some(form) }) = outcome.destination() else {
            panic!("expected prefilled signup, got {:?}", outcome);
        };
        assert_eq!(form.email, "new@kakao.com");
        assert_eq!(form.name, "Jisoo");
        assert!(form.password.is_empty());
        assert!(store.storage().is_empty());
    }

    #[tokio::test]
    async fn test_exchange_failure_goes_to_login() {
        let api = MockApi {
            oauth: Some(Err(ApiError::status(502, "Bad gateway"))),
            ..Default::default()
        };
        let store = SessionStore::new(MemoryStorage::new());

        let outcome = handle_callback(&api, &store, "code=xyz").await;

        assert_eq!(outcome.destination(), Some(Route::Login));
        assert!(store.storage().is_empty());
    }

    #[test]
    fn test_authorize_url() {
        let provider = OAuthProvider {
            authorize_url: "https://kauth.kakao.com/oauth/authorize".into(),
            client_id: "abc".into(),
            redirect_uri: "http://localhost:8084/oauth/callback".into(),
        };

        assert_eq!(
            authorize_url(&provider),
            "https://kauth.kakao.com/oauth/authorize?client_id=abc\
             &redirect_uri=http%3A%2F%2Flocalhost%3A8084%2Foauth%2Fcallback&response_type=code"
        );
    }

    #[test]
    fn test_authorize_url_keeps_existing_query() {
        let provider = OAuthProvider {
            authorize_url: "https://auth.test/authorize?prompt=login".into(),
            client_id: "id".into(),
            redirect_uri: "http://app/cb".into(),
        };

        assert!(authorize_url(&provider).starts_with("https://auth.test/authorize?prompt=login&client_id=id"));
    }
}
