//! Login, registration and logout

use super::{Notice, Outcome};
use crate::client::{ApiError, FitwellApi};
use crate::models::{LoginForm, RegistrationForm};
use crate::routes::Route;
use crate::session::{SessionStore, Storage};

/// Sign in with email and password.
///
/// On success the login response becomes the session and the user goes home.
/// On any failure the stored session is left exactly as it was.
pub async fn login<A, S>(api: &A, store: &SessionStore<S>, form: &LoginForm) -> Outcome
where
    A: FitwellApi + ?Sized,
    S: Storage,
{
    let credentials = match form.validate() {
        Ok(credentials) => credentials,
        Err(e) => return Outcome::Stay(Notice::error(e.to_string())),
    };

    let user = match api.login(&credentials).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(email = %credentials.email, "Login failed: {}", e);
            return Outcome::Stay(Notice::error(login_failure_message(&e)));
        }
    };

    match store.save(&user) {
        Ok(session) => Outcome::navigate_with(
            Route::Home,
            Notice::success(format!("Welcome back, {}", session.display_name())),
        ),
        Err(e) => {
            tracing::error!("Failed to store session: {}", e);
            Outcome::Stay(Notice::error(format!("Could not sign in: {}", e)))
        }
    }
}

fn login_failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Status { status, .. } if (400..500).contains(status) => {
            "Login failed. Check your email and password.".to_string()
        }
        other => format!("Login failed: {}", other),
    }
}

/// Create an account, then send the user to the login page
pub async fn register<A>(api: &A, form: &RegistrationForm) -> Outcome
where
    A: FitwellApi + ?Sized,
{
    let profile = match form.validate() {
        Ok(profile) => profile,
        Err(e) => return Outcome::Stay(Notice::error(e.to_string())),
    };

    match api.register(&profile).await {
        Ok(()) => {
            tracing::info!(email = %profile.email, "Registered");
            Outcome::navigate_with(
                Route::Login,
                Notice::success("Registration complete. Please sign in."),
            )
        }
        Err(e) => {
            tracing::warn!(email = %profile.email, "Registration failed: {}", e);
            Outcome::Stay(Notice::error(format!("Registration failed: {}", e)))
        }
    }
}

/// Forget the session and go home
pub fn logout<S: Storage>(store: &SessionStore<S>) -> Outcome {
    match store.clear() {
        Ok(()) => Outcome::navigate_with(Route::Home, Notice::info("Signed out")),
        Err(e) => {
            tracing::error!("Failed to clear session: {}", e);
            Outcome::Stay(Notice::error(format!("Could not sign out: {}", e)))
        }
    }
}
