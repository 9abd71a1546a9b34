//! Page Flows
//!
//! The logic behind each page action, generic over [`FitwellApi`] and
//! [`Storage`] so the browser, the CLI and the tests run the same code. A flow
//! never renders anything; it returns an [`Outcome`] the caller turns into a
//! toast, inline text or a navigation.
//!
//! - **auth**: login, register, logout
//! - **oauth**: provider authorize URL and the callback exchange
//! - **entries**: meal/exercise entries and body metrics
//! - **dashboard**: weekly/monthly reports and the per-day log
//! - **feedback**: AI feedback and its history
//!
//! [`FitwellApi`]: crate::client::FitwellApi
//! [`Storage`]: crate::session::Storage

pub mod auth;
pub mod dashboard;
pub mod entries;
pub mod feedback;
pub mod oauth;

pub use auth::{login, logout, register};
pub use dashboard::{load_reports, DashboardState, DayState, Reports};
pub use entries::{save_entries, update_metrics};
pub use feedback::{
    ask_feedback, feedback_history, generate_feedback, FeedbackOutcome, FEEDBACK_FALLBACK,
};
pub use oauth::{authorize_url, handle_callback, OAuthProvider};

use crate::models::UserId;
use crate::routes::Route;
use crate::session::{SessionStore, Storage};

/// Message shown to the user after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
    Info(String),
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice::Success(message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice::Error(message.into())
    }

    pub fn info(message: impl Into<String>) -> Self {
        Notice::Info(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Success(m) | Notice::Error(m) | Notice::Info(m) => m,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

/// What the page does after a flow finishes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Go to another page, optionally carrying a notice to show there
    Navigate { to: Route, notice: Option<Notice> },
    /// Stay on the current page and show a notice
    Stay(Notice),
    /// The page needs a session and there is none; go to login
    NotLoggedIn,
}

impl Outcome {
    pub fn navigate(to: Route) -> Self {
        Outcome::Navigate { to, notice: None }
    }

    pub fn navigate_with(to: Route, notice: Notice) -> Self {
        Outcome::Navigate {
            to,
            notice: Some(notice),
        }
    }

    /// Route to switch to, if any
    pub fn destination(&self) -> Option<Route> {
        match self {
            Outcome::Navigate { to, .. } => Some(to.clone()),
            Outcome::NotLoggedIn => Some(Route::Login),
            Outcome::Stay(_) => None,
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        match self {
            Outcome::Navigate { notice, .. } => notice.as_ref(),
            Outcome::Stay(notice) => Some(notice),
            Outcome::NotLoggedIn => None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.notice().is_some_and(Notice::is_error)
    }
}

/// Id of the logged-in user, or `None` when the page must redirect to login.
///
/// A session that cannot be read counts as logged out.
pub fn current_user<S: Storage>(store: &SessionStore<S>) -> Option<UserId> {
    match store.load() {
        Ok(Some(session)) => Some(session.user_id),
        Ok(None) => None,
        Err(e) => {
            tracing::warn!("Failed to read session: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryStorage;

    #[test]
    fn test_outcome_destination() {
        assert_eq!(Outcome::NotLoggedIn.destination(), Some(Route::Login));
        assert_eq!(Outcome::navigate(Route::Home).destination(), Some(Route::Home));
        assert_eq!(Outcome::Stay(Notice::info("x")).destination(), None);
    }

    #[test]
    fn test_outcome_is_error() {
        assert!(Outcome::Stay(Notice::error("bad")).is_error());
        assert!(!Outcome::navigate_with(Route::Login, Notice::success("ok")).is_error());
        assert!(!Outcome::NotLoggedIn.is_error());
    }

    #[test]
    fn test_current_user() {
        let store = SessionStore::new(MemoryStorage::new());
        assert_eq!(current_user(&store), None);

        store
            .save(&serde_json::json!({"id": 12, "name": "Mina"}))
            .unwrap();
        assert_eq!(current_user(&store), Some(UserId::new("12")));
    }
}
