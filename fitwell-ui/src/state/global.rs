//! Global Application State
//!
//! Reactive state management using Leptos signals.

use leptos::*;

use fitwell::{ClientConfig, Notice, Outcome, Session, SessionStore};

use super::LocalStorage;
use crate::api::{default_client_config, BrowserApi};

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// The logged-in user, mirrored from local storage
    pub session: RwSignal<Option<Session>>,
    /// Settings served by the web host
    pub client_config: RwSignal<ClientConfig>,
    /// Notices on screen, oldest first, each with its id
    pub notices: RwSignal<Vec<(u64, Notice)>>,
    next_notice: StoredValue<u64>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        session: create_rw_signal(None),
        client_config: create_rw_signal(default_client_config()),
        notices: create_rw_signal(Vec::new()),
        next_notice: store_value(0),
    };
    state.refresh_session();

    provide_context(state);
}

/// Most notices stacked on screen at once
const MAX_NOTICES: usize = 3;

/// Add a notice, dropping the oldest ones past [`MAX_NOTICES`]
fn push_notice(notices: &mut Vec<(u64, Notice)>, id: u64, notice: Notice) {
    notices.push((id, notice));
    if notices.len() > MAX_NOTICES {
        let excess = notices.len() - MAX_NOTICES;
        notices.drain(..excess);
    }
}

/// How long a notice stays on screen
fn notice_timeout_ms(notice: &Notice) -> u32 {
    match notice {
        Notice::Success(_) => 3000,
        Notice::Info(_) => 4000,
        Notice::Error(_) => 5000,
    }
}

impl GlobalState {
    pub fn store(&self) -> SessionStore<LocalStorage> {
        SessionStore::new(LocalStorage)
    }

    /// API client for the current settings
    pub fn api(&self) -> BrowserApi {
        BrowserApi::new(&self.client_config.get_untracked())
    }

    /// Re-read the session from local storage
    pub fn refresh_session(&self) {
        let session = match self.store().load() {
            Ok(session) => session,
            Err(e) => {
                web_sys::console::error_1(&format!("Failed to read session: {}", e).into());
                None
            }
        };
        self.session.set(session);
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.with(|s| s.is_some())
    }

    /// Show a notice (auto-clears after timeout)
    pub fn show_notice(&self, notice: &Notice) {
        let id = self.next_notice.get_value();
        self.next_notice.set_value(id + 1);
        self.notices
            .update(|notices| push_notice(notices, id, notice.clone()));

        let state = self.clone();
        gloo_timers::callback::Timeout::new(notice_timeout_ms(notice), move || {
            state.dismiss_notice(id);
        })
        .forget();
    }

    /// Take a notice off screen
    pub fn dismiss_notice(&self, id: u64) {
        self.notices
            .update(|notices| notices.retain(|(shown, _)| *shown != id));
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.show_notice(&Notice::success(message));
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.show_notice(&Notice::error(message));
    }

    /// Act on a flow result: refresh the session, show the notice and move.
    pub fn apply(&self, outcome: &Outcome, navigate: impl Fn(&str)) {
        self.refresh_session();

        if let Some(notice) = outcome.notice() {
            self.show_notice(notice);
        }
        if let Some(route) = outcome.destination() {
            navigate(&route.path());
        }
    }
}
