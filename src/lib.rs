//! # FitWell
//!
//! Personal diet and exercise tracker: users sign in (password or Kakao
//! OAuth), log meals and workouts, review weekly and monthly reports, and ask
//! an AI coach for feedback. Everything is stored by a remote FitWell backend;
//! this crate is the client side.
//!
//! ## Modules
//!
//! - [`models`]: wire types, form state and validation
//! - [`session`]: the logged-in user, kept in Web Storage-like key-value storage
//! - [`client`]: the backend contract and its native HTTP implementation
//! - [`routes`]: page URLs and the login guard
//! - [`flows`]: page logic shared by the browser app and the CLI
//!
//! With the default `native` feature the crate also carries [`config`],
//! [`logging`] and the [`serve`] web host. The browser app in `fitwell-ui`
//! depends on this crate with default features off.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fitwell::client::HttpClient;
//! use fitwell::config::Config;
//! use fitwell::flows;
//! use fitwell::models::LoginForm;
//! use fitwell::session::{SessionStore, SqliteStorage};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let api = HttpClient::from_config(&config.api)?;
//!     let store = SessionStore::new(SqliteStorage::open(&config.session.db_path)?);
//!
//!     let outcome = flows::login(&api, &store, &LoginForm::new("mina@example.com", "secret")).await;
//!     if let Some(notice) = outcome.notice() {
//!         println!("{}", notice.message());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod flows;
pub mod models;
pub mod routes;
pub mod session;

#[cfg(feature = "native")]
pub mod config;
#[cfg(feature = "native")]
pub mod logging;
#[cfg(feature = "native")]
pub mod serve;

// Re-export top-level types for convenience
pub use client::{ApiError, ApiResult, BaseUrls, ClientConfig, Endpoint, FitwellApi};

#[cfg(feature = "native")]
pub use client::HttpClient;

pub use flows::{DashboardState, FeedbackOutcome, Notice, OAuthProvider, Outcome};

pub use models::{
    Credentials, DailyLog, DietEntry, ExerciseEntry, Feedback, FeedbackRequest, MetricsUpdate,
    Report, ReportPeriod, UserId, UserProfile, ValidationError,
};

pub use routes::Route;

pub use session::{MemoryStorage, Session, SessionError, SessionStore, Storage};

#[cfg(feature = "native")]
pub use session::SqliteStorage;

#[cfg(feature = "native")]
pub use config::{Config, ConfigError};
