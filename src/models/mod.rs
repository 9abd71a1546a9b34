//! FitWell Data Model
//!
//! - **user**: user id, profile snapshot, gender
//! - **auth**: login, registration and OAuth payloads
//! - **entries**: diet, exercise, body metrics and the per-day log
//! - **report**: weekly and monthly aggregates
//! - **feedback**: AI feedback requests and history
//! - **forms**: raw form state and its validation
//! - **validation**: field errors and parsers

pub mod auth;
pub mod entries;
pub mod feedback;
pub mod forms;
pub mod report;
pub mod user;
pub mod validation;

pub use auth::{Credentials, OAuthCodeRequest, OAuthExchange, RegistrationProfile};
pub use entries::{DailyLog, DietEntry, ExerciseEntry, ExerciseLog, MealLog, MetricsUpdate};
pub use feedback::{Feedback, FeedbackRequest};
pub use forms::{DietForm, ExerciseForm, FeedbackForm, LoginForm, MetricsForm, RegistrationForm};
pub use report::{Report, ReportPeriod, ReportPoint, ReportSummary};
pub use user::{Gender, UserId, UserProfile};
pub use validation::{parse_duration_minutes, ValidationError, ValidationResult};
