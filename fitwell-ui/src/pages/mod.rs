//! Pages
//!
//! Top-level page components for each route.

pub mod dashboard;
pub mod feedback;
pub mod home;
pub mod input;
pub mod login;
pub mod oauth_callback;
pub mod register;
pub mod update_metrics;

pub use dashboard::Dashboard;
pub use feedback::Feedback;
pub use home::Home;
pub use input::Input;
pub use login::Login;
pub use oauth_callback::OAuthCallback;
pub use register::Register;
pub use update_metrics::UpdateMetrics;
