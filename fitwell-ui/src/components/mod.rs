//! UI Components
//!
//! Reusable Leptos components shared by the pages.

pub mod chart;
pub mod field;
pub mod loading;
pub mod metric_card;
pub mod nav;
pub mod toast;

pub use chart::ReportChart;
pub use field::{Field, SelectField, SubmitButton, TextArea};
pub use loading::{ChartSkeleton, InlineLoading, Loading};
pub use metric_card::{DayTotals, MetricCard, SummaryCards};
pub use nav::Nav;
pub use toast::Toast;
