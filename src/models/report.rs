//! Aggregated weekly and monthly reports

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which report to fetch
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    Weekly,
    Monthly,
}

impl ReportPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportPeriod::Weekly => "weekly",
            ReportPeriod::Monthly => "monthly",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportPeriod::Weekly => "Weekly Report",
            ReportPeriod::Monthly => "Monthly Report",
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReportPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" | "week" | "w" => Ok(ReportPeriod::Weekly),
            "monthly" | "month" | "m" => Ok(ReportPeriod::Monthly),
            other => Err(format!("unknown report period: {}", other)),
        }
    }
}

/// Report as returned by `GET /api/reports/{period}`.
///
/// Three parallel arrays, one entry per date label.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Report {
    #[serde(default)]
    pub dates: Vec<String>,
    /// Kilocalories eaten per date
    #[serde(default)]
    pub calories: Vec<f64>,
    /// Kilocalories burned per date
    #[serde(default)]
    pub exercise: Vec<f64>,
}

/// One date of a report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportPoint {
    pub date: String,
    pub calories: f64,
    pub exercise: f64,
}

/// Totals across a report
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReportSummary {
    pub days: usize,
    pub total_calories: f64,
    pub total_exercise: f64,
    pub avg_calories: f64,
    pub avg_exercise: f64,
}

impl Report {
    /// Zip the parallel arrays into points.
    ///
    /// Mismatched array lengths are truncated to the shortest.
    pub fn points(&self) -> Vec<ReportPoint> {
        let len = self.dates.len().min(self.calories.len()).min(self.exercise.len());
        if len != self.dates.len() || len != self.calories.len() || len != self.exercise.len() {
            tracing::warn!(
                dates = self.dates.len(),
                calories = self.calories.len(),
                exercise = self.exercise.len(),
                "Report arrays have different lengths, truncating"
            );
        }

        (0..len)
            .map(|i| ReportPoint {
                date: self.dates[i].clone(),
                calories: self.calories[i],
                exercise: self.exercise[i],
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.points().is_empty()
    }

    pub fn summary(&self) -> ReportSummary {
        let points = self.points();
        if points.is_empty() {
            return ReportSummary::default();
        }

        let total_calories: f64 = points.iter().map(|p| p.calories).sum();
        let total_exercise: f64 = points.iter().map(|p| p.exercise).sum();
        let days = points.len();

        ReportSummary {
            days,
            total_calories,
            total_exercise,
            avg_calories: total_calories / days as f64,
            avg_exercise: total_exercise / days as f64,
        }
    }

    /// Largest value across both series (for chart scaling)
    pub fn max_value(&self) -> f64 {
        self.points()
            .iter()
            .flat_map(|p| [p.calories, p.exercise])
            .fold(0.0, f64::max)
    }
}
