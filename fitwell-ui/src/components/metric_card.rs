//! Metric Card Component
//!
//! Summary figures for a report or a single day.

use leptos::*;

use fitwell::models::{DailyLog, ReportSummary};

/// Metric card component
#[component]
pub fn MetricCard(
    /// Label to display
    label: &'static str,
    /// Formatted value
    #[prop(into)]
    value: String,
    /// Optional unit label
    #[prop(optional)]
    unit: Option<&'static str>,
) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-lg p-4 border border-gray-700">
            <div class="flex items-center justify-between">
                <span class="text-gray-400 text-sm">{label}</span>
                {unit.map(|u| view! {
                    <span class="text-gray-500 text-xs">{u}</span>
                })}
            </div>
            <div class="text-3xl font-bold mt-2">{value}</div>
        </div>
    }
}

/// Cards for a report's totals and averages
#[component]
pub fn SummaryCards(summary: ReportSummary) -> impl IntoView {
    view! {
        <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
            <MetricCard label="Avg eaten" value=kcal(summary.avg_calories) unit="kcal/day" />
            <MetricCard label="Avg burned" value=kcal(summary.avg_exercise) unit="kcal/day" />
            <MetricCard label="Total eaten" value=kcal(summary.total_calories) unit="kcal" />
            <MetricCard label="Days" value=summary.days.to_string() />
        </div>
    }
}

/// Compact figures for one day
#[component]
pub fn DayTotals(log: DailyLog) -> impl IntoView {
    view! {
        <div class="flex flex-wrap gap-2">
            <CompactFigure label="Eaten" value=kcal(log.calories_in()) />
            <CompactFigure label="Burned" value=kcal(log.calories_out()) />
            <CompactFigure label="Net" value=kcal(log.net_calories()) />
            <CompactFigure label="Exercise" value=format!("{:.0} min", log.exercise_minutes()) />
        </div>
    }
}

#[component]
fn CompactFigure(
    label: &'static str,
    #[prop(into)]
    value: String,
) -> impl IntoView {
    view! {
        <div class="bg-gray-700 rounded px-3 py-2 inline-flex items-center space-x-2">
            <span class="text-gray-400 text-xs">{label}</span>
            <span class="font-semibold">{value}</span>
        </div>
    }
}

/// Whole kilocalories, with a thousands separator
pub fn kcal(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kcal_formatting() {
        assert_eq!(kcal(0.0), "0");
        assert_eq!(kcal(849.6), "850");
        assert_eq!(kcal(12345.0), "12,345");
        assert_eq!(kcal(-1500.2), "-1,500");
    }
}
