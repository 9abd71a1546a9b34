//! Chart Component
//!
//! Report bar chart using HTML5 Canvas: calories eaten next to calories
//! burned, one group per date.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use fitwell::models::{Report, ReportPoint};

/// Series colors: eaten, burned
const SERIES_COLORS: [&str; 2] = [
    "#FF9800", // Orange
    "#4CAF50", // Green
];

const SERIES_LABELS: [&str; 2] = ["Calories eaten", "Calories burned"];

const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 40.0;

/// Report chart component
#[component]
pub fn ReportChart(
    #[prop(into)]
    report: Signal<Report>,
) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    // Redraw when the report changes or the canvas mounts
    create_effect(move |_| {
        let report = report.get();
        if let Some(canvas) = canvas_ref.get() {
            draw_chart(&canvas, &report.points());
        }
    });

    view! {
        <div class="relative">
            <canvas
                node_ref=canvas_ref
                width="800"
                height="360"
                class="w-full h-64 md:h-80 rounded-lg"
            />

            // Legend
            <div class="flex justify-center flex-wrap gap-4 mt-4">
                {SERIES_LABELS
                    .iter()
                    .zip(SERIES_COLORS.iter())
                    .map(|(label, color)| view! {
                        <div class="flex items-center space-x-2">
                            <div
                                class="w-3 h-3 rounded-full"
                                style=format!("background-color: {}", color)
                            />
                            <span class="text-sm text-gray-300">{*label}</span>
                        </div>
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

/// Upper bound of the y axis: the largest value rounded up to a step of 100
fn axis_max(points: &[ReportPoint]) -> f64 {
    let max = points
        .iter()
        .flat_map(|p| [p.calories, p.exercise])
        .fold(0.0, f64::max);
    if max <= 0.0 {
        100.0
    } else {
        (max / 100.0).ceil() * 100.0
    }
}

/// Width of one date group and of one bar within it
fn bar_layout(count: usize, chart_width: f64) -> (f64, f64) {
    if count == 0 {
        return (chart_width, 0.0);
    }
    let group = chart_width / count as f64;
    let bar = (group * 0.8 / SERIES_COLORS.len() as f64).min(40.0);
    (group, bar)
}

/// Draw the chart on canvas
fn draw_chart(canvas: &HtmlCanvasElement, points: &[ReportPoint]) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let chart_width = width - MARGIN_LEFT - MARGIN_RIGHT;
    let chart_height = height - MARGIN_TOP - MARGIN_BOTTOM;

    // Clear canvas
    ctx.set_fill_style_str("#1f2937"); // gray-800
    ctx.fill_rect(0.0, 0.0, width, height);

    if points.is_empty() {
        ctx.set_fill_style_str("#6b7280");
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("No data for this period", width / 2.0 - 80.0, height / 2.0);
        return;
    }

    let max = axis_max(points);

    // Horizontal grid lines with y-axis labels
    ctx.set_stroke_style_str("#374151"); // gray-700
    ctx.set_line_width(1.0);
    for i in 0..=5 {
        let y = MARGIN_TOP + (i as f64 / 5.0) * chart_height;
        ctx.begin_path();
        ctx.move_to(MARGIN_LEFT, y);
        ctx.line_to(width - MARGIN_RIGHT, y);
        ctx.stroke();

        let value = max - (i as f64 / 5.0) * max;
        ctx.set_fill_style_str("#9ca3af"); // gray-400
        ctx.set_font("12px sans-serif");
        let _ = ctx.fill_text(&format!("{:.0}", value), 5.0, y + 4.0);
    }

    let (group, bar) = bar_layout(points.len(), chart_width);
    // Thin out the date labels on long reports
    let label_every = (points.len() / 10).max(1);

    for (i, point) in points.iter().enumerate() {
        let group_left = MARGIN_LEFT + i as f64 * group;
        let first_bar = group_left + (group - bar * SERIES_COLORS.len() as f64) / 2.0;

        for (series, value) in [point.calories, point.exercise].into_iter().enumerate() {
            let bar_height = (value.max(0.0) / max) * chart_height;
            ctx.set_fill_style_str(SERIES_COLORS[series]);
            ctx.fill_rect(
                first_bar + series as f64 * bar,
                MARGIN_TOP + chart_height - bar_height,
                bar,
                bar_height,
            );
        }

        if i % label_every == 0 {
            ctx.set_fill_style_str("#9ca3af");
            ctx.set_font("12px sans-serif");
            let label = short_date(&point.date);
            let _ = ctx.fill_text(&label, group_left + group / 2.0 - 15.0, height - 10.0);
        }
    }
}

/// `2024-03-05` becomes `03/05`; anything else is shown as is
fn short_date(label: &str) -> String {
    chrono::NaiveDate::parse_from_str(label, "%Y-%m-%d")
        .map(|d| d.format("%m/%d").to_string())
        .unwrap_or_else(|_| label.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(calories: f64, exercise: f64) -> ReportPoint {
        ReportPoint {
            date: "2024-03-05".to_string(),
            calories,
            exercise,
        }
    }

    #[test]
    fn test_axis_max_rounds_up() {
        assert_eq!(axis_max(&[point(1830.0, 420.0)]), 1900.0);
        assert_eq!(axis_max(&[point(0.0, 0.0)]), 100.0);
        assert_eq!(axis_max(&[]), 100.0);
    }

    #[test]
    fn test_bar_layout_caps_width() {
        let (group, bar) = bar_layout(2, 720.0);
        assert_eq!(group, 360.0);
        assert_eq!(bar, 40.0);

        let (group, bar) = bar_layout(30, 720.0);
        assert_eq!(group, 24.0);
        assert!(bar * 2.0 < group);
    }

    #[test]
    fn test_short_date() {
        assert_eq!(short_date("2024-03-05"), "03/05");
        assert_eq!(short_date("Mon"), "Mon");
    }

    #[test]
    fn test_series_colors_are_css_hex() {
        for color in SERIES_COLORS {
            assert_eq!(color.len(), 7);
            assert!(color.starts_with('#'));
            assert!(color[1..].chars().all(|c| c.is_ascii_hexdigit()));
        }
        assert_ne!(SERIES_COLORS[0], SERIES_COLORS[1]);
    }
}
