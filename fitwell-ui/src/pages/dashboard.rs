//! Dashboard Page
//!
//! Weekly and monthly reports, plus the meals and exercise of a picked day.

use chrono::NaiveDate;
use leptos::*;

use fitwell::flows::{self, DashboardState, DayState};
use fitwell::models::{DailyLog, ReportPeriod};
use fitwell::FitwellApi;

use crate::components::{ChartSkeleton, DayTotals, Loading, ReportChart, SummaryCards};
use crate::state::GlobalState;

/// Value format of `<input type="date">`
const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

fn date_input_value(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_INPUT_FORMAT).to_string())
        .unwrap_or_default()
}

fn parse_date_input(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_INPUT_FORMAT).ok()
}

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (period, set_period) = create_signal(ReportPeriod::Weekly);
    let days = create_rw_signal(DashboardState::new());

    // Both reports load together when the page opens
    let state_for_reports = state.clone();
    let state_for_fetch = state.clone();
    let reports = create_local_resource(
        move || state_for_reports.session.with(|s| s.as_ref().map(|s| s.user_id.clone())),
        move |user_id| {
            let api = state_for_fetch.api();
            async move {
                let user_id = user_id?;
                Some(flows::load_reports(&api, &user_id).await)
            }
        },
    );

    let state_for_today = state.clone();

    // Select a day and fetch its log unless it is already cached
    let show_day = move |date: NaiveDate| {
        let Some(user_id) = state.session.with_untracked(|s| s.as_ref().map(|s| s.user_id.clone()))
        else {
            return;
        };

        let mut needs_fetch = false;
        days.update(|d| needs_fetch = d.select(date));
        if !needs_fetch {
            return;
        }

        let api = state.api();
        spawn_local(async move {
            let result = api.daily_log(&user_id, date).await;
            if let Err(e) = &result {
                web_sys::console::error_1(&format!("Failed to fetch daily log: {}", e).into());
            }
            days.update(|d| d.finish(date, result));
        });
    };

    // Today is shown as soon as a session is available
    let show_today = show_day.clone();
    create_effect(move |_| {
        let logged_in = state_for_today.session.with(|s| s.is_some());
        if logged_in && days.with_untracked(|d| d.selected().is_none()) {
            show_today(chrono::Local::now().date_naive());
        }
    });

    let on_date = move |ev: web_sys::Event| {
        if let Some(date) = parse_date_input(&event_target_value(&ev)) {
            show_day(date);
        }
    };

    view! {
        <div class="space-y-8">
            // Page header
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Dashboard"</h1>
                    <p class="text-gray-400 mt-1">"Calories in and out over time"</p>
                </div>

                <div class="flex space-x-2">
                    <PeriodButton period=ReportPeriod::Weekly current=period set_current=set_period />
                    <PeriodButton period=ReportPeriod::Monthly current=period set_current=set_period />
                </div>
            </div>

            // Report for the chosen period
            <section class="bg-gray-800 rounded-xl p-6 space-y-6">
                <h2 class="text-xl font-semibold">{move || period.get().title()}</h2>
                <Suspense fallback=move || view! { <ChartSkeleton /> }>
                    {move || reports.get().flatten().map(|reports| {
                        match reports.get(period.get()).clone() {
                            Ok(report) => {
                                let summary = report.summary();
                                view! {
                                    <SummaryCards summary=summary />
                                    <ReportChart report=Signal::derive(move || report.clone()) />
                                }.into_view()
                            }
                            Err(e) => view! {
                                <p class="text-red-400">{format!("Could not load the report: {}", e)}</p>
                            }.into_view(),
                        }
                    })}
                </Suspense>
            </section>

            // One day's entries
            <section class="bg-gray-800 rounded-xl p-6 space-y-4">
                <div class="flex items-center justify-between">
                    <h2 class="text-xl font-semibold">"Daily log"</h2>
                    <input
                        type="date"
                        prop:value=move || days.with(|d| date_input_value(d.selected()))
                        on:change=on_date
                        class="bg-gray-700 rounded-lg px-4 py-2 border border-gray-600
                               focus:border-primary-500 focus:outline-none"
                    />
                </div>

                {move || days.with(|d| match d.current().cloned() {
                    None => view! {
                        <p class="text-gray-400">"Pick a date to see what you logged."</p>
                    }.into_view(),
                    Some(DayState::Loading) => view! { <Loading /> }.into_view(),
                    Some(DayState::Failed(e)) => view! {
                        <p class="text-red-400">{format!("Could not load that day: {}", e)}</p>
                    }.into_view(),
                    Some(DayState::Loaded(log)) => view! { <DayLog log=log /> }.into_view(),
                })}
            </section>
        </div>
    }
}

#[component]
fn PeriodButton(
    period: ReportPeriod,
    current: ReadSignal<ReportPeriod>,
    set_current: WriteSignal<ReportPeriod>,
) -> impl IntoView {
    let label = match period {
        ReportPeriod::Weekly => "Week",
        ReportPeriod::Monthly => "Month",
    };

    view! {
        <button
            on:click=move |_| set_current.set(period)
            class=move || {
                let base = "px-4 py-2 rounded-lg text-sm font-medium transition-colors";
                if current.get() == period {
                    format!("{} bg-primary-600 text-white", base)
                } else {
                    format!("{} bg-gray-700 text-gray-300 hover:bg-gray-600", base)
                }
            }
        >
            {label}
        </button>
    }
}

#[component]
fn DayLog(log: DailyLog) -> impl IntoView {
    if log.is_empty() {
        return view! {
            <p class="text-gray-400">"Nothing recorded on this day."</p>
        }
        .into_view();
    }

    view! {
        <DayTotals log=log.clone() />

        <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
            <div>
                <h3 class="font-semibold mb-2">"Meals"</h3>
                <ul class="space-y-2">
                    {log.meal_logs.iter().map(|meal| view! {
                        <li class="flex justify-between bg-gray-700 rounded px-3 py-2">
                            <span>{meal.food_name.clone()}</span>
                            <span class="text-gray-300">{format!("{:.0} kcal", meal.calories)}</span>
                        </li>
                    }).collect_view()}
                </ul>
            </div>

            <div>
                <h3 class="font-semibold mb-2">"Exercise"</h3>
                <ul class="space-y-2">
                    {log.exercise_logs.iter().map(|exercise| view! {
                        <li class="flex justify-between bg-gray-700 rounded px-3 py-2">
                            <span>{exercise.exercise_type.clone()}</span>
                            <span class="text-gray-300">
                                {format!("{:.0} min · {:.0} kcal", exercise.duration, exercise.calories_burned)}
                            </span>
                        </li>
                    }).collect_view()}
                </ul>
            </div>
        </div>
    }
    .into_view()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_input_follows_selection() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let mut days = DashboardState::new();
        assert_eq!(date_input_value(days.selected()), "");

        days.select(today);
        assert_eq!(date_input_value(days.selected()), "2024-03-05");
        assert_eq!(parse_date_input("2024-03-05"), Some(today));
    }

    #[test]
    fn test_cleared_date_input_is_ignored() {
        assert_eq!(parse_date_input(""), None);
        assert_eq!(parse_date_input("03/05/2024"), None);
    }
}
