//! Update Metrics Page

use leptos::*;
use leptos_router::*;

use fitwell::flows;
use fitwell::models::MetricsForm;

use crate::components::{Field, MetricCard, SubmitButton};
use crate::state::GlobalState;

/// Body metrics page component
#[component]
pub fn UpdateMetrics() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let weight = create_rw_signal(String::new());
    let muscle = create_rw_signal(String::new());
    let (saving, set_saving) = create_signal(false);

    // Last known values from the stored profile
    let profile_state = state.clone();
    let profile = create_memo(move |_| {
        profile_state
            .session
            .with(|s| s.as_ref().and_then(|s| s.profile()))
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = MetricsForm::new(weight.get(), muscle.get());

        set_saving.set(true);
        let state = state.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            let outcome = flows::update_metrics(&state.api(), &state.store(), &form).await;
            if !outcome.is_error() {
                weight.set(String::new());
                muscle.set(String::new());
            }
            state.apply(&outcome, |path| navigate(path, Default::default()));
            set_saving.set(false);
        });
    };

    let figure = |value: Option<f64>| {
        value
            .map(|v| format!("{:.1}", v))
            .unwrap_or_else(|| "-".to_string())
    };

    view! {
        <div class="max-w-2xl mx-auto space-y-6">
            <div>
                <h1 class="text-3xl font-bold">"Body metrics"</h1>
                <p class="text-gray-400 mt-1">"Record your latest weight and skeletal muscle mass"</p>
            </div>

            <div class="grid grid-cols-2 gap-4">
                {move || view! {
                    <MetricCard
                        label="Weight on file"
                        value=figure(profile.get().and_then(|p| p.weight))
                        unit="kg"
                    />
                    <MetricCard
                        label="Muscle on file"
                        value=figure(profile.get().and_then(|p| p.skeletal_muscle_mass))
                        unit="kg"
                    />
                }}
            </div>

            <form on:submit=on_submit class="bg-gray-800 rounded-xl p-6 space-y-4">
                <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                    <Field label="Weight (kg)" value=weight kind="number" />
                    <Field label="Skeletal muscle mass (kg)" value=muscle kind="number" />
                </div>
                <SubmitButton label="Update" busy_label="Updating..." busy=saving />
            </form>
        </div>
    }
}
