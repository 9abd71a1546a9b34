//! Input Page
//!
//! Log a meal and/or an exercise session, then ask for feedback on the day.

use leptos::*;
use leptos_router::*;

use fitwell::flows;
use fitwell::models::{DietForm, ExerciseForm};

use crate::components::{Field, InlineLoading, SubmitButton};
use crate::pages::feedback::show_feedback;
use crate::state::GlobalState;

/// Input page component
#[component]
pub fn Input() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let food_name = create_rw_signal(String::new());
    let calories = create_rw_signal(String::new());
    let exercise_type = create_rw_signal(String::new());
    let duration = create_rw_signal(String::new());
    let (saving, set_saving) = create_signal(false);

    let feedback = create_rw_signal(None::<String>);
    let (generating, set_generating) = create_signal(false);

    let state_for_save = state.clone();
    let navigate_for_save = navigate.clone();
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let diet = DietForm::new(food_name.get(), calories.get());
        let exercise = ExerciseForm::new(exercise_type.get(), duration.get());

        set_saving.set(true);
        let state = state_for_save.clone();
        let navigate = navigate_for_save.clone();
        spawn_local(async move {
            let outcome = flows::save_entries(&state.api(), &state.store(), &diet, &exercise).await;
            if !outcome.is_error() {
                for field in [food_name, calories, exercise_type, duration] {
                    field.set(String::new());
                }
            }
            state.apply(&outcome, |path| navigate(path, Default::default()));
            set_saving.set(false);
        });
    };

    let on_generate = move |_| {
        set_generating.set(true);
        let state = state.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            let outcome = flows::generate_feedback(&state.api(), &state.store()).await;
            show_feedback(&state, &outcome, feedback, |path| navigate(path, Default::default()));
            set_generating.set(false);
        });
    };

    view! {
        <div class="max-w-2xl mx-auto space-y-6">
            <div>
                <h1 class="text-3xl font-bold">"Log today"</h1>
                <p class="text-gray-400 mt-1">"Fill in a meal, an exercise, or both"</p>
            </div>

            <form on:submit=on_submit class="bg-gray-800 rounded-xl p-6 space-y-6">
                <section class="space-y-4">
                    <h2 class="text-xl font-semibold">"Meal"</h2>
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        <Field label="Food" value=food_name placeholder="e.g. bibimbap" />
                        <Field label="Calories (kcal)" value=calories kind="number" />
                    </div>
                </section>

                <section class="space-y-4">
                    <h2 class="text-xl font-semibold">"Exercise"</h2>
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        <Field label="Type" value=exercise_type placeholder="e.g. running" />
                        <Field label="Duration" value=duration placeholder="e.g. 45 or 1h 30m" />
                    </div>
                </section>

                <SubmitButton label="Save" busy_label="Saving..." busy=saving />
            </form>

            <section class="bg-gray-800 rounded-xl p-6 space-y-4">
                <div class="flex items-center justify-between">
                    <h2 class="text-xl font-semibold">"AI feedback"</h2>
                    <button
                        on:click=on_generate
                        disabled=move || generating.get()
                        class="px-4 py-2 bg-gray-600 hover:bg-gray-500 disabled:bg-gray-700
                               rounded-lg font-medium transition-colors"
                    >
                        {move || if generating.get() {
                            view! { <InlineLoading /> }.into_view()
                        } else {
                            "Get feedback".into_view()
                        }}
                    </button>
                </div>
                {move || feedback.get().map(|text| view! {
                    <p class="text-gray-300 whitespace-pre-line">{text}</p>
                })}
            </section>
        </div>
    }
}
