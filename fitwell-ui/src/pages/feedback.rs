//! Feedback Page
//!
//! Ask a question, generate feedback from recorded data, and browse earlier
//! feedback.

use leptos::*;
use leptos_router::*;

use fitwell::flows::{self, FeedbackOutcome};
use fitwell::models::{Feedback as FeedbackItem, FeedbackForm};
use fitwell::routes::Route as Page;

use crate::components::{Loading, SubmitButton, TextArea};
use crate::state::GlobalState;

/// Render a feedback result into `target`; logged-out users go to login.
pub fn show_feedback(
    state: &GlobalState,
    outcome: &FeedbackOutcome,
    target: RwSignal<Option<String>>,
    navigate: impl Fn(&str),
) {
    match outcome {
        FeedbackOutcome::NotLoggedIn => {
            state.refresh_session();
            navigate(Page::LOGIN);
        }
        FeedbackOutcome::Invalid(message) => state.show_error(message),
        other => target.set(other.display_text().map(str::to_string)),
    }
}

/// Feedback page component
#[component]
pub fn Feedback() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let prompt = create_rw_signal(String::new());
    let answer = create_rw_signal(None::<String>);
    let (asking, set_asking) = create_signal(false);
    let (generating, set_generating) = create_signal(false);

    // Bumped after each new answer so the history refetches
    let history_version = create_rw_signal(0u32);

    let state_for_ask = state.clone();
    let navigate_for_ask = navigate.clone();
    let on_ask = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = FeedbackForm::new(prompt.get());

        set_asking.set(true);
        let state = state_for_ask.clone();
        let navigate = navigate_for_ask.clone();
        spawn_local(async move {
            let outcome = flows::ask_feedback(&state.api(), &state.store(), &form).await;
            if matches!(outcome, FeedbackOutcome::Text(_)) {
                prompt.set(String::new());
                history_version.update(|v| *v += 1);
            }
            show_feedback(&state, &outcome, answer, |path| navigate(path, Default::default()));
            set_asking.set(false);
        });
    };

    let state_for_generate = state.clone();
    let on_generate = move |_| {
        set_generating.set(true);
        let state = state_for_generate.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            let outcome = flows::generate_feedback(&state.api(), &state.store()).await;
            if matches!(outcome, FeedbackOutcome::Text(_)) {
                history_version.update(|v| *v += 1);
            }
            show_feedback(&state, &outcome, answer, |path| navigate(path, Default::default()));
            set_generating.set(false);
        });
    };

    let history = create_local_resource(
        move || history_version.get(),
        move |_| {
            let state = state.clone();
            async move { flows::feedback_history(&state.api(), &state.store()).await }
        },
    );

    view! {
        <div class="max-w-3xl mx-auto space-y-6">
            <div>
                <h1 class="text-3xl font-bold">"Feedback"</h1>
                <p class="text-gray-400 mt-1">"Advice based on your meals and exercise"</p>
            </div>

            <form on:submit=on_ask class="bg-gray-800 rounded-xl p-6 space-y-4">
                <TextArea
                    label="Ask a question"
                    value=prompt
                    placeholder="How can I get more protein at breakfast?"
                />
                <SubmitButton label="Ask" busy_label="Thinking..." busy=asking />
                <button
                    type="button"
                    on:click=on_generate
                    disabled=move || generating.get()
                    class="w-full bg-gray-600 hover:bg-gray-500 disabled:bg-gray-700
                           rounded-lg py-3 font-semibold transition-colors"
                >
                    {move || if generating.get() { "Generating..." } else { "Generate from my records" }}
                </button>
            </form>

            {move || answer.get().map(|text| view! {
                <section class="bg-gray-800 rounded-xl p-6 border border-primary-600">
                    <h2 class="text-lg font-semibold mb-2">"Latest feedback"</h2>
                    <p class="text-gray-300 whitespace-pre-line">{text}</p>
                </section>
            })}

            <section class="space-y-3">
                <h2 class="text-xl font-semibold">"History"</h2>
                <Suspense fallback=move || view! { <Loading /> }>
                    {move || history.get().map(|result| match result {
                        None => view! {
                            <p class="text-gray-400">"Sign in to see your feedback history."</p>
                        }.into_view(),
                        Some(Err(e)) => view! {
                            <p class="text-red-400">{format!("Could not load history: {}", e)}</p>
                        }.into_view(),
                        Some(Ok(items)) if items.is_empty() => view! {
                            <p class="text-gray-400">"No feedback yet."</p>
                        }.into_view(),
                        Some(Ok(items)) => items
                            .into_iter()
                            .map(|item| view! { <HistoryItem item=item /> })
                            .collect_view(),
                    })}
                </Suspense>
            </section>
        </div>
    }
}

#[component]
fn HistoryItem(item: FeedbackItem) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-lg p-4 border border-gray-700">
            <div class="text-xs text-gray-500 mb-2">{item.created_label()}</div>
            <p class="text-gray-300 whitespace-pre-line">{item.content}</p>
        </div>
    }
}
