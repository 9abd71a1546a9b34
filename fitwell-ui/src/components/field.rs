//! Form Fields
//!
//! Inputs bound to `RwSignal<String>`; each form keeps its values as typed
//! and validation happens in the flow.

use leptos::*;

const INPUT_CLASS: &str = "w-full bg-gray-700 rounded-lg px-4 py-3 \
                           border border-gray-600 focus:border-primary-500 focus:outline-none";

/// Labelled text input
#[component]
pub fn Field(
    label: &'static str,
    value: RwSignal<String>,
    #[prop(default = "text")]
    kind: &'static str,
    #[prop(optional)]
    placeholder: &'static str,
) -> impl IntoView {
    view! {
        <div>
            <label class="block text-sm text-gray-400 mb-2">{label}</label>
            <input
                type=kind
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
                class=INPUT_CLASS
            />
        </div>
    }
}

/// Labelled select over fixed options; the first option is an empty prompt
#[component]
pub fn SelectField(
    label: &'static str,
    value: RwSignal<String>,
    options: &'static [(&'static str, &'static str)],
) -> impl IntoView {
    view! {
        <div>
            <label class="block text-sm text-gray-400 mb-2">{label}</label>
            <select
                prop:value=move || value.get()
                on:change=move |ev| value.set(event_target_value(&ev))
                class=INPUT_CLASS
            >
                <option value="">"Select..."</option>
                {options
                    .iter()
                    .map(|(key, text)| view! { <option value=*key>{*text}</option> })
                    .collect_view()}
            </select>
        </div>
    }
}

/// Labelled multi-line input
#[component]
pub fn TextArea(
    label: &'static str,
    value: RwSignal<String>,
    #[prop(optional)]
    placeholder: &'static str,
) -> impl IntoView {
    view! {
        <div>
            <label class="block text-sm text-gray-400 mb-2">{label}</label>
            <textarea
                rows="4"
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
                class=INPUT_CLASS
            />
        </div>
    }
}

/// Full-width submit button with a busy state
#[component]
pub fn SubmitButton(
    label: &'static str,
    busy_label: &'static str,
    #[prop(into)]
    busy: Signal<bool>,
) -> impl IntoView {
    view! {
        <button
            type="submit"
            disabled=move || busy.get()
            class="w-full bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                   disabled:cursor-not-allowed rounded-lg py-3 font-semibold
                   transition-colors flex items-center justify-center space-x-2"
        >
            {move || if busy.get() {
                view! {
                    <div class="loading-spinner w-5 h-5" />
                    <span>{busy_label}</span>
                }.into_view()
            } else {
                view! {
                    <span>{label}</span>
                }.into_view()
            }}
        </button>
    }
}
