//! Home Page
//!
//! Landing page. Logged-in users get shortcuts to the session pages.

use leptos::*;
use leptos_router::*;

use fitwell::routes::Route as Page;

use crate::api;
use crate::state::GlobalState;

/// Home page component
#[component]
pub fn Home() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let greeting_state = state.clone();

    view! {
        <div class="space-y-8">
            <section class="text-center py-12">
                <div class="text-6xl mb-4">"💪"</div>
                <h1 class="text-4xl font-bold mb-2">
                    {move || match greeting_state.session.get() {
                        Some(session) => format!("Hi, {}", session.display_name()),
                        None => "Welcome to FitWell".to_string(),
                    }}
                </h1>
                <p class="text-gray-400">"Track meals and exercise, watch the trends, get feedback."</p>
            </section>

            {move || {
                let pages = if state.is_logged_in() {
                    vec![Page::Input, Page::UpdateMetrics, Page::Dashboard, Page::Feedback]
                } else {
                    vec![Page::Login, Page::signup()]
                };
                view! {
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4 max-w-2xl mx-auto">
                        {pages.into_iter().map(|page| view! {
                            <A
                                href=page.base_path()
                                class="block bg-gray-800 hover:bg-gray-700 rounded-xl p-6 text-center
                                       font-semibold transition-colors border border-gray-700"
                            >
                                {page.title()}
                            </A>
                        }).collect_view()}
                    </div>
                }
            }}

            <BackendSettings />
        </div>
    }
}

/// Override for the backend URL, kept in local storage
#[component]
fn BackendSettings() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let state_for_save = state.clone();
    let saved = create_rw_signal(api::get_api_base());
    let current = move || {
        saved
            .get()
            .unwrap_or_else(|| state.client_config.with(|c| c.api_base_url.clone()))
    };
    let (api_url, set_api_url) = create_signal(String::new());

    let on_save = move |_| {
        api::set_api_base(api_url.get().trim());
        saved.set(api::get_api_base());
        set_api_url.set(String::new());
        state_for_save.show_success("Backend URL saved");
    };

    view! {
        <details class="max-w-2xl mx-auto bg-gray-800 rounded-xl p-4 text-sm">
            <summary class="cursor-pointer text-gray-400">"Backend"</summary>
            <div class="mt-4 space-y-3">
                <p class="text-gray-400">"Current: " <span class="text-white">{current}</span></p>
                <div class="flex space-x-2">
                    <input
                        type="text"
                        placeholder=api::DEFAULT_API_BASE
                        prop:value=move || api_url.get()
                        on:input=move |ev| set_api_url.set(event_target_value(&ev))
                        class="flex-1 bg-gray-700 rounded-lg px-4 py-2
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                    <button
                        on:click=on_save
                        class="px-4 py-2 bg-primary-600 hover:bg-primary-700
                               rounded-lg font-medium transition-colors"
                    >
                        "Save"
                    </button>
                </div>
                <p class="text-gray-500">"Leave empty and save to use the server's setting."</p>
            </div>
        </details>
    }
}
