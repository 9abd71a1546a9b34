//! Navigation Component
//!
//! Header bar. Links depend on whether a session exists.

use leptos::*;
use leptos_router::*;

use fitwell::flows;
use fitwell::routes::Route as Page;

use crate::state::GlobalState;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let logout_state = state.clone();
    let on_logout = move |_| {
        let outcome = flows::logout(&logout_state.store());
        logout_state.apply(&outcome, |path| navigate(path, Default::default()));
    };

    let links_state = state.clone();
    let greeting_state = state.clone();

    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    // Logo and brand
                    <A href=Page::HOME class="flex items-center space-x-3">
                        <span class="text-2xl">"💪"</span>
                        <span class="text-xl font-bold text-white">"FitWell"</span>
                    </A>

                    // Navigation links
                    <div class="flex items-center space-x-1">
                        {move || {
                            Page::nav(links_state.is_logged_in())
                                .into_iter()
                                .map(|page| view! { <NavLink href=page.base_path() label=page.title() /> })
                                .collect_view()
                        }}

                        {move || {
                            greeting_state.session.get().map(|session| view! {
                                <span class="px-3 text-sm text-gray-400">{session.display_name()}</span>
                            })
                        }}

                        <Show when=move || state.is_logged_in()>
                            <button
                                class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
                                on:click=on_logout.clone()
                            >
                                "Log out"
                            </button>
                        </Show>
                    </div>
                </div>
            </div>
        </nav>
    }
}

/// Individual navigation link
#[component]
fn NavLink(
    href: &'static str,
    label: &'static str,
) -> impl IntoView {
    view! {
        <A
            href=href
            class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
            active_class="bg-gray-700 text-white"
        >
            {label}
        </A>
    }
}
