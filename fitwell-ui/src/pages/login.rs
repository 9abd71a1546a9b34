//! Login Page
//!
//! Email/password sign-in plus the Kakao authorization redirect.

use leptos::*;
use leptos_router::*;

use fitwell::flows;
use fitwell::models::LoginForm;
use fitwell::routes::Route as Page;

use crate::components::{Field, SubmitButton};
use crate::state::GlobalState;

/// Login page component
#[component]
pub fn Login() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);

    let state_for_submit = state.clone();
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = LoginForm::new(email.get(), password.get());

        set_submitting.set(true);
        let state = state_for_submit.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            let outcome = flows::login(&state.api(), &state.store(), &form).await;
            if outcome.is_error() {
                password.set(String::new());
            }
            state.apply(&outcome, |path| navigate(path, Default::default()));
            set_submitting.set(false);
        });
    };

    view! {
        <div class="max-w-md mx-auto space-y-6">
            <div>
                <h1 class="text-3xl font-bold">"Sign in"</h1>
                <p class="text-gray-400 mt-1">"Welcome back to FitWell"</p>
            </div>

            <form on:submit=on_submit class="bg-gray-800 rounded-xl p-6 space-y-4">
                <Field label="Email" value=email kind="email" placeholder="you@example.com" />
                <Field label="Password" value=password kind="password" />
                <SubmitButton label="Sign in" busy_label="Signing in..." busy=submitting />
            </form>

            <KakaoButton />

            <p class="text-center text-gray-400 text-sm">
                "No account yet? "
                <A href=Page::SIGNUP class="text-primary-400 hover:text-primary-500">"Sign up"</A>
            </p>
        </div>
    }
}

/// Opens the provider's authorization page; the provider redirects back to
/// the OAuth callback route with a `code`.
#[component]
fn KakaoButton() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let state_for_click = state.clone();
    let on_click = move |_| {
        let provider = state_for_click.client_config.get_untracked().oauth;
        let url = flows::authorize_url(&provider);
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.location().set_href(&url) {
            web_sys::console::error_1(&e);
            state_for_click.show_error("Could not open Kakao sign-in");
        }
    };

    view! {
        <Show when=move || state.client_config.with(|c| c.oauth.is_configured())>
            <button
                type="button"
                on:click=on_click.clone()
                class="w-full bg-yellow-400 hover:bg-yellow-300 text-gray-900 rounded-lg py-3
                       font-semibold transition-colors"
            >
                "Sign in with Kakao"
            </button>
        </Show>
    }
}
