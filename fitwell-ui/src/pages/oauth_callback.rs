//! OAuth Callback Page
//!
//! The provider redirects here with `?code=`. The exchange runs once on mount
//! and the page then moves on to Home, Signup or Login.

use leptos::*;
use leptos_router::*;

use fitwell::flows;

use crate::components::Loading;
use crate::state::GlobalState;

/// OAuth callback page component
#[component]
pub fn OAuthCallback() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();
    let location = use_location();

    let query = location.search.get_untracked();
    spawn_local(async move {
        let outcome = flows::handle_callback(&state.api(), &state.store(), &query).await;
        state.apply(&outcome, |path| {
            navigate(
                path,
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            )
        });
    });

    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <Loading label="Signing you in with Kakao..." />
        </div>
    }
}
