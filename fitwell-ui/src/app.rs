//! App Root Component
//!
//! Main application component with routing and global providers.

use leptos::*;
use leptos_router::*;

use fitwell::routes::Route as Page;

use crate::api;
use crate::components::{Nav, Toast};
use crate::pages::{Dashboard, Feedback, Home, Input, Login, OAuthCallback, Register, UpdateMetrics};
use crate::state::{provide_global_state, GlobalState};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide global state to all components
    provide_global_state();

    // Pick up the host's settings; the defaults stay when there are none
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    spawn_local(async move {
        match api::fetch_client_config().await {
            Ok(config) => state.client_config.set(config),
            Err(e) => {
                web_sys::console::error_1(&format!("Using default client config: {}", e).into());
            }
        }
    });

    view! {
        <Router>
            <div class="min-h-screen bg-gray-900 text-white flex flex-col">
                // Navigation header
                <Nav />

                // Main content area
                <main class="flex-1 container mx-auto px-4 py-8">
                    <Routes>
                        <Route path=Page::HOME view=Home />
                        <Route path=Page::LOGIN view=Login />
                        <Route path=Page::SIGNUP view=Register />
                        <Route
                            path=Page::INPUT
                            view=|| view! { <RequireSession page=Page::Input><Input /></RequireSession> }
                        />
                        <Route
                            path=Page::UPDATE_METRICS
                            view=|| view! { <RequireSession page=Page::UpdateMetrics><UpdateMetrics /></RequireSession> }
                        />
                        <Route
                            path=Page::DASHBOARD
                            view=|| view! { <RequireSession page=Page::Dashboard><Dashboard /></RequireSession> }
                        />
                        <Route
                            path=Page::FEEDBACK
                            view=|| view! { <RequireSession page=Page::Feedback><Feedback /></RequireSession> }
                        />
                        <Route path=Page::OAUTH_CALLBACK view=OAuthCallback />
                        <Route path=Page::OAUTH_CALLBACK_ALIAS view=OAuthCallback />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                // Toast notifications
                <Toast />
            </div>
        </Router>
    }
}

/// Renders `children` only with a session; otherwise redirects to login
#[component]
fn RequireSession(page: Page, children: ChildrenFn) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    move || {
        let target = page.clone().guard(state.is_logged_in());
        if target == page {
            children().into_view()
        } else {
            view! { <Redirect path=target.path() /> }.into_view()
        }
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-400 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href=Page::HOME
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
            >
                "Go to Home"
            </A>
        </div>
    }
}
