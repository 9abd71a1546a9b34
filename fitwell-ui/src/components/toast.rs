//! Toast Notification Component
//!
//! Renders the notices flows hand back, newest at the bottom.

use leptos::*;

use fitwell::Notice;

use crate::state::GlobalState;

/// Icon and background class for a notice
fn toast_style(notice: &Notice) -> (&'static str, &'static str) {
    match notice {
        Notice::Success(_) => ("✓", "bg-green-600"),
        Notice::Info(_) => ("ℹ", "bg-blue-600"),
        Notice::Error(_) => ("✕", "bg-red-600"),
    }
}

/// Toast notification container
#[component]
pub fn Toast() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let notices = state.notices;

    view! {
        <div class="fixed bottom-6 right-4 z-50 space-y-2">
            <For
                each=move || notices.get()
                key=|(id, _)| *id
                children=move |(id, notice)| {
                    let state = state.clone();
                    view! {
                        <ToastMessage
                            notice=notice
                            on_dismiss=move |_| state.dismiss_notice(id)
                        />
                    }
                }
            />
        </div>
    }
}

#[component]
fn ToastMessage(
    notice: Notice,
    #[prop(into)]
    on_dismiss: Callback<()>,
) -> impl IntoView {
    let (icon, bg_class) = toast_style(&notice);
    // Errors are announced straight away to screen readers
    let role = if notice.is_error() { "alert" } else { "status" };

    view! {
        <div
            role=role
            on:click=move |_| on_dismiss.call(())
            class=format!(
                "flex items-center space-x-3 {} text-white px-4 py-3 rounded-lg shadow-lg \
                 cursor-pointer transition-all duration-300 ease-out",
                bg_class
            )
        >
            <span class="text-lg">{icon}</span>
            <span class="text-sm font-medium">{notice.message().to_string()}</span>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_style_per_notice() {
        assert_eq!(toast_style(&Notice::success("Saved")).1, "bg-green-600");
        assert_eq!(toast_style(&Notice::info("Hi")).1, "bg-blue-600");
        assert_eq!(toast_style(&Notice::error("No")).1, "bg-red-600");
        assert_ne!(
            toast_style(&Notice::success("a")).0,
            toast_style(&Notice::error("a")).0
        );
    }
}
