//! Busy indicators shown while the backend answers

use leptos::*;

/// Centered spinner with an optional caption
#[component]
pub fn Loading(#[prop(optional, into)] label: Option<String>) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center gap-3 py-12">
            <div class="loading-spinner w-8 h-8" />
            {label.map(|text| view! { <p class="text-gray-400">{text}</p> })}
        </div>
    }
}

/// Spinner sized to sit inside a button
#[component]
pub fn InlineLoading() -> impl IntoView {
    view! {
        <span class="inline-block loading-spinner w-4 h-4 align-middle" />
    }
}

/// Placeholder in the shape of the summary cards and report chart
#[component]
pub fn ChartSkeleton() -> impl IntoView {
    view! {
        <div class="space-y-6 animate-pulse">
            <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                {(0..4).map(|_| view! { <div class="h-20 bg-gray-700 rounded-lg" /> }).collect_view()}
            </div>
            <div class="h-64 bg-gray-700 rounded-lg" />
        </div>
    }
}
