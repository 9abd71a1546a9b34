//! FitWell Web App
//!
//! Diet and exercise tracker built with Leptos (WASM).
//!
//! # Features
//!
//! - Email/password and Kakao sign-in
//! - Meal, exercise and body-metrics entry
//! - Weekly and monthly report charts with a per-day log
//! - AI feedback with history
//!
//! # Architecture
//!
//! Client-side rendered (CSR) Leptos application compiled to WebAssembly.
//! Page logic lives in the `fitwell` crate's flows; this crate supplies the
//! browser implementations of its `FitwellApi` and `Storage` traits and
//! renders the views.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
