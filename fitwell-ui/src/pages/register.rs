//! Registration Page
//!
//! Plain signup, or the second half of a Kakao sign-in: the callback sends new
//! users here with their provider profile in `?user=`.

use leptos::*;
use leptos_router::*;

use fitwell::flows;
use fitwell::models::RegistrationForm;
use fitwell::routes::Route as Page;

use crate::components::{Field, SelectField, SubmitButton};
use crate::state::GlobalState;

const GENDERS: &[(&str, &str)] = &[("male", "Male"), ("female", "Female"), ("other", "Other")];

/// The signup prefill carried in the current query string
fn prefill_from_query(search: &str) -> Option<RegistrationForm> {
    match Page::parse(Page::SIGNUP, search) {
        Some(Page::Signup { prefill }) => prefill,
        _ => None,
    }
}

/// Registration page component
#[component]
pub fn Register() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();
    let location = use_location();

    let prefill = prefill_from_query(&location.search.get_untracked()).unwrap_or_default();
    let from_oauth = !prefill.is_blank();

    let name = create_rw_signal(prefill.name);
    let email = create_rw_signal(prefill.email);
    let password = create_rw_signal(String::new());
    let height = create_rw_signal(prefill.height);
    let weight = create_rw_signal(prefill.weight);
    let age = create_rw_signal(prefill.age);
    let gender = create_rw_signal(prefill.gender);
    let goal = create_rw_signal(prefill.goal);
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = RegistrationForm {
            name: name.get(),
            email: email.get(),
            password: password.get(),
            height: height.get(),
            weight: weight.get(),
            age: age.get(),
            gender: gender.get(),
            goal: goal.get(),
        };

        set_submitting.set(true);
        let state = state.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            let outcome = flows::register(&state.api(), &form).await;
            state.apply(&outcome, |path| navigate(path, Default::default()));
            set_submitting.set(false);
        });
    };

    view! {
        <div class="max-w-2xl mx-auto space-y-6">
            <div>
                <h1 class="text-3xl font-bold">"Create your account"</h1>
                <p class="text-gray-400 mt-1">
                    {if from_oauth {
                        "We filled in what Kakao shared. Check the details and choose a password."
                    } else {
                        "Tell us a little about yourself"
                    }}
                </p>
            </div>

            <form on:submit=on_submit class="bg-gray-800 rounded-xl p-6 space-y-4">
                <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                    <Field label="Name" value=name />
                    <Field label="Email" value=email kind="email" />
                    <Field label="Password" value=password kind="password" />
                    <SelectField label="Gender" value=gender options=GENDERS />
                    <Field label="Height (cm)" value=height kind="number" />
                    <Field label="Weight (kg)" value=weight kind="number" />
                    <Field label="Age" value=age kind="number" />
                    <Field label="Goal" value=goal placeholder="e.g. lose 5 kg" />
                </div>
                <SubmitButton label="Sign up" busy_label="Signing up..." busy=submitting />
            </form>

            <p class="text-center text-gray-400 text-sm">
                "Already registered? "
                <A href=Page::LOGIN class="text-primary-400 hover:text-primary-500">"Sign in"</A>
            </p>
        </div>
    }
}
