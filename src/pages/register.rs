//! Registration page for new customer accounts.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every failed rule is listed at once. On mount the user directory cache is
//! warmed so later lookups avoid a fetch.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use super::password_input_type;
use crate::app::AppServices;
use crate::net::auth::AuthError;
use crate::state::form::{SubmitPhase, begin_submit};
use crate::util::route_guard::LOGIN_PATH;
use crate::validate::RegistrationForm;

const REGISTERED_MESSAGE: &str = "User registered successfully!";

/// Messages to show for a failed registration.
fn failure_messages(error: &AuthError) -> Vec<String> {
    match error {
        AuthError::InvalidRegistration(errors) => errors.iter().map(ToString::to_string).collect(),
        other => vec![other.to_string()],
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let services = expect_context::<AppServices>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let repassword = RwSignal::new(String::new());
    let name = RwSignal::new(String::new());
    let avatar = RwSignal::new(String::new());
    let show_password = RwSignal::new(false);
    let show_repassword = RwSignal::new(false);
    let errors = RwSignal::new(Vec::<String>::new());
    let success = RwSignal::new(None::<&'static str>);
    let phase = RwSignal::new(SubmitPhase::Idle);

    let warm_client = services.auth_client();
    leptos::task::spawn_local(async move {
        if let Err(e) = warm_client.users().await {
            log::warn!("could not load user directory: {e}");
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if !begin_submit(phase) {
            return;
        }
        errors.set(Vec::new());
        success.set(None);
        let form = RegistrationForm {
            email: email.get_untracked(),
            password: password.get_untracked(),
            repassword: repassword.get_untracked(),
            name: name.get_untracked(),
            avatar: avatar.get_untracked(),
        };
        let client = services.auth_client();
        let navigate = navigate.clone();

        leptos::task::spawn_local(async move {
            match client.register(&form).await {
                Ok(_) => {
                    for field in [email, password, repassword, name, avatar] {
                        field.set(String::new());
                    }
                    success.set(Some(REGISTERED_MESSAGE));
                    navigate(LOGIN_PATH, NavigateOptions::default());
                }
                Err(e) => errors.set(failure_messages(&e)),
            }
            phase.update(SubmitPhase::finish);
        });
    };

    let text_field = move |signal: RwSignal<String>, kind: &'static str, placeholder: &'static str| {
        view! {
            <input
                class="auth-input"
                type=kind
                placeholder=placeholder
                prop:value=move || signal.get()
                on:input=move |ev| signal.set(event_target_value(&ev))
            />
        }
    };

    let password_field = move |signal: RwSignal<String>, visible: RwSignal<bool>, placeholder: &'static str| {
        view! {
            <div class="auth-password">
                <input
                    class="auth-input"
                    type=move || password_input_type(visible.get())
                    placeholder=placeholder
                    prop:value=move || signal.get()
                    on:input=move |ev| signal.set(event_target_value(&ev))
                />
                <button
                    class="auth-password__toggle"
                    type="button"
                    on:click=move |_| visible.update(|v| *v = !*v)
                >
                    {move || if visible.get() { "Hide" } else { "Show" }}
                </button>
            </div>
        }
    };

    view! {
        <div class="auth-page">
            <form class="auth-form" on:submit=on_submit>
                <h1>"Register"</h1>
                {text_field(email, "email", "Email")}
                {password_field(password, show_password, "Password")}
                {password_field(repassword, show_repassword, "Confirm password")}
                {text_field(name, "text", "Name")}
                {text_field(avatar, "text", "Avatar URL")}
                <Show when=move || !errors.get().is_empty()>
                    <ul class="form-error">
                        {move || errors.get().into_iter().map(|msg| view! { <li>{msg}</li> }).collect_view()}
                    </ul>
                </Show>
                <Show when=move || success.get().is_some()>
                    <p class="form-success">{move || success.get().unwrap_or_default()}</p>
                </Show>
                <button class="auth-button" type="submit" disabled=move || phase.get().is_busy()>
                    {move || phase.get().label("Register", "Registering...")}
                </button>
                <p class="auth-switch">
                    "Already registered? "
                    <a href=LOGIN_PATH>"Sign in"</a>
                </p>
            </form>
        </div>
    }
}
