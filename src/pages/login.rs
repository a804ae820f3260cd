//! Login page: email + password against the identity service.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use super::password_input_type;
use crate::app::AppServices;
use crate::net::types::Credentials;
use crate::state::auth::AuthState;
use crate::state::form::{SubmitPhase, begin_submit};
use crate::util::route_guard::{HOME_PATH, REGISTER_PATH};

#[component]
pub fn LoginPage() -> impl IntoView {
    let services = expect_context::<AppServices>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let show_password = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let phase = RwSignal::new(SubmitPhase::Idle);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if !begin_submit(phase) {
            return;
        }
        error.set(None);
        let credentials = Credentials {
            email: email.get_untracked().trim().to_owned(),
            password: password.get_untracked(),
        };
        let client = services.auth_client();
        let navigate = navigate.clone();

        leptos::task::spawn_local(async move {
            match client.login(&credentials).await {
                Ok(_) => {
                    auth.update(AuthState::login_succeeded);
                    navigate(HOME_PATH, NavigateOptions::default());
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            phase.update(SubmitPhase::finish);
        });
    };

    view! {
        <div class="auth-page">
            <form class="auth-form" on:submit=on_submit>
                <h1>"Sign in"</h1>
                <input
                    class="auth-input"
                    type="email"
                    placeholder="Email"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <div class="auth-password">
                    <input
                        class="auth-input"
                        type=move || password_input_type(show_password.get())
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button
                        class="auth-password__toggle"
                        type="button"
                        on:click=move |_| show_password.update(|v| *v = !*v)
                    >
                        {move || if show_password.get() { "Hide" } else { "Show" }}
                    </button>
                </div>
                <Show when=move || error.get().is_some()>
                    <p class="form-error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <button class="auth-button" type="submit" disabled=move || phase.get().is_busy()>
                    {move || phase.get().label("Sign in", "LOADING...")}
                </button>
                <p class="auth-switch">
                    "No account? "
                    <a href=REGISTER_PATH>"Register"</a>
                </p>
            </form>
        </div>
    }
}
