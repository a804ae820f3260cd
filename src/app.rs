//! Root application component with routing and context providers.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
    hooks::{use_location, use_navigate},
};

use crate::config::ApiConfig;
use crate::net::DefaultTransport;
use crate::net::auth::AuthClient;
use crate::net::catalog::CatalogClient;
use crate::pages::{home::HomePage, login::LoginPage, not_found::NotFoundPage, register::RegisterPage};
use crate::session::{DefaultStorage, SessionStore};
use crate::state::auth::AuthState;
use crate::util::route_guard::install_route_guard;

/// Endpoints and storage shared by every page, provided via context.
#[derive(Clone, Debug)]
pub struct AppServices {
    config: ApiConfig,
    storage: DefaultStorage,
}

impl AppServices {
    pub fn new(config: ApiConfig, storage: DefaultStorage) -> Self {
        Self { config, storage }
    }

    /// Services configured from build-time overrides, falling back to the
    /// default endpoints when an override is malformed.
    pub fn from_build_env() -> Self {
        let config = ApiConfig::from_build_env().unwrap_or_else(|e| {
            log::warn!("{e}; using default endpoints");
            ApiConfig::default()
        });
        Self::new(config, DefaultStorage::default())
    }

    pub fn session(&self) -> SessionStore<DefaultStorage> {
        SessionStore::new(self.storage.clone())
    }

    pub fn auth_client(&self) -> AuthClient<DefaultTransport, DefaultStorage> {
        AuthClient::new(DefaultTransport::default(), self.session(), self.config.clone())
    }

    pub fn catalog_client(&self) -> CatalogClient<DefaultTransport, DefaultStorage> {
        CatalogClient::new(DefaultTransport::default(), self.session(), self.config.clone())
    }

    /// Drop the stored token and mark the session as ended. The route guard
    /// takes care of the redirect.
    pub fn end_session(&self, auth: RwSignal<AuthState>) {
        if let Err(e) = self.auth_client().logout() {
            log::warn!("could not clear session: {e}");
        }
        auth.update(AuthState::logged_out);
    }
}

/// Root application component.
///
/// Provides shared state contexts, restores the stored session once, and
/// sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let services = AppServices::from_build_env();
    let auth = RwSignal::new(AuthState::default());

    let session = services.session();
    Effect::new(move || {
        auth.set(AuthState::restore(session.get_token().as_deref()));
    });

    provide_context(services);
    provide_context(auth);

    view! {
        <Title text="Shopfront"/>

        <Router>
            <RouteGuard/>
            <main>
                <Routes fallback=|| view! { <Protected><NotFoundPage/></Protected> }>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("register") view=RegisterPage/>
                    <Route
                        path=StaticSegment("")
                        view=|| view! { <Protected><HomePage/></Protected> }
                    />
                </Routes>
            </main>
        </Router>
    }
}

/// Hooks the redirect effect to the router's current path.
#[component]
fn RouteGuard() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let location = use_location();
    install_route_guard(auth, location.pathname, use_navigate());
}

/// Renders its children only for an authenticated session.
#[component]
pub fn Protected(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    view! {
        <Show when=move || auth.get().is_authenticated()>
            {children()}
        </Show>
    }
}
