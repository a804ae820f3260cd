//! Home page: product form and catalog grid.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered only for an authenticated session. The product list is fetched
//! once per mount; created products are appended from the server's echo. A
//! refused create ends the session and the route guard takes over.

use leptos::prelude::*;

use crate::app::AppServices;
use crate::components::product_card::ProductCard;
use crate::components::product_form::ProductForm;
use crate::net::catalog::CatalogError;
use crate::net::types::Product;
use crate::state::auth::AuthState;
use crate::state::catalog::CatalogState;

#[component]
pub fn HomePage() -> impl IntoView {
    let services = expect_context::<AppServices>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let catalog = RwSignal::new(CatalogState::loading());

    let list_client = services.catalog_client();
    leptos::task::spawn_local(async move {
        match list_client.list_products().await {
            Ok(products) => catalog.update(|s| s.loaded(products)),
            Err(e) => {
                log::warn!("could not load products: {e}");
                catalog.update(CatalogState::load_failed);
            }
        }
    });

    let on_created = Callback::new(move |product: Product| catalog.update(|s| s.append(product)));

    let failure_services = services.clone();
    let on_failed = Callback::new(move |error: CatalogError| {
        if error == CatalogError::Unauthorized {
            failure_services.end_session(auth);
            return;
        }
        catalog.update(|s| s.create_failed(&error.to_string()));
    });

    let on_logout = move |_| services.end_session(auth);

    view! {
        <div class="home-page">
            <header class="home-header">
                <h1>"Products"</h1>
                <button class="logout-button" type="button" on:click=on_logout>
                    "Logout"
                </button>
            </header>
            <ProductForm on_created=on_created on_failed=on_failed/>
            <Show when=move || catalog.get().error.is_some()>
                <p class="form-error">{move || catalog.get().error.unwrap_or_default()}</p>
            </Show>
            <Show
                when=move || !catalog.get().loading
                fallback=|| view! { <p class="home-loading">"Loading..."</p> }
            >
                <div class="product-grid">
                    {move || {
                        catalog
                            .get()
                            .products
                            .into_iter()
                            .map(|product| view! { <ProductCard product=product/> })
                            .collect_view()
                    }}
                </div>
            </Show>
        </div>
    }
}
