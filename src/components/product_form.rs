//! Product creation form.
//!
//! DESIGN
//! ======
//! The form owns its field signals and submission guard; the parent only
//! hears about the outcome. Fields are cleared once the server accepts the
//! product.

use leptos::prelude::*;

use crate::app::AppServices;
use crate::net::catalog::CatalogError;
use crate::net::types::Product;
use crate::state::form::{SubmitPhase, begin_submit};
use crate::validate::ProductDraft;

#[component]
pub fn ProductForm(on_created: Callback<Product>, on_failed: Callback<CatalogError>) -> impl IntoView {
    let services = expect_context::<AppServices>();

    let name = RwSignal::new(String::new());
    let price = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let phase = RwSignal::new(SubmitPhase::Idle);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if !begin_submit(phase) {
            return;
        }
        let draft = ProductDraft {
            name: name.get_untracked(),
            price: price.get_untracked(),
            description: description.get_untracked(),
        };
        let client = services.catalog_client();

        leptos::task::spawn_local(async move {
            match client.create_product(&draft).await {
                Ok(product) => {
                    for field in [name, price, description] {
                        field.set(String::new());
                    }
                    on_created.run(product);
                }
                Err(e) => on_failed.run(e),
            }
            phase.update(SubmitPhase::finish);
        });
    };

    view! {
        <form class="product-form" on:submit=on_submit>
            <input
                class="product-form__input"
                type="text"
                placeholder="Product name"
                prop:value=move || name.get()
                on:input=move |ev| name.set(event_target_value(&ev))
            />
            <input
                class="product-form__input"
                type="text"
                inputmode="decimal"
                placeholder="Price"
                prop:value=move || price.get()
                on:input=move |ev| price.set(event_target_value(&ev))
            />
            <textarea
                class="product-form__input"
                placeholder="Description"
                prop:value=move || description.get()
                on:input=move |ev| description.set(event_target_value(&ev))
            ></textarea>
            <button class="product-form__submit" type="submit" disabled=move || phase.get().is_busy()>
                {move || phase.get().label("Add product", "Adding...")}
            </button>
        </form>
    }
}
