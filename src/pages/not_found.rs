//! Fallback page for unmatched paths.

use leptos::prelude::*;

use crate::util::route_guard::HOME_PATH;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="not-found">
            <h1>"Page not found."</h1>
            <a href=HOME_PATH>"Back to products"</a>
        </div>
    }
}
