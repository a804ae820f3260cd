//! Card component for one catalog entry.

#[cfg(test)]
#[path = "product_card_test.rs"]
mod product_card_test;

use leptos::prelude::*;

use crate::net::types::Product;

/// Price line shown on a card. Whole prices print without decimals.
pub fn price_label(price: f64) -> String {
    format!("Price: ${price}")
}

#[component]
pub fn ProductCard(product: Product) -> impl IntoView {
    let price = price_label(product.price);
    view! {
        <div class="product-card">
            <p class="product-card__name">"Name: " {product.name}</p>
            <p class="product-card__description">"Description: " {product.description}</p>
            <p class="product-card__price">{price}</p>
        </div>
    }
}
