//! Product-list state for the home view.
//!
//! DESIGN
//! ======
//! The list lives only in memory. Creations are appended with the record
//! the server echoed back; the full list is fetched once per mount.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use crate::net::types::Product;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogState {
    pub products: Vec<Product>,
    pub loading: bool,
    pub error: Option<String>,
}

impl CatalogState {
    /// State for a view that has just started its initial fetch.
    pub fn loading() -> Self {
        Self { loading: true, ..Self::default() }
    }

    /// Replace the list with a fetch result.
    pub fn loaded(&mut self, products: Vec<Product>) {
        self.products = products;
        self.loading = false;
    }

    /// The initial fetch failed; keep whatever is already shown.
    pub fn load_failed(&mut self) {
        self.loading = false;
    }

    /// Append a freshly created product and clear any prior create error.
    pub fn append(&mut self, product: Product) {
        self.products.push(product);
        self.error = None;
    }

    pub fn create_failed(&mut self, reason: &str) {
        self.error = Some(format!("Error adding product: {reason}"));
    }
}
