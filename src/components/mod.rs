//! Reusable UI components used by route pages.

pub mod product_card;
pub mod product_form;
