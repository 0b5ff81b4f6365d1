// src/services/mod.rs

//! Domain services sitting between the HTTP handlers and the items API.
//!
//! The cart subsystem is deliberately store-backed: a cart line IS a pending
//! order row, so the cart never drifts from what checkout will charge.

pub mod auth;
pub mod cart;
pub mod cart_view;
pub mod catalog;
pub mod checkout;

pub use cart::{CartStore, PendingOrderStore};
pub use cart_view::{build_cart_view, CartView, CartViewLine};
pub use catalog::{CatalogAccess, ShopCatalog};
pub use checkout::{checkout, CheckoutOutcome, CompletedLine, FailedLine};
