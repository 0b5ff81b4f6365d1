// src/store/mod.rs

//! Thin client for the external headless-CMS items API.
//!
//! Every persistent entity lives in that API; this module only knows how to
//! issue filtered CRUD calls against `/items/{collection}` and unwrap the
//! `{"data": ...}` envelope. Domain policy lives in `services`.

pub mod client;
pub mod filter;

pub use client::ItemsClient;
pub use filter::Query;
