// src/lib.rs

//! sitewise: construction-project management server.
//!
//! A thin JSON front end over an external headless-CMS items API: signup and
//! login with cookie sessions, project/task/budget/team tracking, and a shop
//! whose cart is the status-filtered set of pending order rows.

pub mod config;
pub mod errors;
pub mod models;
pub mod money;
pub mod services;
pub mod state;
pub mod store;
pub mod web;
