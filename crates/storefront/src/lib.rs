//! Farmerty storefront library.
//!
//! Session identity, catalog browsing and farmer product submissions for
//! the Farmerty farm-to-consumer marketplace, backed by local key-value
//! storage. Front ends (the `farmerty` CLI, tests) drive it through
//! [`state::AppState`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod navigation;
pub mod services;
pub mod state;
pub mod storage;
pub mod validation;
