//! Farmerty Core - Shared types library.
//!
//! This crate provides common types used across all Farmerty components:
//! - `storefront` - Session, catalog and product submission logic
//! - `cli` - Command-line driver for the storefront operations
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access,
//! no async runtime. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, roles and categories

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
