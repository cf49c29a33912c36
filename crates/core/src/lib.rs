//! KloudCart Core - Shared types library.
//!
//! This crate provides common types used across all KloudCart components:
//! - `client` - Client-state core talking to the remote shop API
//! - `cli` - Terminal storefront built on top of the client
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and credentials

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
