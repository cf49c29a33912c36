//! KloudCart client library.
//!
//! The in-memory client-state core for the KloudCart produce shop. A single
//! coordinator ([`shop::Shop`]) owns the inventory snapshot, the session
//! token, the cart, and the most recent status message, and drives every
//! call to the remote shop API.
//!
//! # Example
//!
//! ```rust,ignore
//! use kloudcart_client::{config::ClientConfig, shop::Shop};
//!
//! let config = ClientConfig::from_env()?;
//! let shop = Shop::new(&config);
//!
//! shop.refresh_inventory().await;
//! shop.login("a@b.com", "x").await;
//! for vegetable in shop.inventory() {
//!     shop.add_to_cart(&vegetable);
//! }
//! shop.place_order().await;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod config;
pub mod shop;
pub mod status;
