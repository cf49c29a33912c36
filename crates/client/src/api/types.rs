//! Wire types for the shop API.

use kloudcart_core::{Price, VegetableId};
use serde::{Deserialize, Serialize};

/// A sellable vegetable as reported by `GET /vegetables`.
///
/// Stock reflects the last server-reported value and may be stale between
/// fetches. Snapshots are replaced wholesale, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Vegetable {
    /// Unique vegetable identifier.
    pub id: VegetableId,
    /// Display name.
    pub name: String,
    /// Short description (older backends omit it).
    #[serde(default)]
    pub description: String,
    /// Unit price.
    pub price: Price,
    /// Units in stock as of the last fetch.
    #[serde(default)]
    pub stock: u32,
}

/// Credentials submitted to the auth endpoints.
///
/// Implements `Debug` manually to redact the password.
#[derive(Serialize)]
pub struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

impl std::fmt::Debug for Credentials<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Success response from `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    /// Opaque bearer token for subsequent authorized calls.
    pub access_token: String,
}

/// Request body for `POST /orders`.
///
/// Only identifiers and quantities go over the wire; names and prices are
/// server-side truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRequest {
    pub items: Vec<OrderLine>,
}

/// One line of an order payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderLine {
    pub vegetable_id: VegetableId,
    pub quantity: u32,
}
