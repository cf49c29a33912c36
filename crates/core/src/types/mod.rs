//! Shared newtype wrappers.

mod credential;
mod id;
mod price;

pub use credential::SessionToken;
pub use id::{OrderId, UserId, VegetableId};
pub use price::{NegativePrice, Price};
