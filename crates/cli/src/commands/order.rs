//! One-shot login / add-to-cart / checkout flow.
//!
//! The client state lives only for the process lifetime, so the whole
//! shopping session happens within a single invocation: refresh the catalog,
//! log in, fill the cart, place the order.

use thiserror::Error;

use kloudcart_core::VegetableId;

use kloudcart_client::shop::Shop;

use super::report_status;

/// Errors parsing or resolving `--item` arguments.
#[derive(Debug, Error)]
pub enum ItemError {
    /// Argument was not of the form `ID:QTY`.
    #[error("invalid item '{0}': expected ID:QTY, e.g. 1:2")]
    Malformed(String),

    /// Quantity must be at least 1.
    #[error("invalid item '{0}': quantity must be at least 1")]
    ZeroQuantity(String),

    /// The id is not in the fetched catalog.
    #[error("unknown vegetable id {0}: not in the current catalog")]
    UnknownVegetable(VegetableId),
}

/// Run the full order flow.
///
/// # Errors
///
/// Returns an error if an `--item` argument is malformed or refers to a
/// vegetable not in the catalog, or if login or checkout fail.
pub async fn run(
    shop: &Shop,
    username: &str,
    password: &str,
    items: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let requested = items
        .iter()
        .map(|raw| parse_item(raw))
        .collect::<Result<Vec<_>, _>>()?;

    shop.login(username, password).await;
    report_status(shop)?;

    // Single-task flow; the trigger cannot be rejected as a duplicate
    let _ = shop.refresh_inventory().await;
    let inventory = shop.inventory();

    for (id, quantity) in requested {
        let vegetable = inventory
            .iter()
            .find(|v| v.id == id)
            .ok_or(ItemError::UnknownVegetable(id))?;
        // One cart line per unit, matching the multi-line cart policy
        for _ in 0..quantity {
            shop.add_to_cart(vegetable);
        }
    }

    tracing::info!(
        "Cart: {} line(s), subtotal {}",
        shop.cart_lines().len(),
        shop.cart_subtotal()
    );

    shop.place_order().await;
    report_status(shop)
}

/// Parse an `--item` argument of the form `ID:QTY`.
fn parse_item(raw: &str) -> Result<(VegetableId, u32), ItemError> {
    let (id, quantity) = raw
        .split_once(':')
        .ok_or_else(|| ItemError::Malformed(raw.to_string()))?;

    let id = id
        .trim()
        .parse::<i64>()
        .map_err(|_| ItemError::Malformed(raw.to_string()))?;
    let quantity = quantity
        .trim()
        .parse::<u32>()
        .map_err(|_| ItemError::Malformed(raw.to_string()))?;

    if quantity == 0 {
        return Err(ItemError::ZeroQuantity(raw.to_string()));
    }

    Ok((VegetableId::new(id), quantity))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item_valid() {
        assert_eq!(parse_item("1:2").unwrap(), (VegetableId::new(1), 2));
        assert_eq!(parse_item(" 3 : 1 ").unwrap(), (VegetableId::new(3), 1));
    }

    #[test]
    fn test_parse_item_malformed() {
        assert!(matches!(parse_item("1"), Err(ItemError::Malformed(_))));
        assert!(matches!(parse_item("a:b"), Err(ItemError::Malformed(_))));
        assert!(matches!(parse_item("1:"), Err(ItemError::Malformed(_))));
    }

    #[test]
    fn test_parse_item_zero_quantity() {
        assert!(matches!(parse_item("1:0"), Err(ItemError::ZeroQuantity(_))));
    }
}
