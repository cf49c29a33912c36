//! Cart manager: the ordered collection of lines chosen prior to checkout.

use kloudcart_core::{Price, VegetableId};

use crate::api::types::{OrderLine, OrderRequest, Vegetable};

/// One chosen vegetable plus the quantity of it pending purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    /// Vegetable this line refers to.
    pub vegetable_id: VegetableId,
    /// Display name captured at add time.
    pub name: String,
    /// Unit price captured at add time.
    pub unit_price: Price,
    /// Quantity, always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Line total: unit price times quantity.
    #[must_use]
    pub fn total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// Ordered, mutable collection of cart lines.
///
/// Multi-line policy: adding the same vegetable twice appends a second line
/// with quantity 1 rather than merging quantities. Lines keep insertion
/// order. There is deliberately no removal or quantity-edit operation.
///
/// All operations are total functions over in-memory state; no errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Append a new line with quantity 1 for the given vegetable.
    pub fn add(&mut self, vegetable: &Vegetable) {
        self.lines.push(CartLine {
            vegetable_id: vegetable.id,
            name: vegetable.name.clone(),
            unit_price: vegetable.price,
            quantity: 1,
        });
    }

    /// Empty the cart. A no-op when already empty.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lines.iter().map(CartLine::total).sum()
    }

    /// Build the order payload: identifiers and quantities only.
    #[must_use]
    pub fn order_request(&self) -> OrderRequest {
        OrderRequest {
            items: self
                .lines
                .iter()
                .map(|line| OrderLine {
                    vegetable_id: line.vegetable_id,
                    quantity: line.quantity,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn vegetable(id: i64, name: &str, price: i64) -> Vegetable {
        Vegetable {
            id: VegetableId::new(id),
            name: name.to_string(),
            description: String::new(),
            price: Price::new(Decimal::from(price)).unwrap(),
            stock: 10,
        }
    }

    #[test]
    fn test_adding_n_items_yields_n_lines_of_quantity_one() {
        let tomato = vegetable(1, "Tomatoes", 30);
        let potato = vegetable(2, "Potatoes", 20);

        let mut cart = Cart::new();
        cart.add(&tomato);
        cart.add(&tomato); // duplicate vegetable: second line, not a merge
        cart.add(&potato);

        assert_eq!(cart.len(), 3);
        assert!(cart.lines().iter().all(|line| line.quantity == 1));
        assert_eq!(cart.lines()[0].vegetable_id, cart.lines()[1].vegetable_id);
    }

    #[test]
    fn test_clear_non_empty_cart() {
        let mut cart = Cart::new();
        cart.add(&vegetable(1, "Tomatoes", 30));
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear_empty_cart_is_noop() {
        let mut cart = Cart::new();
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.len(), 0);
    }

    #[test]
    fn test_subtotal_sums_line_totals() {
        let mut cart = Cart::new();
        cart.add(&vegetable(1, "Tomatoes", 30));
        cart.add(&vegetable(1, "Tomatoes", 30));
        cart.add(&vegetable(3, "Onions", 25));
        assert_eq!(cart.subtotal().amount(), Decimal::from(85));
    }

    #[test]
    fn test_order_request_carries_ids_and_quantities_only() {
        let mut cart = Cart::new();
        cart.add(&vegetable(2, "Potatoes", 20));

        let order = cart.order_request();
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].vegetable_id, VegetableId::new(2));
        assert_eq!(order.items[0].quantity, 1);

        let json = serde_json::to_value(&order).unwrap();
        let item = &json["items"][0];
        assert!(item.get("name").is_none());
        assert!(item.get("price").is_none());
    }
}
