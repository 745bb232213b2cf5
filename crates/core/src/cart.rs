//! Client-side shopping cart.
//!
//! The cart belongs to exactly one restaurant at a time: adding an item
//! from a different restaurant discards the current contents.

use serde::{Deserialize, Serialize};

use crate::models::OrderItem;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub items: Vec<OrderItem>,
    pub restaurant_id: Option<String>,
    pub restaurant_name: Option<String>,
}

impl Cart {
    /// Adds an item, merging quantities for a repeated menu item.
    /// Switching restaurants resets the cart to just the new item.
    pub fn add_item(&mut self, item: OrderItem, restaurant_id: &str, restaurant_name: &str) {
        if let Some(current) = &self.restaurant_id {
            if current != restaurant_id {
                self.items.clear();
            }
        }
        self.restaurant_id = Some(restaurant_id.to_string());
        self.restaurant_name = Some(restaurant_name.to_string());

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.menu_item_id == item.menu_item_id)
        {
            existing.quantity += item.quantity;
        } else {
            self.items.push(item);
        }
    }

    pub fn remove_item(&mut self, menu_item_id: &str) {
        self.items.retain(|item| item.menu_item_id != menu_item_id);
    }

    pub fn update_quantity(&mut self, menu_item_id: &str, quantity: u32) {
        if let Some(item) = self.items.iter_mut().find(|i| i.menu_item_id == menu_item_id) {
            item.quantity = quantity;
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.restaurant_id = None;
        self.restaurant_name = None;
    }

    pub fn total(&self) -> f64 {
        self.items
            .iter()
            .map(|item| item.price * item.quantity as f64)
            .sum()
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price: f64, quantity: u32) -> OrderItem {
        OrderItem {
            menu_item_id: id.to_string(),
            name: format!("Item {id}"),
            quantity,
            price,
        }
    }

    #[test]
    fn merges_quantities_for_same_menu_item() {
        let mut cart = Cart::default();
        cart.add_item(item("menu-1", 10.0, 2), "rest-1", "Italian Bistro");
        cart.add_item(item("menu-1", 10.0, 1), "rest-1", "Italian Bistro");

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 3);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total(), 30.0);
    }

    #[test]
    fn switching_restaurants_resets_cart() {
        let mut cart = Cart::default();
        cart.add_item(item("menu-1", 10.0, 2), "rest-1", "Italian Bistro");
        cart.add_item(item("menu-3", 8.99, 1), "rest-2", "Sushi Paradise");

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].menu_item_id, "menu-3");
        assert_eq!(cart.restaurant_id.as_deref(), Some("rest-2"));
        assert_eq!(cart.restaurant_name.as_deref(), Some("Sushi Paradise"));
    }

    #[test]
    fn remove_and_clear() {
        let mut cart = Cart::default();
        cart.add_item(item("menu-1", 10.0, 2), "rest-1", "Italian Bistro");
        cart.add_item(item("menu-2", 5.0, 1), "rest-1", "Italian Bistro");

        cart.remove_item("menu-1");
        assert_eq!(cart.items.len(), 1);

        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.restaurant_id.is_none());
    }
}
