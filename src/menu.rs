//! Menu catalog - the static list of purchasable items.
//!
//! Single source of truth for what can be ordered. Items are never created
//! or destroyed at runtime.

use serde::Serialize;

/// A purchasable menu entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: u32,
    pub name: String,
    pub price: f64,
}

/// The full menu.
pub struct MenuCatalog;

impl MenuCatalog {
    /// All items available for ordering.
    pub fn all_items() -> Vec<MenuItem> {
        vec![
            MenuItem {
                id: 1,
                name: "Pizza Margherita".to_string(),
                price: 12.99,
            },
            MenuItem {
                id: 2,
                name: "Chicken Burger".to_string(),
                price: 9.99,
            },
            MenuItem {
                id: 3,
                name: "Caesar Salad".to_string(),
                price: 8.50,
            },
            MenuItem {
                id: 4,
                name: "Pasta Carbonara".to_string(),
                price: 11.99,
            },
            MenuItem {
                id: 5,
                name: "Fish & Chips".to_string(),
                price: 13.50,
            },
            MenuItem {
                id: 6,
                name: "Chocolate Cake".to_string(),
                price: 6.99,
            },
        ]
    }

    /// Look up a single item by id.
    pub fn find(id: u32) -> Option<MenuItem> {
        Self::all_items().into_iter().find(|item| item.id == id)
    }
}
