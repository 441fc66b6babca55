//! The order composer: in-progress, unsubmitted cart state.
//!
//! Cart entries exist only until submission; on success they are copied into
//! the creation request and discarded locally.

use crate::api::{ApiError, CreateOrderRequest, OrdersApi};
use crate::menu::MenuItem;
use crate::order::{Order, OrderItem};

/// A catalog item with a chosen quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct CartEntry {
    pub item: MenuItem,
    pub quantity: u32,
}

impl CartEntry {
    pub fn line_total(&self) -> f64 {
        self.item.price * self.quantity as f64
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// Blocked before any network call.
    #[error("{0}")]
    Validation(&'static str),
    /// A submission is already pending; the triggering control should have
    /// been disabled.
    #[error("a submission is already in progress")]
    AlreadySubmitting,
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Default)]
pub struct OrderComposer {
    customer_name: String,
    customer_email: Option<String>,
    entries: Vec<CartEntry>,
    is_submitting: bool,
}

impl OrderComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_customer_name(&mut self, name: impl Into<String>) {
        self.customer_name = name.into();
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn set_customer_email(&mut self, email: impl Into<String>) {
        let email = email.into();
        let trimmed = email.trim();
        self.customer_email = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }

    /// Add one of a catalog item: bump the quantity when the item is already
    /// in the cart, otherwise append a new entry with quantity one.
    pub fn add_item(&mut self, item: MenuItem) {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.item.id == item.id) {
            entry.quantity += 1;
        } else {
            self.entries.push(CartEntry { item, quantity: 1 });
        }
    }

    /// Set an entry's quantity from raw user input. A value that does not
    /// parse as a positive integer removes the entry; invalid quantity means
    /// removal, not an error.
    pub fn set_quantity(&mut self, item_id: u32, raw: &str) {
        match raw.trim().parse::<i64>() {
            Ok(quantity) if quantity > 0 => {
                if let Some(entry) = self
                    .entries
                    .iter_mut()
                    .find(|entry| entry.item.id == item_id)
                {
                    entry.quantity = quantity as u32;
                }
            }
            _ => self.remove_item(item_id),
        }
    }

    /// Drop an entry. Idempotent when the item is absent.
    pub fn remove_item(&mut self, item_id: u32) {
        self.entries.retain(|entry| entry.item.id != item_id);
    }

    /// Sum of price x quantity over the cart.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(CartEntry::line_total).sum()
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Submit the cart. Validation failures block before any network call;
    /// transport failures leave the cart and name untouched so the user can
    /// retry. Success clears both.
    pub async fn submit(&mut self, api: &OrdersApi) -> Result<Order, SubmitError> {
        if self.is_submitting {
            return Err(SubmitError::AlreadySubmitting);
        }
        if self.customer_name.trim().is_empty() || self.entries.is_empty() {
            return Err(SubmitError::Validation(
                "Please fill in your name and select at least one item",
            ));
        }

        let request = CreateOrderRequest {
            customer_name: self.customer_name.trim().to_string(),
            customer_email: self.customer_email.clone(),
            items: self
                .entries
                .iter()
                .map(|entry| OrderItem {
                    name: entry.item.name.clone(),
                    price: entry.item.price,
                    quantity: entry.quantity,
                })
                .collect(),
            total_amount: self.total(),
        };

        self.is_submitting = true;
        let result = api.create_order(&request).await;
        self.is_submitting = false;

        match result {
            Ok(order) => {
                self.entries.clear();
                self.customer_name.clear();
                self.customer_email = None;
                Ok(order)
            }
            Err(error) => {
                tracing::error!("failed to place order: {error}");
                Err(SubmitError::Api(error))
            }
        }
    }
}
