//! Typed client for the backend orders REST API.
//!
//! Endpoints consumed:
//! - `GET /api/orders` (optional `customerName` query parameter)
//! - `POST /api/orders`
//! - `PATCH /api/orders/{id}`
//!
//! Non-2xx responses are failures. No retries; a failed call is reported to
//! the caller and the user decides what to do next.

use serde::Serialize;

use crate::order::{Order, OrderItem, OrderStatus};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("request timeout: {0}")]
    Timeout(String),
    #[error("http {status}: {message}")]
    Http { status: u16, message: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            return Self::Timeout(value.to_string());
        }
        Self::Request(value.to_string())
    }
}

/// Body for `POST /api/orders`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub customer_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
}

/// Body for `PATCH /api/orders/{id}`. Status only; everything else is
/// backend-owned.
#[derive(Debug, Clone, Serialize)]
struct StatusPatch {
    status: OrderStatus,
}

pub struct OrdersApi {
    base_url: String,
    client: reqwest::Client,
}

impl OrdersApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn orders_endpoint(&self) -> String {
        format!("{}/api/orders", self.base_url)
    }

    /// Fetch orders, optionally narrowed by customer name. Callers that care
    /// about ownership re-filter client-side regardless.
    pub async fn list_orders(&self, customer_name: Option<&str>) -> Result<Vec<Order>, ApiError> {
        let mut request = self.client.get(self.orders_endpoint());
        if let Some(name) = customer_name {
            request = request.query(&[("customerName", name)]);
        }
        let response = request.send().await?;
        Self::decode(response).await
    }

    /// Place a new order.
    pub async fn create_order(&self, order: &CreateOrderRequest) -> Result<Order, ApiError> {
        let response = self
            .client
            .post(self.orders_endpoint())
            .json(order)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Change one order's status. The caller must not assume the change is
    /// visible until the backend confirms it over the push channel.
    pub async fn update_status(&self, id: &str, status: OrderStatus) -> Result<Order, ApiError> {
        let endpoint = format!("{}/{id}", self.orders_endpoint());
        let response = self
            .client
            .patch(&endpoint)
            .json(&StatusPatch { status })
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!("orders api returned http {}: {}", status, message);
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|error| ApiError::InvalidResponse(error.to_string()))
    }
}
