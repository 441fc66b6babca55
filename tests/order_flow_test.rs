//! REST-side integration tests: the orders API client and the composer's
//! submission rules, against a mock backend.

use httpmock::prelude::*;
use httpmock::Method::PATCH;
use pretty_assertions::assert_eq;
use serde_json::json;

use orderdesk::api::{ApiError, OrdersApi};
use orderdesk::composer::{OrderComposer, SubmitError};
use orderdesk::menu::MenuCatalog;
use orderdesk::order::OrderStatus;

fn order_json(id: &str, customer: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "customerName": customer,
        "items": [{"name": "Pizza Margherita", "price": 12.99, "quantity": 1}],
        "totalAmount": 12.99,
        "createdAt": "2026-08-07T12:00:00Z",
        "status": status
    })
}

#[tokio::test]
async fn list_orders_passes_customer_name_query() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/orders")
                .query_param("customerName", "Alice");
            then.status(200)
                .json_body(json!([order_json("o-1", "Alice", "placed")]));
        })
        .await;

    let api = OrdersApi::new(server.base_url());
    let orders = api.list_orders(Some("Alice")).await.unwrap();

    mock.assert_async().await;
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].customer_name, "Alice");
    assert_eq!(orders[0].status, OrderStatus::Placed);
}

#[tokio::test]
async fn list_orders_without_filter_hits_bare_endpoint() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/orders");
            then.status(200).json_body(json!([]));
        })
        .await;

    let api = OrdersApi::new(server.base_url());
    let orders = api.list_orders(None).await.unwrap();

    mock.assert_async().await;
    assert!(orders.is_empty());
}

#[tokio::test]
async fn non_success_response_maps_to_http_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/orders");
            then.status(500).body("boom");
        })
        .await;

    let api = OrdersApi::new(server.base_url());
    let error = api.list_orders(None).await.unwrap_err();

    match error {
        ApiError::Http { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected http error, got {other:?}"),
    }
}

#[tokio::test]
async fn update_status_patches_one_order() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(PATCH)
                .path("/api/orders/o-7")
                .json_body(json!({"status": "confirmed"}));
            then.status(200)
                .json_body(order_json("o-7", "Alice", "confirmed"));
        })
        .await;

    let api = OrdersApi::new(server.base_url());
    let updated = api.update_status("o-7", OrderStatus::Confirmed).await.unwrap();

    mock.assert_async().await;
    assert_eq!(updated.status, OrderStatus::Confirmed);
}

#[tokio::test]
async fn successful_submission_clears_the_composer() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/orders").json_body_partial(
                r#"{
                    "customerName": "Alice",
                    "items": [{"name": "Pizza Margherita", "price": 12.99, "quantity": 2}]
                }"#,
            );
            then.status(201)
                .json_body(order_json("o-9", "Alice", "placed"));
        })
        .await;

    let api = OrdersApi::new(server.base_url());
    let mut composer = OrderComposer::new();
    composer.set_customer_name("  Alice  ");
    composer.add_item(MenuCatalog::find(1).unwrap());
    composer.add_item(MenuCatalog::find(1).unwrap());

    let placed = composer.submit(&api).await.unwrap();

    mock.assert_async().await;
    assert_eq!(placed.id, "o-9");
    assert!(composer.entries().is_empty());
    assert_eq!(composer.customer_name(), "");
    assert!(!composer.is_submitting());
}

#[tokio::test]
async fn failed_submission_preserves_cart_and_name() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/orders");
            then.status(500).body("unavailable");
        })
        .await;

    let api = OrdersApi::new(server.base_url());
    let mut composer = OrderComposer::new();
    composer.set_customer_name("Alice");
    composer.add_item(MenuCatalog::find(1).unwrap());

    let error = composer.submit(&api).await.unwrap_err();

    assert!(matches!(error, SubmitError::Api(ApiError::Http { status: 500, .. })));
    assert_eq!(composer.entries().len(), 1);
    assert_eq!(composer.customer_name(), "Alice");
    assert!(!composer.is_submitting());
}

#[tokio::test]
async fn validation_failure_issues_no_request() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/orders");
            then.status(201)
                .json_body(order_json("o-1", "Alice", "placed"));
        })
        .await;

    let api = OrdersApi::new(server.base_url());
    let mut composer = OrderComposer::new();
    composer.add_item(MenuCatalog::find(1).unwrap());

    let error = composer.submit(&api).await.unwrap_err();

    assert!(matches!(error, SubmitError::Validation(_)));
    assert_eq!(mock.hits_async().await, 0);
    assert_eq!(composer.entries().len(), 1);
}
