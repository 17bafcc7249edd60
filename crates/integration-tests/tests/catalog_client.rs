//! Integration tests for the catalog feed client.
//!
//! Each test serves a CSV document from a local server and reads it through
//! `CatalogClient`, the same way the storefront does.

#![allow(clippy::unwrap_used)]

use almacency_core::{Price, ProductId};
use almacency_integration_tests::{CatalogServer, SAMPLE_CATALOG};
use almacency_storefront::catalog::{CatalogClient, CatalogError};
use axum::http::StatusCode;

// ============================================================================
// Fetching
// ============================================================================

#[tokio::test]
async fn test_list_returns_products_in_document_order() {
    let server = CatalogServer::start(SAMPLE_CATALOG).await;
    let client = CatalogClient::new(&server.config().catalog);

    let products = client.list().await.unwrap();

    let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["a", "b"]);
    assert_eq!(products[0].title, "Bread");
    assert_eq!(products[0].price, Price::parse("100").unwrap());
    assert_eq!(
        products[0].image.as_deref(),
        Some("https://img.example/bread.jpg")
    );
    assert_eq!(products[1].price.to_string(), "$ 1.250,50");
    assert_eq!(products[1].image, None);
}

#[tokio::test]
async fn test_row_with_invalid_price_is_dropped() {
    let server = CatalogServer::start(SAMPLE_CATALOG).await;
    let client = CatalogClient::new(&server.config().catalog);

    let yerba = client.find(&ProductId::new("c")).await.unwrap();
    assert!(yerba.is_none());
}

#[tokio::test]
async fn test_find_known_product() {
    let server = CatalogServer::start(SAMPLE_CATALOG).await;
    let client = CatalogClient::new(&server.config().catalog);

    let leche = client.find(&ProductId::new("b")).await.unwrap().unwrap();
    assert_eq!(leche.description, "Entera 1L");
}

// ============================================================================
// Caching
// ============================================================================

#[tokio::test]
async fn test_catalog_is_cached_between_calls() {
    let server = CatalogServer::start(SAMPLE_CATALOG).await;
    let client = CatalogClient::new(&server.config().catalog);

    client.list().await.unwrap();
    client.list().await.unwrap();
    client.find(&ProductId::new("a")).await.unwrap();

    assert_eq!(server.hits(), 1);
}

#[tokio::test]
async fn test_invalidate_forces_refetch() {
    let server = CatalogServer::start(SAMPLE_CATALOG).await;
    let client = CatalogClient::new(&server.config().catalog);

    client.list().await.unwrap();
    client.invalidate().await;
    client.list().await.unwrap();

    assert_eq!(server.hits(), 2);
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_error_status_is_reported() {
    let server =
        CatalogServer::start_with_status(StatusCode::INTERNAL_SERVER_ERROR, "boom").await;
    let client = CatalogClient::new(&server.config().catalog);

    let err = client.list().await.unwrap_err();
    assert!(matches!(err, CatalogError::Status(500)));
}

#[tokio::test]
async fn test_failures_are_not_cached() {
    let server = CatalogServer::start_with_status(StatusCode::NOT_FOUND, "").await;
    let client = CatalogClient::new(&server.config().catalog);

    assert!(client.list().await.is_err());
    assert!(client.list().await.is_err());

    assert_eq!(server.hits(), 2);
}

#[tokio::test]
async fn test_missing_required_column_is_an_error() {
    let server = CatalogServer::start("id,title,price\na,Bread,100\n").await;
    let client = CatalogClient::new(&server.config().catalog);

    let err = client.list().await.unwrap_err();
    assert!(matches!(err, CatalogError::MissingColumn("description")));
}
