//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Catalog grid
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (catalog reachable)
//!
//! # Cart
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add one unit (form: product_id), redirects to /
//! POST /cart/remove            - Remove a line (form: index), redirects to /cart
//! GET  /cart/count             - Distinct item count (plain text)
//!
//! # Checkout
//! GET  /checkout               - Redirect to the WhatsApp order link
//! ```

pub mod cart;
pub mod health;
pub mod home;

use axum::{
    Router,
    extract::Request,
    middleware::from_fn,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::middleware::{create_session_layer, request_id_middleware};
use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create all page routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout redirect
        .route("/checkout", get(cart::checkout))
}

/// Build the complete application with health checks and middleware.
///
/// Error-tracking layers are added by the binary on top of this.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(routes())
        .layer(session_layer)
        .layer(from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .with_state(state)
}

/// Span for one HTTP request; `request_id` is filled in by the middleware.
fn request_span(request: &Request) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = tracing::field::Empty,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{StatusCode, header};
    use tower::ServiceExt;
    use url::Url;

    use super::*;
    use crate::config::StorefrontConfig;
    use crate::middleware::request_id::REQUEST_ID_HEADER;

    /// App whose catalog feed refuses connections.
    fn offline_app() -> Router {
        let url = Url::parse("http://127.0.0.1:9/catalog.csv").unwrap();
        app(AppState::new(StorefrontConfig::for_catalog(url).unwrap()))
    }

    fn get(uri: &str) -> axum::http::Request<Body> {
        axum::http::Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_ok() {
        let response = offline_app().oneshot(get("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"ok");
    }

    #[tokio::test]
    async fn test_readiness_unavailable_without_catalog() {
        let response = offline_app().oneshot(get("/health/ready")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_home_is_bad_gateway_without_catalog() {
        let response = offline_app().oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_empty_cart_count_is_zero() {
        let response = offline_app().oneshot(get("/cart/count")).await.unwrap();

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"0");
    }

    #[tokio::test]
    async fn test_checkout_with_empty_cart_goes_home() {
        let response = offline_app().oneshot(get("/checkout")).await.unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
    }

    #[tokio::test]
    async fn test_remove_out_of_range_is_noop() {
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/cart/remove")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("index=7"))
            .unwrap();

        let response = offline_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/cart");
    }

    #[tokio::test]
    async fn test_remove_malformed_index_is_noop() {
        for body in ["index=-1", "index=x", "index=", ""] {
            let request = axum::http::Request::builder()
                .method("POST")
                .uri("/cart/remove")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap();

            let response = offline_app().oneshot(request).await.unwrap();

            assert_eq!(response.status(), StatusCode::SEE_OTHER, "{body:?}");
            assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/cart");
        }
    }

    #[tokio::test]
    async fn test_request_id_is_generated_and_echoed() {
        let response = offline_app().oneshot(get("/health")).await.unwrap();
        let generated = response.headers().get(REQUEST_ID_HEADER).unwrap();
        assert_eq!(generated.len(), 36);

        let request = axum::http::Request::builder()
            .uri("/health")
            .header(REQUEST_ID_HEADER, "edge-1234")
            .body(Body::empty())
            .unwrap();
        let response = offline_app().oneshot(request).await.unwrap();
        assert_eq!(
            response.headers().get(REQUEST_ID_HEADER).unwrap(),
            "edge-1234"
        );
    }
}
