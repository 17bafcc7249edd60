//! Integration tests for Almacency.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p almacency-integration-tests
//! ```
//!
//! No external services are needed: each test serves its own catalog CSV
//! from a local axum server and points the storefront at it.
//!
//! # Test Categories
//!
//! - `catalog_client` - Fetching, caching and failure of the catalog feed
//! - `storefront_cart_flow` - Browsing, cart mutations and checkout handoff

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use almacency_storefront::config::StorefrontConfig;
use almacency_storefront::routes;
use almacency_storefront::state::AppState;
use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tower::ServiceExt;
use url::Url;

/// Catalog used by most tests.
pub const SAMPLE_CATALOG: &str = "\
id,title,description,price,image
a,Bread,Pan de campo,100,https://img.example/bread.jpg
b,Leche,Entera 1L,1250.50,
c,Yerba,\"Suave, 1kg\",consultar,
";

/// A local HTTP server publishing a catalog CSV.
pub struct CatalogServer {
    /// URL of the CSV document
    pub url: Url,
    hits: Arc<AtomicUsize>,
}

#[derive(Clone)]
struct FeedState {
    status: StatusCode,
    body: &'static str,
    hits: Arc<AtomicUsize>,
}

impl CatalogServer {
    /// Serve `body` with 200 OK.
    pub async fn start(body: &'static str) -> Self {
        Self::start_with_status(StatusCode::OK, body).await
    }

    /// Serve `body` with the given status.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn start_with_status(status: StatusCode, body: &'static str) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let feed = FeedState {
            status,
            body,
            hits: Arc::clone(&hits),
        };
        let app = Router::new()
            .route("/catalog.csv", get(serve_feed))
            .with_state(feed);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind catalog server");
        let addr = listener.local_addr().expect("catalog server address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let url = Url::parse(&format!("http://{addr}/catalog.csv")).expect("catalog url");
        Self { url, hits }
    }

    /// Number of times the CSV has been requested.
    #[must_use]
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Storefront configuration reading from this server.
    ///
    /// # Panics
    ///
    /// Panics if the default configuration is invalid.
    #[must_use]
    pub fn config(&self) -> StorefrontConfig {
        StorefrontConfig::for_catalog(self.url.clone()).expect("default config")
    }

    /// Storefront application reading from this server.
    #[must_use]
    pub fn app(&self) -> Router {
        routes::app(AppState::new(self.config()))
    }
}

async fn serve_feed(State(feed): State<FeedState>) -> impl IntoResponse {
    feed.hits.fetch_add(1, Ordering::SeqCst);
    (
        feed.status,
        [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
        feed.body,
    )
}

/// A browser-like client that keeps the session cookie between requests.
pub struct Visitor {
    app: Router,
    cookie: Option<String>,
}

impl Visitor {
    #[must_use]
    pub const fn new(app: Router) -> Self {
        Self { app, cookie: None }
    }

    /// Send a GET request.
    pub async fn get(&mut self, uri: &str) -> Response {
        let request = self.request("GET", uri).body(Body::empty()).expect("request");
        self.send(request).await
    }

    /// Send a url-encoded form POST.
    pub async fn post_form(&mut self, uri: &str, form: &str) -> Response {
        let request = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_owned()))
            .expect("request");
        self.send(request).await
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> Response {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
        {
            self.cookie = set_cookie.split(';').next().map(str::to_owned);
        }

        response
    }
}

/// Read a response body as UTF-8 text.
///
/// # Panics
///
/// Panics if the body cannot be read or is not UTF-8.
pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

/// Value of the `Location` header.
///
/// # Panics
///
/// Panics if the response has no `Location` header.
#[must_use]
pub fn location(response: &Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("location header")
        .to_owned()
}
