//! Home page route handler.
//!
//! The home page is the whole shop: the catalog grid plus a sticky link to
//! the cart once something has been added.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tower_sessions::Session;
use tracing::instrument;

use almacency_core::{Cart, Product};

use crate::cart_store::load_cart;
use crate::config::StoreBranding;
use crate::error::Result;
use crate::state::AppState;

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: String,
    pub image: Option<String>,
    /// Units of this product already in the visitor's cart.
    pub in_cart: u32,
}

impl ProductCardView {
    fn new(product: &Product, cart: &Cart) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            image: product.image.clone(),
            in_cart: cart.get(&product.id).map_or(0, |item| item.quantity),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub store: StoreBranding,
    pub products: Vec<ProductCardView>,
    /// Distinct products in the cart, shown as "Ver carrito (N producto)".
    pub cart_count: usize,
}

/// Display the catalog grid.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> Result<HomeTemplate> {
    let products = state.catalog().list().await?;
    let cart = load_cart(&session).await;

    Ok(HomeTemplate {
        store: state.config().store.clone(),
        products: products
            .iter()
            .map(|product| ProductCardView::new(product, &cart))
            .collect(),
        cart_count: cart.item_count(),
    })
}
