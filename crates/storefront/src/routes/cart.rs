//! Cart route handlers.
//!
//! The cart lives in the visitor's session (see [`crate::cart_store`]). Every
//! mutation is a plain form POST answered with a redirect, so the page works
//! without JavaScript.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use almacency_core::{Cart, CartItem, ProductId};

use crate::cart_store::{load_cart, save_cart};
use crate::config::StoreBranding;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    /// Position in the cart, used by the remove form.
    pub index: usize,
    pub id: String,
    pub title: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    pub image: Option<String>,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: usize,
    pub total_quantity: u32,
}

impl CartItemView {
    fn new(index: usize, item: &CartItem) -> Self {
        Self {
            index,
            id: item.id.to_string(),
            title: item.title.clone(),
            quantity: item.quantity,
            price: item.price.to_string(),
            line_price: item.line_total().to_string(),
            image: item.image.clone(),
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart
                .items()
                .iter()
                .enumerate()
                .map(|(index, item)| CartItemView::new(index, item))
                .collect(),
            total: cart.total().to_string(),
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
}

/// Remove from cart form data.
///
/// `index` is kept as text; a malformed value names no position.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    #[serde(default)]
    pub index: String,
}

impl RemoveFromCartForm {
    /// The cart position named by the form, if it is a valid position number.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        self.index.trim().parse().ok()
    }
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub store: StoreBranding,
    pub cart: CartView,
}

/// Display cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> CartShowTemplate {
    let cart = load_cart(&session).await;

    CartShowTemplate {
        store: state.config().store.clone(),
        cart: CartView::from(&cart),
    }
}

/// Add one unit of a catalog product to the cart.
///
/// Unknown product ids are rejected with 404 so a stale page cannot put
/// products that no longer exist into the cart.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let id = ProductId::new(form.product_id);
    let product = state
        .catalog()
        .find(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product not found: {id}")))?;

    let mut cart = load_cart(&session).await;
    cart.add(&product);
    save_cart(&session, &cart).await?;

    add_breadcrumb("cart", "Added product", Some(&[("product_id", id.as_str())]));
    tracing::info!(product_id = %id, item_count = cart.item_count(), "Added to cart");

    Ok(Redirect::to("/"))
}

/// Remove the cart line at a position.
///
/// An index past the end of the cart, or one that is not a number, changes
/// nothing.
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<RemoveFromCartForm>) -> Result<Redirect> {
    let mut cart = load_cart(&session).await;

    match form.position().and_then(|index| cart.remove_at(index)) {
        Some(item) => {
            save_cart(&session, &cart).await?;
            add_breadcrumb("cart", "Removed product", Some(&[("product_id", item.id.as_str())]));
            tracing::info!(product_id = %item.id, item_count = cart.item_count(), "Removed from cart");
        }
        None => tracing::debug!(index = %form.index, "Ignoring removal of missing cart line"),
    }

    Ok(Redirect::to("/cart"))
}

/// Number of distinct products in the cart, as plain text.
#[instrument(skip(session))]
pub async fn count(session: Session) -> String {
    load_cart(&session).await.item_count().to_string()
}

/// Redirect to the messaging checkout link.
///
/// An empty cart has nothing to send, so the visitor goes back to the shop.
#[instrument(skip(state, session))]
pub async fn checkout(State(state): State<AppState>, session: Session) -> Response {
    let cart = load_cart(&session).await;
    if cart.is_empty() {
        return Redirect::to("/").into_response();
    }

    add_breadcrumb("checkout", "Opened checkout link", None);
    tracing::info!(
        item_count = cart.item_count(),
        total = %cart.total(),
        "Checkout handoff"
    );

    Redirect::to(&state.config().checkout.url_for(&cart)).into_response()
}
