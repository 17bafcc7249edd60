//! Session middleware configuration.
//!
//! Sets up in-memory sessions using tower-sessions with a moka-backed store.
//! The cookie ends with the browser session, which is as long as a visitor's
//! cart is meant to live. Abandoned records are evicted by the store once
//! they expire or once `SESSION_MAX_ENTRIES` sessions are held.

use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_moka_store::MokaStore;

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "alm_session";

/// Create the session layer with a bounded in-memory store.
///
/// # Arguments
///
/// * `config` - Storefront configuration (store capacity and `Secure` cookie flag)
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MokaStore> {
    let store = MokaStore::new(Some(config.session_max_entries));

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnSessionEnd)
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
