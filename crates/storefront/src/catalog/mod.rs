//! Catalog fetcher for the published spreadsheet.
//!
//! # Architecture
//!
//! - One `reqwest` GET of the CSV document per refresh
//! - Parsing with the `csv` crate (see [`parse_catalog`])
//! - In-memory caching via `moka`, TTL set by `CATALOG_REVALIDATE_SECS`
//!
//! A failed fetch is never cached and never yields a partial catalog; the
//! caller decides what to render instead.

mod parse;

pub use parse::parse_catalog;

use std::sync::Arc;

use almacency_core::{Product, ProductId};
use moka::future::Cache;
use thiserror::Error;
use tracing::{debug, info, instrument};
use url::Url;

use crate::config::CatalogConfig;

/// Errors that can occur when loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The feed answered with a non-success status.
    #[error("Catalog feed returned status {0}")]
    Status(u16),

    /// The document is not valid CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The header row lacks a required column.
    #[error("Catalog is missing the {0:?} column")]
    MissingColumn(&'static str),
}

/// Client for the catalog CSV feed.
///
/// Cheap to clone; clones share the HTTP connection pool and the cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    csv_url: Url,
    cache: Cache<(), Arc<[Product]>>,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(config.revalidate)
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                csv_url: config.csv_url.clone(),
                cache,
            }),
        }
    }

    /// List every product in the catalog, in document order.
    ///
    /// Serves the cached copy while it is fresh.
    ///
    /// # Errors
    ///
    /// Returns an error if the feed cannot be fetched or parsed.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Arc<[Product]>, CatalogError> {
        if let Some(products) = self.inner.cache.get(&()).await {
            debug!("Cache hit for catalog");
            return Ok(products);
        }

        let products: Arc<[Product]> = self.fetch().await?.into();

        // Cache the result
        self.inner.cache.insert((), Arc::clone(&products)).await;

        Ok(products)
    }

    /// Find a product by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    pub async fn find(&self, id: &ProductId) -> Result<Option<Product>, CatalogError> {
        let products = self.list().await?;
        Ok(products.iter().find(|p| &p.id == id).cloned())
    }

    /// Drop the cached catalog so the next call refetches.
    pub async fn invalidate(&self) {
        self.inner.cache.invalidate(&()).await;
    }

    #[instrument(skip(self), fields(url = %self.inner.csv_url))]
    async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
        let response = self
            .inner
            .client
            .get(self.inner.csv_url.clone())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let products = parse_catalog(&body)?;
        info!(count = products.len(), "Fetched catalog");

        Ok(products)
    }
}
