//! Catalog product type.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// One entry of the catalog.
///
/// Products are built once when the catalog is loaded and never mutated
/// afterwards. The cart copies the fields it needs instead of holding
/// references into the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub price: Price,
    /// Image URI, `None` when the catalog cell is blank.
    pub image: Option<String>,
}

impl Product {
    /// Create a product without an image.
    #[must_use]
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        description: impl Into<String>,
        price: Price,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            price,
            image: None,
        }
    }

    /// Set the image URI. Blank values are treated as no image.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        let image = image.into();
        self.image = if image.trim().is_empty() {
            None
        } else {
            Some(image)
        };
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_with_image_blank_is_none() {
        let product = Product::new("a", "Pan", "", Price::ZERO).with_image("  ");
        assert!(product.image.is_none());
    }

    #[test]
    fn test_with_image_keeps_uri() {
        let product =
            Product::new("a", "Pan", "", Price::ZERO).with_image("https://img.example/pan.jpg");
        assert_eq!(product.image.as_deref(), Some("https://img.example/pan.jpg"));
    }
}
