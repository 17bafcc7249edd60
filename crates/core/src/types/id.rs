//! Product identifiers.
//!
//! Catalog ids come from a spreadsheet column, so they are free-form strings
//! rather than database integers. The newtype keeps them from being mixed up
//! with titles or other text fields.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a catalog entry.
///
/// Two cart lines refer to the same product exactly when their ids are equal.
///
/// # Example
///
/// ```rust
/// use almacency_core::ProductId;
///
/// let id = ProductId::new("yerba-1kg");
/// assert_eq!(id.as_str(), "yerba-1kg");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new ID from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the id and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
