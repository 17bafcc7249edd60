//! CSV catalog parsing.
//!
//! The catalog is a spreadsheet published as CSV. The first row names the
//! columns; `id`, `title`, `description` and `price` are required and `image`
//! is optional. Column order does not matter and header names are matched
//! case-insensitively.
//!
//! Rows that cannot become a [`Product`] are skipped with a warning:
//! - blank `id`
//! - a `price` that [`Price::parse`] rejects
//! - an `id` already seen earlier in the document (the first row wins)

use std::collections::HashSet;

use almacency_core::{Price, PriceError, Product, ProductId};
use csv::{ByteRecord, ReaderBuilder, Trim};
use tracing::warn;

use super::CatalogError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Why a single row was left out of the catalog.
#[derive(Debug, thiserror::Error)]
enum RowError {
    #[error("blank id")]
    MissingId,
    #[error("invalid price: {0}")]
    Price(#[from] PriceError),
}

/// Positions of the catalog columns in the header row.
struct Columns {
    id: usize,
    title: usize,
    description: usize,
    price: usize,
    image: Option<usize>,
}

impl Columns {
    fn locate(headers: &ByteRecord) -> Result<Self, CatalogError> {
        let names: Vec<String> = headers
            .iter()
            .map(|h| String::from_utf8_lossy(h).trim().to_lowercase())
            .collect();
        let find = |name: &str| names.iter().position(|n| n == name);
        let require =
            |name: &'static str| find(name).ok_or(CatalogError::MissingColumn(name));

        Ok(Self {
            id: require("id")?,
            title: require("title")?,
            description: require("description")?,
            price: require("price")?,
            image: find("image"),
        })
    }

    fn product(&self, record: &ByteRecord) -> Result<Product, RowError> {
        let id = field(record, Some(self.id));
        if id.is_empty() {
            return Err(RowError::MissingId);
        }
        let price = Price::parse(&field(record, Some(self.price)))?;

        Ok(Product::new(
            ProductId::new(id),
            field(record, Some(self.title)),
            field(record, Some(self.description)),
            price,
        )
        .with_image(field(record, self.image)))
    }
}

/// Cell text at `index`, empty when the column or cell is absent.
fn field(record: &ByteRecord, index: Option<usize>) -> String {
    index
        .and_then(|i| record.get(i))
        .map(|bytes| String::from_utf8_lossy(bytes).trim().to_owned())
        .unwrap_or_default()
}

/// Parse a CSV catalog document into products, in document order.
///
/// Invalid UTF-8 is replaced rather than rejected, and a leading byte order
/// mark is ignored.
///
/// # Errors
///
/// Returns an error if the document is not valid CSV or a required column is
/// missing from the header row. No partial catalog is returned.
pub fn parse_catalog(body: &[u8]) -> Result<Vec<Product>, CatalogError> {
    let body = body.strip_prefix(UTF8_BOM).unwrap_or(body);
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(body);

    let columns = Columns::locate(reader.byte_headers()?)?;

    let mut seen = HashSet::new();
    let mut products = Vec::new();
    for record in reader.byte_records() {
        let record = record?;
        let line = record.position().map_or(0, csv::Position::line);

        match columns.product(&record) {
            Ok(product) => {
                if seen.insert(product.id.clone()) {
                    products.push(product);
                } else {
                    warn!(line, id = %product.id, "Skipping duplicate catalog id");
                }
            }
            Err(reason) => warn!(line, %reason, "Skipping catalog row"),
        }
    }

    Ok(products)
}
