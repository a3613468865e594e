use std::io::Read;

use crate::domain::product::Product;
use crate::error::Result;

/// Reads a product catalog from a JSON source.
///
/// The file is a JSON array of product objects in the catalog's
/// `camelCase` shape. Every product is validated before the catalog is
/// handed out, so a malformed entry fails the whole load instead of
/// surfacing mid-checkout.
pub struct CatalogReader<R: Read> {
    source: R,
}

impl<R: Read> CatalogReader<R> {
    /// Creates a new `CatalogReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        Self { source }
    }

    pub fn products(self) -> Result<Vec<Product>> {
        let products: Vec<Product> = serde_json::from_reader(self.source)?;
        for product in &products {
            product.validate()?;
        }
        Ok(products)
    }
}
