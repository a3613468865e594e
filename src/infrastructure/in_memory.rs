use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::ProductCatalog;
use crate::domain::product::Product;
use crate::error::Result;

/// A thread-safe in-memory product catalog.
///
/// Every product is validated on the way in, so consumers of the
/// [`ProductCatalog`] port can rely on the catalog invariant holding.
#[derive(Default, Clone)]
pub struct InMemoryCatalog {
    products: Arc<RwLock<HashMap<String, Product>>>,
}

impl InMemoryCatalog {
    /// Creates a new, empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from already-loaded products, validating each.
    pub fn with_products(products: Vec<Product>) -> Result<Self> {
        let mut map = HashMap::with_capacity(products.len());
        for product in products {
            product.validate()?;
            map.insert(product.id.clone(), product);
        }
        Ok(Self {
            products: Arc::new(RwLock::new(map)),
        })
    }

    pub async fn insert(&self, product: Product) -> Result<()> {
        product.validate()?;
        let mut products = self.products.write().await;
        products.insert(product.id.clone(), product);
        Ok(())
    }
}

#[async_trait]
impl ProductCatalog for InMemoryCatalog {
    async fn product(&self, id: &str) -> Result<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::PricingMode;
    use rust_decimal_macros::dec;

    fn coffee() -> Product {
        Product {
            id: "coffee".to_string(),
            name: "Coffee".to_string(),
            description: None,
            pricing_mode: PricingMode::Fixed,
            price: Some(dec!(1500.50)),
            min_price: None,
            suggested_price: None,
            requires_amount: false,
            currency_code: "ARS".to_string(),
        }
    }

    #[tokio::test]
    async fn test_lookup_by_id() {
        let catalog = InMemoryCatalog::with_products(vec![coffee()]).unwrap();

        let found = catalog.product("coffee").await.unwrap().unwrap();
        assert_eq!(found.name, "Coffee");

        assert!(catalog.product("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_invalid_product_is_rejected_at_load() {
        let mut broken = coffee();
        broken.price = None;
        assert!(InMemoryCatalog::with_products(vec![broken.clone()]).is_err());

        let catalog = InMemoryCatalog::new();
        assert!(catalog.insert(broken).await.is_err());
    }
}
