//! Product Fixtures

use rustc_hash::FxHashSet;
use serde::Deserialize;
use tracing::debug;

use crate::{
    fixtures::{Fixture, FixtureError},
    products::{Product, ProductId},
};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Product records
    pub products: Vec<Product>,
}

impl Fixture {
    /// Load products from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if a product fails
    /// validation, or if a product id is already loaded.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: ProductsFixture = self.read("products", name)?;

        let mut seen: FxHashSet<ProductId> =
            self.snapshot.products.iter().map(|p| p.id).collect();

        for product in &fixture.products {
            product
                .validate()
                .map_err(|source| FixtureError::InvalidProduct {
                    id: product.id,
                    source,
                })?;

            if !seen.insert(product.id) {
                return Err(FixtureError::DuplicateProduct(product.id));
            }
        }

        debug!(count = fixture.products.len(), "loaded products");

        self.snapshot.products.extend(fixture.products);

        Ok(self)
    }
}
