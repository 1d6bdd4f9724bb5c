//! Fixtures
//!
//! YAML-backed [`DataSource`]. A fixture set called `name` is laid out as:
//!
//! ```text
//! <base>/products/<name>.yml
//! <base>/expiry/<name>.yml
//! <base>/alerts/<name>.yml
//! <base>/forecasts/<name>.yml
//! ```

use std::{fs, path::PathBuf};

use rustc_hash::FxHashSet;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    alerts::Alert,
    expiry::ExpiryRecord,
    forecasts::Forecast,
    products::{Product, ProductError, ProductId},
    snapshot::Snapshot,
    source::{DataSource, SourceError},
};

pub mod alerts;
pub mod expiry;
pub mod forecasts;
pub mod products;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A product failed validation
    #[error("Invalid product {id}: {source}")]
    InvalidProduct {
        /// Id of the offending product
        id: ProductId,

        /// Validation failure
        source: ProductError,
    },

    /// Two products share an id
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(ProductId),

    /// A forecast value is negative or not a number
    #[error("Invalid forecast for product {product_id}: {value}")]
    InvalidForecast {
        /// Product the forecast is for
        product_id: ProductId,

        /// Offending value
        value: f64,
    },
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Records loaded so far
    snapshot: Snapshot,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            snapshot: Snapshot::default(),
        }
    }

    /// Load a complete fixture set (products, expiry, alerts and forecasts with the same name)
    /// from the default base path.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::from_set_in("./fixtures", name)
    }

    /// Load a complete fixture set from `base_path`.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set_in(base_path: impl Into<PathBuf>, name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::with_base_path(base_path);

        fixture
            .load_products(name)?
            .load_expiry(name)?
            .load_alerts(name)?
            .load_forecasts(name)?;

        fixture.warn_unresolved_products();

        info!(
            set = name,
            products = fixture.snapshot.products.len(),
            expiry = fixture.snapshot.expiry.len(),
            alerts = fixture.snapshot.alerts.len(),
            forecasts = fixture.snapshot.forecasts.len(),
            "loaded fixture set"
        );

        Ok(fixture)
    }

    /// Records loaded so far
    pub fn records(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Consume the fixture, keeping only its records
    pub fn into_snapshot(self) -> Snapshot {
        self.snapshot
    }

    fn read<T: DeserializeOwned>(&self, kind: &str, name: &str) -> Result<T, FixtureError> {
        let file_path = self.base_path.join(kind).join(format!("{name}.yml"));

        debug!(path = %file_path.display(), "reading fixture file");

        let contents = fs::read_to_string(&file_path)?;

        Ok(serde_norway::from_str(&contents)?)
    }

    /// Log records that reference products missing from the fixture. They are
    /// kept; the presentation layer shows a placeholder label for them.
    fn warn_unresolved_products(&self) {
        let known: FxHashSet<ProductId> = self.snapshot.products.iter().map(|p| p.id).collect();

        let referenced = self
            .snapshot
            .expiry
            .iter()
            .map(|record| record.product_id)
            .chain(self.snapshot.alerts.iter().map(Alert::product_id))
            .chain(self.snapshot.forecasts.iter().map(|f| f.product_id));

        let unresolved: FxHashSet<ProductId> =
            referenced.filter(|id| !known.contains(id)).collect();

        if !unresolved.is_empty() {
            let mut ids: Vec<_> = unresolved.into_iter().collect();
            ids.sort_unstable();

            warn!(?ids, "records reference unknown products");
        }
    }
}

impl DataSource for Fixture {
    fn products(&self) -> Result<Vec<Product>, SourceError> {
        Ok(self.snapshot.products.clone())
    }

    fn expiry_records(&self) -> Result<Vec<ExpiryRecord>, SourceError> {
        Ok(self.snapshot.expiry.clone())
    }

    fn alerts(&self) -> Result<Vec<Alert>, SourceError> {
        Ok(self.snapshot.alerts.clone())
    }

    fn forecasts(&self) -> Result<Vec<Forecast>, SourceError> {
        Ok(self.snapshot.forecasts.clone())
    }
}


#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::{test_support::write_fixture, *};

    fn write_set(base: &std::path::Path) -> std::io::Result<()> {
        write_fixture(
            base,
            "products",
            "shop",
            "products:\n  - id: 1\n    name: Milk\n    barcode: \"5000112637922\"\n",
        )?;
        write_fixture(
            base,
            "expiry",
            "shop",
            "expiry:\n  - id: 10\n    product_id: 1\n    expiry_date: \"2024-06-12\"\n",
        )?;
        write_fixture(
            base,
            "alerts",
            "shop",
            "alerts:\n  - type: low_stock\n    product_id: 2\n    current_stock: 0\n",
        )?;
        write_fixture(
            base,
            "forecasts",
            "shop",
            "forecasts:\n  - product_id: 1\n    forecast: 12.5\n",
        )
    }

    #[test]
    fn from_set_in_loads_every_kind() -> TestResult {
        let dir = tempfile::tempdir()?;
        write_set(dir.path())?;

        let fixture = Fixture::from_set_in(dir.path(), "shop")?;
        let snapshot = fixture.records();

        assert_eq!(snapshot.products.len(), 1);
        assert_eq!(snapshot.expiry.len(), 1);
        assert_eq!(snapshot.alerts.len(), 1);
        assert_eq!(snapshot.forecasts.len(), 1);

        Ok(())
    }

    #[test]
    fn from_set_in_errors_on_missing_file() -> TestResult {
        let dir = tempfile::tempdir()?;
        write_set(dir.path())?;

        let result = Fixture::from_set_in(dir.path(), "other");

        assert!(matches!(result, Err(FixtureError::Io(_))));

        Ok(())
    }

    #[test]
    fn from_set_in_errors_on_malformed_yaml() -> TestResult {
        let dir = tempfile::tempdir()?;
        write_fixture(dir.path(), "products", "broken", "products: [ {id: }")?;

        let result = Fixture::from_set_in(dir.path(), "broken");

        assert!(matches!(result, Err(FixtureError::Yaml(_))));

        Ok(())
    }
}
