//! Data sources
//!
//! The engine never fetches anything itself. Whatever feeds the dashboard
//! implements [`DataSource`] and hands over a fresh [`Snapshot`] on each refresh.

use thiserror::Error;

use crate::{
    alerts::Alert, expiry::ExpiryRecord, fixtures::FixtureError, forecasts::Forecast,
    products::Product, snapshot::Snapshot,
};

/// Errors raised while fetching inventory data.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Fixture files could not be loaded.
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    /// The backing service could not be reached or returned an error.
    #[error("data source unavailable: {0}")]
    Unavailable(String),
}

/// Supplier of inventory records.
pub trait DataSource {
    /// Fetch all products.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] if the products cannot be fetched.
    fn products(&self) -> Result<Vec<Product>, SourceError>;

    /// Fetch all expiry records.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] if the records cannot be fetched.
    fn expiry_records(&self) -> Result<Vec<ExpiryRecord>, SourceError>;

    /// Fetch all current alerts.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] if the alerts cannot be fetched.
    fn alerts(&self) -> Result<Vec<Alert>, SourceError>;

    /// Fetch all demand forecasts.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] if the forecasts cannot be fetched.
    fn forecasts(&self) -> Result<Vec<Forecast>, SourceError>;

    /// Fetch everything at once.
    ///
    /// # Errors
    ///
    /// Returns the first [`SourceError`] raised by any of the collections.
    fn snapshot(&self) -> Result<Snapshot, SourceError> {
        Ok(Snapshot {
            products: self.products()?,
            expiry: self.expiry_records()?,
            alerts: self.alerts()?,
            forecasts: self.forecasts()?,
        })
    }
}

impl DataSource for Snapshot {
    fn products(&self) -> Result<Vec<Product>, SourceError> {
        Ok(self.products.clone())
    }

    fn expiry_records(&self) -> Result<Vec<ExpiryRecord>, SourceError> {
        Ok(self.expiry.clone())
    }

    fn alerts(&self) -> Result<Vec<Alert>, SourceError> {
        Ok(self.alerts.clone())
    }

    fn forecasts(&self) -> Result<Vec<Forecast>, SourceError> {
        Ok(self.forecasts.clone())
    }

    fn snapshot(&self) -> Result<Snapshot, SourceError> {
        Ok(self.clone())
    }
}
