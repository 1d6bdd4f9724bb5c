//! Forecast Fixtures

use serde::Deserialize;
use tracing::debug;

use crate::{
    fixtures::{Fixture, FixtureError},
    forecasts::Forecast,
};

/// Wrapper for forecasts in YAML
#[derive(Debug, Deserialize)]
pub struct ForecastsFixture {
    /// Forecast records
    pub forecasts: Vec<Forecast>,
}

impl Fixture {
    /// Load forecasts from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a forecast
    /// value is negative or not finite.
    pub fn load_forecasts(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: ForecastsFixture = self.read("forecasts", name)?;

        if let Some(invalid) = fixture
            .forecasts
            .iter()
            .find(|forecast| !forecast.forecast.is_finite() || forecast.forecast < 0.0)
        {
            return Err(FixtureError::InvalidForecast {
                product_id: invalid.product_id,
                value: invalid.forecast,
            });
        }

        debug!(count = fixture.forecasts.len(), "loaded forecasts");

        self.snapshot.forecasts.extend(fixture.forecasts);

        Ok(self)
    }
}
