//! Alert Fixtures

use serde::Deserialize;
use tracing::debug;

use crate::{
    alerts::Alert,
    fixtures::{Fixture, FixtureError},
};

/// Wrapper for alerts in YAML
#[derive(Debug, Deserialize)]
pub struct AlertsFixture {
    /// Alerts, tagged by `type`
    pub alerts: Vec<Alert>,
}

impl Fixture {
    /// Load alerts from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, including alerts
    /// with an unknown `type`.
    pub fn load_alerts(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: AlertsFixture = self.read("alerts", name)?;

        debug!(count = fixture.alerts.len(), "loaded alerts");

        self.snapshot.alerts.extend(fixture.alerts);

        Ok(self)
    }
}
