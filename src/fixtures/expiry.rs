//! Expiry Fixtures

use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    dates::parse_date,
    expiry::ExpiryRecord,
    fixtures::{Fixture, FixtureError},
};

/// Wrapper for expiry records in YAML
#[derive(Debug, Deserialize)]
pub struct ExpiryFixture {
    /// Expiry records
    pub expiry: Vec<ExpiryRecord>,
}

impl Fixture {
    /// Load expiry records from a YAML fixture file
    ///
    /// Records with unparseable dates are kept; they show as "Invalid date" and
    /// are left out of day-based figures.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_expiry(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: ExpiryFixture = self.read("expiry", name)?;

        for record in &fixture.expiry {
            if let Err(err) = parse_date(&record.expiry_date) {
                warn!(record = record.id, %err, "expiry record has an unparseable date");
            }
        }

        debug!(count = fixture.expiry.len(), "loaded expiry records");

        self.snapshot.expiry.extend(fixture.expiry);

        Ok(self)
    }
}
