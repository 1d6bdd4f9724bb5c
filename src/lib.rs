//! Shelfwatch
//!
//! Shelfwatch turns raw inventory records (products, scanned expiry dates, alerts and demand
//! forecasts) into the figures and lists an inventory dashboard shows: which stock has expired,
//! which is about to, which alerts are urgent and how forecast demand is spread.

pub mod alerts;
pub mod dates;
pub mod expiry;
pub mod fixtures;
pub mod forecasts;
pub mod prelude;
pub mod products;
pub mod report;
pub mod snapshot;
pub mod source;
