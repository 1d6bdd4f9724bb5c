//! Forecasts

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::products::{ProductCatalog, ProductId};

/// Demand forecast for a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Product the forecast is for
    pub product_id: ProductId,

    /// Estimated demand
    pub forecast: f64,
}

/// Scalar aggregates over a set of forecasts.
///
/// All fields are zero for an empty set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ForecastSummary {
    /// Number of forecasts
    pub count: usize,

    /// Arithmetic mean
    pub average: f64,

    /// Highest forecast
    pub max: f64,

    /// Lowest forecast
    pub min: f64,
}

/// Count, mean, maximum and minimum of the forecast values.
pub fn aggregate(forecasts: &[Forecast]) -> ForecastSummary {
    let Some(first) = forecasts.first() else {
        return ForecastSummary::default();
    };

    let (total, max, min) = forecasts.iter().fold(
        (0.0, first.forecast, first.forecast),
        |(total, max, min), forecast| {
            (
                total + forecast.forecast,
                max.max(forecast.forecast),
                min.min(forecast.forecast),
            )
        },
    );

    #[expect(
        clippy::cast_precision_loss,
        reason = "forecast counts are far below 2^52"
    )]
    let count = forecasts.len() as f64;

    ForecastSummary {
        count: forecasts.len(),
        average: total / count,
        max,
        min,
    }
}

/// Ordering applied by [`rank_forecasts`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ForecastOrder {
    /// Highest demand first
    #[default]
    Forecast,

    /// Alphabetical by product name; unknown products sort first
    Name,
}

/// Forecasts after category filtering and ordering.
#[derive(Debug, Clone)]
pub struct RankedForecasts<'a> {
    ranked: Vec<&'a Forecast>,
}

impl<'a> RankedForecasts<'a> {
    /// The first `n` forecasts in ranked order.
    pub fn top(&self, n: usize) -> impl Iterator<Item = &'a Forecast> + '_ {
        self.ranked.iter().take(n).copied()
    }

    /// The last `n` forecasts, starting from the very last.
    pub fn lowest(&self, n: usize) -> impl Iterator<Item = &'a Forecast> + '_ {
        self.ranked.iter().rev().take(n).copied()
    }

    /// All forecasts in ranked order.
    pub fn as_slice(&self) -> &[&'a Forecast] {
        &self.ranked
    }

    /// Number of ranked forecasts.
    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    /// Whether no forecast survived filtering.
    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}

/// Filter forecasts to products in `category` (if given) and order them.
///
/// Forecasts for unknown products never match a category filter.
pub fn rank_forecasts<'a>(
    forecasts: &'a [Forecast],
    catalog: &ProductCatalog<'_>,
    category: Option<&str>,
    order: ForecastOrder,
) -> RankedForecasts<'a> {
    let mut ranked: Vec<&Forecast> = forecasts
        .iter()
        .filter(|forecast| {
            category.is_none_or(|category| catalog.category(forecast.product_id) == Some(category))
        })
        .collect();

    match order {
        ForecastOrder::Forecast => ranked.sort_by(|a, b| b.forecast.total_cmp(&a.forecast)),
        ForecastOrder::Name => ranked.sort_by(|a, b| by_name(catalog, a, b)),
    }

    RankedForecasts { ranked }
}

fn by_name(catalog: &ProductCatalog<'_>, a: &Forecast, b: &Forecast) -> Ordering {
    let a = catalog.name(a.product_id).unwrap_or_default();
    let b = catalog.name(b.product_id).unwrap_or_default();

    a.cmp(b)
}
