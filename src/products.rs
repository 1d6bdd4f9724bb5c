//! Products

use std::{borrow::Cow, collections::BTreeSet, fmt};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Product identifier as issued by the inventory API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Product barcode
    pub barcode: String,

    /// Product category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Stock level below which the product is considered low
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_stock: Option<u32>,

    /// Maximum stock the shelf holds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_stock: Option<u32>,
}

/// Reasons a product record is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductError {
    /// The product name is empty or whitespace.
    #[error("product name is required")]
    MissingName,

    /// The barcode is empty or whitespace.
    #[error("barcode is required")]
    MissingBarcode,

    /// `max_stock` must be at least one when present.
    #[error("maximum stock must be greater than 0, got {0}")]
    InvalidMaxStock(u32),

    /// `min_stock` exceeds `max_stock`.
    #[error("minimum stock {min} exceeds maximum stock {max}")]
    StockRangeInverted {
        /// Minimum stock
        min: u32,
        /// Maximum stock
        max: u32,
    },
}

impl Product {
    /// Check the product fields the inventory forms require.
    ///
    /// # Errors
    ///
    /// Returns the first [`ProductError`] found.
    pub fn validate(&self) -> Result<(), ProductError> {
        if self.name.trim().is_empty() {
            return Err(ProductError::MissingName);
        }

        if self.barcode.trim().is_empty() {
            return Err(ProductError::MissingBarcode);
        }

        match (self.min_stock, self.max_stock) {
            (_, Some(0)) => Err(ProductError::InvalidMaxStock(0)),
            (Some(min), Some(max)) if min > max => {
                Err(ProductError::StockRangeInverted { min, max })
            }
            _ => Ok(()),
        }
    }

    /// Whether the product matches a free-text search term.
    ///
    /// Matches a case-insensitive substring of the name or a substring of the
    /// barcode. An empty term matches everything.
    pub fn matches_search(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }

        self.name.to_lowercase().contains(&term.to_lowercase()) || self.barcode.contains(term)
    }
}

/// Whether `barcode` looks like an EAN-8 to EAN-13 style code (8 to 13 ASCII digits).
pub fn is_valid_barcode(barcode: &str) -> bool {
    (8..=13).contains(&barcode.len()) && barcode.bytes().all(|b| b.is_ascii_digit())
}

/// Read-only lookup over a borrowed product list.
///
/// Product ids are expected to be unique; if they are not, the first product
/// with a given id wins lookups.
#[derive(Debug, Clone)]
pub struct ProductCatalog<'a> {
    products: &'a [Product],
    index: FxHashMap<ProductId, &'a Product>,
}

impl<'a> ProductCatalog<'a> {
    /// Index the given products by id.
    pub fn new(products: &'a [Product]) -> Self {
        let mut index = FxHashMap::default();

        for product in products {
            index.entry(product.id).or_insert(product);
        }

        Self { products, index }
    }

    /// Look up a product by id.
    pub fn get(&self, id: ProductId) -> Option<&'a Product> {
        self.index.get(&id).copied()
    }

    /// Product name, if the product is known.
    pub fn name(&self, id: ProductId) -> Option<&'a str> {
        self.get(id).map(|product| product.name.as_str())
    }

    /// Product category, if the product is known and categorised.
    pub fn category(&self, id: ProductId) -> Option<&'a str> {
        self.get(id).and_then(|product| product.category.as_deref())
    }

    /// Display label for a product, falling back to `Product <id>` when unknown.
    pub fn label(&self, id: ProductId) -> Cow<'a, str> {
        self.name(id)
            .map_or_else(|| Cow::Owned(format!("Product {id}")), Cow::Borrowed)
    }

    /// Products matching `term` (see [`Product::matches_search`]) and, if given, `category`.
    pub fn search(&self, term: &str, category: Option<&str>) -> Vec<&'a Product> {
        self.products
            .iter()
            .filter(|product| product.matches_search(term))
            .filter(|product| category.is_none_or(|c| product.category.as_deref() == Some(c)))
            .collect()
    }

    /// Distinct, non-empty categories in sorted order.
    pub fn categories(&self) -> Vec<&'a str> {
        self.products
            .iter()
            .filter_map(|product| product.category.as_deref())
            .filter(|category| !category.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Iterate over the products in their original order.
    pub fn iter(&self) -> impl Iterator<Item = &'a Product> {
        self.products.iter()
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether there are no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
