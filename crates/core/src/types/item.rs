//! Cart line items and their ingest form.

use serde::{Deserialize, Serialize};

use super::id::ItemId;
use super::price::{Price, PriceValue};

/// Matching key for a product name: case-folded and whitespace-collapsed.
///
/// " Earl  Grey " and "earl grey" produce the same key. Used only for the
/// fallback merge when an incoming item has no id match.
#[must_use]
pub fn name_key(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// One distinct product entry in the cart.
///
/// Invariants, maintained by the store: at most one line item per id, and
/// `quantity >= 1` (a zero or negative quantity request removes the line
/// instead of storing it).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Unique key; minted at ingestion if the product arrived without one.
    pub id: ItemId,
    /// Display name, trimmed of surrounding whitespace.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Product image URL.
    #[serde(default)]
    pub image: String,
    /// Number of units, always at least 1.
    pub quantity: u32,
}

impl LineItem {
    /// The fallback-matching key for this line's name.
    #[must_use]
    pub fn name_key(&self) -> String {
        name_key(&self.name)
    }

    /// Price times quantity.
    #[must_use]
    pub fn line_total(&self) -> rust_decimal::Decimal {
        self.price.times(self.quantity)
    }
}

/// A product as it arrives at the cart boundary.
///
/// Every field is optional because page scans are duck-typed: a repeat
/// addition may carry only an id, and a scraped product may carry everything
/// but one. [`NewItem::resolve`] applies the normalization exactly once.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewItem {
    /// Catalog id, if the product has a stable one.
    #[serde(default)]
    pub id: Option<ItemId>,
    /// Raw product name.
    #[serde(default)]
    pub name: Option<String>,
    /// Raw price, numeric or currency-formatted.
    #[serde(default)]
    pub price: Option<PriceValue>,
    /// Product image URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Units to add; defaults to 1, and values below 1 are treated as 1.
    #[serde(default)]
    pub quantity: Option<u32>,
}

impl NewItem {
    /// An item with name and price, the common scraped-product shape.
    #[must_use]
    pub fn new(name: impl Into<String>, price: impl Into<PriceValue>) -> Self {
        Self {
            name: Some(name.into()),
            price: Some(price.into()),
            ..Self::default()
        }
    }

    /// An item identified only by id, the repeat-addition shape.
    #[must_use]
    pub fn with_id(id: impl Into<ItemId>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Set the catalog id.
    #[must_use]
    pub fn id(mut self, id: impl Into<ItemId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the image URL.
    #[must_use]
    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Set the quantity to add.
    #[must_use]
    pub const fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Normalize into a resolved line item plus its matching key.
    ///
    /// Missing id mints one, missing quantity defaults to 1 (and 0 is lifted
    /// to 1), the name is trimmed, and the price parses leniently to zero on
    /// failure.
    #[must_use]
    pub fn resolve(self) -> ResolvedItem {
        let name = self
            .name
            .map(|n| n.trim().to_owned())
            .unwrap_or_default();
        ResolvedItem {
            key: name_key(&name),
            item: LineItem {
                id: self.id.unwrap_or_else(ItemId::mint),
                name,
                price: self.price.map_or(Price::ZERO, |p| p.to_price()),
                image: self.image.unwrap_or_default(),
                quantity: self.quantity.unwrap_or(1).max(1),
            },
        }
    }
}

/// A [`NewItem`] after the one-time normalization pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedItem {
    /// The normalized line item.
    pub item: LineItem,
    /// The fallback-matching name key, computed once.
    pub key: String,
}
