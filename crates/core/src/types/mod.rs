//! Core types for Minicart.
//!
//! This module provides type-safe wrappers for the cart domain concepts.

pub mod id;
pub mod item;
pub mod price;

pub use id::ItemId;
pub use item::{LineItem, NewItem, name_key};
pub use price::{Price, PriceParseError, PriceValue};
