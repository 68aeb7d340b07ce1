//! Minicart Core - Shared cart types.
//!
//! This crate provides the common types used across all Minicart components:
//! - `store` - Cart state store with persistence and events
//! - `focus` - Focus-trap state machine for the dropdown panel
//! - `cli` - Command-line demo driving a file-persisted cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no UI
//! coupling. Normalization (id minting, price parsing, name trimming) happens
//! once here, at ingestion, so the matching logic in the store never has to
//! re-normalize.
//!
//! # Modules
//!
//! - [`types`] - Line items, type-safe ids, lenient monetary values

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
