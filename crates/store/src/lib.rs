//! Minicart Store - Cart state with persistence and events.
//!
//! The store owns the ordered list of cart line items and is the only writer
//! to it. Every mutation persists a whole snapshot through the injected
//! [`PersistenceAdapter`] and queues [`CartEvent`]s for the owning UI layer to
//! drain and dispatch. Persistence failures never propagate: a failed read
//! starts an empty cart, a failed write leaves the in-memory cart
//! authoritative for the session.
//!
//! # Modules
//!
//! - [`cart`] - The [`CartStore`] and its merge rules
//! - [`config`] - [`WidgetConfig`] timings and storage keys
//! - [`event`] - Events drained by the presentation layer
//! - [`snapshot`] - JSON snapshot codec with legacy-key migration
//! - [`storage`] - Key-value storage trait and backends

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod event;
pub mod snapshot;
pub mod storage;

pub use cart::CartStore;
pub use config::{ConfigError, WidgetConfig};
pub use event::CartEvent;
pub use snapshot::{PersistenceAdapter, SnapshotStore};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
