//! JSON snapshot persistence with a one-time legacy-key migration.
//!
//! Snapshots are written as a versioned envelope under the primary key. Older
//! deployments stored a bare array of duck-typed items under a different key;
//! the first load that finds no primary key reads the legacy one, copies it
//! forward in envelope form, and deletes it.

use chrono::{DateTime, Utc};
use minicart_core::{ItemId, LineItem, NewItem, PriceValue};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::WidgetConfig;
use crate::storage::{KeyValueStorage, StorageError};

/// Whole-snapshot load/save contract between the cart store and storage.
pub trait PersistenceAdapter {
    /// Load the persisted cart, or an empty one if nothing was stored.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] on backend failure or corrupt data. The
    /// cart store maps any error to an empty cart; nothing propagates past
    /// its API.
    fn load(&mut self) -> Result<Vec<LineItem>, StorageError>;

    /// Persist the full cart state.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] on backend failure. The cart store logs and
    /// swallows it; the in-memory cart stays authoritative.
    fn save(&mut self, items: &[LineItem]) -> Result<(), StorageError>;
}

/// Current snapshot envelope version.
const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotEnvelope {
    version: u32,
    saved_at: DateTime<Utc>,
    items: Vec<LineItem>,
}

/// The legacy bare-array row: duck-typed, every field optional.
#[derive(Debug, Deserialize)]
struct LegacyLine {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    price: Option<PriceValue>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    quantity: Option<i64>,
}

impl LegacyLine {
    fn into_line_item(self) -> LineItem {
        let quantity = u32::try_from(self.quantity.unwrap_or(1).clamp(1, i64::from(u32::MAX)))
            .unwrap_or(u32::MAX);
        NewItem {
            id: self.id.map(ItemId::new),
            name: self.name,
            price: self.price,
            image: self.image,
            quantity: Some(quantity),
        }
        .resolve()
        .item
    }
}

/// [`PersistenceAdapter`] over any [`KeyValueStorage`].
#[derive(Debug)]
pub struct SnapshotStore<S: KeyValueStorage> {
    storage: S,
    primary_key: String,
    legacy_key: String,
}

impl<S: KeyValueStorage> SnapshotStore<S> {
    /// Snapshot store using the keys configured for the widget.
    pub fn new(storage: S, config: &WidgetConfig) -> Self {
        Self {
            storage,
            primary_key: config.storage_key.clone(),
            legacy_key: config.legacy_storage_key.clone(),
        }
    }

    /// The underlying storage, for inspection in tests.
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    fn load_legacy(&mut self) -> Result<Option<Vec<LineItem>>, StorageError> {
        let Some(raw) = self.storage.get(&self.legacy_key)? else {
            return Ok(None);
        };
        let lines: Vec<LegacyLine> =
            serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
                key: self.legacy_key.clone(),
                source,
            })?;
        let items: Vec<LineItem> = lines.into_iter().map(LegacyLine::into_line_item).collect();

        // Copy forward, then retire the legacy key. If the copy fails we keep
        // the legacy key so the next load can retry the migration.
        match self.save(&items) {
            Ok(()) => {
                self.storage.remove(&self.legacy_key)?;
                info!(
                    from = %self.legacy_key,
                    to = %self.primary_key,
                    lines = items.len(),
                    "migrated legacy cart snapshot"
                );
            }
            Err(err) => {
                warn!(error = %err, "legacy cart migration could not be written forward");
            }
        }
        Ok(Some(items))
    }
}

impl<S: KeyValueStorage> PersistenceAdapter for SnapshotStore<S> {
    fn load(&mut self) -> Result<Vec<LineItem>, StorageError> {
        if let Some(raw) = self.storage.get(&self.primary_key)? {
            let envelope: SnapshotEnvelope =
                serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
                    key: self.primary_key.clone(),
                    source,
                })?;
            return Ok(envelope.items);
        }
        Ok(self.load_legacy()?.unwrap_or_default())
    }

    fn save(&mut self, items: &[LineItem]) -> Result<(), StorageError> {
        let envelope = SnapshotEnvelope {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            items: items.to_vec(),
        };
        let raw = serde_json::to_string(&envelope).map_err(StorageError::Encode)?;
        self.storage.set(&self.primary_key, &raw)
    }
}
