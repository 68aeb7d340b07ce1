//! The cart state store and its merge rules.

use std::collections::VecDeque;

use minicart_core::{ItemId, LineItem, NewItem};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::WidgetConfig;
use crate::event::CartEvent;
use crate::snapshot::PersistenceAdapter;

/// Owns the ordered list of cart line items; the only writer to it.
///
/// Mutations run synchronously inside one UI event at a time. Each one
/// persists a whole snapshot and queues events for the owner to drain with
/// [`take_events`](Self::take_events). Construct one at startup and inject it
/// into the renderer and panel controller; there is no ambient singleton.
#[derive(Debug)]
pub struct CartStore<P: PersistenceAdapter> {
    items: Vec<LineItem>,
    persistence: P,
    config: WidgetConfig,
    events: VecDeque<CartEvent>,
}

impl<P: PersistenceAdapter> CartStore<P> {
    /// Open the cart, restoring the persisted snapshot if one exists.
    ///
    /// A failed or corrupt read starts an empty cart; the error is logged and
    /// never propagated.
    pub fn open(mut persistence: P, config: WidgetConfig) -> Self {
        let items = persistence.load().unwrap_or_else(|err| {
            warn!(error = %err, "cart snapshot unreadable, starting empty");
            Vec::new()
        });
        Self {
            items,
            persistence,
            config,
            events: VecDeque::new(),
        }
    }

    /// Add a product, merging with a resident line when possible.
    ///
    /// Matching order: exact id, then fallback on normalized name plus parsed
    /// price. A fallback match remaps the incoming id to the resident line's
    /// id, so future additions converge on it. A merge increments the
    /// resident quantity by the incoming one (default 1); no match appends.
    ///
    /// Returns the id the product landed under.
    pub fn add(&mut self, incoming: NewItem) -> ItemId {
        let resolved = incoming.resolve();

        let matched = self
            .items
            .iter()
            .position(|line| line.id == resolved.item.id)
            .or_else(|| {
                // Aggregates products added without a stable id across
                // repeated page scans. Blank names never match each other.
                if resolved.key.is_empty() {
                    return None;
                }
                self.items.iter().position(|line| {
                    line.name_key() == resolved.key && line.price == resolved.item.price
                })
            });

        let (landed, message) =
            if let Some(line) = matched.and_then(|index| self.items.get_mut(index)) {
                if line.id != resolved.item.id {
                    debug!(
                        resident = %line.id,
                        incoming = %resolved.item.id,
                        "merged by name+price fallback"
                    );
                }
                line.quantity = line.quantity.saturating_add(resolved.item.quantity);
                (line.id.clone(), line.name.clone())
            } else {
                let landed = resolved.item.id.clone();
                let message = resolved.item.name.clone();
                self.items.push(resolved.item);
                (landed, message)
            };

        self.persist();
        self.events.push_back(CartEvent::Changed);
        self.events.push_back(CartEvent::Notify {
            message,
            dismiss_after: self.config.notify_dismiss,
        });
        landed
    }

    /// Remove the line with this id. Unknown ids are a silent no-op.
    pub fn remove(&mut self, id: &ItemId) {
        let before = self.items.len();
        self.items.retain(|line| &line.id != id);
        if self.items.len() != before {
            self.persist();
            self.events.push_back(CartEvent::Changed);
        }
    }

    /// Set an absolute quantity for the line with this id.
    ///
    /// A quantity of zero or below removes the line instead of storing a
    /// zero-quantity row. Unknown ids are a silent no-op.
    pub fn update_quantity(&mut self, id: &ItemId, quantity: i64) {
        if quantity <= 0 {
            self.remove(id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let mut changed = false;
        if let Some(line) = self.items.iter_mut().find(|line| &line.id == id) {
            line.quantity = quantity;
            changed = true;
        }
        if changed {
            self.persist();
            self.events.push_back(CartEvent::Changed);
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
        self.events.push_back(CartEvent::Changed);
    }

    /// Sum of price times quantity over all lines, in exact decimals.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Total unit count, as shown on the badge.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// An owned copy of the current lines, in insertion order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<LineItem> {
        self.items.clone()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drain the queued events, oldest first.
    ///
    /// The owning layer dispatches them to the renderer, which re-reads
    /// [`snapshot`](Self::snapshot) and [`total`](Self::total) on `Changed`.
    pub fn take_events(&mut self) -> Vec<CartEvent> {
        self.events.drain(..).collect()
    }

    /// The widget configuration this store was opened with.
    #[must_use]
    pub const fn config(&self) -> &WidgetConfig {
        &self.config
    }

    fn persist(&mut self) {
        // In-memory state stays authoritative for the session even when the
        // write fails.
        if let Err(err) = self.persistence.save(&self.items) {
            warn!(error = %err, "failed to persist cart snapshot");
        }
    }
}
