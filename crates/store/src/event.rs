//! Events emitted by the store for the presentation layer.

use std::time::Duration;

/// A signal queued by a cart mutation.
///
/// The owning UI layer drains these with
/// [`CartStore::take_events`](crate::CartStore::take_events) after each
/// operation. On `Changed` the renderer re-reads
/// [`snapshot`](crate::CartStore::snapshot) and
/// [`total`](crate::CartStore::total) and redraws. A later `Notify` supersedes
/// an earlier one still on screen (last write wins on the toast).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// Cart contents changed; re-read state and redraw.
    Changed,
    /// Show a transient notification for an added item.
    Notify {
        /// The display name of the item that was added.
        message: String,
        /// How long to keep the toast visible.
        dismiss_after: Duration,
    },
}
