//! Integration tests for Minicart.
//!
//! # Test Categories
//!
//! - `cart_scenarios` - Merge rules and totals across cart operations
//! - `persistence` - Snapshot round-trips and the legacy-key migration
//! - `focus_flow` - A full panel open/navigate/close session
//!
//! This crate also provides the shared test doubles: a scripted
//! [`FakeDom`] focus host and a [`memory_store`] constructor.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashSet;

use minicart_focus::FocusHost;
use minicart_store::{CartStore, MemoryStorage, SnapshotStore, WidgetConfig};

/// A cart store over fresh in-memory storage with default configuration.
#[must_use]
pub fn memory_store() -> CartStore<SnapshotStore<MemoryStorage>> {
    let config = WidgetConfig::default();
    CartStore::open(SnapshotStore::new(MemoryStorage::new(), &config), config)
}

/// Initialize test logging once; safe to call from every test.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Scripted document stand-in for focus-trap tests.
///
/// Nodes are plain integers. The panel's focusable controls and the detached
/// set are mutated directly by tests to simulate DOM changes.
pub struct FakeDom {
    /// Focusable controls inside the panel, in tab order.
    pub panel_controls: Vec<u32>,
    /// The currently focused node.
    pub focused: Option<u32>,
    /// Nodes no longer attached to the document.
    pub detached: HashSet<u32>,
    /// Node the panel container is identified by.
    pub panel: u32,
}

impl FakeDom {
    /// A document with the given panel controls and focus on node 1.
    #[must_use]
    pub fn new(panel_controls: Vec<u32>) -> Self {
        Self {
            panel_controls,
            focused: Some(1),
            detached: HashSet::new(),
            panel: 100,
        }
    }
}

impl FocusHost for FakeDom {
    type Node = u32;

    fn active_element(&self) -> Option<u32> {
        self.focused
    }

    fn focusable_within(&self, container: u32) -> Vec<u32> {
        if container == self.panel {
            self.panel_controls.clone()
        } else {
            Vec::new()
        }
    }

    fn focus(&mut self, node: u32) {
        self.focused = Some(node);
    }

    fn is_connected(&self, node: u32) -> bool {
        !self.detached.contains(&node)
    }
}
