//! Minicart Focus - Keyboard focus confinement for the cart panel.
//!
//! A small two-state machine that keeps Tab navigation inside an open modal
//! panel and hands focus back when it closes. It knows nothing about any DOM:
//! the owning UI layer implements [`FocusHost`] over whatever node handles it
//! has, feeds key presses to [`FocusTrap::handle_key`], and applies the
//! outcomes.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod trap;

pub use trap::{FocusHost, FocusTrap, Key, KeyOutcome};
