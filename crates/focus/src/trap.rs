//! The focus-trap state machine.

use tracing::debug;

/// UI adapter the trap operates through.
///
/// `Node` is whatever handle the host UI uses for elements. The host decides
/// what "focusable" means; for the browser widget that is the tab-order
/// controls with a non-null layout box, i.e. actually visible and reachable.
pub trait FocusHost {
    /// Element handle type.
    type Node: Copy + Eq + core::fmt::Debug;

    /// The currently focused element, if any.
    fn active_element(&self) -> Option<Self::Node>;

    /// The focusable descendants of `container`, in tab order.
    fn focusable_within(&self, container: Self::Node) -> Vec<Self::Node>;

    /// Move focus to `node`.
    fn focus(&mut self, node: Self::Node);

    /// Whether `node` is still attached to the document.
    fn is_connected(&self, node: Self::Node) -> bool;
}

/// Key presses the trap reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Tab,
    ShiftTab,
    Escape,
}

/// What the owner should do with a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome<N> {
    /// Not the trap's concern; let the default behavior run.
    Pass,
    /// The trap wrapped focus to this node; consume the key.
    Moved(N),
    /// Consume the key and leave focus where it is.
    Suppressed,
    /// Escape was pressed; the owner should close the panel and call
    /// [`FocusTrap::deactivate`].
    CloseRequested,
}

#[derive(Debug)]
enum TrapState<N> {
    Inactive,
    Active {
        /// Focus holder at activation time, restored on deactivate.
        previous: Option<N>,
        /// Focusable descendants captured at activation, in tab order.
        focusables: Vec<N>,
    },
}

/// Confines Tab navigation to an open panel and restores focus on close.
///
/// States are `Inactive` and `Active`. Activation while already active is
/// safe: the previous trap is torn down wholesale and the current focus is
/// re-recorded, which also re-captures the focusable set after a panel
/// mutates its controls.
#[derive(Debug)]
pub struct FocusTrap<N> {
    state: TrapState<N>,
    fallback: Option<N>,
}

impl<N: Copy + Eq + core::fmt::Debug> FocusTrap<N> {
    /// A trap with no fallback restore target.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: TrapState::Inactive,
            fallback: None,
        }
    }

    /// A trap that falls back to `trigger` (typically the control that opens
    /// the panel) when the previously focused element is gone at close.
    #[must_use]
    pub const fn with_fallback(trigger: N) -> Self {
        Self {
            state: TrapState::Inactive,
            fallback: Some(trigger),
        }
    }

    /// Whether the trap is currently confining focus.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.state, TrapState::Active { .. })
    }

    /// Start trapping inside `container`.
    ///
    /// Records the current focus holder, captures the focusable descendants,
    /// and moves focus to the first of them (nowhere if there are none).
    pub fn activate<H: FocusHost<Node = N>>(&mut self, host: &mut H, container: N) {
        let previous = host.active_element();
        let focusables = host.focusable_within(container);
        debug!(?container, count = focusables.len(), "focus trap activated");
        if let Some(first) = focusables.first().copied() {
            host.focus(first);
        }
        self.state = TrapState::Active {
            previous,
            focusables,
        };
    }

    /// React to a key press while the panel is open.
    ///
    /// Only boundary presses are intercepted: Tab on the last focusable wraps
    /// to the first, Shift+Tab on the first wraps to the last, and everything
    /// in between passes through to the default behavior. With no focusables
    /// at all, both tab directions are suppressed outright. While inactive
    /// every key passes through.
    pub fn handle_key<H: FocusHost<Node = N>>(&self, host: &mut H, key: Key) -> KeyOutcome<N> {
        let TrapState::Active { focusables, .. } = &self.state else {
            return KeyOutcome::Pass;
        };
        if key == Key::Escape {
            return KeyOutcome::CloseRequested;
        }
        let (Some(first), Some(last)) = (focusables.first().copied(), focusables.last().copied())
        else {
            return KeyOutcome::Suppressed;
        };
        let current = host.active_element();
        match key {
            Key::Tab if current == Some(last) => {
                host.focus(first);
                KeyOutcome::Moved(first)
            }
            Key::ShiftTab if current == Some(first) => {
                host.focus(last);
                KeyOutcome::Moved(last)
            }
            _ => KeyOutcome::Pass,
        }
    }

    /// Stop trapping and hand focus back.
    ///
    /// Restores the element focused at activation if it is still attached,
    /// else the fallback trigger if one was configured. Returns the node that
    /// received focus so the owner can defer the actual move by its settle
    /// delay.
    pub fn deactivate<H: FocusHost<Node = N>>(&mut self, host: &mut H) -> Option<N> {
        let TrapState::Active { previous, .. } =
            core::mem::replace(&mut self.state, TrapState::Inactive)
        else {
            return None;
        };
        let target = previous
            .filter(|node| host.is_connected(*node))
            .or(self.fallback);
        if let Some(node) = target {
            host.focus(node);
        }
        debug!(restored = ?target, "focus trap deactivated");
        target
    }
}

impl<N: Copy + Eq + core::fmt::Debug> Default for FocusTrap<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const PANEL: u32 = 100;
    const TRIGGER: u32 = 1;

    /// Scripted stand-in for the document.
    struct FakeDom {
        panel_controls: Vec<u32>,
        focused: Option<u32>,
        detached: HashSet<u32>,
    }

    impl FakeDom {
        fn with_controls(panel_controls: Vec<u32>) -> Self {
            Self {
                panel_controls,
                focused: Some(TRIGGER),
                detached: HashSet::new(),
            }
        }
    }

    impl FocusHost for FakeDom {
        type Node = u32;

        fn active_element(&self) -> Option<u32> {
            self.focused
        }

        fn focusable_within(&self, container: u32) -> Vec<u32> {
            assert_eq!(container, PANEL);
            self.panel_controls.clone()
        }

        fn focus(&mut self, node: u32) {
            self.focused = Some(node);
        }

        fn is_connected(&self, node: u32) -> bool {
            !self.detached.contains(&node)
        }
    }

    #[test]
    fn test_activate_focuses_first_control() {
        let mut dom = FakeDom::with_controls(vec![10, 11, 12]);
        let mut trap = FocusTrap::new();
        trap.activate(&mut dom, PANEL);
        assert!(trap.is_active());
        assert_eq!(dom.focused, Some(10));
    }

    #[test]
    fn test_tab_wraps_only_at_last() {
        let mut dom = FakeDom::with_controls(vec![10, 11, 12]);
        let mut trap = FocusTrap::new();
        trap.activate(&mut dom, PANEL);

        dom.focused = Some(11);
        assert_eq!(trap.handle_key(&mut dom, Key::Tab), KeyOutcome::Pass);

        dom.focused = Some(12);
        assert_eq!(trap.handle_key(&mut dom, Key::Tab), KeyOutcome::Moved(10));
        assert_eq!(dom.focused, Some(10));
    }

    #[test]
    fn test_shift_tab_wraps_only_at_first() {
        let mut dom = FakeDom::with_controls(vec![10, 11, 12]);
        let mut trap = FocusTrap::new();
        trap.activate(&mut dom, PANEL);

        assert_eq!(
            trap.handle_key(&mut dom, Key::ShiftTab),
            KeyOutcome::Moved(12)
        );
        assert_eq!(dom.focused, Some(12));
        assert_eq!(trap.handle_key(&mut dom, Key::ShiftTab), KeyOutcome::Pass);
    }

    #[test]
    fn test_empty_panel_suppresses_tab_both_ways() {
        let mut dom = FakeDom::with_controls(Vec::new());
        let mut trap = FocusTrap::new();
        trap.activate(&mut dom, PANEL);

        // Focus never moved off the trigger
        assert_eq!(dom.focused, Some(TRIGGER));
        assert_eq!(trap.handle_key(&mut dom, Key::Tab), KeyOutcome::Suppressed);
        assert_eq!(
            trap.handle_key(&mut dom, Key::ShiftTab),
            KeyOutcome::Suppressed
        );
        assert_eq!(dom.focused, Some(TRIGGER));
    }

    #[test]
    fn test_escape_requests_close() {
        let mut dom = FakeDom::with_controls(vec![10]);
        let mut trap = FocusTrap::new();
        trap.activate(&mut dom, PANEL);
        assert_eq!(
            trap.handle_key(&mut dom, Key::Escape),
            KeyOutcome::CloseRequested
        );
        // The trap stays active until the owner deactivates it
        assert!(trap.is_active());
    }

    #[test]
    fn test_inactive_trap_passes_everything() {
        let mut dom = FakeDom::with_controls(vec![10]);
        let trap: FocusTrap<u32> = FocusTrap::new();
        assert_eq!(trap.handle_key(&mut dom, Key::Tab), KeyOutcome::Pass);
        assert_eq!(trap.handle_key(&mut dom, Key::Escape), KeyOutcome::Pass);
    }

    #[test]
    fn test_deactivate_restores_previous_focus() {
        let mut dom = FakeDom::with_controls(vec![10, 11]);
        let mut trap = FocusTrap::new();
        trap.activate(&mut dom, PANEL);
        assert_eq!(dom.focused, Some(10));

        assert_eq!(trap.deactivate(&mut dom), Some(TRIGGER));
        assert_eq!(dom.focused, Some(TRIGGER));
        assert!(!trap.is_active());
    }

    #[test]
    fn test_deactivate_falls_back_when_previous_detached() {
        let mut dom = FakeDom::with_controls(vec![10]);
        dom.focused = Some(55);
        let mut trap = FocusTrap::with_fallback(TRIGGER);
        trap.activate(&mut dom, PANEL);

        dom.detached.insert(55);
        assert_eq!(trap.deactivate(&mut dom), Some(TRIGGER));
        assert_eq!(dom.focused, Some(TRIGGER));
    }

    #[test]
    fn test_deactivate_without_previous_or_fallback_leaves_focus() {
        let mut dom = FakeDom::with_controls(vec![10]);
        dom.focused = None;
        let mut trap = FocusTrap::new();
        trap.activate(&mut dom, PANEL);

        assert_eq!(trap.deactivate(&mut dom), None);
        assert_eq!(dom.focused, Some(10));
    }

    #[test]
    fn test_reactivation_replaces_previous_trap() {
        let mut dom = FakeDom::with_controls(vec![10, 11]);
        let mut trap = FocusTrap::new();
        trap.activate(&mut dom, PANEL);
        assert_eq!(dom.focused, Some(10));

        // Panel re-opened while active: focus inside the panel is what gets
        // recorded now, and the focusable set is re-captured
        dom.panel_controls = vec![20, 21];
        trap.activate(&mut dom, PANEL);
        assert_eq!(dom.focused, Some(20));

        dom.focused = Some(21);
        assert_eq!(trap.handle_key(&mut dom, Key::Tab), KeyOutcome::Moved(20));

        // Restore goes to what was focused at the second activation
        assert_eq!(trap.deactivate(&mut dom), Some(10));
    }

    #[test]
    fn test_deactivate_twice_is_a_no_op() {
        let mut dom = FakeDom::with_controls(vec![10]);
        let mut trap = FocusTrap::with_fallback(TRIGGER);
        trap.activate(&mut dom, PANEL);
        trap.deactivate(&mut dom);
        assert_eq!(trap.deactivate(&mut dom), None);
    }
}
