//! Balloon toolbar visibility and focus handoff.
//!
//! The controller is a two-state machine over [`ToolbarState`]. It owns no
//! rendering or focus machinery itself; side effects run through the
//! [`ToolbarHost`] seam so the same transitions drive a real terminal, a
//! test double, or any other host.

mod placement;
mod view;

pub use placement::balloon_rect;
pub use view::{ToolbarItem, ToolbarView};

/// Visibility state of the balloon toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolbarState {
    #[default]
    Hidden,
    Shown,
}

/// Host-side effects the controller drives.
///
/// `focus_toolbar` / `focus_editable` return whether a focus target
/// existed. A missing target degrades the focus move to a no-op; the
/// controller does not retry.
pub trait ToolbarHost {
    fn set_toolbar_visible(&mut self, visible: bool);
    fn focus_toolbar(&mut self) -> bool;
    fn focus_editable(&mut self) -> bool;
}

/// Decides when the balloon toolbar is shown or hidden and when keyboard
/// focus moves into or out of it.
///
/// Ordering contract:
/// - on show, the toolbar becomes visible BEFORE focus moves into it
///   (a hidden region cannot receive focus);
/// - on hide, focus returns to the editable BEFORE visibility is revoked
///   (so focus never lands on nothing in between).
#[derive(Debug, Default)]
pub struct BalloonToolbarController {
    state: ToolbarState,
}

impl BalloonToolbarController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ToolbarState {
        self.state
    }

    pub fn is_shown(&self) -> bool {
        self.state == ToolbarState::Shown
    }

    /// Show trigger. Idempotent: a second show while `Shown` neither
    /// re-renders nor re-focuses.
    pub fn show<H: ToolbarHost>(&mut self, host: &mut H) {
        if self.state == ToolbarState::Shown {
            return;
        }
        tracing::debug!("balloon toolbar: show");
        host.set_toolbar_visible(true);
        if !host.focus_toolbar() {
            tracing::debug!("toolbar focus target absent, skipping focus move");
        }
        self.state = ToolbarState::Shown;
    }

    /// Hide trigger. A hide while already `Hidden` is a no-op.
    pub fn hide<H: ToolbarHost>(&mut self, host: &mut H) {
        if self.state == ToolbarState::Hidden {
            return;
        }
        tracing::debug!("balloon toolbar: hide");
        if !host.focus_editable() {
            tracing::debug!("editable focus target absent, skipping focus move");
        }
        host.set_toolbar_visible(false);
        self.state = ToolbarState::Hidden;
    }

    /// Feed an aggregate-focus edge from the arbiter. A `true -> false`
    /// transition means focus left both regions, which hides the toolbar.
    pub fn notify_focus_change<H: ToolbarHost>(&mut self, focused: bool, host: &mut H) {
        if !focused {
            self.hide(host);
        }
    }

    /// Teardown: force `Hidden` without running host side effects.
    pub fn reset(&mut self) {
        self.state = ToolbarState::Hidden;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records host calls in order, sinon-style, so tests can assert the
    /// visibility/focus interleaving.
    #[derive(Default)]
    struct RecordingHost {
        calls: Vec<&'static str>,
        toolbar_focusable: bool,
        editable_focusable: bool,
    }

    impl RecordingHost {
        fn focusable() -> Self {
            Self {
                toolbar_focusable: true,
                editable_focusable: true,
                ..Self::default()
            }
        }
    }

    impl ToolbarHost for RecordingHost {
        fn set_toolbar_visible(&mut self, visible: bool) {
            self.calls.push(if visible { "visible" } else { "invisible" });
        }

        fn focus_toolbar(&mut self) -> bool {
            self.calls.push("focus_toolbar");
            self.toolbar_focusable
        }

        fn focus_editable(&mut self) -> bool {
            self.calls.push("focus_editable");
            self.editable_focusable
        }
    }

    #[test]
    fn show_makes_visible_before_focusing() {
        let mut host = RecordingHost::focusable();
        let mut ctl = BalloonToolbarController::new();
        ctl.show(&mut host);
        assert_eq!(ctl.state(), ToolbarState::Shown);
        assert_eq!(host.calls, vec!["visible", "focus_toolbar"]);
    }

    #[test]
    fn second_show_is_a_noop() {
        let mut host = RecordingHost::focusable();
        let mut ctl = BalloonToolbarController::new();
        ctl.show(&mut host);
        ctl.show(&mut host);
        assert_eq!(host.calls, vec!["visible", "focus_toolbar"]);
    }

    #[test]
    fn hide_focuses_editable_before_hiding() {
        let mut host = RecordingHost::focusable();
        let mut ctl = BalloonToolbarController::new();
        ctl.show(&mut host);
        host.calls.clear();
        ctl.hide(&mut host);
        assert_eq!(ctl.state(), ToolbarState::Hidden);
        assert_eq!(host.calls, vec!["focus_editable", "invisible"]);
    }

    #[test]
    fn hide_while_hidden_is_a_noop() {
        let mut host = RecordingHost::focusable();
        let mut ctl = BalloonToolbarController::new();
        ctl.hide(&mut host);
        assert!(host.calls.is_empty());
        assert_eq!(ctl.state(), ToolbarState::Hidden);
    }

    #[test]
    fn missing_focus_target_degrades_to_noop() {
        let mut host = RecordingHost {
            toolbar_focusable: false,
            editable_focusable: true,
            ..RecordingHost::default()
        };
        let mut ctl = BalloonToolbarController::new();
        ctl.show(&mut host);
        // The move was attempted once and not retried; state still advances.
        assert_eq!(host.calls, vec!["visible", "focus_toolbar"]);
        assert_eq!(ctl.state(), ToolbarState::Shown);
    }

    #[test]
    fn aggregate_false_edge_hides() {
        let mut host = RecordingHost::focusable();
        let mut ctl = BalloonToolbarController::new();
        ctl.show(&mut host);
        host.calls.clear();

        ctl.notify_focus_change(true, &mut host);
        assert!(host.calls.is_empty());

        ctl.notify_focus_change(false, &mut host);
        assert_eq!(host.calls, vec!["focus_editable", "invisible"]);
        assert_eq!(ctl.state(), ToolbarState::Hidden);
    }

    #[test]
    fn reset_forces_hidden_without_side_effects() {
        let mut host = RecordingHost::focusable();
        let mut ctl = BalloonToolbarController::new();
        ctl.show(&mut host);
        host.calls.clear();
        ctl.reset();
        assert!(host.calls.is_empty());
        assert_eq!(ctl.state(), ToolbarState::Hidden);
    }
}
