//! Editor UI composition: editable surface, balloon toolbar, focus
//! arbiter, and the keystroke handoff between them.
//!
//! `BalloonEditorUi` is the single owner of the pieces. Keys are routed by
//! which region currently holds logical focus; the toolbar controller runs
//! its side effects through a split-borrow [`ToolbarHost`] over the UI's
//! own fields.

use crossterm::event::{Event, KeyEvent, KeyEventKind};
use ratatui::layout::Rect;

use crate::focus::{FocusArbiter, RegionHandle};
use crate::keybindings::{Action, KeyBindings};
use crate::surface::EditableSurface;
use crate::toolbar::{
    BalloonToolbarController, ToolbarHost, ToolbarState, ToolbarView, balloon_rect,
};
use crate::ui::UiFrame;

pub struct BalloonEditorUi {
    arbiter: FocusArbiter,
    surface: EditableSurface,
    toolbar: ToolbarView,
    controller: BalloonToolbarController,
    bindings: KeyBindings,
    editable_region: RegionHandle,
    toolbar_region: RegionHandle,
    toolbar_visible: bool,
    // Whether the hosting terminal window itself has focus. While false
    // there is no focus target, so controller focus moves degrade to
    // no-ops.
    terminal_focused: bool,
    activated: Option<&'static str>,
}

/// Split borrow over the UI fields the controller is allowed to touch.
/// Keeping the controller itself out of this struct is what lets
/// `controller.show(&mut host)` borrow-check.
struct UiHost<'a> {
    arbiter: &'a mut FocusArbiter,
    surface: &'a mut EditableSurface,
    toolbar: &'a mut ToolbarView,
    toolbar_visible: &'a mut bool,
    editable_region: RegionHandle,
    toolbar_region: RegionHandle,
    terminal_focused: bool,
}

impl ToolbarHost for UiHost<'_> {
    fn set_toolbar_visible(&mut self, visible: bool) {
        *self.toolbar_visible = visible;
    }

    fn focus_toolbar(&mut self) -> bool {
        // A hidden toolbar cannot receive focus; the controller makes it
        // visible before asking.
        if !*self.toolbar_visible || !self.terminal_focused {
            return false;
        }
        self.toolbar.set_focused(true);
        self.arbiter.set_focused(self.editable_region, false);
        self.arbiter.set_focused(self.toolbar_region, true);
        // The surface keeps its focused look while the toolbar holds the
        // keyboard: its flag tracks the aggregate, not the raw region.
        self.surface.set_focused(self.arbiter.is_focused());
        true
    }

    fn focus_editable(&mut self) -> bool {
        if !self.terminal_focused {
            return false;
        }
        self.toolbar.set_focused(false);
        self.arbiter.set_focused(self.toolbar_region, false);
        self.arbiter.set_focused(self.editable_region, true);
        self.surface.set_focused(self.arbiter.is_focused());
        true
    }
}

impl BalloonEditorUi {
    pub fn new(surface: EditableSurface, toolbar: ToolbarView, bindings: KeyBindings) -> Self {
        let mut arbiter = FocusArbiter::new();
        let editable_region = arbiter.register_region(surface.name().to_owned());
        let toolbar_region = arbiter.register_region("balloon-toolbar");
        Self {
            arbiter,
            surface,
            toolbar,
            controller: BalloonToolbarController::new(),
            bindings,
            editable_region,
            toolbar_region,
            toolbar_visible: false,
            terminal_focused: false,
            activated: None,
        }
    }

    /// Wire up initial focus: the terminal has focus and the editable
    /// surface is the focused region.
    pub fn init(&mut self) {
        self.terminal_focused = true;
        self.arbiter.set_focused(self.editable_region, true);
        self.surface.set_focused(true);
        // Swallow the initial false->true edge so the first real blur is
        // the first one the controller sees.
        let _ = self.arbiter.take_focus_change();
        tracing::debug!("balloon editor ui initialized");
    }

    /// Teardown. The toolbar state resets to `Hidden` without side
    /// effects.
    pub fn destroy(&mut self) {
        self.controller.reset();
        self.toolbar_visible = false;
        tracing::debug!("balloon editor ui destroyed");
    }

    pub fn is_focused(&self) -> bool {
        self.arbiter.is_focused()
    }

    pub fn toolbar_state(&self) -> ToolbarState {
        self.controller.state()
    }

    pub fn toolbar_visible(&self) -> bool {
        self.toolbar_visible
    }

    pub fn toolbar_is_focused(&self) -> bool {
        self.arbiter.region_is_focused(self.toolbar_region)
    }

    pub fn editable_is_focused(&self) -> bool {
        self.arbiter.region_is_focused(self.editable_region)
    }

    /// Look up an editable surface by root name. Absent names yield
    /// `None`.
    pub fn editable(&self, name: &str) -> Option<&EditableSurface> {
        (self.surface.name() == name).then_some(&self.surface)
    }

    pub fn main_editable(&self) -> &EditableSurface {
        &self.surface
    }

    /// Register an observer on the aggregate focus signal.
    pub fn observe_focus(&mut self, observer: impl FnMut(bool) + 'static) {
        self.arbiter.observe(observer);
    }

    /// Toolbar item activated since the last call, if any.
    pub fn take_activated(&mut self) -> Option<&'static str> {
        self.activated.take()
    }

    fn with_host<R>(&mut self, f: impl FnOnce(&mut BalloonToolbarController, &mut UiHost<'_>) -> R) -> R {
        let mut host = UiHost {
            arbiter: &mut self.arbiter,
            surface: &mut self.surface,
            toolbar: &mut self.toolbar,
            toolbar_visible: &mut self.toolbar_visible,
            editable_region: self.editable_region,
            toolbar_region: self.toolbar_region,
            terminal_focused: self.terminal_focused,
        };
        f(&mut self.controller, &mut host)
    }

    /// Raise the show trigger.
    pub fn show_toolbar(&mut self) {
        self.with_host(|ctl, host| ctl.show(host));
        self.drain_focus_edges();
    }

    /// Raise the hide trigger.
    pub fn hide_toolbar(&mut self) {
        self.with_host(|ctl, host| ctl.hide(host));
        self.drain_focus_edges();
    }

    /// Feed pending aggregate edges into the controller. A true->false
    /// edge means focus left both regions and the toolbar hides.
    fn drain_focus_edges(&mut self) {
        while let Some(focused) = self.arbiter.take_focus_change() {
            self.with_host(|ctl, host| ctl.notify_focus_change(focused, host));
            self.surface.set_focused(self.arbiter.is_focused());
        }
    }

    /// Route a terminal event. Returns true when it was consumed.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(key) => self.dispatch_key(key),
            Event::FocusGained => {
                self.terminal_focused = true;
                self.with_host(|_, host| {
                    host.focus_editable();
                });
                self.drain_focus_edges();
                true
            }
            Event::FocusLost => {
                self.terminal_focused = false;
                self.arbiter.set_focused(self.editable_region, false);
                self.arbiter.set_focused(self.toolbar_region, false);
                self.surface.set_focused(false);
                self.drain_focus_edges();
                true
            }
            _ => false,
        }
    }

    fn dispatch_key(&mut self, key: &KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }

        if self.controller.is_shown() && self.toolbar_is_focused() {
            if self.bindings.matches(Action::HideToolbar, key) {
                self.hide_toolbar();
                return true;
            }
            if let Some(id) = self.toolbar.handle_key(key, &self.bindings) {
                tracing::debug!(item = id, "toolbar item activated");
                self.activated = Some(id);
                // Activation hands the keyboard back to the editable.
                self.hide_toolbar();
                return true;
            }
            return matches!(
                self.bindings.action_for_key(key),
                Some(Action::ToolbarNext | Action::ToolbarPrev)
            );
        }

        if self.editable_is_focused() {
            if self.bindings.matches(Action::ShowToolbar, key) {
                self.show_toolbar();
                return true;
            }
            let consumed = self.surface.handle_key(key);
            if consumed && self.surface.has_selection() {
                // Non-collapsed selection is a show trigger. Re-raising it
                // while shown is a no-op in the controller.
                self.show_toolbar();
            }
            return consumed;
        }

        false
    }

    /// Render the surface and, when shown, the balloon anchored to the
    /// cursor.
    pub fn render(&self, frame: &mut UiFrame<'_>, area: Rect) {
        self.surface.render(frame, area);
        if !self.toolbar_visible {
            return;
        }
        let (row, col) = self.surface.cursor();
        let anchor_col = area.x.saturating_add(col as u16);
        let anchor_row = area.y.saturating_add(row as u16);
        if let Some(rect) = balloon_rect(
            area,
            anchor_col,
            anchor_row,
            self.toolbar.desired_width(),
            ToolbarView::HEIGHT,
        ) {
            self.toolbar.render(frame, rect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keybindings::KeyBindings;
    use crate::surface::EditableSurface;
    use crate::toolbar::ToolbarItem;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn ui() -> BalloonEditorUi {
        let surface = EditableSurface::new("main", "foo", None);
        let toolbar = ToolbarView::new(vec![
            ToolbarItem::new("bold", "B"),
            ToolbarItem::new("italic", "I"),
        ]);
        let mut ui = BalloonEditorUi::new(surface, toolbar, KeyBindings::default());
        ui.init();
        ui
    }

    fn press(ui: &mut BalloonEditorUi, code: KeyCode, mods: KeyModifiers) -> bool {
        ui.handle_event(&Event::Key(KeyEvent::new(code, mods)))
    }

    #[test]
    fn init_focuses_editable() {
        let ui = ui();
        assert!(ui.is_focused());
        assert!(ui.editable_is_focused());
        assert!(!ui.toolbar_is_focused());
        assert_eq!(ui.toolbar_state(), ToolbarState::Hidden);
    }

    #[test]
    fn alt_f10_shows_and_focuses_toolbar() {
        let mut ui = ui();
        assert!(press(&mut ui, KeyCode::F(10), KeyModifiers::ALT));
        assert_eq!(ui.toolbar_state(), ToolbarState::Shown);
        assert!(ui.toolbar_visible());
        assert!(ui.toolbar_is_focused());
        assert!(!ui.editable_is_focused());
        // Aggregate never dropped while focus moved between regions.
        assert!(ui.is_focused());
    }

    #[test]
    fn esc_returns_focus_to_editable_and_hides() {
        let mut ui = ui();
        press(&mut ui, KeyCode::F(10), KeyModifiers::ALT);
        assert!(press(&mut ui, KeyCode::Esc, KeyModifiers::NONE));
        assert_eq!(ui.toolbar_state(), ToolbarState::Hidden);
        assert!(!ui.toolbar_visible());
        assert!(ui.editable_is_focused());
        assert!(ui.is_focused());
    }

    #[test]
    fn second_show_trigger_is_idempotent() {
        let mut ui = ui();
        press(&mut ui, KeyCode::F(10), KeyModifiers::ALT);
        press(&mut ui, KeyCode::F(10), KeyModifiers::ALT);
        assert_eq!(ui.toolbar_state(), ToolbarState::Shown);
        assert!(ui.toolbar_is_focused());
    }

    #[test]
    fn editing_keys_reach_surface_while_editable_focused() {
        let mut ui = ui();
        assert!(press(&mut ui, KeyCode::End, KeyModifiers::NONE));
        assert!(press(&mut ui, KeyCode::Char('!'), KeyModifiers::NONE));
        assert_eq!(ui.main_editable().text(), "foo!");
    }

    #[test]
    fn selection_raises_show_trigger_without_refocus_loop() {
        let mut ui = ui();
        assert!(press(&mut ui, KeyCode::Right, KeyModifiers::SHIFT));
        assert_eq!(ui.toolbar_state(), ToolbarState::Shown);
        assert!(ui.toolbar_is_focused());
    }

    #[test]
    fn toolbar_activation_hides_and_restores_editable_focus() {
        let mut ui = ui();
        press(&mut ui, KeyCode::F(10), KeyModifiers::ALT);
        press(&mut ui, KeyCode::Tab, KeyModifiers::NONE);
        assert!(press(&mut ui, KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(ui.take_activated(), Some("italic"));
        assert_eq!(ui.take_activated(), None);
        assert_eq!(ui.toolbar_state(), ToolbarState::Hidden);
        assert!(ui.editable_is_focused());
    }

    #[test]
    fn terminal_focus_loss_hides_toolbar() {
        let mut ui = ui();
        press(&mut ui, KeyCode::F(10), KeyModifiers::ALT);
        assert!(ui.handle_event(&Event::FocusLost));
        assert_eq!(ui.toolbar_state(), ToolbarState::Hidden);
        assert!(!ui.is_focused());
        assert!(ui.handle_event(&Event::FocusGained));
        assert!(ui.editable_is_focused());
    }

    #[test]
    fn editable_lookup_by_name() {
        let ui = ui();
        assert!(ui.editable("main").is_some());
        assert!(ui.editable("absent").is_none());
    }

    #[test]
    fn destroy_resets_to_hidden() {
        let mut ui = ui();
        press(&mut ui, KeyCode::F(10), KeyModifiers::ALT);
        ui.destroy();
        assert_eq!(ui.toolbar_state(), ToolbarState::Hidden);
        assert!(!ui.toolbar_visible());
    }
}
