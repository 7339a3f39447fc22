//! One-line balloon toolbar widget.

use crossterm::event::{KeyEvent, KeyEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Clear};

use crate::keybindings::{Action, KeyBindings};
use crate::theme;
use crate::ui::{UiFrame, safe_set_string};

/// A labelled toolbar entry. `activate` is reported back to the caller by
/// id when the item is chosen with Enter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarItem {
    pub id: &'static str,
    pub label: String,
}

impl ToolbarItem {
    pub fn new(id: &'static str, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

/// Horizontal row of items with a selected index. The view holds its own
/// focused flag; key handling is inert while unfocused.
#[derive(Debug, Default)]
pub struct ToolbarView {
    items: Vec<ToolbarItem>,
    selected: usize,
    focused: bool,
}

impl ToolbarView {
    pub fn new(items: Vec<ToolbarItem>) -> Self {
        Self {
            items,
            selected: 0,
            focused: false,
        }
    }

    pub fn items(&self) -> &[ToolbarItem] {
        &self.items
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if focused {
            // Focus always lands on the first item, matching toolbars that
            // reset selection on entry.
            self.selected = 0;
        }
    }

    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.items.len();
    }

    pub fn select_prev(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = (self.selected + self.items.len() - 1) % self.items.len();
    }

    /// Handle a key while the toolbar is focused. Returns the activated
    /// item id on Enter, `None` otherwise. Show/hide triggers are routed by
    /// the editor glue before this is called.
    pub fn handle_key(&mut self, key: &KeyEvent, bindings: &KeyBindings) -> Option<&'static str> {
        if !self.focused || key.kind != KeyEventKind::Press {
            return None;
        }
        if bindings.matches(Action::ToolbarNext, key) {
            self.select_next();
        } else if bindings.matches(Action::ToolbarPrev, key) {
            self.select_prev();
        } else if bindings.matches(Action::ToolbarActivate, key) {
            return self.items.get(self.selected).map(|item| item.id);
        }
        None
    }

    /// Width the balloon needs: items joined with a space, plus borders.
    pub fn desired_width(&self) -> u16 {
        let labels: usize = self.items.iter().map(|i| i.label.chars().count()).sum();
        let gaps = self.items.len().saturating_sub(1);
        (labels + gaps + 2).min(u16::MAX as usize) as u16
    }

    pub const HEIGHT: u16 = 3;

    pub fn render(&self, frame: &mut UiFrame<'_>, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        frame.render_widget(Clear, area);
        let border_style = if self.focused {
            Style::default().fg(theme::balloon_border_focused())
        } else {
            Style::default().fg(theme::balloon_border())
        };
        frame.render_widget(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(border_style),
            area,
        );

        let inner = Rect {
            x: area.x.saturating_add(1),
            y: area.y.saturating_add(1),
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        };
        if inner.width == 0 || inner.height == 0 {
            return;
        }
        let bounds = inner.intersection(frame.area());
        let mut x = inner.x;
        for (idx, item) in self.items.iter().enumerate() {
            let style = if self.focused && idx == self.selected {
                Style::default()
                    .fg(theme::balloon_selected_fg())
                    .bg(theme::balloon_selected_bg())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme::balloon_fg())
            };
            safe_set_string(frame.buffer_mut(), bounds, x, inner.y, &item.label, style);
            x = x.saturating_add(item.label.chars().count() as u16 + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::buffer::Buffer;

    fn view() -> ToolbarView {
        ToolbarView::new(vec![
            ToolbarItem::new("bold", "B"),
            ToolbarItem::new("italic", "I"),
            ToolbarItem::new("link", "Link"),
        ])
    }

    #[test]
    fn focus_resets_selection_to_first_item() {
        let mut v = view();
        v.select_next();
        v.select_next();
        assert_eq!(v.selected(), 2);
        v.set_focused(true);
        assert_eq!(v.selected(), 0);
    }

    #[test]
    fn navigation_wraps() {
        let mut v = view();
        v.set_focused(true);
        v.select_prev();
        assert_eq!(v.selected(), 2);
        v.select_next();
        assert_eq!(v.selected(), 0);
    }

    #[test]
    fn keys_are_inert_while_unfocused() {
        let mut v = view();
        let bindings = KeyBindings::default();
        let tab = KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(v.handle_key(&tab, &bindings), None);
        assert_eq!(v.selected(), 0);
    }

    #[test]
    fn enter_activates_selected_item() {
        let mut v = view();
        let bindings = KeyBindings::default();
        v.set_focused(true);
        let tab = KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE);
        v.handle_key(&tab, &bindings);
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(v.handle_key(&enter, &bindings), Some("italic"));
    }

    #[test]
    fn render_fits_desired_width() {
        let v = view();
        let area = Rect {
            x: 0,
            y: 0,
            width: v.desired_width(),
            height: ToolbarView::HEIGHT,
        };
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        v.render(&mut frame, area);
        // First label cell sits inside the border.
        assert_eq!(buf.cell((1, 1)).unwrap().symbol(), "B");
    }
}
