use std::collections::HashMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    // Balloon toolbar handoff
    ShowToolbar,
    HideToolbar,
    // Toolbar item navigation
    ToolbarNext,
    ToolbarPrev,
    ToolbarActivate,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Quit => "Quit",
            Action::ShowToolbar => "Show balloon toolbar (Alt+F10)",
            Action::HideToolbar => "Hide balloon toolbar (Esc)",
            Action::ToolbarNext => "Next toolbar item",
            Action::ToolbarPrev => "Previous toolbar item",
            Action::ToolbarActivate => "Activate toolbar item",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.code == self.code && key.modifiers == self.mods
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".to_string());
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        let code = match self.code {
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "BackTab".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::F(n) => format!("F{}", n),
            _ => format!("{:?}", self.code),
        };
        parts.push(code);
        parts.join("+")
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<Action, Vec<KeyCombo>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        use Action::*;
        let mut kb = Self::new();
        kb.add(Quit, KeyCombo::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
        // Handoff triggers. Alt+F10 and Esc mirror the conventional
        // contextual-toolbar bindings of desktop rich-text editors.
        kb.add(ShowToolbar, KeyCombo::new(KeyCode::F(10), KeyModifiers::ALT));
        kb.add(HideToolbar, KeyCombo::new(KeyCode::Esc, KeyModifiers::NONE));
        // Item navigation while the toolbar holds focus
        kb.add(ToolbarNext, KeyCombo::new(KeyCode::Tab, KeyModifiers::NONE));
        kb.add(ToolbarNext, KeyCombo::new(KeyCode::Right, KeyModifiers::NONE));
        kb.add(
            ToolbarPrev,
            KeyCombo::new(KeyCode::BackTab, KeyModifiers::SHIFT),
        );
        kb.add(ToolbarPrev, KeyCombo::new(KeyCode::Left, KeyModifiers::NONE));
        kb.add(
            ToolbarActivate,
            KeyCombo::new(KeyCode::Enter, KeyModifiers::NONE),
        );
        kb
    }
}

impl KeyBindings {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn add(&mut self, action: Action, combo: KeyCombo) {
        self.map.entry(action).or_default().push(combo);
    }

    pub fn matches(&self, action: Action, key: &KeyEvent) -> bool {
        if let Some(list) = self.map.get(&action) {
            list.iter().any(|c| c.matches(key))
        } else {
            false
        }
    }

    pub fn action_for_key(&self, key: &KeyEvent) -> Option<Action> {
        for (act, list) in &self.map {
            if list.iter().any(|c| c.matches(key)) {
                return Some(*act);
            }
        }
        None
    }

    /// Return the display strings for all combos mapped to `action`.
    pub fn combos_for(&self, action: Action) -> Vec<String> {
        self.map
            .get(&action)
            .map(|list| list.iter().map(|c| c.display()).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    #[test]
    fn defaults_match_show_trigger() {
        let kb = KeyBindings::default();
        let ev = KeyEvent::new(KeyCode::F(10), KeyModifiers::ALT);
        assert!(kb.matches(Action::ShowToolbar, &ev));
        assert!(!kb.matches(Action::HideToolbar, &ev));
    }

    #[test]
    fn esc_maps_to_hide() {
        let kb = KeyBindings::default();
        let ev = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(kb.action_for_key(&ev), Some(Action::HideToolbar));
    }

    #[test]
    fn combo_display_includes_modifiers() {
        let combo = KeyCombo::new(KeyCode::F(10), KeyModifiers::ALT);
        assert_eq!(combo.display(), "Alt+F10");
    }
}
