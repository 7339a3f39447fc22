//! Minimal editable text surface.
//!
//! Enough of an editor to give the balloon toolbar a real peer: plain
//! lines, a cursor, a selection anchor, and a placeholder shown while
//! empty. Model/view conversion, undo, and text shaping are out of scope.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::theme;
use crate::ui::{UiFrame, safe_set_string};

/// Resolve the effective placeholder text.
///
/// An explicitly configured placeholder takes precedence over one inferred
/// from the source the surface was created from.
pub fn resolve_placeholder(config: Option<&str>, source: Option<&str>) -> Option<String> {
    config.or(source).map(str::to_owned)
}

/// (line, column) position in the surface, columns in chars.
pub type Pos = (usize, usize);

pub struct EditableSurface {
    name: String,
    lines: Vec<String>,
    cursor: Pos,
    // Selection anchor; selection is collapsed when this is None or equal
    // to the cursor.
    anchor: Option<Pos>,
    focused: bool,
    placeholder: Option<String>,
}

impl EditableSurface {
    pub fn new(name: impl Into<String>, text: &str, placeholder: Option<String>) -> Self {
        let mut lines: Vec<String> = text.split('\n').map(str::to_owned).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        Self {
            name: name.into(),
            lines,
            cursor: (0, 0),
            anchor: None,
            focused: false,
            placeholder,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.is_empty())
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn cursor(&self) -> Pos {
        self.cursor
    }

    /// True while the selection spans at least one character.
    pub fn has_selection(&self) -> bool {
        self.anchor.is_some_and(|a| a != self.cursor)
    }

    pub fn clear_selection(&mut self) {
        self.anchor = None;
    }

    fn selection_range(&self) -> Option<(Pos, Pos)> {
        let anchor = self.anchor?;
        if anchor == self.cursor {
            return None;
        }
        Some(if anchor < self.cursor {
            (anchor, self.cursor)
        } else {
            (self.cursor, anchor)
        })
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map_or(0, |l| l.chars().count())
    }

    fn move_cursor(&mut self, code: KeyCode, extend: bool) {
        if extend {
            if self.anchor.is_none() {
                self.anchor = Some(self.cursor);
            }
        } else {
            self.anchor = None;
        }
        let (row, col) = self.cursor;
        self.cursor = match code {
            KeyCode::Left => {
                if col > 0 {
                    (row, col - 1)
                } else if row > 0 {
                    (row - 1, self.line_len(row - 1))
                } else {
                    (row, col)
                }
            }
            KeyCode::Right => {
                if col < self.line_len(row) {
                    (row, col + 1)
                } else if row + 1 < self.lines.len() {
                    (row + 1, 0)
                } else {
                    (row, col)
                }
            }
            KeyCode::Up if row > 0 => (row - 1, col.min(self.line_len(row - 1))),
            KeyCode::Down if row + 1 < self.lines.len() => {
                (row + 1, col.min(self.line_len(row + 1)))
            }
            KeyCode::Home => (row, 0),
            KeyCode::End => (row, self.line_len(row)),
            _ => (row, col),
        };
    }

    fn insert_char(&mut self, c: char) {
        self.delete_selection();
        let (row, col) = self.cursor;
        let line = &mut self.lines[row];
        let byte = char_to_byte(line, col);
        line.insert(byte, c);
        self.cursor = (row, col + 1);
    }

    fn insert_newline(&mut self) {
        self.delete_selection();
        let (row, col) = self.cursor;
        let line = &mut self.lines[row];
        let byte = char_to_byte(line, col);
        let rest = line.split_off(byte);
        self.lines.insert(row + 1, rest);
        self.cursor = (row + 1, 0);
    }

    fn backspace(&mut self) {
        if self.has_selection() {
            self.delete_selection();
            return;
        }
        let (row, col) = self.cursor;
        if col > 0 {
            let line = &mut self.lines[row];
            let byte = char_to_byte(line, col - 1);
            line.remove(byte);
            self.cursor = (row, col - 1);
        } else if row > 0 {
            let tail = self.lines.remove(row);
            let prev_len = self.line_len(row - 1);
            self.lines[row - 1].push_str(&tail);
            self.cursor = (row - 1, prev_len);
        }
    }

    fn delete_selection(&mut self) {
        let Some(((srow, scol), (erow, ecol))) = self.selection_range() else {
            self.anchor = None;
            return;
        };
        if srow == erow {
            let line = &mut self.lines[srow];
            let sb = char_to_byte(line, scol);
            let eb = char_to_byte(line, ecol);
            line.replace_range(sb..eb, "");
        } else {
            let tail: String = {
                let end_line = &self.lines[erow];
                end_line[char_to_byte(end_line, ecol)..].to_owned()
            };
            let start_line = &mut self.lines[srow];
            let sb = char_to_byte(start_line, scol);
            start_line.truncate(sb);
            start_line.push_str(&tail);
            self.lines.drain(srow + 1..=erow);
        }
        self.cursor = (srow, scol);
        self.anchor = None;
    }

    /// Handle a key while the surface is focused. Returns true when the key
    /// was consumed.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if !self.focused || key.kind != KeyEventKind::Press {
            return false;
        }
        let extend = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert_char(c);
                true
            }
            KeyCode::Enter => {
                self.insert_newline();
                true
            }
            KeyCode::Backspace => {
                self.backspace();
                true
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down | KeyCode::Home
            | KeyCode::End => {
                self.move_cursor(key.code, extend);
                true
            }
            _ => false,
        }
    }

    pub fn render(&self, frame: &mut UiFrame<'_>, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let bounds = area.intersection(frame.area());

        if self.is_empty() {
            if let Some(placeholder) = self.placeholder.as_deref() {
                safe_set_string(
                    frame.buffer_mut(),
                    bounds,
                    area.x,
                    area.y,
                    placeholder,
                    Style::default().fg(theme::surface_placeholder_fg()),
                );
            }
        } else {
            let selection = self.selection_range();
            for (row, line) in self.lines.iter().enumerate() {
                if row as u16 >= area.height {
                    break;
                }
                let y = area.y + row as u16;
                let mut x = area.x;
                for (col, ch) in line.chars().enumerate() {
                    let selected = selection
                        .map(|(start, end)| (row, col) >= start && (row, col) < end)
                        .unwrap_or(false);
                    let style = if selected {
                        Style::default()
                            .fg(theme::surface_fg())
                            .bg(theme::surface_selection_bg())
                    } else {
                        Style::default().fg(theme::surface_fg())
                    };
                    safe_set_string(frame.buffer_mut(), bounds, x, y, &ch.to_string(), style);
                    x = x.saturating_add(1);
                }
            }
        }

        if self.focused {
            let (row, col) = self.cursor;
            let cx = area.x.saturating_add(col as u16);
            let cy = area.y.saturating_add(row as u16);
            if cx < area.x + area.width && cy < area.y + area.height {
                let under = self
                    .lines
                    .get(row)
                    .and_then(|l| l.chars().nth(col))
                    .unwrap_or(' ');
                safe_set_string(
                    frame.buffer_mut(),
                    bounds,
                    cx,
                    cy,
                    &under.to_string(),
                    Style::default().bg(theme::surface_cursor_bg()),
                );
            }
        }
    }
}

fn char_to_byte(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map(|(b, _)| b)
        .unwrap_or(line.len())
}
