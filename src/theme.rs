use ratatui::style::Color;

// Centralized theme colors. Kept as small helpers so surface and balloon
// styling stays in one place.

// Editable surface
pub fn surface_fg() -> Color {
    Color::White
}
pub fn surface_placeholder_fg() -> Color {
    Color::DarkGray
}
pub fn surface_selection_bg() -> Color {
    Color::Blue
}
pub fn surface_cursor_bg() -> Color {
    Color::Gray
}

// Balloon toolbar
pub fn balloon_fg() -> Color {
    Color::White
}
pub fn balloon_border() -> Color {
    Color::DarkGray
}
pub fn balloon_border_focused() -> Color {
    Color::Yellow
}
pub fn balloon_selected_bg() -> Color {
    Color::Gray
}
pub fn balloon_selected_fg() -> Color {
    Color::Black
}

// Status line
pub fn status_fg() -> Color {
    Color::DarkGray
}
