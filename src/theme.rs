use ratatui::style::Color;

// Centralized theme colors, kept as small helpers so surfaces never hardcode
// a palette.

pub fn accent() -> Color {
    Color::Blue
}

pub fn success() -> Color {
    Color::Green
}

// Stack panel
pub fn panel_border() -> Color {
    Color::DarkGray
}
pub fn panel_focused_border() -> Color {
    success()
}
pub fn count_badge_fg() -> Color {
    Color::White
}
pub fn count_badge_bg() -> Color {
    accent()
}
pub fn hidden_marker_fg() -> Color {
    Color::DarkGray
}
pub fn drop_indicator_fg() -> Color {
    accent()
}
pub fn dragging_fg() -> Color {
    Color::Yellow
}

// Buttons
pub fn button_fg() -> Color {
    Color::White
}
pub fn button_bg() -> Color {
    accent()
}
pub fn clear_button_bg() -> Color {
    Color::Red
}
pub fn button_disabled_fg() -> Color {
    Color::DarkGray
}

// Status line
pub fn status_active_fg() -> Color {
    success()
}
pub fn status_idle_fg() -> Color {
    Color::DarkGray
}

// Editor
pub fn editor_border() -> Color {
    accent()
}
pub fn editor_dim_border() -> Color {
    Color::DarkGray
}
pub fn editor_mode_fg() -> Color {
    Color::Magenta
}
