use ratatui::style::Color;

// Centralized demo palette. Small helpers so every widget pulls from the
// same place.

pub const ACCENT_RGB: (u8, u8, u8) = (200, 100, 0);
pub const ACCENT_ALT_RGB: (u8, u8, u8) = (255, 165, 0);

pub fn accent() -> Color {
    let (r, g, b) = ACCENT_RGB;
    Color::Rgb(r, g, b)
}

pub fn accent_alt() -> Color {
    let (r, g, b) = ACCENT_ALT_RGB;
    Color::Rgb(r, g, b)
}

// Pane chrome
pub fn pane_border_fg() -> Color {
    Color::DarkGray
}
pub fn pane_title_fg() -> Color {
    Color::Gray
}
pub fn pane_maximized_fg() -> Color {
    accent_alt()
}

// Guide overlay
pub fn indicator_fg() -> Color {
    accent_alt()
}
pub fn indicator_faint_fg() -> Color {
    Color::DarkGray
}
pub fn marker_fg() -> Color {
    accent()
}

// Status line
pub fn status_bg() -> Color {
    Color::DarkGray
}
pub fn status_fg() -> Color {
    Color::White
}

// Help overlay
pub fn help_bg() -> Color {
    Color::Black
}
pub fn help_fg() -> Color {
    Color::White
}
