use ratatui::style::Color;

use crate::config::Theme;
use crate::models::{Priority, ReminderCategory, TaskStatus};

const NAMED: &[(&str, Color)] = &[
    ("black", Color::Black),
    ("red", Color::Red),
    ("green", Color::Green),
    ("yellow", Color::Yellow),
    ("blue", Color::Blue),
    ("magenta", Color::Magenta),
    ("cyan", Color::Cyan),
    ("white", Color::White),
    ("gray", Color::Gray),
    ("darkgray", Color::DarkGray),
    ("lightred", Color::LightRed),
    ("lightgreen", Color::LightGreen),
    ("lightyellow", Color::LightYellow),
    ("lightblue", Color::LightBlue),
    ("lightmagenta", Color::LightMagenta),
    ("lightcyan", Color::LightCyan),
];

/// Parse a theme color: a named color (`grey` spellings accepted), `#RRGGBB` or `#RGB`.
/// Unknown values fall back to white.
pub fn parse_color(color_str: &str) -> Color {
    let s = color_str.trim().to_lowercase().replace("grey", "gray");

    if let Some((_, color)) = NAMED.iter().find(|(name, _)| *name == s) {
        return *color;
    }
    if s == "reset" || s == "default" {
        return Color::Reset;
    }
    s.strip_prefix('#').and_then(parse_hex).unwrap_or(Color::White)
}

fn parse_hex(hex: &str) -> Option<Color> {
    let channel = |range: std::ops::Range<usize>| -> Option<u8> {
        u8::from_str_radix(hex.get(range)?, 16).ok()
    };
    match hex.len() {
        6 => Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        3 => {
            let (r, g, b) = (channel(0..1)?, channel(1..2)?, channel(2..3)?);
            Some(Color::Rgb(r * 17, g * 17, b * 17))
        }
        _ => None,
    }
}

/// Inverse of `parse_color` for named and RGB colors
pub fn format_color_for_display(color: &Color) -> String {
    match color {
        Color::Rgb(r, g, b) => format!("#{:02X}{:02X}{:02X}", r, g, b),
        Color::Reset => "reset".to_string(),
        Color::Indexed(i) => format!("indexed({})", i),
        other => NAMED
            .iter()
            .find(|(_, named)| named == other)
            .map(|(name, _)| name.to_string())
            .unwrap_or_else(|| "white".to_string()),
    }
}

/// Approximate sRGB components for terminal palette colors
fn approximate_rgb(color: Color) -> (f64, f64, f64) {
    match color {
        Color::Rgb(r, g, b) => (r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0),
        Color::Black => (0.0, 0.0, 0.0),
        Color::Red => (0.8, 0.0, 0.0),
        Color::Green => (0.0, 0.8, 0.0),
        Color::Yellow => (0.8, 0.8, 0.0),
        Color::Blue => (0.0, 0.0, 0.8),
        Color::Magenta => (0.8, 0.0, 0.8),
        Color::Cyan => (0.0, 0.8, 0.8),
        Color::White | Color::Gray => (0.9, 0.9, 0.9),
        Color::DarkGray => (0.33, 0.33, 0.33),
        Color::LightRed => (1.0, 0.4, 0.4),
        Color::LightGreen => (0.4, 1.0, 0.4),
        Color::LightYellow => (1.0, 1.0, 0.4),
        Color::LightBlue => (0.4, 0.4, 1.0),
        Color::LightMagenta => (1.0, 0.4, 1.0),
        Color::LightCyan => (0.4, 1.0, 1.0),
        Color::Indexed(_) | Color::Reset => (0.5, 0.5, 0.5),
    }
}

/// WCAG relative luminance, 0.0 (dark) to 1.0 (light)
fn relative_luminance(color: Color) -> f64 {
    let linear = |c: f64| {
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    let (r, g, b) = approximate_rgb(color);
    0.2126 * linear(r) + 0.7152 * linear(g) + 0.0722 * linear(b)
}

/// Black text on light backgrounds, white on dark ones
pub fn get_contrast_text_color(background: Color) -> Color {
    if relative_luminance(background) < 0.4 {
        Color::White
    } else {
        Color::Black
    }
}

/// Theme strings resolved to terminal colors once per frame
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub highlight_bg: Color,
    pub highlight_fg: Color,
    pub tab_bg: Color,
    pub accent: Color,
}

impl Palette {
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            fg: parse_color(&theme.fg),
            bg: parse_color(&theme.bg),
            highlight_bg: parse_color(&theme.highlight_bg),
            highlight_fg: parse_color(&theme.highlight_fg),
            tab_bg: parse_color(&theme.tab_bg),
            accent: parse_color(&theme.accent),
        }
    }
}

pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Green,
    }
}

pub fn status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::Pending => Color::Gray,
        TaskStatus::InProgress => Color::Cyan,
        TaskStatus::Completed => Color::Green,
    }
}

pub fn category_color(category: ReminderCategory) -> Color {
    match category {
        ReminderCategory::Meeting => Color::Blue,
        ReminderCategory::Task => Color::Magenta,
        ReminderCategory::Personal => Color::Green,
        ReminderCategory::Work => Color::Yellow,
    }
}
