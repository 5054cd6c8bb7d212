use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::widgets::color::{get_contrast_text_color, Palette};
use crate::tui::widgets::truncate_with_ellipsis;

const SEPARATOR: &str = " • ";
const ELLIPSIS: &str = "...";

/// Join as many hints as fit in `max_width`; "..." marks dropped hints
pub fn fit_key_hints(key_hints: &[String], max_width: usize) -> String {
    let mut text = String::new();

    for hint in key_hints {
        let candidate = if text.is_empty() {
            hint.clone()
        } else {
            format!("{}{}{}", text, SEPARATOR, hint)
        };

        if candidate.chars().count() > max_width {
            if text.is_empty() {
                return truncate_with_ellipsis(hint, max_width);
            }
            let room = max_width.saturating_sub(ELLIPSIS.len());
            if text.chars().count() > room {
                text = text.chars().take(room).collect();
            }
            text.push_str(ELLIPSIS);
            return text;
        }
        text = candidate;
    }

    text
}

/// One line: the transient message when present, otherwise key hints
pub fn render_status_bar(
    f: &mut Frame,
    area: Rect,
    message: Option<&str>,
    key_hints: &[String],
    palette: &Palette,
) {
    let max_width = area.width as usize;

    let (content, style) = match message {
        Some(msg) => (
            truncate_with_ellipsis(msg, max_width),
            Style::default()
                .fg(get_contrast_text_color(palette.highlight_bg))
                .bg(palette.highlight_bg)
                .add_modifier(Modifier::BOLD),
        ),
        None => (
            fit_key_hints(key_hints, max_width),
            Style::default().fg(palette.fg).bg(palette.bg),
        ),
    };

    f.render_widget(Paragraph::new(content).style(style), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hints() -> Vec<String> {
        vec!["q: Quit".to_string(), "n: New".to_string(), "F1: Help".to_string()]
    }

    #[test]
    fn all_hints_fit_on_wide_bar() {
        assert_eq!(fit_key_hints(&hints(), 80), "q: Quit • n: New • F1: Help");
    }

    #[test]
    fn overflow_ends_with_ellipsis() {
        let text = fit_key_hints(&hints(), 20);
        assert_eq!(text, "q: Quit • n: New...");
        assert!(text.chars().count() <= 20);
    }

    #[test]
    fn first_hint_alone_is_truncated() {
        assert_eq!(fit_key_hints(&hints(), 5), "q:...");
    }
}
