use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::ListItem;
use ratatui::Frame;

use crate::models::Note;
use crate::tui::widgets::color::Palette;
use crate::tui::widgets::scroll_list::render_scroll_list;
use crate::tui::widgets::truncate_with_ellipsis;

/// First content line, used as the preview under the title
pub fn content_preview(content: &str) -> &str {
    content.lines().map(str::trim).find(|line| !line.is_empty()).unwrap_or("")
}

pub fn render_note_list(
    f: &mut Frame,
    area: Rect,
    notes: &[&Note],
    total_count: usize,
    selected: Option<usize>,
    palette: &Palette,
) {
    let max_width = area.width.saturating_sub(4) as usize;

    let items: Vec<ListItem> = notes
        .iter()
        .map(|note| {
            let pin = if note.is_pinned { "📌 " } else { "" };
            let title = format!("{}{}", pin, note.title);
            let preview = format!(
                "  {} · {}",
                note.updated_at.format("%b %-d %H:%M"),
                content_preview(&note.content)
            );
            ListItem::new(vec![
                Line::from(truncate_with_ellipsis(&title, max_width)),
                Line::from(truncate_with_ellipsis(&preview, max_width)),
            ])
        })
        .collect();

    let title = format!("Notes ({} of {})", notes.len(), total_count);
    render_scroll_list(f, area, title, items, selected, 2, palette);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_skips_blank_lines() {
        assert_eq!(content_preview("\n\n  first idea \nsecond"), "first idea");
        assert_eq!(content_preview(""), "");
    }
}
