pub mod analytics;
pub mod calendar;
pub mod color;
pub mod filters_box;
pub mod form;
pub mod help;
pub mod input;
pub mod item_view;
pub mod note_list;
pub mod overview;
pub mod reminder_list;
pub mod scroll_list;
pub mod status_bar;
pub mod tabs;
pub mod tags;
pub mod task_list;

/// Cut `text` to `max_width` characters, ending with "..." when shortened
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.chars().count() <= max_width {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_width.saturating_sub(3)).collect();
    kept + "..."
}

#[cfg(test)]
mod tests {
    use super::truncate_with_ellipsis;

    #[test]
    fn truncates_by_characters() {
        assert_eq!(truncate_with_ellipsis("short", 10), "short");
        assert_eq!(truncate_with_ellipsis("Quarterly report", 10), "Quarter...");
        assert_eq!(truncate_with_ellipsis("éééééé", 5), "éé...");
    }
}
