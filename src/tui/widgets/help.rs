use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::config::KeyBindings;
use crate::tui::widgets::color::Palette;
use crate::utils::format_key_binding_for_display as key;

pub fn render_help(f: &mut Frame, area: Rect, bindings: &KeyBindings, palette: &Palette) {
    let popup_area = popup_area(area, 60, 80);

    // Clear first so the dashboard does not show through
    f.render_widget(Clear, popup_area);

    let paragraph = Paragraph::new(build_help_text(bindings))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help - Key Bindings")
                .title_alignment(Alignment::Center)
                .style(Style::default().fg(palette.fg).bg(palette.bg)),
        )
        .style(Style::default().fg(palette.fg).bg(palette.bg))
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, popup_area);
}

/// Centered rect taking the given percentage of `area`
pub fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

pub fn build_help_text(b: &KeyBindings) -> String {
    let mut text = String::new();

    text.push_str("Navigation:\n");
    text.push_str(&format!("  {} / {}: Switch tabs\n", key(&b.tab_left), key(&b.tab_right)));
    text.push_str("  1-6: Jump to tab\n");
    text.push_str(&format!("  {} / {}: Move selection\n", key(&b.list_up), key(&b.list_down)));
    text.push('\n');

    text.push_str("Items:\n");
    text.push_str(&format!("  {}: New task, note or reminder\n", key(&b.new)));
    text.push_str(&format!("  {}: Edit selected note\n", key(&b.edit)));
    text.push_str(&format!("  {}: Delete item / complete reminder\n", key(&b.delete)));
    text.push_str(&format!("  {}: Cycle task status\n", key(&b.cycle_task_status)));
    text.push_str(&format!("  {}: Cycle status filter (Tasks)\n", key(&b.filter)));
    text.push_str(&format!("  {}: Pin/unpin note\n", key(&b.toggle_pin)));
    text.push_str(&format!("  {}: Search (Tasks, Notes)\n", key(&b.search)));
    text.push('\n');

    text.push_str("Forms:\n");
    text.push_str("  Tab / Shift+Tab: Next/previous field\n");
    text.push_str("  Left / Right: Change priority or category\n");
    text.push_str("  Enter: Next field, save on last field\n");
    text.push_str(&format!("  {}: Save\n", key(&b.save)));
    text.push_str("  Esc: Cancel\n");
    text.push('\n');

    text.push_str("Calendar:\n");
    text.push_str(&format!("  {} / {}: Previous/next month\n", key(&b.prev_month), key(&b.next_month)));
    text.push_str(&format!("  {} / {}: Previous/next day\n", key(&b.list_up), key(&b.list_down)));
    text.push_str("  Up / Down: Previous/next week\n");
    text.push_str("  t: Today\n");
    text.push('\n');

    text.push_str("General:\n");
    text.push_str(&format!("  {}: Quit\n", key(&b.quit)));
    text.push_str(&format!("  {}: Show/hide help\n", key(&b.help)));

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_lists_configured_bindings() {
        let mut bindings = KeyBindings::default();
        bindings.quit = "x".to_string();
        let text = build_help_text(&bindings);
        assert!(text.contains("  x: Quit"));
        assert!(text.contains("F1: Show/hide help"));
        assert!(text.contains("[ / ]: Previous/next month"));
    }
}
