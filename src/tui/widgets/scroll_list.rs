use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{
    Block, Borders, List, ListItem, ListState, Scrollbar, ScrollbarOrientation, ScrollbarState,
};
use ratatui::Frame;

use crate::tui::widgets::color::Palette;

/// Bordered list with a highlight bar and a scrollbar once items overflow.
/// `lines_per_item` is the height of each `ListItem`.
pub fn render_scroll_list(
    f: &mut Frame,
    area: Rect,
    title: String,
    items: Vec<ListItem>,
    selected: Option<usize>,
    lines_per_item: usize,
    palette: &Palette,
) {
    let list_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);
    let list_area = list_areas[0];
    let scrollbar_area = list_areas[1];

    let total_items = items.len();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(Style::default().fg(palette.fg).bg(palette.bg))
        .highlight_style(Style::default().fg(palette.highlight_fg).bg(palette.highlight_bg));

    let mut list_state = ListState::default().with_selected(selected);
    f.render_stateful_widget(list, list_area, &mut list_state);

    let inner_height = list_area.height.saturating_sub(2) as usize;
    let visible_items = inner_height / lines_per_item.max(1);
    if total_items <= visible_items || visible_items == 0 || scrollbar_area.width == 0 {
        return;
    }

    let scrollbar_inner_area = Rect::new(
        scrollbar_area.x,
        list_area.y + 1,
        scrollbar_area.width,
        list_area.height.saturating_sub(2),
    );
    let selected_index = selected.unwrap_or(0);
    let scroll_position = selected_index.saturating_sub(visible_items - 1);

    let mut scrollbar_state = ScrollbarState::new(total_items)
        .viewport_content_length(visible_items)
        .position(scroll_position);
    let scrollbar = Scrollbar::default()
        .orientation(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("↑"))
        .end_symbol(Some("↓"))
        .track_symbol(Some("│"))
        .thumb_symbol("█");

    f.render_stateful_widget(scrollbar, scrollbar_inner_area, &mut scrollbar_state);
}
