use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::ListItem;
use ratatui::Frame;

use crate::models::{Task, TaskStatus};
use crate::tui::widgets::color::{priority_color, Palette};
use crate::tui::widgets::scroll_list::render_scroll_list;
use crate::tui::widgets::tags::tags_or_placeholder;
use crate::tui::widgets::truncate_with_ellipsis;

pub fn status_indicator(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "○",
        TaskStatus::InProgress => "◐",
        TaskStatus::Completed => "✓",
    }
}

/// First line of a task row: status mark, title and due date
pub fn task_headline(task: &Task, max_width: usize) -> String {
    let due = task
        .due_date
        .as_ref()
        .map(|d| format!(" [{}]", d))
        .unwrap_or_default();
    let line = format!("{} {}{}", status_indicator(task.status), task.title, due);
    truncate_with_ellipsis(&line, max_width)
}

/// Two lines per task: headline, then priority and tags
pub fn render_task_list(
    f: &mut Frame,
    area: Rect,
    tasks: &[&Task],
    total_count: usize,
    selected: Option<usize>,
    palette: &Palette,
) {
    // 2 for borders, 1 for scrollbar, 1 padding
    let max_width = area.width.saturating_sub(4) as usize;

    let items: Vec<ListItem> = tasks
        .iter()
        .map(|task| {
            let tags = truncate_with_ellipsis(
                &tags_or_placeholder(&task.tags),
                max_width.saturating_sub(task.priority.label().len() + 3),
            );
            ListItem::new(vec![
                Line::from(task_headline(task, max_width)),
                Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        task.priority.label(),
                        Style::default().fg(priority_color(task.priority)),
                    ),
                    Span::raw(format!(" {}", tags)),
                ]),
            ])
        })
        .collect();

    let title = format!("Tasks ({} of {})", tasks.len(), total_count);
    render_scroll_list(f, area, title, items, selected, 2, palette);
}
