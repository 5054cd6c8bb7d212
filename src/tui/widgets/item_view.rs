use chrono::{DateTime, Local};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::models::{Note, Reminder, Task};
use crate::tui::widgets::color::{category_color, priority_color, status_color, Palette};
use crate::tui::widgets::reminder_list::countdown_span;
use crate::tui::widgets::tags::tags_or_placeholder;

/// The item shown in the detail pane
pub enum SelectedItem<'a> {
    Task(&'a Task),
    Note(&'a Note),
    Reminder(&'a Reminder),
}

fn field<'a>(label: &'a str, value: Span<'a>) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{}: ", label), Style::default().add_modifier(Modifier::BOLD)),
        value,
    ])
}

fn body(text: &str) -> Vec<Line<'_>> {
    text.lines().map(Line::from).collect()
}

pub fn task_lines(task: &Task) -> Vec<Line<'_>> {
    let mut lines = vec![
        field("Title", Span::raw(task.title.as_str())),
        field(
            "Status",
            Span::styled(task.status.label(), Style::default().fg(status_color(task.status))),
        ),
        field(
            "Priority",
            Span::styled(task.priority.label(), Style::default().fg(priority_color(task.priority))),
        ),
        field("Due", Span::raw(task.due_date_label())),
        field("Tags", Span::raw(tags_or_placeholder(&task.tags))),
    ];
    if !task.description.is_empty() {
        lines.push(Line::default());
        lines.extend(body(&task.description));
    }
    lines
}

pub fn note_lines(note: &Note) -> Vec<Line<'_>> {
    let mut lines = vec![
        field("Title", Span::raw(note.title.as_str())),
        field("Pinned", Span::raw(if note.is_pinned { "yes" } else { "no" })),
        field("Tags", Span::raw(tags_or_placeholder(&note.tags))),
        field("Created", Span::raw(note.created_at.format("%Y-%m-%d %H:%M").to_string())),
        field("Updated", Span::raw(note.updated_at.format("%Y-%m-%d %H:%M").to_string())),
        Line::default(),
    ];
    lines.extend(body(&note.content));
    lines
}

pub fn reminder_lines(reminder: &Reminder, now: DateTime<Local>) -> Vec<Line<'_>> {
    let mut lines = vec![
        field("Title", Span::raw(reminder.title.as_str())),
        field("When", Span::raw(reminder.time.format("%A, %B %-d, %Y %I:%M %p").to_string())),
        field("Countdown", countdown_span(reminder, now)),
        field(
            "Priority",
            Span::styled(
                reminder.priority.label(),
                Style::default().fg(priority_color(reminder.priority)),
            ),
        ),
        field(
            "Category",
            Span::styled(
                reminder.category.label(),
                Style::default().fg(category_color(reminder.category)),
            ),
        ),
    ];
    if !reminder.description.is_empty() {
        lines.push(Line::default());
        lines.extend(body(&reminder.description));
    }
    lines
}

pub fn render_item_view(
    f: &mut Frame,
    area: Rect,
    item: SelectedItem,
    now: DateTime<Local>,
    palette: &Palette,
) {
    if area.width < 2 || area.height < 2 {
        return;
    }

    let (title, lines) = match item {
        SelectedItem::Task(task) => ("Task", task_lines(task)),
        SelectedItem::Note(note) => ("Note", note_lines(note)),
        SelectedItem::Reminder(reminder) => ("Reminder", reminder_lines(reminder, now)),
    };

    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(Style::default().fg(palette.fg).bg(palette.bg))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

/// Main pane when nothing is selected
pub fn render_placeholder(f: &mut Frame, area: Rect, message: &str, palette: &Palette) {
    let paragraph = Paragraph::new(message)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(palette.fg).bg(palette.bg))
        .alignment(ratatui::layout::Alignment::Center);
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemId, Priority, TaskStatus};

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn task_detail_shows_defaults() {
        let task = Task {
            id: ItemId::new("1"),
            title: "Buy milk".to_string(),
            description: "2 litres\nsemi-skimmed".to_string(),
            priority: Priority::Medium,
            status: TaskStatus::InProgress,
            due_date: None,
            tags: Vec::new(),
        };
        let lines: Vec<String> = task_lines(&task).iter().map(plain).collect();
        assert_eq!(lines[1], "Status: In Progress");
        assert_eq!(lines[3], "Due: No date");
        assert_eq!(lines[4], "Tags: [Untagged]");
        assert_eq!(lines[6], "2 litres");
        assert_eq!(lines.len(), 8);
    }
}
