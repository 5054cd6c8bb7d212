use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::tui::app::{ItemForm, NoteField, NoteForm, ReminderField, ReminderForm, TaskField, TaskForm};
use crate::tui::widgets::color::Palette;
use crate::tui::widgets::input::LineInput;

/// One boxed field of a form
pub struct FieldRow {
    pub label: &'static str,
    pub value: String,
    pub active: bool,
    pub multi_line: bool,
}

impl FieldRow {
    fn text(label: &'static str, input: &LineInput, active: bool) -> Self {
        Self {
            label,
            value: if active { input.display_with_cursor() } else { input.text().to_string() },
            active,
            multi_line: false,
        }
    }

    fn choice(label: &'static str, value: &str, active: bool) -> Self {
        Self {
            label,
            value: if active { format!("◀ {} ▶", value) } else { value.to_string() },
            active,
            multi_line: false,
        }
    }
}

pub fn task_rows(form: &TaskForm) -> Vec<FieldRow> {
    let at = |field: TaskField| form.current_field == field;
    vec![
        FieldRow::text("Title", &form.title, at(TaskField::Title)),
        FieldRow::text("Description", &form.description, at(TaskField::Description)),
        FieldRow::choice("Priority", form.priority.label(), at(TaskField::Priority)),
        FieldRow::text("Due Date (free text)", &form.due_date, at(TaskField::DueDate)),
        FieldRow::text("Tags (comma-separated)", &form.tags, at(TaskField::Tags)),
    ]
}

pub fn note_rows(form: &NoteForm) -> Vec<FieldRow> {
    let at = |field: NoteField| form.current_field == field;
    let mut content = FieldRow::text("Content", &form.content, at(NoteField::Content));
    content.multi_line = true;
    vec![
        FieldRow::text("Title", &form.title, at(NoteField::Title)),
        FieldRow::text("Tags (comma-separated)", &form.tags, at(NoteField::Tags)),
        content,
    ]
}

pub fn reminder_rows(form: &ReminderForm) -> Vec<FieldRow> {
    let at = |field: ReminderField| form.current_field == field;
    vec![
        FieldRow::text("Title", &form.title, at(ReminderField::Title)),
        FieldRow::text("Description", &form.description, at(ReminderField::Description)),
        FieldRow::text("Time (YYYY-MM-DD HH:MM)", &form.time, at(ReminderField::Time)),
        FieldRow::choice("Priority", form.priority.label(), at(ReminderField::Priority)),
        FieldRow::choice("Category", form.category.label(), at(ReminderField::Category)),
    ]
}

/// First visible line so that the cursor line stays in a `height`-line viewport
fn scroll_for_cursor(value: &str, height: usize) -> u16 {
    let cursor_line = value
        .lines()
        .position(|line| line.contains('▏'))
        .unwrap_or(0);
    cursor_line.saturating_sub(height.saturating_sub(1)) as u16
}

pub fn render_form(f: &mut Frame, area: Rect, form: &ItemForm, palette: &Palette) {
    if area.width < 2 || area.height < 2 {
        return;
    }

    let (title, rows) = match form {
        ItemForm::Task(form) => ("New Task", task_rows(form)),
        ItemForm::Note(form) if form.editing_note_id.is_some() => ("Edit Note", note_rows(form)),
        ItemForm::Note(form) => ("New Note", note_rows(form)),
        ItemForm::Reminder(form) => ("New Reminder", reminder_rows(form)),
    };

    let outer = Block::default()
        .borders(Borders::ALL)
        .title(format!("{} (Ctrl+s save, Esc cancel)", title))
        .style(Style::default().fg(palette.fg).bg(palette.bg));
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    // Single-line fields: 3 lines each (border top + content + border bottom)
    let constraints: Vec<Constraint> = rows
        .iter()
        .map(|row| if row.multi_line { Constraint::Min(5) } else { Constraint::Length(3) })
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();
    let field_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let highlight_style = Style::default().fg(palette.highlight_fg).bg(palette.highlight_bg);
    let inactive_style = Style::default().fg(palette.fg).add_modifier(Modifier::DIM);

    for (row, field_area) in rows.iter().zip(field_areas.iter()) {
        let style = if row.active { highlight_style } else { inactive_style };
        let text = Text::from(row.value.lines().map(Line::from).collect::<Vec<_>>());
        let scroll = if row.multi_line {
            scroll_for_cursor(&row.value, field_area.height.saturating_sub(2) as usize)
        } else {
            0
        };

        let paragraph = Paragraph::new(text)
            .style(style)
            .block(Block::default().borders(Borders::ALL).title(row.label))
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0));
        f.render_widget(paragraph, *field_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    #[test]
    fn only_the_focused_field_shows_a_cursor() {
        let mut form = TaskForm::new();
        form.title = LineInput::with_text("Draft");
        let rows = task_rows(&form);
        assert_eq!(rows[0].value, "Draft▏");
        assert!(rows[0].active);
        assert_eq!(rows[2].value, "Medium");

        form.current_field = TaskField::Priority;
        let rows = task_rows(&form);
        assert_eq!(rows[0].value, "Draft");
        assert_eq!(rows[2].value, "◀ Medium ▶");
    }

    #[test]
    fn reminder_form_prefills_time() {
        let now = Local.with_ymd_and_hms(2024, 2, 29, 23, 30, 0).unwrap();
        let rows = reminder_rows(&ReminderForm::new(now));
        assert_eq!(rows[2].value, "2024-03-01 00:30");
        assert_eq!(rows[4].value, "Task");
    }

    #[test]
    fn multi_line_scroll_follows_cursor() {
        assert_eq!(scroll_for_cursor("a\nb\nc▏", 5), 0);
        assert_eq!(scroll_for_cursor("1\n2\n3\n4\n5\n6▏", 3), 3);
    }
}
