use chrono::{Datelike, NaiveDate};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use crate::tui::widgets::color::Palette;
use crate::tui::widgets::reminder_list::reminder_item;
use crate::tui::App;
use crate::utils::month_grid;

const WEEKDAYS: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

/// How a day cell is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayMarks {
    pub is_today: bool,
    pub is_selected: bool,
    pub has_reminders: bool,
}

/// Day number, with a dot when reminders fall on it; always 4 columns wide
pub fn day_label(day: NaiveDate, has_reminders: bool) -> String {
    let dot = if has_reminders { "•" } else { " " };
    format!("{:>2}{} ", day.day(), dot)
}

fn day_style(marks: DayMarks, palette: &Palette) -> Style {
    let mut style = Style::default().fg(palette.fg);
    if marks.has_reminders {
        style = style.fg(palette.accent);
    }
    if marks.is_today {
        style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    }
    if marks.is_selected {
        style = style.fg(palette.highlight_fg).bg(palette.highlight_bg);
    }
    style
}

/// Month grid on the left, the selected day's reminders on the right
pub fn render_calendar(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(32), Constraint::Min(10)])
        .split(area);

    let selected = app.calendar.selected;
    let today = app.now.date_naive();
    let reminders = app.store.reminders();

    let mut lines = vec![
        Line::from(Span::styled(
            WEEKDAYS.iter().map(|d| format!("{:>2}  ", d)).collect::<String>(),
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];
    for week in month_grid(selected) {
        let spans: Vec<Span> = week
            .iter()
            .map(|cell| match cell {
                Some(day) => {
                    let marks = DayMarks {
                        is_today: *day == today,
                        is_selected: *day == selected,
                        has_reminders: reminders.iter().any(|r| r.time.date_naive() == *day),
                    };
                    Span::styled(day_label(*day, marks.has_reminders), day_style(marks, palette))
                }
                None => Span::raw("    "),
            })
            .collect();
        lines.push(Line::from(spans));
    }

    let grid = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(selected.format("%B %Y").to_string()),
        )
        .style(Style::default().fg(palette.fg).bg(palette.bg));
    f.render_widget(grid, panes[0]);

    let max_width = panes[1].width.saturating_sub(2) as usize;
    let day_reminders = app.store.reminders_on(selected);
    let items: Vec<ListItem> = if day_reminders.is_empty() {
        vec![ListItem::new("No reminders on this day")]
    } else {
        day_reminders
            .into_iter()
            .map(|reminder| reminder_item(reminder, app.now, max_width))
            .collect()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(selected.format("%A, %B %-d").to_string()),
        )
        .style(Style::default().fg(palette.fg).bg(palette.bg));
    f.render_widget(list, panes[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_labels_have_fixed_width() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        assert_eq!(day_label(day, false), " 3  ");
        assert_eq!(day_label(day, true), " 3• ");

        let later = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        assert_eq!(later.day(), 30);
        assert_eq!(day_label(later, true).chars().count(), 4);
    }
}
