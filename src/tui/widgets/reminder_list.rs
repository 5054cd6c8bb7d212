use chrono::{DateTime, Local};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::ListItem;
use ratatui::Frame;

use crate::models::Reminder;
use crate::store::time_until;
use crate::tui::widgets::color::{category_color, priority_color, Palette};
use crate::tui::widgets::scroll_list::render_scroll_list;
use crate::tui::widgets::truncate_with_ellipsis;

/// Countdown span, red and bold once the reminder is due
pub fn countdown_span(reminder: &Reminder, now: DateTime<Local>) -> Span<'static> {
    let countdown = time_until(reminder, now);
    if countdown.is_overdue() {
        Span::styled(
            "⚠ Overdue",
            Style::default().fg(ratatui::style::Color::Red).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::raw(format!("in {}", countdown))
    }
}

/// One reminder row: title line, then time, category and countdown
pub fn reminder_item(reminder: &Reminder, now: DateTime<Local>, max_width: usize) -> ListItem<'static> {
    ListItem::new(vec![
        Line::from(vec![
            Span::styled("● ", Style::default().fg(priority_color(reminder.priority))),
            Span::raw(truncate_with_ellipsis(&reminder.title, max_width.saturating_sub(2))),
        ]),
        Line::from(vec![
            Span::raw(format!("  {} ", reminder.time.format("%b %-d %I:%M %p"))),
            Span::styled(
                reminder.category.label(),
                Style::default().fg(category_color(reminder.category)),
            ),
            Span::raw(" "),
            countdown_span(reminder, now),
        ]),
    ])
}

pub fn render_reminder_list(
    f: &mut Frame,
    area: Rect,
    reminders: &[&Reminder],
    now: DateTime<Local>,
    selected: Option<usize>,
    palette: &Palette,
) {
    let max_width = area.width.saturating_sub(4) as usize;
    let overdue = reminders.iter().filter(|r| r.is_overdue(now)).count();

    let items: Vec<ListItem> = reminders
        .iter()
        .map(|reminder| reminder_item(reminder, now, max_width))
        .collect();

    let title = if overdue > 0 {
        format!("Reminders ({}, {} overdue)", reminders.len(), overdue)
    } else {
        format!("Reminders ({})", reminders.len())
    };
    render_scroll_list(f, area, title, items, selected, 2, palette);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemId, Priority, ReminderCategory};
    use chrono::{TimeDelta, TimeZone};

    fn reminder(time: DateTime<Local>) -> Reminder {
        Reminder {
            id: ItemId::new("r1"),
            title: "Standup".to_string(),
            description: String::new(),
            time,
            priority: Priority::High,
            is_active: true,
            category: ReminderCategory::Meeting,
        }
    }

    #[test]
    fn countdown_span_marks_overdue() {
        let now = Local.with_ymd_and_hms(2024, 5, 6, 9, 0, 0).unwrap();
        let due = reminder(now - TimeDelta::minutes(1));
        assert_eq!(countdown_span(&due, now).content, "⚠ Overdue");

        let later = reminder(now + TimeDelta::minutes(90));
        assert_eq!(countdown_span(&later, now).content, "in 1h 30m");
    }
}
