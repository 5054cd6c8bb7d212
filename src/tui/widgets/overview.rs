use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use crate::models::{Task, TaskStatus};
use crate::tui::widgets::color::{status_color, Palette};
use crate::tui::widgets::reminder_list::reminder_item;
use crate::tui::widgets::task_list::task_headline;
use crate::tui::widgets::truncate_with_ellipsis;
use crate::tui::App;

const RECENT_ITEMS: usize = 5;

fn stat_card<'a>(label: &'a str, value: String, palette: &Palette) -> Paragraph<'a> {
    Paragraph::new(vec![
        Line::from(Span::styled(value, Style::default().fg(palette.accent).add_modifier(Modifier::BOLD))),
        Line::from(label),
    ])
    .alignment(ratatui::layout::Alignment::Center)
    .block(Block::default().borders(Borders::ALL))
    .style(Style::default().fg(palette.fg).bg(palette.bg))
}

/// Stat cards on top; recent tasks, upcoming reminders and notes below
pub fn render_overview(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(area);

    let stats = app.store.task_stats();
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 5); 5])
        .split(rows[0]);
    let values = [
        ("Total tasks", stats.total().to_string()),
        ("Pending", stats.count(TaskStatus::Pending).to_string()),
        ("In progress", stats.count(TaskStatus::InProgress).to_string()),
        ("Completed", stats.count(TaskStatus::Completed).to_string()),
        ("Completion", app.store.completion_rate().to_string()),
    ];
    for ((label, value), card_area) in values.into_iter().zip(cards.iter()) {
        f.render_widget(stat_card(label, value, palette), *card_area);
    }

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(40), Constraint::Percentage(25)])
        .split(rows[1]);

    render_recent_tasks(f, panes[0], app, palette);
    render_upcoming_reminders(f, panes[1], app, palette);
    render_notes(f, panes[2], app, palette);
}

/// Newest tasks first
pub fn recent_tasks(tasks: &[Task]) -> Vec<&Task> {
    tasks.iter().rev().take(RECENT_ITEMS).collect()
}

fn render_recent_tasks(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let max_width = area.width.saturating_sub(2) as usize;
    let items: Vec<ListItem> = recent_tasks(app.store.tasks())
        .into_iter()
        .map(|task| {
            ListItem::new(task_headline(task, max_width))
                .style(Style::default().fg(status_color(task.status)))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Recent Tasks"))
        .style(Style::default().fg(palette.fg).bg(palette.bg));
    f.render_widget(list, area);
}

fn render_upcoming_reminders(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let max_width = area.width.saturating_sub(2) as usize;
    let items: Vec<ListItem> = app
        .store
        .active_reminders(app.config.reminder_preview_limit)
        .into_iter()
        .map(|reminder| reminder_item(reminder, app.now, max_width))
        .collect();

    let overdue = app.store.overdue_count(app.now);
    let title = if overdue > 0 {
        format!("Upcoming Reminders ({} overdue)", overdue)
    } else {
        "Upcoming Reminders".to_string()
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(Style::default().fg(palette.fg).bg(palette.bg));
    f.render_widget(list, area);
}

fn render_notes(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let max_width = area.width.saturating_sub(2) as usize;
    // Pinned first, then most recently updated
    let items: Vec<ListItem> = app
        .store
        .sorted_notes("")
        .into_iter()
        .take(RECENT_ITEMS)
        .map(|note| {
            let pin = if note.is_pinned { "📌 " } else { "" };
            ListItem::new(truncate_with_ellipsis(&format!("{}{}", pin, note.title), max_width))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Notes"))
        .style(Style::default().fg(palette.fg).bg(palette.bg));
    f.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::models::TaskInput;
    use crate::store::Store;
    use chrono::{Local, TimeZone};

    #[test]
    fn recent_tasks_lists_newest_first() {
        let clock = ManualClock::new(Local.with_ymd_and_hms(2024, 4, 2, 9, 0, 0).unwrap());
        let mut store = Store::with_clock(Box::new(clock));
        for n in 1..=7 {
            store.create_task(TaskInput {
                title: format!("task {}", n),
                ..Default::default()
            });
        }

        let titles: Vec<&str> = recent_tasks(store.tasks()).iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["task 7", "task 6", "task 5", "task 4", "task 3"]);
    }
}
