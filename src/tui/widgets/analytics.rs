use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{BarChart, Block, Borders, Gauge, Paragraph};
use ratatui::Frame;

use crate::models::{Priority, TaskStatus, WorkspaceSummary};
use crate::tui::widgets::color::{status_color, Palette};
use crate::tui::App;

/// Summary counts shown next to the charts
pub fn summary_lines(summary: &WorkspaceSummary) -> Vec<String> {
    vec![
        format!("Tasks: {}", summary.tasks.total()),
        format!("Completion rate: {}", summary.completion_rate),
        format!("Notes: {} ({} pinned)", summary.notes_total, summary.notes_pinned),
        format!(
            "Reminders: {} active, {} overdue",
            summary.reminders_active, summary.reminders_overdue
        ),
    ]
}

/// Status gauges on the left; priority bars and summary counts on the right
pub fn render_analytics(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let summary = app.store.summary(app.now);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_distribution(f, columns[0], &summary, palette);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(6)])
        .split(columns[1]);

    let bars: Vec<(&str, u64)> = Priority::ALL
        .iter()
        .map(|p| (p.label(), summary.priorities.count(*p) as u64))
        .collect();
    let chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title("Tasks by Priority"))
        .data(bars.as_slice())
        .bar_width(8)
        .bar_gap(2)
        .bar_style(Style::default().fg(palette.accent))
        .value_style(Style::default().fg(palette.bg).bg(palette.accent).add_modifier(Modifier::BOLD))
        .style(Style::default().fg(palette.fg).bg(palette.bg));
    f.render_widget(chart, right[0]);

    let lines: Vec<Line> = summary_lines(&summary).into_iter().map(Line::from).collect();
    let counts = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Summary"))
        .style(Style::default().fg(palette.fg).bg(palette.bg));
    f.render_widget(counts, right[1]);
}

fn render_distribution(f: &mut Frame, area: Rect, summary: &WorkspaceSummary, palette: &Palette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Task Distribution")
        .style(Style::default().fg(palette.fg).bg(palette.bg));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    for (status, row) in TaskStatus::ALL.iter().zip(rows.iter()) {
        let percent = summary.distribution.percent(*status).min(100) as u16;
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(status.label()))
            .gauge_style(Style::default().fg(status_color(*status)).bg(palette.bg))
            .percent(percent)
            .label(format!("{}% ({})", percent, summary.tasks.count(*status)));
        f.render_widget(gauge, *row);
    }
}
