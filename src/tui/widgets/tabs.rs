use chrono::{DateTime, Local};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Tabs};
use ratatui::Frame;

use crate::tui::app::Tab;
use crate::tui::widgets::color::{get_contrast_text_color, Palette};

/// Header clock, e.g. "Tuesday, April 2, 2024 09:00:00 AM"
pub fn format_clock(now: DateTime<Local>) -> String {
    now.format("%A, %B %-d, %Y %I:%M:%S %p").to_string()
}

/// Tab bar on the left, live clock on the right
pub fn render_header(f: &mut Frame, area: Rect, current_tab: Tab, now: DateTime<Local>, palette: &Palette) {
    let clock = format_clock(now);
    let clock_width = (clock.chars().count() as u16 + 1).min(area.width / 2);

    let parts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(clock_width)])
        .split(area);

    // Unselected tabs sit on tab_bg, so their text contrasts with it
    let tab_fg = get_contrast_text_color(palette.tab_bg);
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            Line::from(vec![
                Span::styled(" ", Style::default().bg(palette.tab_bg)),
                Span::styled(
                    format!("{} {}", i + 1, tab.title()),
                    Style::default().fg(tab_fg).bg(palette.tab_bg),
                ),
                Span::styled(" ", Style::default().bg(palette.tab_bg)),
            ])
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(current_tab.index())
        .style(Style::default().fg(palette.fg).bg(palette.bg))
        .highlight_style(
            Style::default()
                .fg(get_contrast_text_color(palette.highlight_bg))
                .bg(palette.highlight_bg)
                .add_modifier(Modifier::BOLD),
        )
        .divider(" ")
        .padding("", "");
    f.render_widget(tabs, parts[0]);

    let clock = Paragraph::new(clock)
        .style(Style::default().fg(palette.accent).bg(palette.bg))
        .alignment(ratatui::layout::Alignment::Right);
    f.render_widget(clock, parts[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn clock_uses_twelve_hour_time() {
        let morning = Local.with_ymd_and_hms(2024, 4, 2, 9, 0, 0).unwrap();
        assert_eq!(format_clock(morning), "Tuesday, April 2, 2024 09:00:00 AM");

        let evening = Local.with_ymd_and_hms(2024, 12, 25, 21, 5, 7).unwrap();
        assert_eq!(format_clock(evening), "Wednesday, December 25, 2024 09:05:07 PM");
    }
}
