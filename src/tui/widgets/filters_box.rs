use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::tui::widgets::color::Palette;

pub fn render_filters_box(f: &mut Frame, area: Rect, title: &str, summary: &str, palette: &Palette) {
    let paragraph = Paragraph::new(summary)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string())
                .style(Style::default().fg(palette.fg).bg(palette.bg)),
        )
        .style(Style::default().fg(palette.fg))
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}
