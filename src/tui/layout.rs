use ratatui::layout::{Constraint, Direction, Layout as RatLayout, Rect};

pub struct Layout {
    pub inner_area: Rect, // Area inside the outer border
    pub tabs_area: Rect,
    /// Whole area between header and filters; used by full-width tabs
    pub content_area: Rect,
    pub sidebar_area: Rect,
    pub main_area: Rect,
    pub filters_area: Rect,
    pub status_area: Rect,
}

impl Layout {
    /// Minimum terminal dimensions (inside the outer border)
    /// Height: 1 tabs + 7 content (calendar grid) + 3 filters + 1 status
    pub const MIN_WIDTH: u16 = 60;
    pub const MIN_HEIGHT: u16 = 12;

    pub fn calculate(size: Rect, sidebar_width_percent: u16) -> Self {
        let width = size.width.max(Self::MIN_WIDTH + 2);
        let height = size.height.max(Self::MIN_HEIGHT + 2);
        let size = Rect::new(size.x, size.y, width, height);

        let inner_area = Rect::new(
            size.x + 1,
            size.y + 1,
            size.width.saturating_sub(2),
            size.height.saturating_sub(2),
        );

        // Sidebar: at least 25 columns, at most 50%, and the main pane keeps 20
        let requested_width = (inner_area.width * sidebar_width_percent) / 100;
        let max_width = inner_area.width / 2;
        let sidebar_width = requested_width
            .max(25)
            .min(max_width)
            .min(inner_area.width.saturating_sub(20));

        let vertical = RatLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Tabs + clock
                Constraint::Min(1),    // Content
                Constraint::Length(3), // Filters
                Constraint::Length(1), // Status
            ])
            .split(inner_area);

        let horizontal = RatLayout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(sidebar_width), Constraint::Min(1)])
            .split(vertical[1]);

        Self {
            inner_area,
            tabs_area: vertical[0],
            content_area: vertical[1],
            sidebar_area: horizontal[0],
            main_area: horizontal[1],
            filters_area: vertical[2],
            status_area: vertical[3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sidebar_respects_bounds() {
        let layout = Layout::calculate(Rect::new(0, 0, 102, 40), 35);
        assert_eq!(layout.inner_area.width, 100);
        assert_eq!(layout.sidebar_area.width, 35);
        assert_eq!(layout.sidebar_area.width + layout.main_area.width, 100);
        assert_eq!(layout.tabs_area.height, 1);
        assert_eq!(layout.status_area.height, 1);

        let narrow = Layout::calculate(Rect::new(0, 0, 62, 20), 10);
        assert_eq!(narrow.sidebar_area.width, 25);

        let greedy = Layout::calculate(Rect::new(0, 0, 102, 40), 90);
        assert_eq!(greedy.sidebar_area.width, 50);
    }
}
