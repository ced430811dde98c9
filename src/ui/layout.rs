//! Layout management and calculations

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Manages layout calculations and constraints for the UI
pub struct LayoutManager;

impl LayoutManager {
    /// Calculate the main layout areas (sidebar+panel on top, status bar below)
    #[must_use]
    pub fn main_layout(area: Rect) -> Vec<Rect> {
        let top_height = area.height.saturating_sub(1);
        let top_area = Rect::new(0, 0, area.width, top_height);
        let status_area = Rect::new(0, top_height, area.width, 1);

        vec![top_area, status_area]
    }

    /// Calculate the top pane layout (sidebar + main panel side by side)
    #[must_use]
    pub fn top_pane_layout(area: Rect, sidebar_width: u16) -> Vec<Rect> {
        let sidebar = std::cmp::min(area.width / 3, sidebar_width);
        let main = area.width.saturating_sub(sidebar);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(sidebar), Constraint::Length(main)])
            .split(area)
            .to_vec()
    }

    /// Calculate a centered rectangle within the given area
    #[must_use]
    pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
        let popup_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(r);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(popup_layout[1])[1]
    }

    /// Calculate a centered rectangle with percentage width and fixed line height
    #[must_use]
    pub fn centered_rect_lines(percent_x: u16, height_lines: u16, r: Rect) -> Rect {
        let popup_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(height_lines),
                Constraint::Min(0),
            ])
            .split(r);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(popup_layout[1])[1]
    }

    /// Calculate help panel dimensions based on screen size
    #[must_use]
    pub fn help_panel_dimensions(screen_width: u16, screen_height: u16) -> (u16, u16) {
        let help_width = if screen_width < 80 { 70 } else { 80 };
        let help_height = if screen_height < 40 { 60 } else { 70 };
        (help_width, help_height)
    }
}
