//! Status bar component

use ratatui::{
    layout::Alignment,
    style::{Color, Style},
    widgets::{Block, Paragraph},
    Frame,
};

use super::super::app::{App, MainView};

/// Status bar component
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar
    pub fn render(f: &mut Frame, area: ratatui::layout::Rect, app: &App) {
        let status_text = if app.loading {
            "Loading projects...".to_string()
        } else if app.refreshing {
            "Refreshing project data...".to_string()
        } else if app.verifying {
            "Verifying budget eligibility...".to_string()
        } else {
            let view_keys = match app.main_view {
                MainView::Budgets => "a: activate budget",
                MainView::Documents => "u: upload • f: versions • x: delete",
                MainView::Viewer => "space: toggle • +/-: opacity",
                MainView::Weather => "w: refresh reading",
            };
            format!(
                "b/g/o/w: views • Tab: project • V: versions • r: refresh • {view_keys} • ?: help • q: quit"
            )
        };

        let status_color = if app.refreshing || app.verifying {
            Color::Yellow
        } else if app.error_message.is_some() {
            Color::Red
        } else {
            Color::Gray
        };

        let status_bar = Paragraph::new(status_text)
            .block(Block::default())
            .alignment(Alignment::Center)
            .style(Style::default().fg(status_color));

        f.render_widget(status_bar, area);
    }
}
