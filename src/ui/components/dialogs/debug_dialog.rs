//! Debug log dialog component

use ratatui::{
    layout::Alignment,
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::super::super::app::App;
use super::super::super::layout::LayoutManager;
use crate::logger::Logger;

/// Debug log dialog component
pub struct DebugDialog;

impl DebugDialog {
    /// Render the debug log dialog with the newest entries on top
    pub fn render(f: &mut Frame, app: &App, logger: &Logger) {
        if !app.show_debug {
            return;
        }

        let area = LayoutManager::centered_rect(80, 60, f.area());
        f.render_widget(Clear, area);

        let logs = logger.get_logs();
        let visible_height = area.height.saturating_sub(2) as usize;
        let text = if logs.is_empty() {
            "No log entries".to_string()
        } else {
            logs.iter()
                .take(visible_height)
                .cloned()
                .collect::<Vec<_>>()
                .join("\n")
        };

        let paragraph = Paragraph::new(text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Debug logs  (c: clear, Esc: close)")
                    .title_alignment(Alignment::Center),
            )
            .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, area);
    }
}
