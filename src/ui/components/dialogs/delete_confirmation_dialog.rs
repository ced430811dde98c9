//! Document delete confirmation dialog component

use ratatui::{
    layout::Alignment,
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::super::super::app::App;
use super::super::super::layout::LayoutManager;

/// Document delete confirmation dialog component
pub struct DeleteConfirmationDialog;

impl DeleteConfirmationDialog {
    /// Render the delete confirmation dialog
    pub fn render(f: &mut Frame, app: &App) {
        if let Some(document_id) = &app.delete_document_confirmation {
            let document_name = app
                .documents
                .iter()
                .find(|d| &d.remote_id == document_id)
                .map(|d| d.name.clone())
                .unwrap_or_else(|| document_id.clone());

            let area = LayoutManager::centered_rect(60, 25, f.area());
            f.render_widget(Clear, area);

            let text = format!(
                "Delete document?\n\n\"{document_name}\"\n\nThis action cannot be undone!\n\nPress 'y' to confirm or 'n'/Esc to cancel",
            );

            let paragraph = Paragraph::new(text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title("Confirm delete")
                        .title_alignment(Alignment::Center),
                )
                .style(Style::default().fg(Color::Red))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            f.render_widget(paragraph, area);
        }
    }
}
