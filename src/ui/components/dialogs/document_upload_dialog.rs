//! Document upload dialog component

use ratatui::{
    layout::Alignment,
    prelude::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::super::super::app::App;
use super::super::super::layout::LayoutManager;

/// Document upload dialog component
pub struct DocumentUploadDialog;

impl DocumentUploadDialog {
    /// Render the document upload dialog
    pub fn render(f: &mut Frame, app: &App) {
        if !app.uploading_document {
            return;
        }

        let dialog_area = LayoutManager::centered_rect(60, 20, f.area());
        f.render_widget(Clear, dialog_area);

        let input_rect = Rect::new(
            dialog_area.x + 2,
            dialog_area.y + 1,
            dialog_area.width.saturating_sub(4),
            3,
        );
        let input_text = if app.upload_path.is_empty() {
            "Path to file: "
        } else {
            &app.upload_path
        };
        let input_paragraph = Paragraph::new(input_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Upload document")
                    .title_alignment(Alignment::Center),
            )
            .style(Style::default().fg(Color::Green))
            .alignment(Alignment::Left);
        f.render_widget(input_paragraph, input_rect);

        let instructions_rect = Rect::new(
            dialog_area.x + 2,
            dialog_area.y + 5,
            dialog_area.width.saturating_sub(4),
            2,
        );
        let instructions = "Press Enter to upload, Esc to cancel";
        let instructions_paragraph = Paragraph::new(instructions)
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center);
        f.render_widget(instructions_paragraph, instructions_rect);
    }
}
