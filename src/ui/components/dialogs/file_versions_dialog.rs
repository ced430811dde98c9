//! File version metadata dialog component

use ratatui::{
    layout::Alignment,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::super::super::app::App;
use super::super::super::layout::LayoutManager;
use crate::utils::datetime;

/// File versions dialog component
pub struct FileVersionsDialog;

impl FileVersionsDialog {
    /// Render the file versions dialog
    pub fn render(f: &mut Frame, app: &App) {
        if !app.showing_file_versions {
            return;
        }

        let area = LayoutManager::centered_rect(70, 50, f.area());
        f.render_widget(Clear, area);

        let title = match app.selected_document() {
            Some(document) => format!("Versions - {}", document.name),
            None => "File versions".to_string(),
        };

        let mut lines: Vec<Line> = Vec::new();
        if app.file_versions.is_empty() {
            lines.push(Line::from("No version history"));
        }
        for version in &app.file_versions {
            let mut spans = vec![
                Span::styled(
                    format!("v{:<3}", version.version),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(format!(
                    " {}",
                    datetime::format_timestamp(version.uploaded_at.as_deref())
                )),
            ];
            if let Some(author) = &version.author {
                spans.push(Span::styled(
                    format!("  {author}"),
                    Style::default().fg(Color::White),
                ));
            }
            if let Some(notes) = &version.notes {
                spans.push(Span::styled(
                    format!("  {notes}"),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            lines.push(Line::from(spans));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Esc: close",
            Style::default().fg(Color::Yellow),
        )));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .title_alignment(Alignment::Center),
            )
            .alignment(Alignment::Left);
        f.render_widget(paragraph, area);
    }
}
