//! Graphic documentation panel

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use super::super::app::App;
use crate::utils::{datetime, human_size};

/// Main panel listing graphic documentation for the selected project
pub struct DocumentsPanel;

impl DocumentsPanel {
    pub fn render(f: &mut Frame, area: Rect, app: &App) {
        let icons = app.icons.ui();

        let items: Vec<ListItem> = app
            .documents
            .iter()
            .enumerate()
            .map(|(index, document)| {
                let selected = index == app.selected_document_index;
                let name_style = if selected {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                let mut spans = vec![
                    Span::raw(format!("{} ", icons.document)),
                    Span::styled(document.name.clone(), name_style),
                ];
                if app.show_sizes {
                    spans.push(Span::styled(
                        format!("  {}", human_size(document.size_bytes)),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                spans.push(Span::styled(
                    format!("  {}", datetime::format_timestamp(document.uploaded_at.as_deref())),
                    Style::default().fg(Color::DarkGray),
                ));
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Documentation  (u: upload, f: versions, x: delete)"),
        );

        f.render_widget(list, area);
    }
}
