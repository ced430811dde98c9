//! Project version selector dialog component

use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::super::super::app::App;
use super::super::super::layout::LayoutManager;
use crate::utils::datetime;

/// Project version selector dialog component
pub struct VersionSelectorDialog;

impl VersionSelectorDialog {
    /// Render the version selector dialog
    pub fn render(f: &mut Frame, app: &App) {
        if !app.selecting_version {
            return;
        }

        let area = LayoutManager::centered_rect(60, 40, f.area());
        f.render_widget(Clear, area);

        let icons = app.icons.ui();
        let mut lines: Vec<Line> = Vec::new();
        if app.project_versions.is_empty() {
            lines.push(Line::from("No versions available"));
        }
        for (index, version) in app.project_versions.iter().enumerate() {
            let selected = index == app.selected_version_index;
            let marker = if version.is_active { icons.version_active } else { " " };
            let style = if selected {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else if version.is_active {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{marker} "), Style::default().fg(Color::Green)),
                Span::styled(version.name.clone(), style),
                Span::styled(
                    format!(
                        "  {}",
                        datetime::format_timestamp(version.created_at.as_deref())
                    ),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "j/k: move, Enter: activate, Esc: close",
            Style::default().fg(Color::Yellow),
        )));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Project versions")
                    .title_alignment(Alignment::Center),
            )
            .alignment(Alignment::Left);
        f.render_widget(paragraph, area);
    }
}
