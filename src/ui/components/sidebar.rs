//! Project sidebar component

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use super::super::app::App;

/// Sidebar listing the available projects
pub struct Sidebar;

impl Sidebar {
    pub fn render(f: &mut Frame, area: Rect, app: &App) {
        let icons = app.icons.ui();

        let items: Vec<ListItem> = app
            .projects
            .iter()
            .enumerate()
            .map(|(index, project)| {
                let selected = index == app.selected_project_index;
                let style = if selected {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                let mut spans = vec![
                    Span::raw(format!("{} ", icons.project)),
                    Span::styled(project.name.clone(), style),
                ];
                if let Some(location) = &project.location {
                    spans.push(Span::styled(
                        format!(" ({location})"),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Projects")
                .title_style(Style::default().add_modifier(Modifier::BOLD)),
        );

        f.render_widget(list, area);
    }
}
