//! 3D-viewer overlay panel

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem},
    Frame,
};

use super::super::app::App;

/// Main panel listing overlay models with an opacity gauge for the selection
pub struct ViewerPanel;

impl ViewerPanel {
    pub fn render(f: &mut Frame, area: Rect, app: &App) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(area);

        let icons = app.icons.ui();

        let items: Vec<ListItem> = app
            .overlays
            .iter()
            .enumerate()
            .map(|(index, overlay)| {
                let selected = index == app.selected_overlay_index;
                let visibility_icon = if overlay.visible {
                    icons.overlay_visible
                } else {
                    icons.overlay_hidden
                };
                let name_style = if selected {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else if overlay.visible {
                    Style::default().fg(Color::White)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{visibility_icon} ")),
                    Span::styled(overlay.name.clone(), name_style),
                    Span::styled(
                        format!("  {}%", overlay.opacity),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Viewer overlays  (space: toggle, +/-: opacity)"),
        );
        f.render_widget(list, chunks[0]);

        if let Some(overlay) = app.selected_overlay() {
            let gauge = Gauge::default()
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!("Opacity - {}", overlay.name)),
                )
                .gauge_style(Style::default().fg(Color::Cyan))
                .percent(u16::from(overlay.opacity));
            f.render_widget(gauge, chunks[1]);
        }
    }
}
