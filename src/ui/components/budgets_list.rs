//! Budget list component

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use super::super::app::App;
use crate::constants::{STATUS_ACCEPTED, STATUS_DRAFT, STATUS_PRESENTED, STATUS_REJECTED};

/// Main panel listing the budgets of the selected project
pub struct BudgetsList;

impl BudgetsList {
    pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
        let icons = app.icons.budget();

        let items: Vec<ListItem> = app
            .budgets
            .iter()
            .map(|budget| {
                let (icon, color) = match budget.status.as_str() {
                    STATUS_ACCEPTED => (icons.accepted, Color::Green),
                    STATUS_REJECTED => (icons.rejected, Color::Red),
                    STATUS_PRESENTED => (icons.presented, Color::Yellow),
                    STATUS_DRAFT => (icons.draft, Color::White),
                    _ => (icons.draft, Color::DarkGray),
                };

                let mut spans = vec![
                    Span::styled(format!("{icon} "), Style::default().fg(color)),
                    Span::raw(budget.category.clone()),
                    Span::styled(
                        format!("  [{}]", budget.status),
                        Style::default().fg(color),
                    ),
                    Span::styled(
                        format!("  {}", budget.supplier_remote_id),
                        Style::default().fg(Color::DarkGray),
                    ),
                ];
                if app.show_amounts {
                    if let Some(amount) = budget.amount {
                        spans.push(Span::styled(
                            format!("  {amount:.2}"),
                            Style::default().fg(Color::Cyan),
                        ));
                    }
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let title = match app.selected_project() {
            Some(project) => format!("Budgets - {}", project.name),
            None => "Budgets".to_string(),
        };

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");

        app.budget_list_state.select(Some(app.selected_budget_index));
        f.render_stateful_widget(list, area, &mut app.budget_list_state);
    }
}
