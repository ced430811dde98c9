//! Budget activation dialog component

use ratatui::{
    layout::Alignment,
    prelude::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::super::super::app::{ActivationField, App};
use super::super::super::layout::LayoutManager;

/// Budget activation dialog component
pub struct BudgetActivationDialog;

impl BudgetActivationDialog {
    /// Render the budget activation dialog
    pub fn render(f: &mut Frame, app: &App) {
        if !app.activating_budget {
            return;
        }

        let dialog_area = LayoutManager::centered_rect(60, 30, f.area());
        f.render_widget(Clear, dialog_area);

        let field_height = 3;

        // Category input
        let category_rect = Rect::new(
            dialog_area.x + 2,
            dialog_area.y + 1,
            dialog_area.width.saturating_sub(4),
            field_height,
        );
        let category_text = if app.activation_category.is_empty() {
            "Enter category (e.g. electrical): "
        } else {
            &app.activation_category
        };
        let category_style = if app.activation_field == ActivationField::Category {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::White)
        };
        let category_paragraph = Paragraph::new(category_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Category")
                    .title_alignment(Alignment::Center),
            )
            .style(category_style)
            .alignment(Alignment::Left);
        f.render_widget(category_paragraph, category_rect);

        // Amount input (optional)
        let amount_rect = Rect::new(
            dialog_area.x + 2,
            dialog_area.y + 1 + field_height + 1,
            dialog_area.width.saturating_sub(4),
            field_height,
        );
        let amount_text = if app.activation_amount.is_empty() {
            "Optional amount: "
        } else {
            &app.activation_amount
        };
        let amount_style = if app.activation_field == ActivationField::Amount {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::White)
        };
        let amount_paragraph = Paragraph::new(amount_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Amount")
                    .title_alignment(Alignment::Center),
            )
            .style(amount_style)
            .alignment(Alignment::Left);
        f.render_widget(amount_paragraph, amount_rect);

        // Instructions
        let instructions_y = dialog_area.y + 1 + (field_height + 1) * 2;
        if instructions_y < dialog_area.y + dialog_area.height {
            let instructions_rect = Rect::new(
                dialog_area.x + 2,
                instructions_y,
                dialog_area.width.saturating_sub(4),
                2,
            );
            let instructions = "Enter: verify eligibility, Tab: switch field, Esc: cancel";
            let instructions_paragraph = Paragraph::new(instructions)
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center);
            f.render_widget(instructions_paragraph, instructions_rect);
        }
    }
}
