//! Budget eligibility verification dialog
//!
//! Shows the five checks progressively as the sequencer walks through them,
//! then the terminal outcome with the follow-up actions available.

use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::super::super::app::App;
use super::super::super::layout::LayoutManager;
use crate::eligibility::CheckState;

/// Verification dialog component
pub struct VerificationDialog;

impl VerificationDialog {
    /// Render the verification dialog
    pub fn render(f: &mut Frame, app: &App) {
        if !app.verifying {
            return;
        }

        let area = LayoutManager::centered_rect_lines(64, 14, f.area());
        f.render_widget(Clear, area);

        let icons = app.icons.check();
        let mut lines: Vec<Line> = Vec::new();

        if let Some(request) = &app.verification_request {
            lines.push(Line::from(Span::styled(
                format!("Category \"{}\"", request.category),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
        }

        for check in &app.verification_checks {
            let (icon, color) = match check.state {
                CheckState::Pending => (icons.pending, Color::DarkGray),
                CheckState::Checking => (icons.checking, Color::Yellow),
                CheckState::Success => (icons.success, Color::Green),
                CheckState::Error => (icons.error, Color::Red),
            };
            let mut spans = vec![
                Span::styled(format!("{icon} "), Style::default().fg(color)),
                Span::styled(check.id.label(), Style::default().fg(color)),
            ];
            if let Some(message) = &check.message {
                spans.push(Span::styled(
                    format!("  {message}"),
                    Style::default().fg(Color::Gray),
                ));
            }
            lines.push(Line::from(spans));
        }

        lines.push(Line::from(""));
        match &app.verification_outcome {
            None => {
                lines.push(Line::from(Span::styled(
                    "Checking eligibility... (Esc: cancel)",
                    Style::default().fg(Color::Yellow),
                )));
            }
            Some(outcome) if outcome.can_proceed => {
                lines.push(Line::from(Span::styled(
                    "Eligible. Enter: activate budget request, Esc: close",
                    Style::default().fg(Color::Green),
                )));
            }
            Some(outcome) => {
                let reason = outcome
                    .blocking_reason
                    .as_deref()
                    .unwrap_or("Not eligible");
                lines.push(Line::from(Span::styled(
                    reason.to_string(),
                    Style::default().fg(Color::Red),
                )));
                let hint = if outcome.credit_deficit() > 0 {
                    format!(
                        "p: purchase {} credits, R: retry, Esc: close",
                        outcome.credit_deficit()
                    )
                } else {
                    "R: retry, Esc: close".to_string()
                };
                lines.push(Line::from(Span::styled(hint, Style::default().fg(Color::Yellow))));
            }
        }

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Budget eligibility")
                    .title_alignment(Alignment::Center),
            )
            .alignment(Alignment::Left);

        f.render_widget(paragraph, area);
    }
}
